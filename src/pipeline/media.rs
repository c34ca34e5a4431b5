//! Image and audio understanding on top of the vision and speech services.
//!
//! OCR and identification degrade instead of failing: empty text and
//! `NO_DESCRIPTION` respectively. Transcription reports its error so the
//! endpoint can tell the user the service is unavailable.

use std::sync::Arc;
use std::time::Duration;

use crate::llm::{call_bounded, ServiceError, SpeechToText, VisionClient};

pub const NO_DESCRIPTION: &str = "No description available.";

const OCR_SYSTEM_PROMPT: &str = "\
You are a text extractor. Copy all visible text from the image exactly as written, \
preserving line breaks. Do not add commentary.";

const OCR_PROMPT: &str = "\
Extract all visible text from this image. If there is no text, reply with nothing.";

const IDENTIFY_SYSTEM_PROMPT: &str = "\
You are a helpful wellness assistant describing images for a user. Be factual and brief. \
If the image shows a medicine, food, or a visible skin or injury concern, say what it \
appears to be and add one general safety note. Do not diagnose.";

const IDENTIFY_PROMPT: &str = "Describe what this image shows in 2 to 4 sentences.";

/// Accepted image uploads.
pub fn is_image_mime(mime: &str) -> bool {
    matches!(
        mime,
        "image/png" | "image/jpeg" | "image/jpg" | "image/webp" | "image/gif" | "image/heic" | "image/heif"
    )
}

/// Accepted audio uploads.
pub fn is_audio_mime(mime: &str) -> bool {
    matches!(
        mime,
        "audio/wav"
            | "audio/x-wav"
            | "audio/wave"
            | "audio/flac"
            | "audio/x-flac"
            | "audio/ogg"
            | "audio/opus"
            | "audio/webm"
            | "audio/mpeg"
            | "audio/mp3"
            | "audio/amr"
    )
}

/// Text found in the image, or an empty string when extraction fails.
pub async fn extract_text(
    vision: Arc<dyn VisionClient>,
    image: Vec<u8>,
    mime_type: String,
    budget: Duration,
) -> String {
    let size = image.len();
    let result = call_bounded(budget, move || {
        vision.describe_image(OCR_SYSTEM_PROMPT, OCR_PROMPT, &image, &mime_type)
    })
    .await;

    match result {
        Ok(text) => text.trim().to_string(),
        Err(ServiceError::EmptyResponse) => String::new(),
        Err(e) => {
            tracing::warn!(image_size = size, error = %e, "OCR failed");
            String::new()
        }
    }
}

/// Short description of the image, or `NO_DESCRIPTION` when it fails.
pub async fn identify_image(
    vision: Arc<dyn VisionClient>,
    image: Vec<u8>,
    mime_type: String,
    budget: Duration,
) -> String {
    let size = image.len();
    let result = call_bounded(budget, move || {
        vision.describe_image(IDENTIFY_SYSTEM_PROMPT, IDENTIFY_PROMPT, &image, &mime_type)
    })
    .await;

    match result {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => NO_DESCRIPTION.to_string(),
        Err(e) => {
            tracing::warn!(image_size = size, error = %e, "Image identification failed");
            NO_DESCRIPTION.to_string()
        }
    }
}

/// Transcript of the clip in `language`.
pub async fn transcribe(
    speech: Arc<dyn SpeechToText>,
    audio: Vec<u8>,
    mime_type: String,
    language: String,
    budget: Duration,
) -> Result<String, ServiceError> {
    let size = audio.len();
    let result = call_bounded(budget, move || speech.transcribe(&audio, &mime_type, &language)).await;
    if let Err(e) = &result {
        tracing::warn!(audio_size = size, error = %e, "Transcription failed");
    }
    result.map(|t| t.trim().to_string())
}
