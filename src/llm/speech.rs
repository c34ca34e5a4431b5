//! Google Cloud Speech-to-Text (v1) REST client.

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::{build_http_client, map_send_error, read_json, ServiceError, SpeechToText};
use crate::config::AppConfig;

pub const SPEECH_API_BASE: &str = "https://speech.googleapis.com";

pub struct GoogleSpeechClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GoogleSpeechClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout_secs: u64) -> Result<Self, ServiceError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: build_http_client(timeout_secs)?,
            timeout_secs,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ServiceError> {
        Self::new(
            SPEECH_API_BASE,
            config.google_api_key.clone(),
            config.completion_timeout.as_secs(),
        )
    }
}

/// BCP-47 code the recognizer expects for a short language code.
pub fn speech_language_code(language: &str) -> String {
    match language.trim().to_ascii_lowercase().as_str() {
        "" | "en" => "en-US".to_string(),
        "te" => "te-IN".to_string(),
        "hi" => "hi-IN".to_string(),
        "ta" => "ta-IN".to_string(),
        other => other.to_string(),
    }
}

/// Encoding hints for containers the recognizer cannot sniff.
/// WAV and FLAC carry their own headers and need none.
fn encoding_for(mime_type: &str) -> (Option<&'static str>, Option<u32>) {
    match mime_type {
        "audio/ogg" | "audio/opus" => (Some("OGG_OPUS"), Some(48_000)),
        "audio/webm" => (Some("WEBM_OPUS"), Some(48_000)),
        "audio/mpeg" | "audio/mp3" => (Some("MP3"), None),
        "audio/amr" => (Some("AMR"), Some(8_000)),
        _ => (None, None),
    }
}

#[derive(Serialize)]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig {
    language_code: String,
    enable_automatic_punctuation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    encoding: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample_rate_hertz: Option<u32>,
}

#[derive(Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
}

fn build_request(audio: &[u8], mime_type: &str, language: &str) -> RecognizeRequest {
    let (encoding, sample_rate_hertz) = encoding_for(mime_type);
    RecognizeRequest {
        config: RecognitionConfig {
            language_code: speech_language_code(language),
            enable_automatic_punctuation: true,
            encoding,
            sample_rate_hertz,
        },
        audio: RecognitionAudio {
            content: base64::engine::general_purpose::STANDARD.encode(audio),
        },
    }
}

/// Best alternative of each result, joined. Silence yields an empty string.
fn join_transcript(response: RecognizeResponse) -> String {
    response
        .results
        .into_iter()
        .filter_map(|r| r.alternatives.into_iter().next())
        .map(|a| a.transcript.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

impl SpeechToText for GoogleSpeechClient {
    fn transcribe(&self, audio: &[u8], mime_type: &str, language: &str) -> Result<String, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ServiceError::NotConfigured("Google Speech-to-Text"))?;
        let url = format!("{}/v1/speech:recognize", self.base_url);
        let body = build_request(audio, mime_type, language);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .map_err(|e| map_send_error(&self.base_url, self.timeout_secs, e))?;

        Ok(join_transcript(read_json(response)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn language_codes_map_to_regions() {
        assert_eq!(speech_language_code("te"), "te-IN");
        assert_eq!(speech_language_code("EN"), "en-US");
        assert_eq!(speech_language_code(""), "en-US");
        assert_eq!(speech_language_code("fr-FR"), "fr-fr");
    }

    #[test]
    fn webm_request_carries_encoding() {
        let request = build_request(b"abc", "audio/webm", "te");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["config"],
            json!({
                "languageCode": "te-IN",
                "enableAutomaticPunctuation": true,
                "encoding": "WEBM_OPUS",
                "sampleRateHertz": 48000
            })
        );
        assert_eq!(value["audio"]["content"], "YWJj");
    }

    #[test]
    fn wav_request_lets_service_detect_encoding() {
        let value = serde_json::to_value(build_request(b"", "audio/wav", "en")).unwrap();
        assert!(value["config"].get("encoding").is_none());
    }

    #[test]
    fn transcript_joins_best_alternatives() {
        let response: RecognizeResponse = serde_json::from_value(json!({
            "results": [
                {"alternatives": [{"transcript": "I have a ", "confidence": 0.9}, {"transcript": "eye half a"}]},
                {"alternatives": [{"transcript": "headache"}]}
            ]
        }))
        .unwrap();
        assert_eq!(join_transcript(response), "I have a headache");
    }

    #[test]
    fn silence_is_empty_transcript() {
        let response: RecognizeResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(join_transcript(response), "");
    }
}
