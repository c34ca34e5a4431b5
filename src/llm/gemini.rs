//! Gemini `generateContent` REST client.
//!
//! One client serves both text completion and image understanding; images
//! travel inline as base64 parts.

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::{build_http_client, map_send_error, read_json, LlmGenerate, ServiceError, VisionClient};
use crate::config::AppConfig;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
            client: build_http_client(timeout_secs)?,
            timeout_secs,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ServiceError> {
        Self::new(
            GEMINI_API_BASE,
            config.google_api_key.clone(),
            &config.model,
            config.completion_timeout.as_secs(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn send(&self, request: &GenerateRequest<'_>) -> Result<String, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ServiceError::NotConfigured("Gemini"))?;
        let url = self.endpoint();
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .map_err(|e| map_send_error(&self.base_url, self.timeout_secs, e))?;

        let parsed: GenerateResponse = read_json(response)?;
        let text = extract_text(parsed)?;

        tracing::debug!(
            model = %self.model,
            elapsed_ms = %start.elapsed().as_millis(),
            reply_len = text.len(),
            "Gemini completion finished"
        );
        Ok(text)
    }
}

// ──────────────────────────────────────────────
// Wire types
// ──────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateRequest<'a> {
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
struct InlineData<'a> {
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    data: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

fn build_request<'a>(system: &'a str, parts: Vec<Part<'a>>) -> GenerateRequest<'a> {
    let system_instruction = (!system.trim().is_empty()).then(|| Content {
        role: None,
        parts: vec![Part::Text { text: system }],
    });
    GenerateRequest {
        system_instruction,
        contents: vec![Content {
            role: Some("user"),
            parts,
        }],
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> Result<String, ServiceError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(ServiceError::EmptyResponse);
    }
    Ok(text.to_string())
}

impl LlmGenerate for GeminiClient {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, ServiceError> {
        let request = build_request(system, vec![Part::Text { text: prompt }]);
        self.send(&request)
    }
}

impl VisionClient for GeminiClient {
    fn describe_image(
        &self,
        system: &str,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, ServiceError> {
        let _span = tracing::info_span!(
            "gemini_vision",
            model = %self.model,
            image_size = image.len(),
        )
        .entered();

        let data = base64::engine::general_purpose::STANDARD.encode(image);
        let request = build_request(
            system,
            vec![
                Part::Inline {
                    inline_data: InlineData { mime_type, data },
                },
                Part::Text { text: prompt },
            ],
        );
        self.send(&request)
    }
}
