//! Google Cloud Translation (v2) REST client.

use serde::{Deserialize, Serialize};

use super::{build_http_client, map_send_error, read_json, ServiceError, Translator};
use crate::config::AppConfig;

pub const TRANSLATE_API_BASE: &str = "https://translation.googleapis.com";

pub struct GoogleTranslateClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GoogleTranslateClient {
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
            TRANSLATE_API_BASE,
            config.google_api_key.clone(),
            config.translate_timeout.as_secs(),
        )
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

fn first_translation(response: TranslateResponse) -> Result<String, ServiceError> {
    response
        .data
        .translations
        .into_iter()
        .next()
        .map(|t| t.translated_text)
        .filter(|t| !t.trim().is_empty())
        .ok_or(ServiceError::EmptyResponse)
}

impl Translator for GoogleTranslateClient {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ServiceError::NotConfigured("Google Translate"))?;
        let url = format!("{}/language/translate/v2", self.base_url);
        let body = TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .map_err(|e| map_send_error(&self.base_url, self.timeout_secs, e))?;

        first_translation(read_json(response)?)
    }
}
