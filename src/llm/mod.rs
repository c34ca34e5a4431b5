//! External AI services: text completion, image understanding, translation
//! and speech recognition.
//!
//! Every service is a blocking trait so HTTP clients stay simple. Async code
//! reaches them through `call_bounded`, which runs the call on the blocking
//! pool and caps how long the request waits for it.

pub mod gemini;
#[cfg(test)]
pub mod mock;
pub mod speech;
pub mod translate;

pub use gemini::GeminiClient;
pub use speech::GoogleSpeechClient;
pub use translate::GoogleTranslateClient;

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0} is not configured (missing API key)")]
    NotConfigured(&'static str),

    #[error("Cannot reach {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Service returned error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Service returned an empty response")]
    EmptyResponse,

    #[error("Worker failed: {0}")]
    Worker(String),
}

/// Text completion: `(system, prompt) -> text`.
pub trait LlmGenerate: Send + Sync {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, ServiceError>;
}

/// Multimodal completion over a single image.
pub trait VisionClient: Send + Sync {
    fn describe_image(
        &self,
        system: &str,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, ServiceError>;
}

/// Text translation between ISO 639-1 language codes.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, ServiceError>;
}

/// Speech recognition for a short audio clip.
pub trait SpeechToText: Send + Sync {
    fn transcribe(&self, audio: &[u8], mime_type: &str, language: &str)
        -> Result<String, ServiceError>;
}

/// Run a blocking service call off the async workers, waiting at most `budget`.
///
/// On timeout the worker thread finishes on its own (bounded by the HTTP
/// client's timeout); its result is discarded. A panic in `call` is resumed
/// on the caller so it is not mistaken for a service outage.
pub async fn call_bounded<T, F>(budget: Duration, call: F) -> Result<T, ServiceError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::time::timeout(budget, tokio::task::spawn_blocking(call)).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) if join_error.is_panic() => {
            std::panic::resume_unwind(join_error.into_panic())
        }
        Ok(Err(join_error)) => Err(ServiceError::Worker(join_error.to_string())),
        Err(_) => Err(ServiceError::Timeout(budget.as_secs())),
    }
}

// ──────────────────────────────────────────────
// Shared HTTP plumbing
// ──────────────────────────────────────────────

pub(crate) fn build_http_client(timeout_secs: u64) -> Result<reqwest::blocking::Client, ServiceError> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ServiceError::HttpClient(e.to_string()))
}

pub(crate) fn map_send_error(endpoint: &str, timeout_secs: u64, e: reqwest::Error) -> ServiceError {
    if e.is_connect() {
        ServiceError::Connection(endpoint.to_string())
    } else if e.is_timeout() {
        ServiceError::Timeout(timeout_secs)
    } else {
        ServiceError::HttpClient(e.to_string())
    }
}

/// Fail on non-2xx and decode the JSON body.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::blocking::Response,
) -> Result<T, ServiceError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(ServiceError::Upstream {
            status: status.as_u16(),
            body,
        });
    }
    response
        .json()
        .map_err(|e| ServiceError::ResponseParsing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bounded_call_returns_result() {
        let result = call_bounded(Duration::from_secs(1), || Ok::<_, ServiceError>(7)).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn bounded_call_times_out() {
        let result = call_bounded(Duration::from_millis(20), || {
            std::thread::sleep(Duration::from_millis(300));
            Ok::<_, ServiceError>(())
        })
        .await;
        assert!(matches!(result, Err(ServiceError::Timeout(_))));
    }

    #[tokio::test]
    async fn bounded_call_resumes_panics_on_the_caller() {
        let caller = tokio::spawn(async {
            let _: Result<(), _> = call_bounded(Duration::from_secs(1), || panic!("boom")).await;
        });
        let join_error = caller.await.unwrap_err();
        assert!(join_error.is_panic());
    }

    #[tokio::test]
    async fn bounded_call_passes_errors_through() {
        let result: Result<(), _> =
            call_bounded(Duration::from_secs(1), || Err(ServiceError::EmptyResponse)).await;
        assert!(matches!(result, Err(ServiceError::EmptyResponse)));
    }
}
