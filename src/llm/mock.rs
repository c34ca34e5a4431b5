//! In-process stand-ins for the external services.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::{LlmGenerate, ServiceError, SpeechToText, Translator, VisionClient};

/// Returns a fixed reply and records every `(system, prompt)` pair.
pub struct MockLlm {
    response: String,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockLlm {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl LlmGenerate for MockLlm {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, ServiceError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));
        Ok(self.response.clone())
    }
}

pub struct FailingLlm;

impl LlmGenerate for FailingLlm {
    fn generate(&self, _system: &str, _prompt: &str) -> Result<String, ServiceError> {
        Err(ServiceError::Connection("mock".into()))
    }
}

/// Panics inside the worker, for the apology path.
pub struct PanickingLlm;

impl LlmGenerate for PanickingLlm {
    fn generate(&self, _system: &str, _prompt: &str) -> Result<String, ServiceError> {
        panic!("model client crashed")
    }
}

/// Sleeps before answering, for timeout paths.
pub struct SlowLlm(pub Duration);

impl LlmGenerate for SlowLlm {
    fn generate(&self, _system: &str, _prompt: &str) -> Result<String, ServiceError> {
        std::thread::sleep(self.0);
        Ok("too late".into())
    }
}

/// Looks inputs up in a dictionary; unknown text comes back as `[target] text`.
#[derive(Default)]
pub struct MockTranslator {
    dictionary: HashMap<String, String>,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, from: &str, to: &str) -> Self {
        self.dictionary.insert(from.to_string(), to.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Translator for MockTranslator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, ServiceError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), source.to_string(), target.to_string()));
        Ok(self
            .dictionary
            .get(text)
            .cloned()
            .unwrap_or_else(|| format!("[{target}] {text}")))
    }
}

pub struct FailingTranslator;

impl Translator for FailingTranslator {
    fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String, ServiceError> {
        Err(ServiceError::Upstream {
            status: 503,
            body: "unavailable".into(),
        })
    }
}

pub struct MockVision {
    response: String,
}

impl MockVision {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

impl VisionClient for MockVision {
    fn describe_image(
        &self,
        _system: &str,
        _prompt: &str,
        _image: &[u8],
        _mime_type: &str,
    ) -> Result<String, ServiceError> {
        Ok(self.response.clone())
    }
}

pub struct FailingVision;

impl VisionClient for FailingVision {
    fn describe_image(
        &self,
        _system: &str,
        _prompt: &str,
        _image: &[u8],
        _mime_type: &str,
    ) -> Result<String, ServiceError> {
        Err(ServiceError::Timeout(30))
    }
}

/// Echoes the requested language so tests can check it was passed through.
pub struct MockSpeech;

impl SpeechToText for MockSpeech {
    fn transcribe(&self, audio: &[u8], _mime_type: &str, language: &str) -> Result<String, ServiceError> {
        Ok(format!("{language}: {} bytes", audio.len()))
    }
}

pub struct FailingSpeech;

impl SpeechToText for FailingSpeech {
    fn transcribe(&self, _audio: &[u8], _mime_type: &str, _language: &str) -> Result<String, ServiceError> {
        Err(ServiceError::NotConfigured("Google Speech-to-Text"))
    }
}
