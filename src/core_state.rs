//! Application state shared by every request.
//!
//! `CoreState` owns the storage handles and the external service clients.
//! It is built once at startup, wrapped in `Arc`, and never mutated.

use std::sync::Arc;

use thiserror::Error;

use crate::config::AppConfig;
use crate::llm::{
    GeminiClient, GoogleSpeechClient, GoogleTranslateClient, LlmGenerate, ServiceError,
    SpeechToText, Translator, VisionClient,
};
use crate::pipeline::assistant::{Assistant, TranslationAdapter};
use crate::store::{ChatLog, ProfileStore, UploadStore};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Service client setup failed: {0}")]
    Service(#[from] ServiceError),

    #[error("Cannot prepare data directory: {0}")]
    Io(#[from] std::io::Error),
}

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    pub config: AppConfig,
    pub profiles: ProfileStore,
    pub chat_log: ChatLog,
    pub uploads: UploadStore,
    pub llm: Arc<dyn LlmGenerate>,
    pub vision: Arc<dyn VisionClient>,
    pub translator: Arc<dyn Translator>,
    pub speech: Arc<dyn SpeechToText>,
}

impl CoreState {
    /// Production state: Google-backed services, files under `config.data_dir`.
    pub fn from_config(config: AppConfig) -> Result<Self, CoreError> {
        std::fs::create_dir_all(&config.data_dir)?;

        if config.google_api_key.is_none() {
            tracing::warn!("GOOGLE_API_KEY is not set; AI replies will use built-in fallbacks");
        }

        let gemini = Arc::new(GeminiClient::from_config(&config)?);
        let translator = Arc::new(GoogleTranslateClient::from_config(&config)?);
        let speech = Arc::new(GoogleSpeechClient::from_config(&config)?);

        tracing::info!(
            model = %gemini.model(),
            data_dir = %config.data_dir.display(),
            "Services configured"
        );

        Ok(Self::with_services(
            config,
            gemini.clone(),
            gemini,
            translator,
            speech,
        ))
    }

    /// State with explicit service implementations.
    pub fn with_services(
        config: AppConfig,
        llm: Arc<dyn LlmGenerate>,
        vision: Arc<dyn VisionClient>,
        translator: Arc<dyn Translator>,
        speech: Arc<dyn SpeechToText>,
    ) -> Self {
        Self {
            profiles: ProfileStore::new(config.profile_path()),
            chat_log: ChatLog::new(config.chat_log_path()),
            uploads: UploadStore::new(config.uploads_dir()),
            config,
            llm,
            vision,
            translator,
            speech,
        }
    }

    pub fn translation(&self) -> TranslationAdapter {
        TranslationAdapter::new(Arc::clone(&self.translator), self.config.translate_timeout)
    }

    pub fn assistant(&self) -> Assistant {
        Assistant::new(
            Arc::clone(&self.llm),
            self.translation(),
            self.profiles.clone(),
            self.chat_log.clone(),
            self.config.completion_timeout,
        )
    }
}
