use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;

use crate::llm::{call_bounded, LlmGenerate};
use crate::models::ProfileDocument;
use crate::store::{ChatLog, ProfileStore};

use super::classify::classify_intent;
use super::prompt::{compose, finalize_reply, APOLOGY_MESSAGE};
use super::translate::TranslationAdapter;
use super::types::{AskInput, AskOutcome, PromptPlan};
use super::{AssistantError, MAX_MESSAGE_CHARS};

/// Handles one `/ask` exchange end to end.
///
/// Holds no conversation state of its own: both documents are reloaded on
/// every call.
#[derive(Clone)]
pub struct Assistant {
    llm: Arc<dyn LlmGenerate>,
    translation: TranslationAdapter,
    profiles: ProfileStore,
    chat_log: ChatLog,
    completion_budget: Duration,
}

impl Assistant {
    pub fn new(
        llm: Arc<dyn LlmGenerate>,
        translation: TranslationAdapter,
        profiles: ProfileStore,
        chat_log: ChatLog,
        completion_budget: Duration,
    ) -> Self {
        Self {
            llm,
            translation,
            profiles,
            chat_log,
            completion_budget,
        }
    }

    /// Answer a message and log the exchange.
    ///
    /// Service failures degrade (untranslated text, intent fallback); only
    /// invalid input is an error.
    pub async fn ask(&self, input: AskInput) -> Result<AskOutcome, AssistantError> {
        let message = input.message.trim();
        if message.is_empty() {
            return Err(AssistantError::EmptyMessage);
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(AssistantError::MessageTooLong {
                max: MAX_MESSAGE_CHARS,
            });
        }

        let start = Instant::now();
        let english = self.translation.to_english(message, &input.language).await;
        let intent = classify_intent(&english);

        let document = if intent.uses_profile() {
            self.profiles.load()
        } else {
            ProfileDocument::default()
        };
        let plan = compose(intent, &english, &document);
        let generated = self.complete(&plan).await;
        let reply_en = finalize_reply(&plan, generated.as_deref());
        let reply = self.translation.from_english(&reply_en, &input.language).await;

        let logged = self
            .chat_log
            .record(input.edit_id.as_deref(), message, &reply, Utc::now());

        tracing::info!(
            intent = %intent,
            language = %input.language,
            message_len = message.len(),
            generated = generated.is_some(),
            edited = logged.edited,
            elapsed_ms = %start.elapsed().as_millis(),
            "Answered message"
        );

        Ok(AskOutcome {
            reply,
            intent,
            entry_id: logged.entry.id,
            edited: logged.edited,
        })
    }

    /// The fixed apology in the session language, English if translation fails.
    pub async fn apology(&self, language: &str) -> String {
        self.translation.from_english(APOLOGY_MESSAGE, language).await
    }

    async fn complete(&self, plan: &PromptPlan) -> Option<String> {
        let llm = Arc::clone(&self.llm);
        let (system, prompt) = (plan.system.clone(), plan.prompt.clone());

        match call_bounded(self.completion_budget, move || llm.generate(&system, &prompt)).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(intent = %plan.intent, error = %e, "Completion failed, using fallback");
                None
            }
        }
    }
}
