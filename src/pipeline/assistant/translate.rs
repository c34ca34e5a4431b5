use std::sync::Arc;
use std::time::Duration;

use crate::llm::{call_bounded, Translator};

pub const ENGLISH: &str = "en";

/// Whether a language code means English (`en`, `EN`, `en-US`, ...).
pub fn is_english(language: &str) -> bool {
    let lang = language.trim().to_ascii_lowercase();
    lang.is_empty() || lang == ENGLISH || lang.starts_with("en-")
}

/// Wraps a `Translator` so failures never reach the caller: the input text
/// comes back unchanged instead.
#[derive(Clone)]
pub struct TranslationAdapter {
    translator: Arc<dyn Translator>,
    budget: Duration,
}

impl TranslationAdapter {
    pub fn new(translator: Arc<dyn Translator>, budget: Duration) -> Self {
        Self { translator, budget }
    }

    pub async fn to_english(&self, text: &str, source: &str) -> String {
        if is_english(source) {
            return text.to_string();
        }
        self.translate(text, source, ENGLISH).await
    }

    pub async fn from_english(&self, text: &str, target: &str) -> String {
        if is_english(target) {
            return text.to_string();
        }
        self.translate(text, ENGLISH, target).await
    }

    async fn translate(&self, text: &str, source: &str, target: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }
        let translator = Arc::clone(&self.translator);
        let (owned, src, tgt) = (text.to_string(), source.to_string(), target.to_string());

        match call_bounded(self.budget, move || translator.translate(&owned, &src, &tgt)).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(source, target, error = %e, "Translation failed, using original text");
                text.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::{FailingTranslator, MockTranslator};
    use crate::llm::ServiceError;

    struct StuckTranslator;

    impl Translator for StuckTranslator {
        fn translate(&self, _: &str, _: &str, _: &str) -> Result<String, ServiceError> {
            std::thread::sleep(Duration::from_millis(300));
            Ok("late".into())
        }
    }

    #[test]
    fn english_variants() {
        assert!(is_english("en"));
        assert!(is_english("EN-us"));
        assert!(is_english(""));
        assert!(!is_english("te"));
    }

    #[tokio::test]
    async fn english_is_identity_without_calls() {
        let mock = Arc::new(MockTranslator::new());
        let adapter = TranslationAdapter::new(mock.clone(), Duration::from_secs(1));
        assert_eq!(adapter.to_english("hello", "en").await, "hello");
        assert_eq!(adapter.from_english("hello", "en").await, "hello");
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn translates_both_directions() {
        let mock = Arc::new(MockTranslator::new().with_entry("నమస్కారం", "hello"));
        let adapter = TranslationAdapter::new(mock.clone(), Duration::from_secs(1));
        assert_eq!(adapter.to_english("నమస్కారం", "te").await, "hello");
        assert_eq!(adapter.from_english("hi", "te").await, "[te] hi");
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn failure_returns_original_text() {
        let adapter = TranslationAdapter::new(Arc::new(FailingTranslator), Duration::from_secs(1));
        assert_eq!(adapter.to_english("నమస్కారం", "te").await, "నమస్కారం");
        assert_eq!(adapter.from_english("hi", "te").await, "hi");
    }

    #[tokio::test]
    async fn timeout_returns_original_text() {
        let adapter = TranslationAdapter::new(Arc::new(StuckTranslator), Duration::from_millis(20));
        assert_eq!(adapter.from_english("hi", "te").await, "hi");
    }
}
