//! Shared types for the HTTP API layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::{Deserialize, Deserializer, Serialize};

use crate::core_state::CoreState;
use crate::pipeline::assistant::ENGLISH;

/// Languages a session may select.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "te", "hi", "ta", "kn", "ml", "mr", "bn", "gu", "ur"];

/// Sessions kept before expired ones are swept.
const SESSION_SWEEP_THRESHOLD: usize = 1000;

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
/// Wraps `CoreState` plus the in-memory session table.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
    pub sessions: Arc<Mutex<SessionStore>>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        let ttl = core.config.session_ttl;
        Self {
            core,
            sessions: Arc::new(Mutex::new(SessionStore::new(ttl))),
        }
    }

    /// Language of the session, `en` when unknown.
    pub fn session_language(&self, session: &SessionContext) -> String {
        match self.sessions.lock() {
            Ok(mut sessions) => sessions.language(&session.session_id),
            Err(_) => {
                tracing::error!("Session store lock poisoned");
                ENGLISH.to_string()
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Session context: injected by the session middleware
// ═══════════════════════════════════════════════════════════

/// Browser session identity, taken from (or issued as) a cookie.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
}

// ═══════════════════════════════════════════════════════════
// Session store: per-session language preference
// ═══════════════════════════════════════════════════════════

struct SessionEntry {
    language: String,
    last_seen: Instant,
}

/// In-memory language preferences keyed by session id.
/// Entries idle longer than the TTL are forgotten.
pub struct SessionStore {
    sessions: HashMap<String, SessionEntry>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl,
        }
    }

    pub fn language(&mut self, session_id: &str) -> String {
        let now = Instant::now();
        match self.sessions.get_mut(session_id) {
            Some(entry) if now.duration_since(entry.last_seen) < self.ttl => {
                entry.last_seen = now;
                entry.language.clone()
            }
            Some(_) => {
                self.sessions.remove(session_id);
                ENGLISH.to_string()
            }
            None => ENGLISH.to_string(),
        }
    }

    pub fn set_language(&mut self, session_id: &str, language: &str) {
        if self.sessions.len() > SESSION_SWEEP_THRESHOLD {
            self.cleanup();
        }
        self.sessions.insert(
            session_id.to_string(),
            SessionEntry {
                language: language.to_string(),
                last_seen: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn cleanup(&mut self) {
        let now = Instant::now();
        self.sessions
            .retain(|_, entry| now.duration_since(entry.last_seen) < self.ttl);
    }
}

/// Normalize and check a language code against `SUPPORTED_LANGUAGES`.
pub fn validate_language(raw: &str) -> Option<String> {
    let code = raw.trim().to_ascii_lowercase();
    let primary = code.split(['-', '_']).next().unwrap_or_default();
    SUPPORTED_LANGUAGES
        .contains(&primary)
        .then(|| primary.to_string())
}

// ═══════════════════════════════════════════════════════════
// Common response bodies
// ═══════════════════════════════════════════════════════════

/// `{"status": "success", "message": ...}`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}

/// Success body that also returns the affected item id.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub status: &'static str,
    pub message: String,
    pub id: String,
}

/// Accept an item id given as a JSON string or number; blank means none.
pub fn deserialize_flexible_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => {
            let s = s.trim();
            Ok((!s.is_empty()).then(|| s.to_string()))
        }
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "edit_id must be a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct WithId {
        #[serde(default, deserialize_with = "deserialize_flexible_id")]
        edit_id: Option<String>,
    }

    fn parse(json: &str) -> Result<Option<String>, serde_json::Error> {
        serde_json::from_str::<WithId>(json).map(|w| w.edit_id)
    }

    #[test]
    fn flexible_id_accepts_strings_and_numbers() {
        assert_eq!(parse(r#"{"edit_id": "abc"}"#).unwrap().as_deref(), Some("abc"));
        assert_eq!(parse(r#"{"edit_id": 3}"#).unwrap().as_deref(), Some("3"));
        assert_eq!(parse(r#"{"edit_id": null}"#).unwrap(), None);
        assert_eq!(parse(r#"{"edit_id": "  "}"#).unwrap(), None);
        assert_eq!(parse(r#"{}"#).unwrap(), None);
        assert!(parse(r#"{"edit_id": [1]}"#).is_err());
    }

    #[test]
    fn language_defaults_to_english() {
        let mut store = SessionStore::new(Duration::from_secs(60));
        assert_eq!(store.language("nobody"), "en");
        store.set_language("s1", "te");
        assert_eq!(store.language("s1"), "te");
        assert_eq!(store.language("s2"), "en");
    }

    #[test]
    fn expired_sessions_fall_back_to_english() {
        let mut store = SessionStore::new(Duration::from_millis(10));
        store.set_language("s1", "te");
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(store.language("s1"), "en");
        assert!(store.is_empty());
    }

    #[test]
    fn cleanup_runs_when_store_grows() {
        let mut store = SessionStore::new(Duration::from_millis(1));
        for i in 0..=SESSION_SWEEP_THRESHOLD {
            store.set_language(&format!("s{i}"), "te");
        }
        std::thread::sleep(Duration::from_millis(5));
        store.set_language("fresh", "hi");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn language_validation() {
        assert_eq!(validate_language("TE").as_deref(), Some("te"));
        assert_eq!(validate_language("en-US").as_deref(), Some("en"));
        assert_eq!(validate_language("klingon"), None);
        assert_eq!(validate_language(""), None);
    }
}
