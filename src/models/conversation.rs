use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel id of the one-time welcome entry.
pub const GREETING_ID: &str = "greeting";

/// One user/bot exchange in the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatLogEntry {
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub user: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub bot: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub timestamp: String,
}

impl ChatLogEntry {
    pub fn new(id: String, user: &str, bot: &str, at: DateTime<Utc>) -> Self {
        Self {
            id,
            user: user.to_string(),
            bot: bot.to_string(),
            timestamp: at.to_rfc3339(),
        }
    }

    pub fn is_greeting(&self) -> bool {
        self.id == GREETING_ID
    }

    /// Parsed timestamp. Accepts RFC 3339 and naive ISO-8601 (read as UTC).
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| naive.and_utc())
    }
}
