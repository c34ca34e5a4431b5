use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};

use crate::models::{ChatLogEntry, GREETING_ID};

use super::json_store::{load_document, save_document};
use super::StoreError;

/// Maximum entries returned by `history`, greeting included.
pub const HISTORY_MAX_ENTRIES: usize = 50;
/// Only exchanges newer than this are returned by `history`.
pub const HISTORY_WINDOW_DAYS: i64 = 5;

pub const GREETING_TEXT: &str = "Hello! I'm HealthBot, your personal wellness assistant. \
Ask me about symptoms, medicines, nutrition, or how you're feeling. \
I can share general health information, but I'm not a substitute for a doctor.";

/// Result of recording one exchange.
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub entry: ChatLogEntry,
    pub edited: bool,
    pub persisted: bool,
}

/// The conversation transcript (`chat_log.json`).
#[derive(Debug, Clone)]
pub struct ChatLog {
    path: PathBuf,
}

impl ChatLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Vec<ChatLogEntry> {
        load_document(&self.path)
    }

    fn save(&self, entries: &[ChatLogEntry]) -> Result<(), StoreError> {
        save_document(&self.path, &entries)
    }

    /// Record an exchange: overwrite the entry `edit_id` names, or append.
    ///
    /// A failed write is logged and reported via `persisted`; the caller
    /// still gets the entry it would have stored.
    pub fn record(
        &self,
        edit_id: Option<&str>,
        user: &str,
        bot: &str,
        now: DateTime<Utc>,
    ) -> RecordOutcome {
        let mut entries = self.load();
        let (entry, edited) = apply_record(&mut entries, edit_id, user, bot, now);
        let persisted = match self.save(&entries) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to write chat log");
                false
            }
        };
        RecordOutcome {
            entry,
            edited,
            persisted,
        }
    }

    /// Transcript view: greeting first, then recent exchanges, capped.
    /// The greeting is stored on first read.
    pub fn history(&self, now: DateTime<Utc>) -> Vec<ChatLogEntry> {
        let mut entries = self.load();
        if ensure_greeting(&mut entries, now) {
            if let Err(e) = self.save(&entries) {
                tracing::warn!(error = %e, "Failed to store greeting");
            }
        }
        recent_view(&entries, now)
    }

    /// Empty the transcript, optionally seeding a fresh greeting.
    pub fn clear(&self, reseed_greeting: bool, now: DateTime<Utc>) -> Result<(), StoreError> {
        let mut entries = Vec::new();
        if reseed_greeting {
            ensure_greeting(&mut entries, now);
        }
        self.save(&entries)
    }
}

/// Edit the first entry whose id is `edit_id`, else append a new one.
/// The greeting is never overwritten.
pub fn apply_record(
    entries: &mut Vec<ChatLogEntry>,
    edit_id: Option<&str>,
    user: &str,
    bot: &str,
    now: DateTime<Utc>,
) -> (ChatLogEntry, bool) {
    let target = edit_id
        .map(str::trim)
        .filter(|id| !id.is_empty() && *id != GREETING_ID)
        .and_then(|id| entries.iter_mut().find(|e| e.id == id));

    if let Some(existing) = target {
        existing.user = user.to_string();
        existing.bot = bot.to_string();
        existing.timestamp = now.to_rfc3339();
        return (existing.clone(), true);
    }

    let entry = ChatLogEntry::new(uuid::Uuid::new_v4().to_string(), user, bot, now);
    entries.push(entry.clone());
    (entry, false)
}

/// Put the greeting at the front if the log has none. Returns `true` when added.
pub fn ensure_greeting(entries: &mut Vec<ChatLogEntry>, now: DateTime<Utc>) -> bool {
    if entries.iter().any(ChatLogEntry::is_greeting) {
        return false;
    }
    entries.insert(0, ChatLogEntry::new(GREETING_ID.to_string(), "", GREETING_TEXT, now));
    true
}

/// Greeting (exempt from the recency window) followed by the newest
/// exchanges from the last `HISTORY_WINDOW_DAYS`, at most
/// `HISTORY_MAX_ENTRIES` in total.
pub fn recent_view(entries: &[ChatLogEntry], now: DateTime<Utc>) -> Vec<ChatLogEntry> {
    let cutoff = now - Duration::days(HISTORY_WINDOW_DAYS);
    let greeting = entries.iter().find(|e| e.is_greeting()).cloned();

    let recent: Vec<&ChatLogEntry> = entries
        .iter()
        .filter(|e| !e.is_greeting())
        .filter(|e| e.recorded_at().is_some_and(|at| at >= cutoff))
        .collect();

    let budget = HISTORY_MAX_ENTRIES - usize::from(greeting.is_some());
    let skip = recent.len().saturating_sub(budget);

    greeting
        .into_iter()
        .chain(recent.into_iter().skip(skip).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    fn log() -> (ChatLog, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        (ChatLog::new(tmp.path().join("chat_log.json")), tmp)
    }

    fn entry(id: &str, at: DateTime<Utc>) -> ChatLogEntry {
        ChatLogEntry::new(id.into(), "q", "a", at)
    }

    #[test]
    fn append_without_edit_id() {
        let (log, _tmp) = log();
        let first = log.record(None, "hi", "hello", now());
        let second = log.record(None, "again", "sure", now());
        assert!(!first.edited && first.persisted);
        assert_ne!(first.entry.id, second.entry.id);
        assert_eq!(log.load().len(), 2);
    }

    #[test]
    fn edit_overwrites_in_place() {
        let (log, _tmp) = log();
        let first = log.record(None, "hi", "hello", now());
        log.record(None, "next", "reply", now());

        let later = now() + Duration::minutes(5);
        let edited = log.record(Some(&first.entry.id), "hi there", "hello again", later);
        assert!(edited.edited);
        assert_eq!(edited.entry.id, first.entry.id);

        let entries = log.load();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].user, "hi there");
        assert_eq!(entries[0].bot, "hello again");
        assert_eq!(entries[0].timestamp, later.to_rfc3339());
    }

    #[test]
    fn unknown_edit_id_appends() {
        let (log, _tmp) = log();
        log.record(None, "hi", "hello", now());
        let outcome = log.record(Some("missing"), "x", "y", now());
        assert!(!outcome.edited);
        assert_ne!(outcome.entry.id, "missing");
        assert_eq!(log.load().len(), 2);
    }

    #[test]
    fn greeting_cannot_be_edited() {
        let mut entries = Vec::new();
        ensure_greeting(&mut entries, now());
        let (entry, edited) = apply_record(&mut entries, Some(GREETING_ID), "x", "y", now());
        assert!(!edited);
        assert_ne!(entry.id, GREETING_ID);
        assert_eq!(entries[0].bot, GREETING_TEXT);
    }

    #[test]
    fn history_injects_greeting_once() {
        let (log, _tmp) = log();
        let first = log.history(now());
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, GREETING_ID);

        log.history(now());
        let stored = log.load();
        assert_eq!(stored.iter().filter(|e| e.is_greeting()).count(), 1);
    }

    #[test]
    fn history_drops_old_entries_but_keeps_greeting() {
        let old = now() - Duration::days(30);
        let mut entries = vec![entry(GREETING_ID, old), entry("old", old)];
        entries.push(entry("fresh", now() - Duration::days(1)));
        entries.push(ChatLogEntry {
            timestamp: "not a date".into(),
            ..entry("garbled", now())
        });

        let view = recent_view(&entries, now());
        let ids: Vec<&str> = view.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec![GREETING_ID, "fresh"]);
    }

    #[test]
    fn history_is_capped_including_greeting() {
        let mut entries = vec![entry(GREETING_ID, now())];
        for i in 0..60 {
            entries.push(entry(&format!("e{i}"), now() - Duration::minutes(60 - i)));
        }

        let view = recent_view(&entries, now());
        assert_eq!(view.len(), HISTORY_MAX_ENTRIES);
        assert_eq!(view[0].id, GREETING_ID);
        assert_eq!(view[1].id, "e11");
        assert_eq!(view.last().unwrap().id, "e59");
    }

    #[test]
    fn clear_and_reseed() {
        let (log, _tmp) = log();
        log.record(None, "hi", "hello", now());

        log.clear(false, now()).unwrap();
        assert!(log.load().is_empty());

        log.record(None, "hi", "hello", now());
        log.clear(true, now()).unwrap();
        let entries = log.load();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_greeting());
    }
}
