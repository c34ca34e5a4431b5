pub mod appointment;
pub mod contact;
pub mod conversation;
pub mod medication;
pub mod profile;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use appointment::Appointment;
pub use contact::EmergencyContact;
pub use conversation::{ChatLogEntry, GREETING_ID};
pub use medication::Medication;
pub use profile::UserProfile;

/// Free-form fields kept alongside the typed ones so documents written by
/// other clients survive a load/save cycle untouched.
pub type ExtraFields = BTreeMap<String, Value>;

/// The persisted user document: profile plus three item lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default, alias = "emergency")]
    pub emergency_contacts: Vec<EmergencyContact>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

/// Render a JSON value as plain text for prompts and listings.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Text field that also accepts numbers, booleans and lists, as written by
/// older clients that stored form input as-is. `null` reads as empty.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => value_to_text(&other),
    })
}

/// Optional form of `lenient_string`; `null` stays `None`.
pub(crate) fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(value_to_text(&other)),
    })
}

/// Trimmed, non-empty view of an optional text field.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
