use serde::{Deserialize, Serialize};

use super::{value_to_text, ExtraFields};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub number: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub relation: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl EmergencyContact {
    /// `"(name: Ravi, number: 98480, relation: brother)"` plus any extra fields.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        for (label, value) in [
            ("name", &self.name),
            ("number", &self.number),
            ("relation", &self.relation),
        ] {
            if !value.trim().is_empty() {
                parts.push(format!("{label}: {}", value.trim()));
            }
        }
        for (key, value) in &self.extra {
            let text = value_to_text(value);
            if !text.is_empty() {
                parts.push(format!("{key}: {text}"));
            }
        }
        format!("({})", parts.join(", "))
    }
}
