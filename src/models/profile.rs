use serde::{Deserialize, Serialize};

use super::ExtraFields;

/// Personal details. Every field is optional; unknown keys land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(
        default,
        deserialize_with = "super::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub dob: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub gender: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub blood_group: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub conditions: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl UserProfile {
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.dob, &self.gender, &self.blood_group, &self.conditions]
            .iter()
            .all(|f| super::non_empty(f).is_none())
            && self.extra.is_empty()
    }
}
