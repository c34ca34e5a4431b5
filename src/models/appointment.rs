use serde::{Deserialize, Serialize};

use super::ExtraFields;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub department: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub doctor: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub issue: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub time: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Appointment {
    /// Whether this booking occupies `doctor`'s slot list on `date`.
    pub fn books(&self, department: &str, doctor: &str, date: &str) -> bool {
        self.department.trim().eq_ignore_ascii_case(department.trim())
            && self.doctor.trim().eq_ignore_ascii_case(doctor.trim())
            && self.date.trim() == date.trim()
    }
}
