use serde::{Deserialize, Serialize};

use super::ExtraFields;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub dosage: String,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub schedule: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Medication {
    /// `"Aspirin (75mg, morning)"`; empty parts are dropped.
    pub fn summary(&self) -> String {
        let details: Vec<&str> = [self.dosage.trim(), self.schedule.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if details.is_empty() {
            self.name.trim().to_string()
        } else {
            format!("{} ({})", self.name.trim(), details.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(name: &str, dosage: &str, schedule: &str) -> Medication {
        Medication {
            name: name.into(),
            dosage: dosage.into(),
            schedule: schedule.into(),
            ..Default::default()
        }
    }

    #[test]
    fn summary_includes_dosage_and_schedule() {
        assert_eq!(med("Aspirin", "75mg", "morning").summary(), "Aspirin (75mg, morning)");
    }

    #[test]
    fn summary_omits_empty_parts() {
        assert_eq!(med("Aspirin", "75mg", "").summary(), "Aspirin (75mg)");
        assert_eq!(med("Aspirin", "", " ").summary(), "Aspirin");
    }
}
