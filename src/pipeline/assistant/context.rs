use crate::models::{non_empty, value_to_text, EmergencyContact, ProfileDocument, UserProfile};

/// Fold the stored profile into a short personalization block.
///
/// Empty sections are left out entirely, so an empty document yields an
/// empty string.
pub fn build_profile_context(doc: &ProfileDocument) -> String {
    let mut sections = Vec::new();

    let profile = profile_section(&doc.profile);
    if !profile.is_empty() {
        sections.push(profile);
    }

    let medications: Vec<String> = doc
        .medications
        .iter()
        .filter(|m| !m.name.trim().is_empty())
        .map(|m| m.summary())
        .collect();
    if !medications.is_empty() {
        sections.push(format!("Current medications: {}.", medications.join(", ")));
    }

    let contacts: Vec<String> = doc
        .emergency_contacts
        .iter()
        .map(EmergencyContact::summary)
        .filter(|s| s != "()")
        .collect();
    if !contacts.is_empty() {
        sections.push(format!("Emergency contacts: {}.", contacts.join(", ")));
    }

    sections.join("\n")
}

fn profile_section(profile: &UserProfile) -> String {
    let mut lines = Vec::new();
    for (label, value) in [
        ("Name", &profile.name),
        ("Date of birth", &profile.dob),
        ("Gender", &profile.gender),
        ("Blood group", &profile.blood_group),
        ("Known conditions", &profile.conditions),
    ] {
        if let Some(v) = non_empty(value) {
            lines.push(format!("{label}: {v}."));
        }
    }

    // BTreeMap iteration is already key-sorted.
    let extra: Vec<String> = profile
        .extra
        .iter()
        .filter_map(|(key, value)| {
            let text = value_to_text(value);
            (!text.is_empty()).then(|| format!("{key} - {text}"))
        })
        .collect();
    if !extra.is_empty() {
        lines.push(format!("Other details: {}.", extra.join(", ")));
    }

    lines.join(" ")
}

/// "Name (number)" of the first contact that has a phone number.
pub fn first_emergency_contact(doc: &ProfileDocument) -> Option<String> {
    doc.emergency_contacts
        .iter()
        .find(|c| !c.number.trim().is_empty())
        .map(|c| {
            let name = c.name.trim();
            if name.is_empty() {
                c.number.trim().to_string()
            } else {
                format!("{name} ({})", c.number.trim())
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Medication;
    use serde_json::json;

    #[test]
    fn empty_document_has_no_context() {
        assert_eq!(build_profile_context(&ProfileDocument::default()), "");
    }

    #[test]
    fn full_document_renders_every_section() {
        let mut doc = ProfileDocument::default();
        doc.profile.name = Some("Asha".into());
        doc.profile.blood_group = Some("O+".into());
        doc.profile.extra.insert("smoker".into(), json!("no"));
        doc.profile.extra.insert("allergies".into(), json!(["penicillin", "dust"]));
        doc.medications.push(Medication {
            name: "Aspirin".into(),
            dosage: "75mg".into(),
            ..Default::default()
        });
        doc.medications.push(Medication {
            name: "Vitamin D".into(),
            ..Default::default()
        });
        doc.emergency_contacts.push(EmergencyContact {
            name: "Ravi".into(),
            number: "98480".into(),
            relation: "brother".into(),
            ..Default::default()
        });

        let context = build_profile_context(&doc);
        assert_eq!(
            context,
            "Name: Asha. Blood group: O+. Other details: allergies - penicillin, dust, smoker - no.\n\
             Current medications: Aspirin (75mg), Vitamin D.\n\
             Emergency contacts: (name: Ravi, number: 98480, relation: brother)."
        );
    }

    #[test]
    fn blank_entries_are_skipped() {
        let mut doc = ProfileDocument::default();
        doc.profile.gender = Some("   ".into());
        doc.medications.push(Medication::default());
        doc.emergency_contacts.push(EmergencyContact::default());
        assert_eq!(build_profile_context(&doc), "");
    }

    #[test]
    fn context_is_deterministic() {
        let mut doc = ProfileDocument::default();
        doc.profile.extra.insert("b".into(), json!(1));
        doc.profile.extra.insert("a".into(), json!(2));
        assert_eq!(build_profile_context(&doc), build_profile_context(&doc));
        assert!(build_profile_context(&doc).contains("a - 2, b - 1"));
    }

    #[test]
    fn first_contact_needs_a_number() {
        let mut doc = ProfileDocument::default();
        assert_eq!(first_emergency_contact(&doc), None);
        doc.emergency_contacts.push(EmergencyContact {
            name: "No Phone".into(),
            ..Default::default()
        });
        doc.emergency_contacts.push(EmergencyContact {
            name: "Ravi".into(),
            number: "98480".into(),
            ..Default::default()
        });
        assert_eq!(first_emergency_contact(&doc).as_deref(), Some("Ravi (98480)"));
    }
}
