use std::path::{Path, PathBuf};

use crate::models::{Appointment, EmergencyContact, Medication, ProfileDocument, UserProfile};

use super::json_store::{load_document, save_document};
use super::StoreError;

/// An addressable entry in one of the profile document's lists.
pub trait ListItem: Clone + Send + 'static {
    /// Human-readable kind used in messages ("Medication").
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn list(doc: &ProfileDocument) -> &Vec<Self>;
    fn list_mut(doc: &mut ProfileDocument) -> &mut Vec<Self>;

    /// Reject items missing their required fields.
    fn validate(&self) -> Result<(), String>;

    /// Whether `self` cannot coexist with `other` in the same list.
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }

    /// Message reported when `conflicts_with` rejects an item.
    fn conflict_message(&self) -> String {
        format!("{} already exists", Self::KIND)
    }
}

impl ListItem for Medication {
    const KIND: &'static str = "Medication";

    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn list(doc: &ProfileDocument) -> &Vec<Self> {
        &doc.medications
    }
    fn list_mut(doc: &mut ProfileDocument) -> &mut Vec<Self> {
        &mut doc.medications
    }
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Medication name is required".into());
        }
        Ok(())
    }
}

impl ListItem for EmergencyContact {
    const KIND: &'static str = "Emergency contact";

    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn list(doc: &ProfileDocument) -> &Vec<Self> {
        &doc.emergency_contacts
    }
    fn list_mut(doc: &mut ProfileDocument) -> &mut Vec<Self> {
        &mut doc.emergency_contacts
    }
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() || self.number.trim().is_empty() {
            return Err("Contact name and number are required".into());
        }
        Ok(())
    }
}

impl ListItem for Appointment {
    const KIND: &'static str = "Appointment";

    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn list(doc: &ProfileDocument) -> &Vec<Self> {
        &doc.appointments
    }
    fn list_mut(doc: &mut ProfileDocument) -> &mut Vec<Self> {
        &mut doc.appointments
    }
    fn validate(&self) -> Result<(), String> {
        let missing = [
            ("department", &self.department),
            ("doctor", &self.doctor),
            ("date", &self.date),
            ("time", &self.time),
        ]
        .into_iter()
        .find(|(_, v)| v.trim().is_empty());
        if let Some((field, _)) = missing {
            return Err(format!("Appointment {field} is required"));
        }
        Ok(())
    }
    fn conflicts_with(&self, other: &Self) -> bool {
        other.books(&self.department, &self.doctor, &self.date)
            && other.time.trim() == self.time.trim()
    }
    fn conflict_message(&self) -> String {
        format!(
            "{} is already booked at {} on {}",
            self.doctor.trim(),
            self.time.trim(),
            self.date.trim()
        )
    }
}

/// Error when `item` clashes with an entry other than the one at `skip`.
fn check_conflicts<T: ListItem>(
    items: &[T],
    item: &T,
    skip: Option<usize>,
) -> Result<(), StoreError> {
    let clash = items
        .iter()
        .enumerate()
        .any(|(i, other)| Some(i) != skip && item.conflicts_with(other));
    if clash {
        return Err(StoreError::Conflict(item.conflict_message()));
    }
    Ok(())
}

/// Resolve a path key to a list position.
///
/// The key is matched against item ids first. Only when no id matches is a
/// non-negative integer key read as a legacy position.
pub fn resolve_position<T: ListItem>(items: &[T], key: &str) -> Option<usize> {
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    if let Some(pos) = items.iter().position(|item| item.id() == key) {
        return Some(pos);
    }
    key.parse::<usize>().ok().filter(|i| *i < items.len())
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Assign ids to items written before ids existed. Returns how many were set.
fn assign_missing_ids(doc: &mut ProfileDocument) -> usize {
    fn fill<T: ListItem>(items: &mut [T]) -> usize {
        let mut count = 0;
        for item in items.iter_mut().filter(|i| i.id().trim().is_empty()) {
            item.set_id(new_id());
            count += 1;
        }
        count
    }
    fill(&mut doc.medications) + fill(&mut doc.emergency_contacts) + fill(&mut doc.appointments)
}

/// The user profile document (`user_data.json`).
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. Items without ids get one and the document is re-saved.
    pub fn load(&self) -> ProfileDocument {
        let mut doc: ProfileDocument = load_document(&self.path);
        let migrated = assign_missing_ids(&mut doc);
        if migrated > 0 {
            tracing::info!(count = migrated, "Assigned ids to legacy profile items");
            if let Err(e) = self.save(&doc) {
                tracing::warn!(error = %e, "Cannot persist migrated item ids");
            }
        }
        doc
    }

    pub fn save(&self, doc: &ProfileDocument) -> Result<(), StoreError> {
        save_document(&self.path, doc)
    }

    /// Replace the profile section wholesale.
    pub fn save_profile(&self, profile: UserProfile) -> Result<(), StoreError> {
        let mut doc = self.load();
        doc.profile = profile;
        self.save(&doc)
    }

    /// Append `item` under a fresh id and return the stored copy.
    pub fn add<T: ListItem>(&self, mut item: T) -> Result<T, StoreError> {
        let mut doc = self.load();
        check_conflicts(T::list(&doc), &item, None)?;
        item.set_id(new_id());
        T::list_mut(&mut doc).push(item.clone());
        self.save(&doc)?;
        Ok(item)
    }

    /// Replace the item addressed by `key`, keeping its id.
    /// `Ok(None)` when nothing matches; the file is not touched then.
    pub fn update<T: ListItem>(&self, key: &str, mut item: T) -> Result<Option<T>, StoreError> {
        let mut doc = self.load();
        let Some(pos) = resolve_position(T::list(&doc), key) else {
            return Ok(None);
        };
        check_conflicts(T::list(&doc), &item, Some(pos))?;
        let list = T::list_mut(&mut doc);
        item.set_id(list[pos].id().to_string());
        list[pos] = item.clone();
        self.save(&doc)?;
        Ok(Some(item))
    }

    /// Remove the item addressed by `key`. `Ok(None)` when nothing matches.
    pub fn remove<T: ListItem>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let mut doc = self.load();
        let Some(pos) = resolve_position(T::list(&doc), key) else {
            return Ok(None);
        };
        let removed = T::list_mut(&mut doc).remove(pos);
        self.save(&doc)?;
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> (ProfileStore, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        (ProfileStore::new(tmp.path().join("user_data.json")), tmp)
    }

    fn med(name: &str) -> Medication {
        Medication {
            name: name.into(),
            dosage: "10mg".into(),
            ..Default::default()
        }
    }

    #[test]
    fn add_assigns_uuid() {
        let (store, _tmp) = store();
        let saved = store.add(med("Aspirin")).unwrap();
        assert!(uuid::Uuid::parse_str(&saved.id).is_ok());
        assert_eq!(store.load().medications, vec![saved]);
    }

    #[test]
    fn update_by_id_preserves_id() {
        let (store, _tmp) = store();
        let saved = store.add(med("Aspirin")).unwrap();
        let mut replacement = med("Aspirin");
        replacement.dosage = "75mg".into();
        replacement.id = "ignored".into();

        let updated = store.update(&saved.id, replacement).unwrap().unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(store.load().medications[0].dosage, "75mg");
    }

    #[test]
    fn legacy_index_addresses_item_when_no_id_matches() {
        let (store, _tmp) = store();
        store.add(med("First")).unwrap();
        store.add(med("Second")).unwrap();

        let removed: Medication = store.remove("1").unwrap().unwrap();
        assert_eq!(removed.name, "Second");
        assert_eq!(store.load().medications.len(), 1);
    }

    #[test]
    fn out_of_range_index_is_not_found_and_file_untouched() {
        let (store, _tmp) = store();
        store.add(med("Only")).unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        assert!(store.remove::<Medication>("5").unwrap().is_none());
        assert!(store.remove::<Medication>("-1").unwrap().is_none());
        assert!(store.update("nope", med("X")).unwrap().is_none());

        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn id_match_wins_over_index() {
        let items = vec![
            Medication { id: "1".into(), ..med("IdOne") },
            Medication { id: "abc".into(), ..med("Other") },
        ];
        // "1" is both a valid index (Other) and an id (IdOne): the id wins.
        assert_eq!(resolve_position(&items, "1"), Some(0));
        assert_eq!(resolve_position(&items, "abc"), Some(1));
        assert_eq!(resolve_position(&items, ""), None);
    }

    #[test]
    fn legacy_items_get_ids_on_load() {
        let (store, _tmp) = store();
        std::fs::write(
            store.path(),
            json!({
                "profile": {"name": "Asha"},
                "medications": [{"name": "Aspirin"}],
                "emergency": [{"name": "Ravi", "number": "1"}],
                "appointments": []
            })
            .to_string(),
        )
        .unwrap();

        let doc = store.load();
        assert!(!doc.medications[0].id.is_empty());
        assert!(!doc.emergency_contacts[0].id.is_empty());

        // Ids are persisted so they stay stable across loads.
        let again = store.load();
        assert_eq!(again.medications[0].id, doc.medications[0].id);
    }

    #[test]
    fn numeric_legacy_values_load_without_losing_the_document() {
        let (store, tmp) = store();
        std::fs::write(
            store.path(),
            json!({
                "profile": {"name": "Asha"},
                "medications": [{"name": "Metformin", "dosage": 500}],
                "emergency": [{"name": "Ravi", "number": 9848012345u64}],
                "appointments": []
            })
            .to_string(),
        )
        .unwrap();

        let doc = store.load();
        assert_eq!(doc.profile.name.as_deref(), Some("Asha"));
        assert_eq!(doc.medications[0].dosage, "500");
        assert_eq!(doc.emergency_contacts[0].number, "9848012345");

        let quarantined = std::fs::read_dir(tmp.path())
            .unwrap()
            .filter_map(Result::ok)
            .any(|e| e.file_name().to_string_lossy().contains(".corrupt-"));
        assert!(!quarantined);

        // A later save keeps the profile.
        store.add(med("Aspirin")).unwrap();
        assert_eq!(store.load().profile.name.as_deref(), Some("Asha"));
    }

    #[test]
    fn save_profile_replaces_wholesale() {
        let (store, _tmp) = store();
        let mut first = UserProfile {
            name: Some("Asha".into()),
            ..Default::default()
        };
        first.extra.insert("city".into(), json!("Pune"));
        store.save_profile(first).unwrap();

        let second = UserProfile {
            gender: Some("F".into()),
            ..Default::default()
        };
        store.save_profile(second.clone()).unwrap();
        assert_eq!(store.load().profile, second);
    }

    fn appointment(time: &str) -> Appointment {
        Appointment {
            department: "Cardiology".into(),
            doctor: "Dr. Suresh Rao".into(),
            date: "2026-11-02".into(),
            time: time.into(),
            ..Default::default()
        }
    }

    #[test]
    fn double_booking_a_slot_is_rejected() {
        let (store, _tmp) = store();
        store.add(appointment("10:00")).unwrap();

        let mut same_slot = appointment("10:00");
        same_slot.doctor = "dr. suresh rao".into();
        let err = store.add(same_slot).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.load().appointments.len(), 1);

        assert!(store.add(appointment("11:00")).is_ok());
    }

    #[test]
    fn update_may_keep_its_own_slot_but_not_take_another() {
        let (store, _tmp) = store();
        let first = store.add(appointment("10:00")).unwrap();
        let second = store.add(appointment("11:00")).unwrap();

        let mut reworded = appointment("10:00");
        reworded.issue = "follow-up".into();
        assert!(store.update(&first.id, reworded).unwrap().is_some());

        let err = store.update(&second.id, appointment("10:00")).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.load().appointments[1].time, "11:00");
    }

    #[test]
    fn medications_never_conflict() {
        let (store, _tmp) = store();
        store.add(med("Aspirin")).unwrap();
        assert!(store.add(med("Aspirin")).is_ok());
    }

    #[test]
    fn validation_rules() {
        assert!(med("").validate().is_err());
        assert!(med("Aspirin").validate().is_ok());
        assert!(EmergencyContact::default().validate().is_err());
        assert!(Appointment::default().validate().is_err());
    }
}
