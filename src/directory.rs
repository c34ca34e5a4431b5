//! Doctor directory and appointment slot availability.
//!
//! The directory is static: departments, doctors, locations and each
//! doctor's daily consultation slots. Bookings come from the profile
//! document's appointments.

use serde::Serialize;

use crate::models::ProfileDocument;

// ─── Types ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Doctor {
    pub name: &'static str,
    pub department: &'static str,
    pub specialty: &'static str,
    pub location: &'static str,
    pub phone: &'static str,
    pub slots: &'static [&'static str],
}

/// Free and taken slots for one doctor on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotAvailability {
    pub all_slots: Vec<String>,
    pub booked_slots: Vec<String>,
}

// ─── Directory ────────────────────────────────────────────────────────────────

const MORNING: &[&str] = &["09:00", "09:30", "10:00", "10:30", "11:00", "11:30"];
const AFTERNOON: &[&str] = &["14:00", "14:30", "15:00", "15:30", "16:00", "16:30"];
const FULL_DAY: &[&str] = &[
    "09:00", "10:00", "11:00", "12:00", "14:00", "15:00", "16:00", "17:00",
];

pub static DOCTORS: &[Doctor] = &[
    Doctor {
        name: "Dr. Anil Kumar",
        department: "General Medicine",
        specialty: "General Physician",
        location: "Hyderabad",
        phone: "+91-40-2345-6789",
        slots: FULL_DAY,
    },
    Doctor {
        name: "Dr. Lakshmi Reddy",
        department: "General Medicine",
        specialty: "Family Medicine",
        location: "Vijayawada",
        phone: "+91-866-245-1122",
        slots: MORNING,
    },
    Doctor {
        name: "Dr. Suresh Rao",
        department: "Cardiology",
        specialty: "Cardiologist",
        location: "Hyderabad",
        phone: "+91-40-2456-7890",
        slots: MORNING,
    },
    Doctor {
        name: "Dr. Meena Iyer",
        department: "Cardiology",
        specialty: "Cardiologist",
        location: "Chennai",
        phone: "+91-44-2811-3344",
        slots: AFTERNOON,
    },
    Doctor {
        name: "Dr. Priya Sharma",
        department: "Dermatology",
        specialty: "Dermatologist",
        location: "Hyderabad",
        phone: "+91-40-2567-8901",
        slots: AFTERNOON,
    },
    Doctor {
        name: "Dr. Ravi Teja",
        department: "Orthopedics",
        specialty: "Orthopedic Surgeon",
        location: "Visakhapatnam",
        phone: "+91-891-255-6677",
        slots: MORNING,
    },
    Doctor {
        name: "Dr. Kavitha Nair",
        department: "Pediatrics",
        specialty: "Pediatrician",
        location: "Bengaluru",
        phone: "+91-80-2233-4455",
        slots: FULL_DAY,
    },
    Doctor {
        name: "Dr. Farhan Ali",
        department: "Psychiatry",
        specialty: "Psychiatrist",
        location: "Hyderabad",
        phone: "+91-40-2678-9012",
        slots: AFTERNOON,
    },
    Doctor {
        name: "Dr. Sneha Patil",
        department: "Gynecology",
        specialty: "Gynecologist",
        location: "Pune",
        phone: "+91-20-2612-7788",
        slots: MORNING,
    },
    Doctor {
        name: "Dr. Venkat Raman",
        department: "ENT",
        specialty: "ENT Specialist",
        location: "Chennai",
        phone: "+91-44-2499-0011",
        slots: FULL_DAY,
    },
];

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn filter_value(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Doctors whose specialty or department matches `specialty` and whose
/// location matches `location`. Absent filters match everything.
pub fn find_doctors(specialty: Option<&str>, location: Option<&str>) -> Vec<&'static Doctor> {
    let specialty = filter_value(specialty);
    let location = filter_value(location);
    DOCTORS
        .iter()
        .filter(|d| {
            specialty.map_or(true, |s| {
                contains_ignore_case(d.specialty, s) || contains_ignore_case(d.department, s)
            })
        })
        .filter(|d| location.map_or(true, |l| contains_ignore_case(d.location, l)))
        .collect()
}

pub fn find_doctor(department: &str, doctor: &str) -> Option<&'static Doctor> {
    DOCTORS.iter().find(|d| {
        d.department.eq_ignore_ascii_case(department.trim())
            && d.name.eq_ignore_ascii_case(doctor.trim())
    })
}

/// Slots for `doctor` on `date`, with those already booked marked.
/// `None` when the doctor is not in the directory.
pub fn available_slots(
    doc: &ProfileDocument,
    department: &str,
    doctor: &str,
    date: &str,
) -> Option<SlotAvailability> {
    let entry = find_doctor(department, doctor)?;
    let all_slots: Vec<String> = entry.slots.iter().map(|s| s.to_string()).collect();

    let mut booked_slots: Vec<String> = doc
        .appointments
        .iter()
        .filter(|a| a.books(department, doctor, date))
        .map(|a| a.time.trim().to_string())
        .filter(|t| all_slots.contains(t))
        .collect();
    booked_slots.sort();
    booked_slots.dedup();

    Some(SlotAvailability {
        all_slots,
        booked_slots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Appointment;

    #[test]
    fn no_filters_returns_everyone() {
        assert_eq!(find_doctors(None, None).len(), DOCTORS.len());
        assert_eq!(find_doctors(Some("  "), Some("")).len(), DOCTORS.len());
    }

    #[test]
    fn filters_by_specialty_and_location() {
        let found = find_doctors(Some("cardio"), Some("hyderabad"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Dr. Suresh Rao");
    }

    #[test]
    fn department_name_also_matches_specialty_filter() {
        let found = find_doctors(Some("pediatrics"), None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].specialty, "Pediatrician");
    }

    #[test]
    fn unknown_specialty_is_empty() {
        assert!(find_doctors(Some("astrology"), None).is_empty());
    }

    #[test]
    fn booked_slots_come_from_appointments() {
        let mut doc = ProfileDocument::default();
        for (date, time) in [("2024-06-01", "09:30"), ("2024-06-01", "09:30"), ("2024-06-02", "10:00")] {
            doc.appointments.push(Appointment {
                department: "Cardiology".into(),
                doctor: "Dr. Suresh Rao".into(),
                date: date.into(),
                time: time.into(),
                ..Default::default()
            });
        }

        let slots = available_slots(&doc, "cardiology", "dr. suresh rao", "2024-06-01").unwrap();
        assert_eq!(slots.all_slots.len(), MORNING.len());
        assert_eq!(slots.booked_slots, vec!["09:30".to_string()]);
    }

    #[test]
    fn unknown_doctor_has_no_slots() {
        assert!(available_slots(&ProfileDocument::default(), "Cardiology", "Dr. Nobody", "2024-06-01").is_none());
    }
}
