use std::sync::LazyLock;

use regex::Regex;

use super::types::Intent;

const EMERGENCY_KEYWORDS: &[&str] = &[
    "chest pain",
    "shortness of breath",
    "can't breathe",
    "cannot breathe",
    "difficulty breathing",
    "not breathing",
    "heart attack",
    "stroke",
    "seizure",
    "unconscious",
    "fainted",
    "passed out",
    "accident",
    "bleeding",
    "heavy bleeding",
    "severe burn",
    "poison",
    "overdose",
    "choking",
    "suicide",
    "suicidal",
    "kill myself",
];

const MENTAL_HEALTH_KEYWORDS: &[&str] = &[
    "stress",
    "stressful",
    "anxiety",
    "anxious",
    "depression",
    "depressed",
    "sad",
    "sadness",
    "lonely",
    "loneliness",
    "panic",
    "overwhelm",
    "burnout",
    "burned out",
    "mental health",
    "mood",
    "worry",
    "worried",
    "hopeless",
    "insomnia",
    "can't sleep",
];

const NUTRITION_KEYWORDS: &[&str] = &[
    "diet",
    "nutrition",
    "nutritious",
    "food",
    "eat",
    "meal",
    "breakfast",
    "snack",
    "calorie",
    "protein",
    "vitamin",
    "sugar",
    "hydration",
    "water intake",
    "weight loss",
    "lose weight",
    "gain weight",
    "exercise",
    "exercising",
    "workout",
    "fitness",
    "yoga",
    "lifestyle",
    "healthy habit",
];

const QUIZ_OR_TIP_KEYWORDS: &[&str] = &[
    "quiz",
    "trivia",
    "tip",
    "health tip",
    "daily tip",
    "fun fact",
    "did you know",
    "test my knowledge",
];

const MEDICINE_KEYWORDS: &[&str] = &[
    "medicine",
    "medication",
    "drug",
    "tablet",
    "pill",
    "capsule",
    "syrup",
    "ointment",
    "dose",
    "dosage",
    "prescription",
    "side effect",
    "antibiotic",
    "paracetamol",
    "acetaminophen",
    "ibuprofen",
    "aspirin",
    "metformin",
    "insulin",
];

const SYMPTOM_KEYWORDS: &[&str] = &[
    "symptom",
    "headache",
    "migraine",
    "fever",
    "cough",
    "cold",
    "flu",
    "sore throat",
    "runny nose",
    "sneeze",
    "sneezing",
    "pain",
    "ache",
    "body ache",
    "stomach ache",
    "cramp",
    "nausea",
    "nauseous",
    "vomit",
    "diarrhea",
    "dizzy",
    "dizziness",
    "fatigue",
    "fatigued",
    "tired",
    "rash",
    "itch",
    "swelling",
    "infection",
    "sick",
];

/// A keyword rule: any keyword, optionally suffixed, on word boundaries.
struct IntentRule {
    intent: Intent,
    regex: Regex,
}

/// Evaluated in order; the first match wins.
static RULES: LazyLock<Vec<IntentRule>> = LazyLock::new(|| {
    vec![
        rule(Intent::Emergency, EMERGENCY_KEYWORDS),
        rule(Intent::MentalHealth, MENTAL_HEALTH_KEYWORDS),
        rule(Intent::Nutrition, NUTRITION_KEYWORDS),
        rule(Intent::QuizOrTip, QUIZ_OR_TIP_KEYWORDS),
        rule(Intent::MedicineInfo, MEDICINE_KEYWORDS),
        rule(Intent::SymptomCheck, SYMPTOM_KEYWORDS),
    ]
});

fn rule(intent: Intent, keywords: &[&str]) -> IntentRule {
    let alternation = keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    IntentRule {
        intent,
        regex: Regex::new(&format!(r"\b(?:{alternation})(?:s|es|ed|ing)?\b"))
            .expect("Invalid intent keyword pattern"),
    }
}

/// Lower-case, fold typographic apostrophes, collapse whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .replace(['\u{2018}', '\u{2019}', '\u{02BC}'], "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Classify an English message into an intent.
pub fn classify_intent(text: &str) -> Intent {
    let normalized = normalize(text);
    RULES
        .iter()
        .find(|r| r.regex.is_match(&normalized))
        .map(|r| r.intent)
        .unwrap_or(Intent::Default)
}
