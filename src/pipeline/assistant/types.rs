use std::fmt;

use serde::{Deserialize, Serialize};

/// What a message is about. Drives prompt choice and fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Emergency,
    MentalHealth,
    Nutrition,
    QuizOrTip,
    MedicineInfo,
    SymptomCheck,
    Default,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::MentalHealth => "mental_health",
            Self::Nutrition => "nutrition",
            Self::QuizOrTip => "quiz_or_tip",
            Self::MedicineInfo => "medicine_info",
            Self::SymptomCheck => "symptom_check",
            Self::Default => "default",
        }
    }

    /// Intents whose prompt is personalised from the stored profile.
    pub fn uses_profile(&self) -> bool {
        matches!(self, Self::Emergency | Self::Default)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `/ask` call as the orchestrator sees it.
#[derive(Debug, Clone)]
pub struct AskInput {
    pub message: String,
    pub edit_id: Option<String>,
    pub language: String,
}

/// Final reply plus the transcript entry it was logged under.
#[derive(Debug, Clone)]
pub struct AskOutcome {
    pub reply: String,
    pub intent: Intent,
    pub entry_id: String,
    pub edited: bool,
}

/// Everything needed to obtain and finish a reply for one intent.
#[derive(Debug, Clone)]
pub struct PromptPlan {
    pub intent: Intent,
    pub system: String,
    pub prompt: String,
    /// Deterministic text placed before the generated body.
    pub prefix: Option<String>,
    /// Body used when completion fails or comes back empty.
    pub fallback: &'static str,
}
