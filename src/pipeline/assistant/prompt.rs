use crate::models::ProfileDocument;

use super::context::{build_profile_context, first_emergency_contact};
use super::types::{Intent, PromptPlan};

pub const ROLE_STATEMENT: &str = "\
You are HealthBot, a friendly wellness assistant. You share general health and \
wellness information in plain, encouraging language. You do not diagnose conditions, \
prescribe treatments, or change medication doses. When something sounds serious, \
encourage the user to contact a qualified healthcare professional.";

pub const DISCLAIMER: &str = "Disclaimer: I am an AI wellness assistant, not a doctor. \
This is general information, not a medical diagnosis or treatment advice.";

pub const EMERGENCY_CALL_TO_ACTION: &str = "This may be a medical emergency. \
Call your local emergency number (such as 112 or 108) or go to the nearest hospital right now.";

/// Shown when the whole request fails unexpectedly.
pub const APOLOGY_MESSAGE: &str =
    "Sorry, something went wrong while preparing my reply. Please try again in a moment.";

const EMERGENCY_INSTRUCTIONS: &str = "\
The user may be describing a medical emergency and has already been told to contact \
emergency services. Give 3 to 5 short numbered first-aid steps they can take while \
waiting for help. Do not diagnose. Do not repeat the instruction to call emergency services.";

const MENTAL_HEALTH_INSTRUCTIONS: &str = "\
Respond with empathy in 2 to 3 sentences. Then give exactly 3 gentle coping tips as a \
numbered list, 1 to 2 sentences each. Close by suggesting they talk to someone they \
trust or contact a mental health helpline if the feelings persist.";

const NUTRITION_INSTRUCTIONS: &str = "\
Give exactly 3 practical nutrition or lifestyle tips as a numbered list. \
Each tip must be 1 to 2 sentences long.";

const QUIZ_OR_TIP_INSTRUCTIONS: &str = "\
If the user asks for a quiz, give one multiple-choice health question with 3 options, \
then the correct answer with a one-sentence explanation. Otherwise give one practical \
health tip in 1 to 2 sentences.";

const MEDICINE_INSTRUCTIONS: &str = "\
Explain in general terms what the medicine is commonly used for, its common side \
effects, and general precautions. Never recommend starting, stopping, or changing a \
dose. Advise confirming anything specific with a doctor or pharmacist.";

const SYMPTOM_INSTRUCTIONS: &str = "\
Structure your answer in exactly four short sections with these headings, in this order:\n\
Home care: simple self-care steps.\n\
Monitor: what to keep an eye on over the next days.\n\
Red flags: signs that need urgent medical attention.\n\
Follow-up questions: 2 questions that would help a doctor understand the situation.";

const DEFAULT_INSTRUCTIONS: &str = "\
Answer conversationally and helpfully in a short paragraph. Use the user information \
below to personalise the answer when it is relevant.";

const EMERGENCY_FALLBACK: &str = "While you wait for help: stay with the person, keep them \
still and comfortable, loosen tight clothing, and do not give them anything to eat or drink.";

const MENTAL_HEALTH_FALLBACK: &str = "I'm sorry you're going through this. Try a few slow, \
deep breaths, reach out to someone you trust, and consider calling a mental health \
helpline if these feelings don't ease.";

const NUTRITION_FALLBACK: &str = "1. Drink water regularly through the day.\n\
2. Fill half your plate with vegetables.\n\
3. Choose whole grains over refined ones.";

const QUIZ_OR_TIP_FALLBACK: &str =
    "Tip: Aim for 7 to 9 hours of sleep each night to help your body recover.";

const MEDICINE_FALLBACK: &str = "I couldn't look up that medicine right now. Please check \
the leaflet that came with it or ask your pharmacist.";

const SYMPTOM_FALLBACK: &str = "Home care: Rest and stay well hydrated.\n\
Monitor: Note how your symptoms change over the next day or two.\n\
Red flags: Seek care urgently for trouble breathing, chest pain, confusion, or a very high fever.\n\
Follow-up questions: How long have you had this, and is it getting worse?";

const DEFAULT_FALLBACK: &str =
    "I'm having trouble answering right now. Please try again in a moment.";

fn instructions(intent: Intent) -> &'static str {
    match intent {
        Intent::Emergency => EMERGENCY_INSTRUCTIONS,
        Intent::MentalHealth => MENTAL_HEALTH_INSTRUCTIONS,
        Intent::Nutrition => NUTRITION_INSTRUCTIONS,
        Intent::QuizOrTip => QUIZ_OR_TIP_INSTRUCTIONS,
        Intent::MedicineInfo => MEDICINE_INSTRUCTIONS,
        Intent::SymptomCheck => SYMPTOM_INSTRUCTIONS,
        Intent::Default => DEFAULT_INSTRUCTIONS,
    }
}

/// Reply body used when completion fails or returns nothing.
pub fn fallback_reply(intent: Intent) -> &'static str {
    match intent {
        Intent::Emergency => EMERGENCY_FALLBACK,
        Intent::MentalHealth => MENTAL_HEALTH_FALLBACK,
        Intent::Nutrition => NUTRITION_FALLBACK,
        Intent::QuizOrTip => QUIZ_OR_TIP_FALLBACK,
        Intent::MedicineInfo => MEDICINE_FALLBACK,
        Intent::SymptomCheck => SYMPTOM_FALLBACK,
        Intent::Default => DEFAULT_FALLBACK,
    }
}

/// Fixed call to action, naming the user's first emergency contact if any.
pub fn emergency_prefix(doc: &ProfileDocument) -> String {
    match first_emergency_contact(doc) {
        Some(contact) => format!(
            "{EMERGENCY_CALL_TO_ACTION} You can also call your emergency contact {contact}."
        ),
        None => EMERGENCY_CALL_TO_ACTION.to_string(),
    }
}

/// Build the completion request for `intent`.
///
/// `doc` is only read for intents that personalise (see `Intent::uses_profile`).
pub fn compose(intent: Intent, user_text: &str, doc: &ProfileDocument) -> PromptPlan {
    let context = if intent.uses_profile() {
        build_profile_context(doc)
    } else {
        String::new()
    };

    let mut prompt = String::from(instructions(intent));
    if !context.is_empty() {
        prompt.push_str("\n\nUser information:\n");
        prompt.push_str(&context);
    }
    prompt.push_str(&format!(
        "\n\nEnd your reply with this disclaimer on its own line: \"{DISCLAIMER}\""
    ));
    prompt.push_str("\n\nUser message: ");
    prompt.push_str(user_text);

    PromptPlan {
        intent,
        system: ROLE_STATEMENT.to_string(),
        prompt,
        prefix: (intent == Intent::Emergency).then(|| emergency_prefix(doc)),
        fallback: fallback_reply(intent),
    }
}

/// Combine prefix, generated (or fallback) body and disclaimer.
pub fn finalize_reply(plan: &PromptPlan, generated: Option<&str>) -> String {
    let body = generated
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(plan.fallback);
    let text = match &plan.prefix {
        Some(prefix) => format!("{prefix}\n\n{body}"),
        None => body.to_string(),
    };
    ensure_disclaimer(&text)
}

/// Append the disclaimer unless the text already carries it.
pub fn ensure_disclaimer(text: &str) -> String {
    let text = text.trim_end();
    if text.contains(DISCLAIMER) {
        text.to_string()
    } else {
        format!("{text}\n\n{DISCLAIMER}")
    }
}
