//! Canned weather-aware wellness tips.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Hot,
    Cold,
    Rainy,
    Humid,
    Polluted,
    Windy,
    Pleasant,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherTip {
    pub condition: WeatherCondition,
    pub tip: &'static str,
}

/// Word stems per bucket, in priority order. A stem matches a whole word,
/// optionally followed by a common inflection ("rainy", "freezing").
const CONDITION_STEMS: &[(WeatherCondition, &[&str])] = &[
    (
        WeatherCondition::Rainy,
        &["rain", "drizzl", "storm", "thunderstorm", "monsoon", "thunder"],
    ),
    (WeatherCondition::Hot, &["hot", "heat", "sunny", "summer", "warm"]),
    (
        WeatherCondition::Cold,
        &["cold", "snow", "winter", "chill", "freez", "frost"],
    ),
    (WeatherCondition::Humid, &["humid", "muggy", "sticky"]),
    (
        WeatherCondition::Polluted,
        &["smog", "pollut", "haz", "dust", "smok"],
    ),
    (WeatherCondition::Windy, &["wind", "breez", "gust"]),
];

static CONDITION_RULES: LazyLock<Vec<(WeatherCondition, Regex)>> = LazyLock::new(|| {
    CONDITION_STEMS
        .iter()
        .map(|(condition, stems)| {
            let alternation = stems.join("|");
            let regex = Regex::new(&format!(
                r"\b(?:{alternation})(?:s|y|e|es|ed|ing|ion|ity|ier)?\b"
            ))
            .expect("Invalid weather keyword pattern");
            (*condition, regex)
        })
        .collect()
});

/// Map a free-text condition ("Sunny", "heavy rain", "smog") to a bucket.
/// Unknown or missing conditions are `Pleasant`.
pub fn parse_condition(raw: Option<&str>) -> WeatherCondition {
    let text = raw.unwrap_or_default().trim().to_lowercase();
    CONDITION_RULES
        .iter()
        .find(|(_, regex)| regex.is_match(&text))
        .map(|(condition, _)| *condition)
        .unwrap_or(WeatherCondition::Pleasant)
}

fn tip_for(condition: WeatherCondition) -> &'static str {
    match condition {
        WeatherCondition::Hot => "It's hot out: drink water often, avoid the sun between 12 and 3 pm, and wear light, loose clothing.",
        WeatherCondition::Cold => "It's cold: dress in layers, keep your hands and feet warm, and have warm fluids through the day.",
        WeatherCondition::Rainy => "Rainy weather: drink boiled or filtered water, keep your feet dry, and clear standing water to prevent mosquitoes.",
        WeatherCondition::Humid => "Humid day: drink plenty of fluids, wear breathable cotton, and rest if you feel light-headed.",
        WeatherCondition::Polluted => "Air quality is poor: limit outdoor exercise, wear a well-fitting mask outside, and keep windows closed.",
        WeatherCondition::Windy => "Windy weather: protect your eyes from dust and keep your skin moisturised.",
        WeatherCondition::Pleasant => "Pleasant weather: a good day for a 30-minute walk. Remember sunscreen and water.",
    }
}

pub fn weather_tip(raw_condition: Option<&str>) -> WeatherTip {
    let condition = parse_condition(raw_condition);
    WeatherTip {
        condition,
        tip: tip_for(condition),
    }
}
