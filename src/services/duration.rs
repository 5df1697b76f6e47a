//! Free-text time budget parsing
//!
//! Input such as "30 minutes", "2 hrs" or "1 week" is matched against a fixed,
//! ordered table of unit rules. The first rule whose keyword appears anywhere in
//! the text wins, and only the first integer in the text is used. That means
//! "2 hour 30 minutes" is read by the minute rule as 2 minutes, and
//! "1 hour 30 min" the same way. Text matching no rule is parsed as a plain
//! number of hours; anything else is 0.

use regex::Regex;
use std::sync::LazyLock;

static FIRST_INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// A unit keyword and its size in minutes
#[derive(Debug, Clone, Copy)]
pub struct DurationRule {
    pub unit: &'static str,
    pub keywords: &'static [&'static str],
    pub minutes_per_unit: f64,
}

/// Unit rules in match priority order
pub static DURATION_RULES: [DurationRule; 4] = [
    DurationRule {
        unit: "minute",
        keywords: &["minute", "min"],
        minutes_per_unit: 1.0,
    },
    DurationRule {
        unit: "hour",
        keywords: &["hour", "hr"],
        minutes_per_unit: 60.0,
    },
    DurationRule {
        unit: "day",
        keywords: &["day"],
        minutes_per_unit: 1440.0,
    },
    DurationRule {
        unit: "week",
        keywords: &["week"],
        minutes_per_unit: 10080.0,
    },
];

impl DurationRule {
    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

fn first_integer(text: &str) -> f64 {
    FIRST_INTEGER
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// The rule that would interpret `input`, if any
pub fn matching_rule(input: &str) -> Option<&'static DurationRule> {
    let text = input.trim().to_lowercase();
    DURATION_RULES.iter().find(|rule| rule.matches(&text))
}

/// Parses a time budget into hours; unparseable input is 0
pub fn parse_hours(input: &str) -> f64 {
    let text = input.trim().to_lowercase();

    if let Some(rule) = DURATION_RULES.iter().find(|rule| rule.matches(&text)) {
        return first_integer(&text) * rule.minutes_per_unit / 60.0;
    }

    match text.parse::<f64>() {
        Ok(hours) if hours.is_finite() => hours,
        _ => 0.0,
    }
}
