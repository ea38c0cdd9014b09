//! Coarse scam categorisation and severity banding.
//!
//! Categories come from keyword heuristics over the raw message, not from
//! the AI response; severity is derived from the AI's `red_flags_fixed`
//! count. Both feed the pattern learning path.

use serde::{Deserialize, Serialize};

/// Coarse category of an observed scam message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScamCategory {
    FakeLinks,
    UrgentPayment,
    PersonalInfo,
    FakeAuthority,
    TooGoodToBeTrue,
    Other,
}

impl ScamCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScamCategory::FakeLinks => "fake_links",
            ScamCategory::UrgentPayment => "urgent_payment",
            ScamCategory::PersonalInfo => "personal_info",
            ScamCategory::FakeAuthority => "fake_authority",
            ScamCategory::TooGoodToBeTrue => "too_good_to_be_true",
            ScamCategory::Other => "other",
        }
    }

    /// Parse a category label as submitted to the pattern-report endpoint.
    pub fn parse(value: &str) -> Option<ScamCategory> {
        match value {
            "fake_links" => Some(ScamCategory::FakeLinks),
            "urgent_payment" => Some(ScamCategory::UrgentPayment),
            "personal_info" => Some(ScamCategory::PersonalInfo),
            "fake_authority" => Some(ScamCategory::FakeAuthority),
            "too_good_to_be_true" => Some(ScamCategory::TooGoodToBeTrue),
            "other" => Some(ScamCategory::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScamCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity band of a scam pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn parse(value: &str) -> Option<Severity> {
        match value {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }

    /// Band a red-flag count into a severity: >=7 critical, >=5 high,
    /// >=3 medium, else low.
    pub fn from_red_flags(red_flags_fixed: u32) -> Severity {
        match red_flags_fixed {
            n if n >= 7 => Severity::Critical,
            n if n >= 5 => Severity::High,
            n if n >= 3 => Severity::Medium,
            _ => Severity::Low,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a raw message into a coarse category via substring checks on
/// the lowercased text. First match wins; the check order fixes precedence
/// for messages matching several groups.
pub fn classify_message(message: &str) -> ScamCategory {
    let lower = message.to_lowercase();

    if lower.contains("click") || lower.contains("http") {
        ScamCategory::FakeLinks
    } else if lower.contains("urgent") || lower.contains("immediately") {
        ScamCategory::UrgentPayment
    } else if lower.contains("password") || lower.contains("pin") {
        ScamCategory::PersonalInfo
    } else if lower.contains("bank") || lower.contains("account") {
        ScamCategory::FakeAuthority
    } else if lower.contains("free") || lower.contains("win") {
        ScamCategory::TooGoodToBeTrue
    } else {
        ScamCategory::Other
    }
}
