use serde::{Deserialize, Serialize};

/// Assessed risk of a clause. Anything the model emits outside the known
/// three buckets deserializes to `Unknown` rather than failing the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
    #[default]
    Unknown,
}

impl From<String> for RiskLevel {
    fn from(s: String) -> Self {
        // Models sometimes answer "High risk" or "high"; contains + case-fold
        // mirrors how the original normalized free-text risk answers.
        let lower = s.to_lowercase();
        if lower.contains("high") {
            RiskLevel::High
        } else if lower.contains("medium") {
            RiskLevel::Medium
        } else if lower.contains("low") {
            RiskLevel::Low
        } else {
            RiskLevel::Unknown
        }
    }
}

impl From<RiskLevel> for String {
    fn from(level: RiskLevel) -> Self {
        level.as_str().to_string()
    }
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
            RiskLevel::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One clause's assessment, using the wire field names the model is asked to
/// emit. Only the first five fields are guaranteed across pipeline variants;
/// the explanation fields default when a response omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    #[serde(rename = "Clause ID")]
    pub clause_id: i64,

    #[serde(rename = "Contract Clause")]
    pub contract_clause: String,

    #[serde(rename = "Regulation", default = "unknown_string")]
    pub regulation: String,

    #[serde(rename = "Risk Level", default)]
    pub risk_level: RiskLevel,

    #[serde(rename = "Risk Score", default = "zero_percent")]
    pub risk_score: String,

    #[serde(rename = "Clause Identification", default = "unknown_string")]
    pub identification: String,

    #[serde(rename = "Clause Feedback & Fix", default = "no_feedback")]
    pub feedback_and_fix: String,

    #[serde(rename = "AI-Modified Clause", default = "no_rewrite")]
    pub modified_clause: String,
}

pub(crate) fn unknown_string() -> String {
    "Unknown".to_string()
}

pub(crate) fn zero_percent() -> String {
    "0%".to_string()
}

pub(crate) fn no_feedback() -> String {
    "No feedback or recommendation available.".to_string()
}

pub(crate) fn no_rewrite() -> String {
    "No AI-modified clause available.".to_string()
}

impl AnalysisRecord {
    /// Placeholder record substituted when the model's output cannot be
    /// obtained or parsed. The run always completes with one record per
    /// clause, even if that record only says "Unknown".
    pub fn fallback(clause_id: i64, clause: &str) -> Self {
        Self {
            clause_id,
            contract_clause: clause.to_string(),
            regulation: unknown_string(),
            risk_level: RiskLevel::Unknown,
            risk_score: zero_percent(),
            identification: unknown_string(),
            feedback_and_fix: no_feedback(),
            modified_clause: no_rewrite(),
        }
    }
}
