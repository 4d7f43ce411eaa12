use std::sync::OnceLock;

use regex::Regex;

use super::types::AnalysisRecord;

/// Result of parsing one model response for a batch.
#[derive(Debug)]
pub enum ParseOutcome {
    /// Response yielded usable records (order as emitted by the model).
    Parsed(Vec<AnalysisRecord>),
    /// Neither strict nor lenient parsing produced records; the caller
    /// escalates to the retry loop and ultimately to fallback records.
    NeedsFallback,
}

fn json_array_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // First bracketed run of objects; (?s) so objects may span lines.
    RE.get_or_init(|| Regex::new(r"(?s)\[\s*\{.*?\}\s*\]").expect("valid regex"))
}

/// Two-stage parse of a model response.
///
/// Stage 1 is a strict JSON parse of the whole response. Stage 2 extracts the
/// first well-formed `[ { … } ]` substring (models often wrap the array in
/// prose or code fences) and strict-parses that. Records the model forgot
/// (fewer than the batch size) are not repaired here — the analyzer treats a
/// short response as usable and pads the difference with fallbacks.
pub fn parse_batch_response(content: &str) -> ParseOutcome {
    if let Ok(records) = serde_json::from_str::<Vec<AnalysisRecord>>(content) {
        return ParseOutcome::Parsed(records);
    }

    if let Some(m) = json_array_pattern().find(content) {
        if let Ok(records) = serde_json::from_str::<Vec<AnalysisRecord>>(m.as_str()) {
            return ParseOutcome::Parsed(records);
        }
    }

    ParseOutcome::NeedsFallback
}

/// One placeholder record per clause, tagged `start_id + index`.
pub fn fallback_records(clauses: &[String], start_id: i64) -> Vec<AnalysisRecord> {
    clauses
        .iter()
        .enumerate()
        .map(|(i, cl)| AnalysisRecord::fallback(start_id + i as i64, cl))
        .collect()
}
