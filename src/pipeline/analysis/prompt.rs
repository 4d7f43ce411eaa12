use serde::Serialize;

use super::taxonomy::REGULATION_TAXONOMY;

/// System instruction constraining the model to JSON-only output.
pub const ANALYSIS_SYSTEM_PROMPT: &str =
    "You are a legal compliance analyst. Respond ONLY with valid JSON.";

#[derive(Serialize)]
struct ClausePayload<'a> {
    #[serde(rename = "Clause ID")]
    clause_id: i64,
    #[serde(rename = "Contract Clause")]
    contract_clause: &'a str,
}

/// Build the per-batch user prompt: taxonomy, required JSON schema, and the
/// batch's clauses with their assigned IDs as a JSON payload.
pub fn build_batch_prompt(clauses: &[String], start_id: i64) -> String {
    let payload: Vec<ClausePayload> = clauses
        .iter()
        .enumerate()
        .map(|(i, cl)| ClausePayload {
            clause_id: start_id + i as i64,
            contract_clause: cl,
        })
        .collect();
    // Serializing borrowed strings and integers cannot fail.
    let clauses_json = serde_json::to_string(&payload).unwrap_or_default();

    format!(
        r#"You are a legal compliance analyst. Analyze the following contract clauses.
For each clause, return ONLY valid JSON in this format:

[
  {{
    "Clause ID": 1,
    "Contract Clause": "...",
    "Regulation": "Best matching regulation(s) from: {REGULATION_TAXONOMY}",
    "Risk Level": "High/Medium/Low/Unknown",
    "Risk Score": "0-100%",
    "Clause Identification": "short explanation (max 100 words)",
    "Clause Feedback & Fix": "Combine feedback on clause clarity or risk with a recommendation to fix (max 100 words).",
    "AI-Modified Clause": "Rewrite the clause clearly, legally sound, and with reduced compliance risk. Preserve the original intent."
  }}
]

Clauses:
{clauses_json}
"#
    )
}
