use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

use super::groq::ChatClient;
use super::model_pool::ModelPool;
use super::parser::{fallback_records, parse_batch_response, ParseOutcome};
use super::prompt::{build_batch_prompt, ANALYSIS_SYSTEM_PROMPT};
use super::types::AnalysisRecord;
use super::AnalysisError;

/// Attempts per batch before degrading to fallback records.
const MAX_RETRIES: usize = 3;

/// Delay between ordinary retry attempts.
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Safety margin added on top of a server-suggested rate-limit wait.
const RATE_LIMIT_MARGIN: Duration = Duration::from_secs(5);

/// Per-batch progress, reported after each batch completes.
#[derive(Debug, Clone, Copy)]
pub struct BatchProgress {
    pub batches_done: usize,
    pub batches_total: usize,
    pub records_done: usize,
}

/// Orchestrates classification over clause batches: prompt → chat call →
/// two-stage parse → retry with model rotation → fallback records.
///
/// Batches run sequentially; suspension happens only at the network call and
/// the retry sleep. A batch never fails the run — exhausted retries degrade
/// to fallback records, so output length always equals input length.
pub struct BatchAnalyzer {
    client: Box<dyn ChatClient>,
    pool: ModelPool,
    batch_size: usize,
    sleeper: Box<dyn Fn(Duration)>,
}

impl BatchAnalyzer {
    pub fn new(client: Box<dyn ChatClient>, pool: ModelPool, batch_size: usize) -> Self {
        Self {
            client,
            pool,
            batch_size: batch_size.max(1),
            sleeper: Box::new(std::thread::sleep),
        }
    }

    /// Replace the retry sleep. Tests inject a recorder so rate-limit waits
    /// can be asserted without actually sleeping.
    pub fn with_sleeper(mut self, sleeper: impl Fn(Duration) + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    /// Analyze every clause, one fixed-size batch at a time. The i-th output
    /// record carries `Clause ID = start_id + i`; order is stable.
    pub fn analyze_all(
        &mut self,
        clauses: &[String],
        start_id: i64,
        on_batch: &mut dyn FnMut(BatchProgress),
    ) -> Vec<AnalysisRecord> {
        let batches_total = clauses.len().div_ceil(self.batch_size);
        let mut records = Vec::with_capacity(clauses.len());

        for (batch_index, batch) in clauses.chunks(self.batch_size).enumerate() {
            let batch_start_id = start_id + records.len() as i64;
            let batch_records = self.analyze_batch(batch, batch_start_id);
            records.extend(batch_records);

            on_batch(BatchProgress {
                batches_done: batch_index + 1,
                batches_total,
                records_done: records.len(),
            });
        }

        records
    }

    /// Analyze one batch. Always returns exactly `batch.len()` records.
    pub fn analyze_batch(&mut self, batch: &[String], start_id: i64) -> Vec<AnalysisRecord> {
        if batch.is_empty() {
            return Vec::new();
        }
        let prompt = build_batch_prompt(batch, start_id);

        for attempt in 1..=MAX_RETRIES {
            let model = self.pool.next_model().to_string();
            match self.client.complete(&model, ANALYSIS_SYSTEM_PROMPT, &prompt) {
                Ok(content) => match parse_batch_response(&content) {
                    ParseOutcome::Parsed(parsed) if !parsed.is_empty() => {
                        return reconcile(parsed, batch, start_id);
                    }
                    // An empty array is valid JSON but answers nothing;
                    // give the next model a chance.
                    ParseOutcome::Parsed(_) | ParseOutcome::NeedsFallback => {
                        tracing::warn!(
                            model = %model,
                            attempt,
                            "model response was not a parseable record array, retrying"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(model = %model, attempt, error = %e, "chat call failed");
                    if attempt < MAX_RETRIES {
                        if let Some(wait) = rate_limit_wait(&e) {
                            tracing::info!(wait_secs = wait.as_secs_f64(), "rate limited, honoring suggested wait");
                            (self.sleeper)(wait);
                            continue;
                        }
                    }
                }
            }

            if attempt < MAX_RETRIES {
                (self.sleeper)(RETRY_DELAY);
            }
        }

        tracing::warn!(start_id, clauses = batch.len(), "all retries failed, emitting fallback records");
        fallback_records(batch, start_id)
    }
}

/// Force the batch-in == batch-out invariant onto whatever the model
/// returned: take records in emitted order, re-tag IDs positionally, restore
/// the authoritative clause text, and pad any shortfall with fallbacks.
fn reconcile(parsed: Vec<AnalysisRecord>, batch: &[String], start_id: i64) -> Vec<AnalysisRecord> {
    let mut records: Vec<AnalysisRecord> = parsed
        .into_iter()
        .take(batch.len())
        .enumerate()
        .map(|(i, mut record)| {
            record.clause_id = start_id + i as i64;
            record.contract_clause = batch[i].clone();
            if record.risk_score.trim().is_empty() {
                record.risk_score = "0%".to_string();
            }
            record
        })
        .collect();

    for i in records.len()..batch.len() {
        records.push(AnalysisRecord::fallback(start_id + i as i64, &batch[i]));
    }
    records
}

fn rate_limit_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Matches the server's suggested wait: "try again in 1m30.5s", "in 20s",
    // "in 2m". Minutes and seconds are each optional but not both absent.
    RE.get_or_init(|| {
        Regex::new(r"try again in\s*(?:(\d+)m)?(?:(\d+(?:\.\d+)?)s)?").expect("valid regex")
    })
}

/// Parse a rate-limit error's suggested wait, plus a fixed safety margin.
/// Returns None when the error is not a rate limit or carries no duration.
pub fn rate_limit_wait(error: &AnalysisError) -> Option<Duration> {
    let text = error.to_string();
    if !text.to_lowercase().contains("rate limit") {
        return None;
    }
    let caps = rate_limit_pattern().captures(&text)?;
    let minutes: f64 = caps.get(1).and_then(|m| m.as_str().parse().ok()).unwrap_or(0.0);
    let seconds: f64 = caps.get(2).and_then(|m| m.as_str().parse().ok()).unwrap_or(0.0);
    if minutes == 0.0 && seconds == 0.0 {
        return None;
    }
    Some(Duration::from_secs_f64(minutes * 60.0 + seconds) + RATE_LIMIT_MARGIN)
}
