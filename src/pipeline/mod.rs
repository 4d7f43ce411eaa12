pub mod analysis;
pub mod extraction;

use std::path::Path;

use crate::pipeline::analysis::analyzer::{BatchAnalyzer, BatchProgress};
use crate::pipeline::analysis::types::AnalysisRecord;
use crate::pipeline::extraction::{extract_clauses, ExtractionError};

/// Drive the full run: extract clauses from the PDF, then analyze them in
/// batches. Extraction failure is fatal; analysis always completes with one
/// record per clause (fallback records substitute on exhausted retries).
///
/// Every invocation is independent — no state survives the run.
pub fn run_pipeline(
    pdf_path: &Path,
    analyzer: &mut BatchAnalyzer,
    start_id: i64,
    mut on_batch: impl FnMut(BatchProgress),
) -> Result<Vec<AnalysisRecord>, ExtractionError> {
    let clauses = extract_clauses(pdf_path)?;
    tracing::info!(path = %pdf_path.display(), clauses = clauses.len(), "extraction complete");

    let records = analyzer.analyze_all(&clauses, start_id, &mut on_batch);
    debug_assert_eq!(records.len(), clauses.len());
    Ok(records)
}
