//! Run-level summaries and the rewritten-clauses PDF report.
//!
//! PDF generation via `printpdf`: A4 pages, builtin Helvetica, a y-cursor
//! walked down the page with manual text wrapping.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use serde::Serialize;

use crate::pipeline::analysis::types::{AnalysisRecord, RiskLevel};
use crate::sink::SinkError;

/// Counts of clauses per risk level for one analyzed contract.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RiskSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub unknown: usize,
}

impl RiskSummary {
    pub fn from_records(records: &[AnalysisRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };
        for record in records {
            match record.risk_level {
                RiskLevel::High => summary.high += 1,
                RiskLevel::Medium => summary.medium += 1,
                RiskLevel::Low => summary.low += 1,
                RiskLevel::Unknown => summary.unknown += 1,
            }
        }
        summary
    }

    /// Share of `count` against the total, as a one-decimal percent string.
    pub fn percent(&self, count: usize) -> String {
        if self.total == 0 {
            return "0%".to_string();
        }
        format!("{:.1}%", count as f64 / self.total as f64 * 100.0)
    }
}

/// One-line structured summary for operator-facing surfaces.
pub fn contract_summary(summary: &RiskSummary, contract_name: &str) -> String {
    format!(
        "Contract '{}' contains {} clauses: {} high risk, {} medium risk, {} low risk.",
        contract_name, summary.total, summary.high, summary.medium, summary.low
    )
}

/// Records assessed High, with the rewrite columns guaranteed present
/// (records already default them when the model omitted a rewrite).
pub fn high_risk_subset(records: &[AnalysisRecord]) -> Vec<AnalysisRecord> {
    records
        .iter()
        .filter(|r| r.risk_level == RiskLevel::High)
        .cloned()
        .collect()
}

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 6.0;
// Helvetica at 10pt fits roughly this many characters between A4 margins.
const WRAP_WIDTH_CHARS: usize = 95;

/// Generate the rewritten-clauses report: per clause, the original text and
/// risk level followed by the AI-modified rewrite. Returns PDF bytes.
pub fn generate_rewritten_pdf(records: &[AnalysisRecord]) -> Result<Vec<u8>, SinkError> {
    let title = "AI-Rewritten Contract Clauses Report";
    let (doc, page1, layer1) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| SinkError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| SinkError::Pdf(e.to_string()))?;

    let mut page = page1;
    let mut layer = doc.get_page(page).get_layer(layer1);
    let mut y = Mm(PAGE_HEIGHT_MM - MARGIN_MM);

    layer.use_text(title, 14.0, Mm(MARGIN_MM), y, &bold);
    y -= Mm(LINE_HEIGHT_MM * 2.0);

    for record in records {
        let blocks = [
            (format!("Clause ID: {}", record.clause_id), true),
            (format!("Risk Level: {}", record.risk_level), false),
            (format!("Original Clause: {}", record.contract_clause), false),
            (format!("AI-Modified Clause: {}", record.modified_clause), false),
        ];

        for (text, is_bold) in &blocks {
            for line in wrap_text(text, WRAP_WIDTH_CHARS) {
                if y < Mm(MARGIN_MM) {
                    let (new_page, new_layer) = doc.add_page(
                        Mm(PAGE_WIDTH_MM),
                        Mm(PAGE_HEIGHT_MM),
                        "Layer 1",
                    );
                    page = new_page;
                    layer = doc.get_page(page).get_layer(new_layer);
                    y = Mm(PAGE_HEIGHT_MM - MARGIN_MM);
                }
                let face = if *is_bold { &bold } else { &font };
                layer.use_text(line.as_str(), 10.0, Mm(MARGIN_MM), y, face);
                y -= Mm(LINE_HEIGHT_MM);
            }
        }
        y -= Mm(LINE_HEIGHT_MM); // gap between clauses
    }

    let mut buf = std::io::BufWriter::new(Vec::new());
    doc.save(&mut buf).map_err(|e| SinkError::Pdf(e.to_string()))?;
    buf.into_inner().map_err(|e| SinkError::Pdf(e.to_string()))
}

/// Greedy word wrap at `width` characters.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + word.chars().count() + 1 > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, level: RiskLevel) -> AnalysisRecord {
        AnalysisRecord {
            risk_level: level,
            ..AnalysisRecord::fallback(id, "The Supplier shall comply with all applicable regulations.")
        }
    }

    #[test]
    fn summary_counts_levels() {
        let records = vec![
            record(1, RiskLevel::High),
            record(2, RiskLevel::High),
            record(3, RiskLevel::Medium),
            record(4, RiskLevel::Low),
            record(5, RiskLevel::Unknown),
        ];
        let summary = RiskSummary::from_records(&records);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.high, 2);
        assert_eq!(summary.medium, 1);
        assert_eq!(summary.low, 1);
        assert_eq!(summary.unknown, 1);
    }

    #[test]
    fn percent_is_safe_on_empty() {
        let summary = RiskSummary::default();
        assert_eq!(summary.percent(summary.high), "0%");
    }

    #[test]
    fn contract_summary_text() {
        let records = vec![record(1, RiskLevel::High), record(2, RiskLevel::Low)];
        let summary = RiskSummary::from_records(&records);
        let text = contract_summary(&summary, "MSA-2024");
        assert_eq!(
            text,
            "Contract 'MSA-2024' contains 2 clauses: 1 high risk, 0 medium risk, 1 low risk."
        );
    }

    #[test]
    fn high_risk_subset_filters() {
        let records = vec![
            record(1, RiskLevel::High),
            record(2, RiskLevel::Low),
            record(3, RiskLevel::High),
        ];
        let subset = high_risk_subset(&records);
        assert_eq!(subset.len(), 2);
        assert!(subset.iter().all(|r| r.risk_level == RiskLevel::High));
    }

    #[test]
    fn pdf_report_is_generated() {
        let records = vec![record(1, RiskLevel::High)];
        let bytes = generate_rewritten_pdf(&records).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "output should be a PDF document");
    }

    #[test]
    fn long_clauses_paginate() {
        let long_clause = "indemnification obligations survive termination ".repeat(40);
        let records: Vec<AnalysisRecord> = (1..=30)
            .map(|i| AnalysisRecord {
                risk_level: RiskLevel::High,
                contract_clause: long_clause.clone(),
                ..AnalysisRecord::fallback(i, &long_clause)
            })
            .collect();
        let bytes = generate_rewritten_pdf(&records).unwrap();
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn wrap_text_respects_width() {
        let lines = wrap_text(&"word ".repeat(50), 20);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 20);
        }
    }
}
