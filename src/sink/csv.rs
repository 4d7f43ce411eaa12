use crate::pipeline::analysis::types::AnalysisRecord;
use crate::report::high_risk_subset;
use crate::sink::SinkError;

/// Column order for the full analysis export and the spreadsheet sink.
pub const ANALYSIS_HEADER: &[&str] = &[
    "Clause ID",
    "Contract Clause",
    "Regulation",
    "Risk Level",
    "Risk Score",
    "Clause Identification",
    "Clause Feedback & Fix",
    "AI-Modified Clause",
];

/// Column order for the high-risk rewrite export.
pub const HIGH_RISK_HEADER: &[&str] = &[
    "Clause ID",
    "Contract Clause",
    "Risk Level",
    "AI-Modified Clause",
];

fn analysis_row(record: &AnalysisRecord) -> Vec<String> {
    vec![
        record.clause_id.to_string(),
        record.contract_clause.clone(),
        record.regulation.clone(),
        record.risk_level.to_string(),
        record.risk_score.clone(),
        record.identification.clone(),
        record.feedback_and_fix.clone(),
        record.modified_clause.clone(),
    ]
}

/// Header row + one row per record, in the fixed column order. This is the
/// same tabular shape the spreadsheet sink writes.
pub fn analysis_rows(records: &[AnalysisRecord]) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(ANALYSIS_HEADER.iter().map(|h| h.to_string()).collect());
    rows.extend(records.iter().map(analysis_row));
    rows
}

fn write_csv(header: &[&str], rows: impl Iterator<Item = Vec<String>>) -> Result<Vec<u8>, SinkError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(header)
        .map_err(|e| SinkError::Csv(e.to_string()))?;
    for row in rows {
        writer
            .write_record(&row)
            .map_err(|e| SinkError::Csv(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| SinkError::Csv(e.to_string()))
}

/// Full record set as CSV bytes with a header row.
pub fn export_analysis_csv(records: &[AnalysisRecord]) -> Result<Vec<u8>, SinkError> {
    write_csv(ANALYSIS_HEADER, records.iter().map(analysis_row))
}

/// High-risk-only subset as CSV bytes, rewrite columns always present.
pub fn export_high_risk_csv(records: &[AnalysisRecord]) -> Result<Vec<u8>, SinkError> {
    let subset = high_risk_subset(records);
    write_csv(
        HIGH_RISK_HEADER,
        subset.iter().map(|r| {
            vec![
                r.clause_id.to_string(),
                r.contract_clause.clone(),
                r.risk_level.to_string(),
                r.modified_clause.clone(),
            ]
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::analysis::types::RiskLevel;

    fn record(id: i64, level: RiskLevel) -> AnalysisRecord {
        AnalysisRecord {
            risk_level: level,
            ..AnalysisRecord::fallback(id, "The Supplier shall maintain insurance coverage.")
        }
    }

    #[test]
    fn analysis_csv_has_header_and_one_row_per_record() {
        let records = vec![record(1, RiskLevel::High), record(2, RiskLevel::Low)];
        let bytes = export_analysis_csv(&records).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Clause ID,Contract Clause,Regulation"));
        assert!(lines[1].starts_with("1,"));
        assert!(lines[2].starts_with("2,"));
    }

    #[test]
    fn clause_text_with_commas_is_quoted() {
        let mut r = record(1, RiskLevel::Low);
        r.contract_clause = "The Buyer, at its option, may terminate.".to_string();
        let bytes = export_analysis_csv(&[r]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"The Buyer, at its option, may terminate.\""));
    }

    #[test]
    fn high_risk_csv_filters_and_keeps_rewrite_columns() {
        let records = vec![
            record(1, RiskLevel::High),
            record(2, RiskLevel::Medium),
            record(3, RiskLevel::High),
        ];
        let bytes = export_high_risk_csv(&records).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3, "header plus two high-risk rows");
        assert_eq!(lines[0], "Clause ID,Contract Clause,Risk Level,AI-Modified Clause");
        assert!(text.contains("No AI-modified clause available."));
    }

    #[test]
    fn sheet_rows_match_csv_column_order() {
        let records = vec![record(4, RiskLevel::Medium)];
        let rows = analysis_rows(&records);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), ANALYSIS_HEADER.len());
        assert_eq!(rows[1][0], "4");
        assert_eq!(rows[1][3], "Medium");
        assert_eq!(rows[1][4], "0%");
    }
}
