pub mod clause;
pub mod pdf;
pub mod sentence;

pub use clause::*;
pub use pdf::*;
pub use sentence::*;

use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parsing error: {0}")]
    PdfParsing(String),
}

/// Extract clause-sized text units from a contract PDF, in document order.
///
/// Fails if the file cannot be read or is not a parseable PDF. A scanned
/// (image-only) PDF has empty text layers and yields zero clauses.
pub fn extract_clauses(pdf_path: &Path) -> Result<Vec<String>, ExtractionError> {
    let bytes = fs::read(pdf_path)?;
    extract_clauses_from_bytes(&bytes)
}

/// Same as [`extract_clauses`] but over in-memory bytes (uploaded files).
pub fn extract_clauses_from_bytes(pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let extractor = PdfTextExtractor;
    let pages = extractor.extract_text(pdf_bytes)?;
    let segmenter = ClauseSegmenter::default();

    let mut clauses = Vec::new();
    let mut buffer = segmenter.new_buffer();
    for page in &pages {
        segmenter.feed_page(&page.text, &mut buffer, &mut clauses);
    }
    segmenter.finish(buffer, &mut clauses);
    Ok(clauses)
}

#[cfg(test)]
mod tests {
    use super::pdf::tests::make_test_pdf;
    use super::*;

    #[test]
    fn extract_clauses_from_contract_pdf() {
        let pdf = make_test_pdf(&[
            "The Supplier shall deliver the goods within thirty days of the order. \
             The Buyer shall inspect all goods promptly upon arrival at the warehouse.",
        ]);
        let clauses = extract_clauses_from_bytes(&pdf).unwrap();
        assert!(!clauses.is_empty());
        for clause in &clauses {
            assert!(clause.split_whitespace().count() >= 5);
        }
    }

    #[test]
    fn missing_file_is_fatal() {
        let result = extract_clauses(Path::new("/nonexistent/contract.pdf"));
        assert!(matches!(result, Err(ExtractionError::Io(_))));
    }

    #[test]
    fn garbage_bytes_are_fatal() {
        let result = extract_clauses_from_bytes(b"definitely not a pdf");
        assert!(matches!(result, Err(ExtractionError::PdfParsing(_))));
    }
}
