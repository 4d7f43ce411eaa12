use super::ExtractionError;

/// Text extracted from a single PDF page. Scanned pages come back empty.
#[derive(Debug, Clone)]
pub struct PageText {
    pub page_number: usize,
    pub text: String,
}

/// Source of per-page text. The segmenter only sees page strings, so tests
/// can feed synthetic pages without building PDFs.
pub trait PdfExtractor {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError>;
}

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers.
pub struct PdfTextExtractor;

impl PdfExtractor for PdfTextExtractor {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError> {
        let page_texts = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

        Ok(page_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| PageText {
                page_number: i + 1,
                text,
            })
            .collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Generate a valid PDF with text using lopdf (the library that pdf-extract uses internally).
    pub(crate) fn make_test_pdf(page_texts: &[&str]) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut page_ids = Vec::new();
        for text in page_texts {
            // Escape the few characters meaningful inside a PDF string literal.
            let escaped = text.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)");
            let content = format!("BT /F1 12 Tf 50 700 Td ({escaped}) Tj ET");
            let content_stream = Stream::new(dictionary! {}, content.into_bytes());
            let content_id = doc.add_object(content_stream);

            let resources = dictionary! {
                "Font" => dictionary! {
                    "F1" => font_id,
                },
            };

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => resources,
            });
            page_ids.push(page_id);
        }

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|&id| id.into()).collect::<Vec<Object>>(),
            "Count" => page_ids.len() as i64,
        });

        for &page_id in &page_ids {
            if let Ok(Object::Dictionary(ref mut dict)) = doc.get_object_mut(page_id) {
                dict.set("Parent", pages_id);
            }
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });

        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn extract_text_from_digital_pdf() {
        let extractor = PdfTextExtractor;
        let pdf_bytes = make_test_pdf(&["The Supplier shall deliver all goods by the agreed date."]);
        let pages = extractor.extract_text(&pdf_bytes).unwrap();

        assert!(!pages.is_empty(), "Should extract at least one page");
        let full_text: String = pages.iter().map(|p| p.text.clone()).collect();
        assert!(
            full_text.contains("Supplier") || full_text.contains("deliver"),
            "Expected contract text, got: {full_text}"
        );
    }

    #[test]
    fn page_numbers_are_one_based_and_ordered() {
        let extractor = PdfTextExtractor;
        let pdf_bytes = make_test_pdf(&["First page text.", "Second page text."]);
        let pages = extractor.extract_text(&pdf_bytes).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[1].page_number, 2);
    }

    #[test]
    fn invalid_pdf_returns_error() {
        let extractor = PdfTextExtractor;
        let result = extractor.extract_text(b"not a pdf");
        assert!(matches!(result, Err(ExtractionError::PdfParsing(_))));
    }
}
