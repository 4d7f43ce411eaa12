use super::sentence::split_sentences;

/// Heading and boilerplate markers skipped during segmentation.
/// Matching is substring-based on the uppercased sentence, so a clause
/// mentioning "SECTION" mid-sentence is also dropped — accepted limitation.
pub const DEFAULT_HEADING_MARKERS: &[&str] = &[
    "EXHIBIT", "SCHEDULE", "ANNEXURE", "APPENDIX", "TABLE OF CONTENTS",
    "BACKGROUND", "RECITALS", "WITNESSETH", "NOW, THEREFORE", "IN WITNESS WHEREOF",
    "ARTICLE", "SECTION", "PARTIES", "PREAMBLE", "DEFINITIONS", "SIGNATURES",
    "TITLE", "INDEX", "INTRODUCTION", "COVER PAGE", "DATED", "PAGE", "CONFIDENTIAL",
    "STOCK PURCHASE AGREEMENT", "EMPLOYMENT AGREEMENT", "AGREEMENT NO", "INVITATION FOR BIDS",
    "CLAUSE", "CONTRACT DATA", "STANDARD CONTRACT CLAUSES", "GENERAL CONDITIONS",
    "NOTICE TO PROCEED", "LETTER OF ACCEPTANCE", "AGREEMENT FORM",
];

/// Minimum words for a sentence to survive the boilerplate filter.
const MIN_SENTENCE_WORDS: usize = 5;

/// A buffered run of sentences flushes as one clause once it exceeds this
/// word count and ends on a terminal mark.
const FLUSH_WORD_COUNT: usize = 20;

/// Accumulates filtered sentences into clause-sized chunks.
///
/// A clause is flushed when the buffer ends with `.` or `;` and holds more
/// than 20 words; whatever remains at end of document flushes as a final
/// (possibly short) clause.
pub struct ClauseSegmenter {
    markers: Vec<String>,
}

/// Accumulation state carried across pages.
#[derive(Default)]
pub struct ClauseBuffer {
    text: String,
}

impl Default for ClauseSegmenter {
    fn default() -> Self {
        Self::with_markers(DEFAULT_HEADING_MARKERS.iter().map(|m| m.to_string()))
    }
}

impl ClauseSegmenter {
    /// Segmenter with a custom marker set. Markers are compared uppercase.
    pub fn with_markers(markers: impl IntoIterator<Item = String>) -> Self {
        Self {
            markers: markers.into_iter().map(|m| m.to_uppercase()).collect(),
        }
    }

    pub fn new_buffer(&self) -> ClauseBuffer {
        ClauseBuffer::default()
    }

    /// Feed one page of raw text, appending completed clauses to `out`.
    pub fn feed_page(&self, page_text: &str, buffer: &mut ClauseBuffer, out: &mut Vec<String>) {
        for sentence in split_sentences(page_text) {
            let sentence = sentence.trim();
            let upper = sentence.to_uppercase();

            if self.markers.iter().any(|m| upper.contains(m)) {
                continue;
            }
            if upper.split_whitespace().count() < MIN_SENTENCE_WORDS {
                continue;
            }

            if !buffer.text.is_empty() {
                buffer.text.push(' ');
            }
            buffer.text.push_str(sentence);

            let terminal = buffer.text.ends_with('.') || buffer.text.ends_with(';');
            if terminal && buffer.text.split_whitespace().count() > FLUSH_WORD_COUNT {
                out.push(std::mem::take(&mut buffer.text));
            }
        }
    }

    /// Flush the trailing buffer at end of document.
    pub fn finish(&self, buffer: ClauseBuffer, out: &mut Vec<String>) {
        let trailing = buffer.text.trim();
        if !trailing.is_empty() {
            out.push(trailing.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(pages: &[&str]) -> Vec<String> {
        let segmenter = ClauseSegmenter::default();
        let mut buffer = segmenter.new_buffer();
        let mut out = Vec::new();
        for page in pages {
            segmenter.feed_page(page, &mut buffer, &mut out);
        }
        segmenter.finish(buffer, &mut out);
        out
    }

    #[test]
    fn accumulates_until_twenty_words_and_terminator() {
        let page = "The Supplier shall deliver the goods within thirty days of the order. \
                    The Buyer shall inspect the goods promptly upon arrival at the warehouse.";
        let clauses = segment(&[page]);
        assert_eq!(clauses.len(), 1, "two short sentences merge into one clause");
        assert!(clauses[0].split_whitespace().count() > 20);
        assert!(clauses[0].ends_with('.'));
    }

    #[test]
    fn heading_sentences_are_never_emitted() {
        // Heading arrives as its own sentence (end of a page line).
        let pages = [
            "ARTICLE 5. DEFINITIONS",
            "The Supplier shall indemnify the Buyer against any loss arising from defective \
             goods delivered under this order and shall bear all related costs.",
        ];
        let clauses = segment(&pages);
        assert!(!clauses.is_empty());
        for clause in &clauses {
            assert!(
                !clause.to_uppercase().contains("ARTICLE 5"),
                "heading leaked into clause: {clause}"
            );
        }
    }

    #[test]
    fn heading_attached_to_following_text_drops_the_whole_sentence() {
        // Substring matching is accepted to over-drop: when a heading glues to
        // the sentence that follows it, the combined sentence is filtered.
        let page = "ARTICLE 5. DEFINITIONS The Supplier shall indemnify the Buyer against any \
                    loss arising from defective goods delivered under this order.";
        assert!(segment(&[page]).is_empty());
    }

    #[test]
    fn short_sentences_are_dropped() {
        let clauses = segment(&["Too short here. Also brief text."]);
        assert!(clauses.is_empty());
    }

    #[test]
    fn trailing_short_buffer_flushes_at_end() {
        let page = "The Supplier hereby waives any right to trial by jury.";
        let clauses = segment(&[page]);
        // Under 20 words, so only the trailing flush emits it.
        assert_eq!(clauses.len(), 1);
        assert!(clauses[0].split_whitespace().count() < 20);
    }

    #[test]
    fn buffer_spans_page_boundaries() {
        let page1 = "The Supplier warrants that all deliverables conform to the specifications";
        let page2 = "set out in the statement of work and remain free of defects for twelve months.";
        // page1 has no terminal mark; the clause completes on page2.
        let clauses = segment(&[page1, page2]);
        assert_eq!(clauses.len(), 1);
        assert!(clauses[0].contains("specifications set out"));
    }

    #[test]
    fn custom_markers_extend_the_filter() {
        let segmenter = ClauseSegmenter::with_markers(
            ["FORCE MAJEURE".to_string()].into_iter(),
        );
        let mut buffer = segmenter.new_buffer();
        let mut out = Vec::new();
        segmenter.feed_page(
            "Force majeure events excuse performance for the duration of the event only.",
            &mut buffer,
            &mut out,
        );
        segmenter.finish(buffer, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn empty_pages_yield_no_clauses() {
        assert!(segment(&["", "   "]).is_empty());
    }

    #[test]
    fn every_emitted_clause_has_at_least_five_words() {
        let page = "The Supplier shall deliver the goods within thirty days of the order. \
                    The Buyer shall pay all invoices within sixty days of receipt thereof. \
                    Risk passes on delivery at the named place of destination.";
        for clause in segment(&[page]) {
            assert!(clause.split_whitespace().count() >= MIN_SENTENCE_WORDS);
        }
    }
}
