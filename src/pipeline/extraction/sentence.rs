/// Abbreviations that end with a period but do not end a sentence.
/// Contract text leans heavily on these.
const ABBREVIATIONS: &[&str] = &[
    "no", "inc", "ltd", "llc", "corp", "co", "sec", "art", "para", "cl",
    "e.g", "i.e", "etc", "vs", "mr", "mrs", "ms", "dr", "st", "jr", "sr",
];

/// Split raw page text into sentences.
///
/// Heuristic splitter: a sentence ends at `.`, `;`, `?` or `!` unless the
/// period closes a known abbreviation, a single initial, or a numbered label
/// like "5." — good enough for contract prose, where clause boundaries are
/// re-derived downstream from word counts anyway.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = text.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        current.push(ch);

        let is_terminal = matches!(ch, '.' | ';' | '?' | '!');
        if !is_terminal {
            continue;
        }

        if ch == '.' && continues_after_period(&current, &chars, i) {
            continue;
        }

        // Only break when followed by whitespace or end of text; avoids
        // splitting inside "27.5%" or "www.example.com".
        let next = chars.get(i + 1);
        if next.is_none() || next.is_some_and(|c| c.is_whitespace()) {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    sentences
}

/// True when the period at position `i` should not end the sentence.
fn continues_after_period(current: &str, chars: &[char], i: usize) -> bool {
    // Last word before the period, without the period itself.
    let body = &current[..current.len() - 1];
    let last_word = body
        .rsplit(|c: char| c.is_whitespace())
        .next()
        .unwrap_or("");
    let lower = last_word.to_lowercase();

    if ABBREVIATIONS.contains(&lower.as_str()) {
        return true;
    }
    // Single initial ("J.") or a bare section number ("5.", "10.2.").
    if last_word.len() == 1 && last_word.chars().all(|c| c.is_alphabetic()) {
        return true;
    }
    if !last_word.is_empty() && last_word.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return true;
    }
    // Decimal number continues: "1m30.5s", "99.9".
    if chars.get(i + 1).is_some_and(|c| c.is_ascii_digit()) {
        return true;
    }
    false
}
