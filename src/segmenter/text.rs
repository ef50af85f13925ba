use once_cell::sync::Lazy;
use regex::Regex;

/// One or more blank (whitespace-only) lines
static RE_PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Terminal punctuation followed by whitespace
static RE_SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Normalize raw input before splitting
///
/// Converts CRLF line endings to LF and strips surrounding whitespace.
pub fn normalize(raw: &str) -> String {
    raw.replace("\r\n", "\n").trim().to_string()
}

/// Split normalized text into paragraphs on one or more blank lines
///
/// Returns an empty vector for empty input.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    RE_PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Split a paragraph into sentences
///
/// A boundary sits right after `.`, `!` or `?` when whitespace follows.
/// The punctuation stays with its sentence and the whitespace is dropped.
/// Abbreviations ("e.g. this") and decimals followed by a space break too.
pub fn split_sentences(paragraph: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in RE_SENTENCE_BREAK.find_iter(paragraph) {
        // Terminal punctuation is a single ASCII byte
        let end = m.start() + 1;
        push_trimmed(&mut sentences, &paragraph[start..end]);
        start = m.end();
    }

    push_trimmed(&mut sentences, &paragraph[start..]);
    sentences
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece);
    }
}

/// Length in characters, the unit every limit is expressed in
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
