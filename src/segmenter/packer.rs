use super::{MIN_SEGMENT_LENGTH, PARAGRAPH_BREAK};
use super::fragment::fragment_sentence;
use super::text::char_len;

/// Greedy accumulator that packs sentences into bounded segments
///
/// Consecutive sentences share a segment while they fit. At a paragraph
/// boundary the open segment keeps a `\n\n` marker if there is room, so the
/// next paragraph may start in the same segment.
pub struct Packer {
    max_length: usize,
    current: String,
    output: Vec<String>,
}

impl Packer {
    /// Create a packer; limits below `MIN_SEGMENT_LENGTH` are raised to it
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length: max_length.max(MIN_SEGMENT_LENGTH),
            current: String::new(),
            output: Vec::new(),
        }
    }

    /// Feed one sentence into the open segment
    pub fn push_sentence(&mut self, sentence: &str) {
        // Oversized sentences become standalone fragments
        if char_len(sentence) > self.max_length {
            self.flush();
            self.output.extend(fragment_sentence(sentence, self.max_length));
            return;
        }

        let candidate = if self.current.is_empty() {
            sentence.to_string()
        } else if self.current.ends_with(PARAGRAPH_BREAK) {
            // The paragraph marker is the joiner; no space after it
            format!("{}{}", self.current, sentence)
        } else {
            format!("{} {}", self.current, sentence)
        };

        if char_len(&candidate) <= self.max_length {
            self.current = candidate;
        } else {
            self.flush();
            self.current = sentence.to_string();
        }
    }

    /// Close a paragraph, keeping the segment open when the marker fits
    pub fn end_paragraph(&mut self) {
        if self.current.is_empty() {
            return;
        }

        if char_len(&self.current) + char_len(PARAGRAPH_BREAK) <= self.max_length {
            self.current.push_str(PARAGRAPH_BREAK);
        } else {
            self.flush();
        }
    }

    /// Flush whatever is left and return the packed segments
    pub fn finish(mut self) -> Vec<String> {
        self.flush();
        self.output
    }

    fn flush(&mut self) {
        let segment = self.current.trim();
        if !segment.is_empty() {
            self.output.push(segment.to_string());
        }
        self.current.clear();
    }
}
