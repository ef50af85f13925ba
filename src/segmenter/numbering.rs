use super::text::char_len;

/// Average share of a post that real text fills, used by `estimate_count`
const ESTIMATE_FILL_RATIO: f64 = 0.8;

/// Sequence prefix for the post at `index` (0-based) of `total`
pub fn numbering_prefix(index: usize, total: usize) -> String {
    format!("{}/{} ", index + 1, total)
}

/// Prefix a single segment, or `None` when the prefix would overflow
pub fn try_number(segment: &str, index: usize, total: usize, max_length: usize) -> Option<String> {
    let prefix = numbering_prefix(index, total);
    if char_len(&prefix) + char_len(segment) <= max_length {
        Some(format!("{}{}", prefix, segment))
    } else {
        None
    }
}

/// Prefix every segment with `k/n ` when the thread has more than one post
///
/// Numbering is best-effort: a segment the prefix would push past
/// `max_length` is left as is.
pub fn apply_numbering(segments: Vec<String>, max_length: usize) -> Vec<String> {
    let total = segments.len();
    if total <= 1 {
        return segments;
    }

    segments
        .into_iter()
        .enumerate()
        .map(|(index, segment)| try_number(&segment, index, total, max_length).unwrap_or(segment))
        .collect()
}

/// Cheap estimate of how many posts `content` needs
///
/// Independent of the real packing result; meant for live UI feedback.
pub fn estimate_count(content: &str, max_length: usize) -> usize {
    let per_post = max_length as f64 * ESTIMATE_FILL_RATIO;
    (char_len(content) as f64 / per_post).ceil() as usize
}

/// Whether `text` fits in a single post
pub fn is_valid_length(text: &str, max_length: usize) -> bool {
    char_len(text) <= max_length
}
