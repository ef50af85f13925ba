use once_cell::sync::Lazy;
use regex::Regex;

use super::{ELLIPSIS, MIN_SEGMENT_LENGTH};
use super::text::char_len;

static RE_CLAUSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[:;]\s+").unwrap());
static RE_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s+").unwrap());
static RE_CONJUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+(?:and|or|but|so|because|that|which|when|where|who|if)\b").unwrap()
});
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Places an oversized sentence may be cut, in order of preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// After `:` or `;` followed by whitespace
    Clause,
    /// After `,` followed by whitespace
    Comma,
    /// Before a conjunction preceded by whitespace
    Conjunction,
    /// Any whitespace run
    Whitespace,
}

impl Breakpoint {
    pub const PRIORITY: [Breakpoint; 4] = [
        Breakpoint::Clause,
        Breakpoint::Comma,
        Breakpoint::Conjunction,
        Breakpoint::Whitespace,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            Breakpoint::Clause => &RE_CLAUSE,
            Breakpoint::Comma => &RE_COMMA,
            Breakpoint::Conjunction => &RE_CONJUNCTION,
            Breakpoint::Whitespace => &RE_WHITESPACE,
        }
    }

    /// Byte offset of the cut for a match of this class
    fn cut_position(self, m: regex::Match<'_>) -> usize {
        match self {
            // Punctuation stays on the left side
            Breakpoint::Clause | Breakpoint::Comma => m.start() + 1,
            Breakpoint::Conjunction | Breakpoint::Whitespace => m.start(),
        }
    }

    /// Last cut position at or before `limit` (a byte offset), if any
    fn last_cut(self, text: &str, limit: usize) -> Option<usize> {
        self.pattern()
            .find_iter(text)
            .map(|m| self.cut_position(m))
            .take_while(|&pos| pos <= limit)
            .filter(|&pos| pos > 0)
            .last()
    }
}

/// Split a sentence longer than `max_length` into continuation fragments
///
/// Every fragment but the last ends with `...`, every fragment but the
/// first starts with `...`. Cuts prefer clause punctuation, then commas,
/// then conjunctions, then any whitespace, and fall back to a hard cut.
/// The loop measures the remainder including its leading marker, so each
/// emitted fragment stays within `max_length`. Limits below
/// `MIN_SEGMENT_LENGTH` are raised to it so every cut consumes content.
pub fn fragment_sentence(sentence: &str, max_length: usize) -> Vec<String> {
    let max_length = max_length.max(MIN_SEGMENT_LENGTH);
    let mut fragments = Vec::new();
    let mut remaining = sentence.trim().to_string();
    let budget = max_length.saturating_sub(char_len(ELLIPSIS));

    while char_len(&remaining) > max_length {
        // `remaining` is longer than max_length, so this char exists
        let limit = remaining
            .char_indices()
            .nth(budget)
            .map(|(idx, _)| idx)
            .unwrap_or(remaining.len());

        let chosen = Breakpoint::PRIORITY
            .iter()
            .find_map(|class| class.last_cut(&remaining, limit).map(|pos| (*class, pos)));

        let pos = match chosen {
            Some((class, pos)) => {
                tracing::trace!(?class, pos, "cutting oversized sentence");
                pos
            }
            None => {
                tracing::trace!(pos = limit, "hard cut of oversized sentence");
                limit
            }
        };

        let (head, tail) = remaining.split_at(pos);
        fragments.push(format!("{}{}", head.trim(), ELLIPSIS));
        remaining = format!("{}{}", ELLIPSIS, tail.trim());
    }

    fragments.push(remaining);
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 280;

    fn assert_well_formed(fragments: &[String], max: usize) {
        let last = fragments.len() - 1;
        for (i, fragment) in fragments.iter().enumerate() {
            assert!(
                char_len(fragment) <= max,
                "fragment {} has {} chars",
                i,
                char_len(fragment)
            );
            if i > 0 {
                assert!(fragment.starts_with(ELLIPSIS), "fragment {} lacks leading marker", i);
            }
            if i < last {
                assert!(fragment.ends_with(ELLIPSIS), "fragment {} lacks trailing marker", i);
            }
        }
    }

    #[test]
    fn test_short_sentence_untouched() {
        assert_eq!(fragment_sentence("Fits fine.", MAX), vec!["Fits fine."]);
    }

    #[test]
    fn test_repeated_word_uses_whitespace() {
        let sentence = vec!["word"; 80].join(" "); // 399 chars
        let fragments = fragment_sentence(&sentence, MAX);

        assert_eq!(fragments.len(), 2);
        assert_well_formed(&fragments, MAX);
        // Whitespace cuts never split a word
        for fragment in &fragments {
            let body = fragment.trim_start_matches(ELLIPSIS).trim_end_matches(ELLIPSIS);
            assert!(body.split(' ').all(|w| w == "word"));
        }
    }

    #[test]
    fn test_hard_cut_without_whitespace() {
        let sentence = "x".repeat(400);
        let fragments = fragment_sentence(&sentence, MAX);

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0], format!("{}...", "x".repeat(277)));
        assert_eq!(fragments[1], format!("...{}", "x".repeat(123)));
        assert_well_formed(&fragments, MAX);
    }

    #[test]
    fn test_hard_cut_long_run() {
        let sentence = "y".repeat(1000);
        let fragments = fragment_sentence(&sentence, MAX);

        assert_well_formed(&fragments, MAX);
        let content: usize = fragments.iter().map(|f| f.matches('y').count()).sum();
        assert_eq!(content, 1000);
    }

    #[test]
    fn test_clause_preferred_over_comma() {
        let head = "a".repeat(100);
        let mid = "b".repeat(100);
        let sentence = format!("{}; {}, {} {}", head, mid, "c".repeat(60), "d".repeat(60));
        let fragments = fragment_sentence(&sentence, MAX);

        assert_eq!(fragments[0], format!("{};...", head));
        assert_well_formed(&fragments, MAX);
    }

    #[test]
    fn test_comma_preferred_over_conjunction() {
        let sentence = format!(
            "{}, {} and {} {}",
            "a".repeat(100),
            "b".repeat(100),
            "c".repeat(60),
            "d".repeat(60)
        );
        let fragments = fragment_sentence(&sentence, MAX);

        assert_eq!(fragments[0], format!("{},...", "a".repeat(100)));
        assert_well_formed(&fragments, MAX);
    }

    #[test]
    fn test_conjunction_cut_keeps_conjunction_on_right() {
        let sentence = format!(
            "{} {} because {} {}",
            "a".repeat(100),
            "b".repeat(100),
            "c".repeat(60),
            "d".repeat(60)
        );
        let fragments = fragment_sentence(&sentence, MAX);

        assert_eq!(fragments[0], format!("{} {}...", "a".repeat(100), "b".repeat(100)));
        assert!(fragments[1].starts_with("...because"));
        assert_well_formed(&fragments, MAX);
    }

    #[test]
    fn test_conjunction_is_case_insensitive() {
        let sentence = format!("{} {} WHICH {}", "a".repeat(150), "b".repeat(100), "c".repeat(100));
        let fragments = fragment_sentence(&sentence, MAX);
        assert!(fragments[1].starts_with("...WHICH"));
    }

    #[test]
    fn test_conjunction_requires_word_boundary() {
        // "android" must not count as "and"
        let sentence = format!("{} android{} {}", "a".repeat(150), "b".repeat(100), "c".repeat(100));
        let fragments = fragment_sentence(&sentence, MAX);
        assert_eq!(fragments[0], format!("{} android{}...", "a".repeat(150), "b".repeat(100)));
    }

    #[test]
    fn test_breakpoint_beyond_budget_ignored() {
        // Only comma sits past the budget, so whitespace wins
        let sentence = format!("{} {}, {}", "a".repeat(200), "b".repeat(90), "c".repeat(50));
        let fragments = fragment_sentence(&sentence, MAX);
        assert_eq!(fragments[0], format!("{}...", "a".repeat(200)));
    }

    #[test]
    fn test_multibyte_characters() {
        let sentence = "é".repeat(600);
        let fragments = fragment_sentence(&sentence, MAX);
        assert_well_formed(&fragments, MAX);
        let content: usize = fragments.iter().map(|f| f.matches('é').count()).sum();
        assert_eq!(content, 600);
    }

    #[test]
    fn test_tiny_limit_raised_to_minimum() {
        assert_eq!(fragment_sentence("abcdefghij", 5), vec!["abcdefghij"]);

        let sentence = "q".repeat(100);
        let fragments = fragment_sentence(&sentence, 2);
        assert!(fragments.len() > 1);
        assert_well_formed(&fragments, MIN_SEGMENT_LENGTH);
        let content: usize = fragments.iter().map(|f| f.matches('q').count()).sum();
        assert_eq!(content, 100);
    }

    #[test]
    fn test_custom_max_length() {
        let sentence = vec!["tiny"; 30].join(" ");
        let fragments = fragment_sentence(&sentence, 40);
        assert!(fragments.len() > 3);
        assert_well_formed(&fragments, 40);
    }
}
