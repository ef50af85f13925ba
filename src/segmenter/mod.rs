mod fragment;
mod numbering;
mod packer;
mod text;


pub use fragment::{Breakpoint, fragment_sentence};
pub use numbering::{apply_numbering, estimate_count, is_valid_length, numbering_prefix};
pub use packer::Packer;
pub use text::{char_len, normalize, split_paragraphs, split_sentences};

use crate::config::SegmenterConfig;
use crate::error::ConfigError;
use crate::post::{Post, PostMetadata};

/// Maximum characters per post
pub const MAX_SEGMENT_LENGTH: usize = 280;

/// Smallest accepted maximum; below it the continuation marker crowds out content
pub const MIN_SEGMENT_LENGTH: usize = 16;

/// Continuation marker on fragments of an oversized sentence
pub const ELLIPSIS: &str = "...";

/// Marker joining paragraphs inside one post
pub const PARAGRAPH_BREAK: &str = "\n\n";

/// Splits prose into a thread of bounded-length posts
///
/// Pure and deterministic: the same input always yields the same thread,
/// and a `Segmenter` can be shared freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmenter {
    max_length: usize,
    numbering: bool,
}

/// Builder for a segmenter with non-default settings
#[derive(Debug, Clone, Copy)]
pub struct SegmenterBuilder {
    config: SegmenterConfig,
}

impl SegmenterBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self {
            config: SegmenterConfig::default(),
        }
    }

    /// Set maximum characters per post
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.config.max_length = max_length;
        self
    }

    /// Enable or disable `k/n ` numbering
    pub fn numbering(mut self, numbering: bool) -> Self {
        self.config.numbering = numbering;
        self
    }

    /// Validate the settings and build the segmenter
    pub fn build(self) -> Result<Segmenter, ConfigError> {
        Segmenter::from_config(self.config)
    }
}

impl Default for SegmenterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter {
    /// Create a segmenter with the 280-character limit and numbering on
    pub fn new() -> Self {
        Self {
            max_length: MAX_SEGMENT_LENGTH,
            numbering: true,
        }
    }

    /// Start a builder for custom settings
    pub fn builder() -> SegmenterBuilder {
        SegmenterBuilder::new()
    }

    /// Build from a config, rejecting limits below `MIN_SEGMENT_LENGTH`
    pub fn from_config(config: SegmenterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            max_length: config.max_length,
            numbering: config.numbering,
        })
    }

    /// Maximum characters per post
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Whether multi-post threads get `k/n ` prefixes
    pub fn numbering(&self) -> bool {
        self.numbering
    }

    /// Run the full pipeline and return the thread as plain strings
    pub fn split(&self, content: &str) -> Vec<String> {
        let segments = self.pack(content);
        if self.numbering {
            apply_numbering(segments, self.max_length)
        } else {
            segments
        }
    }

    /// Run the full pipeline and return posts with metadata
    pub fn split_into_posts(&self, content: &str) -> Vec<Post> {
        let segments = self.pack(content);
        let total = segments.len();
        let numbered_thread = self.numbering && total > 1;

        segments
            .into_iter()
            .enumerate()
            .map(|(index, segment)| {
                let prefixed = if numbered_thread {
                    numbering::try_number(&segment, index, total, self.max_length)
                } else {
                    None
                };
                let (text, numbered) = match prefixed {
                    Some(text) => (text, true),
                    None => (segment, false),
                };

                Post {
                    metadata: PostMetadata {
                        index,
                        total,
                        char_count: char_len(&text),
                        numbered,
                    },
                    text,
                }
            })
            .collect()
    }

    /// Rough post count for `content`, not tied to the real packing
    pub fn estimate_count(&self, content: &str) -> usize {
        estimate_count(content, self.max_length)
    }

    /// Whether `text` fits in a single post
    pub fn is_valid_length(&self, text: &str) -> bool {
        is_valid_length(text, self.max_length)
    }

    /// Normalize, split and pack without numbering
    fn pack(&self, content: &str) -> Vec<String> {
        let normalized = normalize(content);
        let paragraphs = split_paragraphs(&normalized);
        let mut packer = Packer::new(self.max_length);
        let mut sentence_count = 0;

        for paragraph in &paragraphs {
            for sentence in split_sentences(paragraph) {
                packer.push_sentence(sentence);
                sentence_count += 1;
            }
            packer.end_paragraph();
        }

        let segments = packer.finish();
        tracing::debug!(
            chars = char_len(&normalized),
            paragraphs = paragraphs.len(),
            sentences = sentence_count,
            segments = segments.len(),
            "packed thread"
        );
        segments
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `content` into a thread with the default 280-character limit
pub fn split_into_threads(content: &str) -> Vec<String> {
    Segmenter::new().split(content)
}

/// Rough number of posts `content` needs at the default limit
pub fn estimate_tweet_count(content: &str) -> usize {
    Segmenter::new().estimate_count(content)
}

/// Whether `text` fits in one post at the default limit
pub fn is_valid_tweet_length(text: &str) -> bool {
    Segmenter::new().is_valid_length(text)
}
