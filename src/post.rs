use serde::Serialize;

/// A single post of a thread, ready for display or publishing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Final text, including the `k/n ` prefix when numbered
    pub text: String,
    /// Position and length details
    pub metadata: PostMetadata,
}

/// Metadata for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PostMetadata {
    /// 0-based position in the thread
    pub index: usize,
    /// Number of posts in the thread
    pub total: usize,
    /// Length of `text` in characters
    pub char_count: usize,
    /// Whether the `k/n ` prefix was applied
    pub numbered: bool,
}
