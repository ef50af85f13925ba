// Public API exports
pub mod config;
pub mod error;
pub mod post;
pub mod segmenter;

// Re-export main types for convenience
pub use config::SegmenterConfig;
pub use error::ConfigError;
pub use post::{Post, PostMetadata};

pub use segmenter::{
    MAX_SEGMENT_LENGTH, Segmenter, SegmenterBuilder, estimate_tweet_count, is_valid_tweet_length,
    split_into_threads,
};
