//! Pagescribe - A Rust CLI tool for pulling video transcripts out of web pages
//!
//! This library locates caption/transcript content embedded in marketing and
//! promotional pages and normalizes it into plain text. Three strategies are
//! tried in priority order: HTML `<track>` caption tags, a Wistia embed with a
//! secondary metadata fetch, and inline `"transcript"` JSON fragments.

pub mod cli;
pub mod config;
pub mod extractors;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod timedtext;
pub mod utils;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use extractors::{CaptionTrack, Strategy};
pub use fetch::{Fetch, HttpFetcher};
pub use pipeline::{ExtractionPipeline, TranscriptResult};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to transcript extraction
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("Network request failed for {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("Failed to parse {what}: {reason}")]
    Parse { what: String, reason: String },

    #[error("Unable to find a transcript in {0}. Inspect the HTML for custom transcript structures.")]
    TranscriptNotFound(String),
}
