use serde::{Deserialize, Serialize};

pub mod html;
pub mod inline_json;
pub mod tracks;
pub mod wistia;

/// A reference to a timed-text file associated with a video
///
/// Produced by any locator, consumed by the pipeline. Lives only for the
/// duration of one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// Language or display label, `"unknown"` when the source omits it
    pub label: String,

    /// Absolute URL of the caption file
    pub url: String,
}

/// The closed set of extraction strategies, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// HTML `<track kind="subtitles|captions">` elements on the page
    TrackTags,
    /// A Wistia embed identifier plus its metadata endpoint
    MediaEmbed,
    /// An inline `"transcript": [...]` JSON fragment in the page source
    InlineJson,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::TrackTags => "track-tags",
            Strategy::MediaEmbed => "media-embed",
            Strategy::InlineJson => "inline-json",
        }
    }

    /// All strategies in the order the pipeline tries them
    pub fn ordered() -> [Strategy; 3] {
        [Strategy::TrackTags, Strategy::MediaEmbed, Strategy::InlineJson]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Strategy::TrackTags => "caption <track> tags in the page HTML",
            Strategy::MediaEmbed => "Wistia embed identifier and metadata endpoint",
            Strategy::InlineJson => "inline \"transcript\" JSON fragment",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
