//! Caption `<track>` locator
//!
//! Scans the page HTML for `<track>` elements whose `kind` marks them as
//! spoken-text captions. Document order is preserved so the pipeline tries
//! tracks in the order the page declares them.

use super::html::TagScanner;

/// A `<track>` reference as found in the page: possibly-relative `src` plus
/// an optional display label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSource {
    pub src: String,
    pub label: Option<String>,
}

/// Find caption-track declarations in an HTML document.
///
/// Only `kind="subtitles"` and `kind="captions"` qualify (case-insensitive);
/// chapter, description, and metadata tracks carry no spoken text.
pub fn find_tracks(html: &str) -> Vec<TrackSource> {
    TagScanner::new(html)
        .filter(|tag| tag.name == "track")
        .filter_map(|tag| {
            let kind = tag.attr("kind")?.to_lowercase();
            if kind != "subtitles" && kind != "captions" {
                return None;
            }
            let src = tag.attr("src")?;
            if src.is_empty() {
                return None;
            }
            Some(TrackSource {
                src: src.to_string(),
                label: tag.attr("label").map(|s| s.to_string()),
            })
        })
        .collect()
}
