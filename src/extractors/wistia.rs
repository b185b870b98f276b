//! Wistia embed discovery and metadata caption resolution
//!
//! Promotional pages embed Wistia players several ways: a full iframe embed,
//! a `.jsonp` media reference, or just the async-loader CSS class. Pattern
//! order matters. A page that once carried a player can keep residual
//! `wistia_async_` markup, so the specific iframe and media URLs are tried
//! before the generic loader token.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use url::Url;

use super::CaptionTrack;
use crate::{ExtractError, Result};

static EMBED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"https://fast\.wistia\.net/embed/iframe/([a-zA-Z0-9]+)",
        r"https://fast\.wistia\.com/embed/medias/([a-zA-Z0-9]+)\.jsonp",
        r"wistia_async_([a-zA-Z0-9]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static embed pattern"))
    .collect()
});

/// Extract the first Wistia media identifier from page HTML, trying the
/// most specific pattern first
pub fn find_media_id(html: &str) -> Option<String> {
    EMBED_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(html)
            .map(|caps| caps[1].to_string())
    })
}

/// Resolve the caption-track list out of a Wistia media metadata document.
///
/// Entries appear under `media.captions`; platforms disagree on key names,
/// so both `src`/`url` and `language`/`label` variants are accepted.
/// Entries without any source field are skipped. No captions is an empty
/// list, not an error.
pub fn parse_caption_tracks(metadata: &Value, caption_base_url: &str) -> Result<Vec<CaptionTrack>> {
    let base = Url::parse(caption_base_url).map_err(|e| ExtractError::Parse {
        what: "caption base URL".to_string(),
        reason: e.to_string(),
    })?;

    let captions = metadata["media"]["captions"].as_array();
    let mut tracks = Vec::new();

    for caption in captions.into_iter().flatten() {
        let src = caption["src"]
            .as_str()
            .filter(|s| !s.is_empty())
            .or_else(|| caption["url"].as_str().filter(|s| !s.is_empty()));
        let Some(src) = src else {
            tracing::debug!("Skipping caption entry without a source field");
            continue;
        };

        let label = caption["language"]
            .as_str()
            .or_else(|| caption["label"].as_str())
            .unwrap_or("unknown")
            .to_string();

        let url = base.join(src).map_err(|e| ExtractError::Parse {
            what: format!("caption source {:?}", src),
            reason: e.to_string(),
        })?;

        tracks.push(CaptionTrack {
            label,
            url: url.to_string(),
        });
    }

    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "https://fast.wistia.com/";

    #[test]
    fn test_finds_async_loader_id() {
        let html = r#"<div class="wistia_embed wistia_async_abc123 videoFoam=true"></div>"#;
        assert_eq!(find_media_id(html), Some("abc123".to_string()));
    }

    #[test]
    fn test_finds_iframe_id() {
        let html = r#"<iframe src="https://fast.wistia.net/embed/iframe/xyz789?seo=false"></iframe>"#;
        assert_eq!(find_media_id(html), Some("xyz789".to_string()));
    }

    #[test]
    fn test_finds_jsonp_id() {
        let html = r#"<script src="https://fast.wistia.com/embed/medias/qq11ww.jsonp"></script>"#;
        assert_eq!(find_media_id(html), Some("qq11ww".to_string()));
    }

    #[test]
    fn test_iframe_pattern_wins_over_loader_token() {
        // Residual loader markup must not shadow a real iframe embed
        let html = r#"
            <div class="wistia_async_residual1"></div>
            <iframe src="https://fast.wistia.net/embed/iframe/real2"></iframe>
        "#;
        assert_eq!(find_media_id(html), Some("real2".to_string()));
    }

    #[test]
    fn test_no_embed_yields_none() {
        assert_eq!(find_media_id("<html><body>no player here</body></html>"), None);
    }

    #[test]
    fn test_parse_caption_tracks_src_and_language() {
        let metadata = json!({"media": {"captions": [{"src": "a.vtt", "language": "en"}]}});
        let tracks = parse_caption_tracks(&metadata, BASE).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].label, "en");
        assert_eq!(tracks[0].url, "https://fast.wistia.com/a.vtt");
    }

    #[test]
    fn test_parse_caption_tracks_url_and_label_variants() {
        let metadata = json!({"media": {"captions": [
            {"url": "/captions/b.vtt", "label": "Deutsch"}
        ]}});
        let tracks = parse_caption_tracks(&metadata, BASE).unwrap();
        assert_eq!(tracks[0].label, "Deutsch");
        assert_eq!(tracks[0].url, "https://fast.wistia.com/captions/b.vtt");
    }

    #[test]
    fn test_absolute_source_passes_through() {
        let metadata = json!({"media": {"captions": [
            {"src": "https://cdn.example.com/c.vtt", "language": "fr"}
        ]}});
        let tracks = parse_caption_tracks(&metadata, BASE).unwrap();
        assert_eq!(tracks[0].url, "https://cdn.example.com/c.vtt");
    }

    #[test]
    fn test_missing_source_is_skipped() {
        let metadata = json!({"media": {"captions": [
            {"language": "en"},
            {"src": "", "language": "es"},
            {"src": "kept.vtt"}
        ]}});
        let tracks = parse_caption_tracks(&metadata, BASE).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].label, "unknown");
    }

    #[test]
    fn test_no_captions_is_empty_not_error() {
        let metadata = json!({"media": {}});
        assert!(parse_caption_tracks(&metadata, BASE).unwrap().is_empty());
        let metadata = json!({});
        assert!(parse_caption_tracks(&metadata, BASE).unwrap().is_empty());
    }

    #[test]
    fn test_document_order_preserved() {
        let metadata = json!({"media": {"captions": [
            {"src": "1.vtt", "language": "en"},
            {"src": "2.vtt", "language": "es"}
        ]}});
        let tracks = parse_caption_tracks(&metadata, BASE).unwrap();
        assert_eq!(tracks[0].label, "en");
        assert_eq!(tracks[1].label, "es");
    }
}
