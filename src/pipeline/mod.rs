use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::config::Config;
use crate::extractors::{inline_json, tracks, wistia, Strategy};
use crate::fetch::{Fetch, HttpFetcher};
use crate::timedtext;
use crate::{ExtractError, Result};

/// The assembled transcript plus where it came from
///
/// `lines` is never empty: an empty outcome is a failure, not a success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptResult {
    /// Ordered transcript lines; may include `[label]` header lines when
    /// several caption tracks contributed
    pub lines: Vec<String>,

    /// Which strategy produced the transcript
    pub strategy: Strategy,

    /// The page URL the transcript was extracted from
    pub source_url: String,
}

impl TranscriptResult {
    /// Newline-joined plain text
    pub fn as_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// One caption track's worth of parsed cue text
struct TrackCues {
    label: Option<String>,
    cues: Vec<String>,
}

/// Runs the extraction strategies in priority order against one page
pub struct ExtractionPipeline {
    config: Config,
    fetcher: Box<dyn Fetch>,
    quiet: bool,
}

impl ExtractionPipeline {
    /// Create a pipeline backed by a real HTTP client
    pub fn new(config: Config, quiet: bool) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self {
            config,
            fetcher: Box::new(fetcher),
            quiet,
        })
    }

    /// Create a pipeline with a caller-provided fetcher (used by tests)
    pub fn with_fetcher(config: Config, fetcher: Box<dyn Fetch>) -> Self {
        Self {
            config,
            fetcher,
            quiet: true,
        }
    }

    /// Extract a transcript from the page at `page_url`.
    ///
    /// A failed page fetch is fatal. Failures while trying an individual
    /// caption candidate are logged and skipped; when every strategy comes
    /// up empty the run ends with `TranscriptNotFound`.
    pub async fn extract(&self, page_url: &str) -> Result<TranscriptResult> {
        let spinner = self.spinner();

        spinner.set_message(format!("Fetching {}", page_url));
        let html = match self.fetcher.fetch_text(page_url).await {
            Ok(html) => html,
            Err(e) => {
                spinner.finish_and_clear();
                return Err(e);
            }
        };

        spinner.set_message("Scanning for caption tracks");
        if let Some(result) = self.try_track_tags(page_url, &html).await {
            spinner.finish_and_clear();
            return Ok(result);
        }

        spinner.set_message("Looking for a media embed");
        if let Some(result) = self.try_media_embed(page_url, &html).await {
            spinner.finish_and_clear();
            return Ok(result);
        }

        spinner.set_message("Searching for inline transcript JSON");
        if let Some(result) = self.try_inline_json(page_url, &html) {
            spinner.finish_and_clear();
            return Ok(result);
        }

        spinner.finish_and_clear();
        Err(ExtractError::TranscriptNotFound(page_url.to_string()).into())
    }

    /// Strategy 1: `<track>` caption tags in the page itself
    async fn try_track_tags(&self, page_url: &str, html: &str) -> Option<TranscriptResult> {
        let found = tracks::find_tracks(html);
        if found.is_empty() {
            tracing::debug!("No caption <track> tags on the page");
            return None;
        }
        tracing::info!("Found {} caption track(s) on the page", found.len());

        let mut collected: Vec<TrackCues> = Vec::new();
        for track in found {
            let caption_url = match join_url(page_url, &track.src) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Skipping caption {:?}: {}", track.src, e);
                    continue;
                }
            };

            let cues = match self.fetch_cues(&caption_url).await {
                Ok(cues) => cues,
                Err(e) => {
                    tracing::warn!("Skipping caption {}: {}", caption_url, e);
                    continue;
                }
            };
            if cues.is_empty() {
                tracing::warn!("Caption file {} contained no cues", caption_url);
                continue;
            }

            collected.push(TrackCues {
                label: track.label,
                cues,
            });
        }

        if collected.is_empty() {
            return None;
        }
        Some(assemble(collected, Strategy::TrackTags, page_url))
    }

    /// Strategy 2: a Wistia embed identifier plus its metadata endpoint
    async fn try_media_embed(&self, page_url: &str, html: &str) -> Option<TranscriptResult> {
        let media_id = match wistia::find_media_id(html) {
            Some(id) => id,
            None => {
                tracing::debug!("No media embed identifier on the page");
                return None;
            }
        };
        tracing::info!("Found media embed identifier: {}", media_id);

        let metadata_url = self.config.metadata_url(&media_id);
        let metadata_text = match self.fetcher.fetch_text(&metadata_url).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Failed to fetch media metadata from {}: {}", metadata_url, e);
                return None;
            }
        };

        let metadata: serde_json::Value = match serde_json::from_str(&metadata_text) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Media metadata from {} is not valid JSON: {}", metadata_url, e);
                return None;
            }
        };

        let tracks =
            match wistia::parse_caption_tracks(&metadata, &self.config.platform.caption_base_url) {
                Ok(tracks) => tracks,
                Err(e) => {
                    tracing::warn!("Could not resolve caption tracks: {}", e);
                    return None;
                }
            };
        let Some(track) = tracks.first() else {
            tracing::info!("Media {} has no caption tracks", media_id);
            return None;
        };
        if tracks.len() > 1 {
            tracing::debug!("Using first of {} caption tracks", tracks.len());
        }

        let cues = match self.fetch_cues(&track.url).await {
            Ok(cues) => cues,
            Err(e) => {
                tracing::warn!("Failed to fetch caption file {}: {}", track.url, e);
                return None;
            }
        };
        if cues.is_empty() {
            tracing::warn!("Caption file {} contained no cues", track.url);
            return None;
        }

        Some(assemble(
            vec![TrackCues {
                label: Some(track.label.clone()),
                cues,
            }],
            Strategy::MediaEmbed,
            page_url,
        ))
    }

    /// Strategy 3: inline `"transcript"` JSON in the original page HTML
    fn try_inline_json(&self, page_url: &str, html: &str) -> Option<TranscriptResult> {
        match inline_json::find_inline_transcript(html) {
            None => {
                tracing::debug!("No inline transcript fragment on the page");
                None
            }
            Some(lines) if lines.is_empty() => {
                tracing::info!("Inline transcript fragment matched but held no usable lines");
                None
            }
            Some(lines) => Some(TranscriptResult {
                lines,
                strategy: Strategy::InlineJson,
                source_url: page_url.to_string(),
            }),
        }
    }

    /// Download and parse one caption file into cue text
    async fn fetch_cues(&self, caption_url: &str) -> Result<Vec<String>> {
        let text = self.fetcher.fetch_text(caption_url).await?;
        Ok(timedtext::parse_cues(&text)
            .into_iter()
            .map(|cue| cue.text)
            .collect())
    }

    fn spinner(&self) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

/// Join a possibly-relative caption source against the page URL
fn join_url(page_url: &str, src: &str) -> Result<String> {
    let base = Url::parse(page_url).map_err(|e| ExtractError::Parse {
        what: format!("page URL {:?}", page_url),
        reason: e.to_string(),
    })?;
    let joined = base.join(src).map_err(|e| ExtractError::Parse {
        what: format!("caption source {:?}", src),
        reason: e.to_string(),
    })?;
    Ok(joined.to_string())
}

/// Assemble collected track cues into a result, prefixing each track with a
/// `[label]` header when more than one track contributed
fn assemble(collected: Vec<TrackCues>, strategy: Strategy, page_url: &str) -> TranscriptResult {
    let labeled = collected.len() > 1;
    let mut lines = Vec::new();
    for track in collected {
        if labeled {
            lines.push(format!("[{}]", track.label.as_deref().unwrap_or("unknown")));
        }
        lines.extend(track.cues);
    }
    TranscriptResult {
        lines,
        strategy,
        source_url: page_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExtractError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// In-memory fetcher: a URL map, anything else fails like the network
    struct FakeFetcher {
        responses: HashMap<String, Vec<u8>>,
    }

    impl FakeFetcher {
        fn new(pairs: &[(&str, &str)]) -> Self {
            Self {
                responses: pairs
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.as_bytes().to_vec()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl Fetch for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.responses.get(url).cloned().ok_or_else(|| {
                ExtractError::Network {
                    url: url.to_string(),
                    reason: "connection refused".to_string(),
                }
                .into()
            })
        }
    }

    fn pipeline(pairs: &[(&str, &str)]) -> ExtractionPipeline {
        ExtractionPipeline::with_fetcher(Config::default(), Box::new(FakeFetcher::new(pairs)))
    }

    const PAGE: &str = "https://example.com/promo";

    #[tokio::test]
    async fn test_track_tag_strategy() {
        let pipeline = pipeline(&[
            (
                PAGE,
                r#"<video><track kind="captions" src="cap.vtt" label="English"></video>"#,
            ),
            (
                "https://example.com/cap.vtt",
                "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\nHello there.\n\n00:00:01.000 --> 00:00:02.000\nGoodbye.",
            ),
        ]);

        let result = pipeline.extract(PAGE).await.unwrap();
        assert_eq!(result.strategy, Strategy::TrackTags);
        assert_eq!(result.as_text(), "Hello there.\nGoodbye.");
    }

    #[tokio::test]
    async fn test_multiple_tracks_get_label_headers() {
        let pipeline = pipeline(&[
            (
                PAGE,
                r#"<track kind="captions" src="en.vtt" label="English">
                   <track kind="captions" src="es.vtt" label="Spanish">"#,
            ),
            (
                "https://example.com/en.vtt",
                "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\nHello.\n",
            ),
            (
                "https://example.com/es.vtt",
                "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\nHola.\n",
            ),
        ]);

        let result = pipeline.extract(PAGE).await.unwrap();
        assert_eq!(result.as_text(), "[English]\nHello.\n[Spanish]\nHola.");
    }

    #[tokio::test]
    async fn test_failed_track_is_skipped_not_fatal() {
        let pipeline = pipeline(&[
            (
                PAGE,
                r#"<track kind="captions" src="missing.vtt" label="A">
                   <track kind="captions" src="good.vtt" label="B">"#,
            ),
            (
                "https://example.com/good.vtt",
                "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\nStill here.\n",
            ),
        ]);

        let result = pipeline.extract(PAGE).await.unwrap();
        // One surviving track, so no label header
        assert_eq!(result.as_text(), "Still here.");
    }

    #[tokio::test]
    async fn test_media_embed_strategy() {
        let pipeline = pipeline(&[
            (PAGE, r#"<div class="wistia_async_abc123"></div>"#),
            (
                "https://fast.wistia.com/embed/medias/abc123.json",
                r#"{"media":{"captions":[{"src":"a.vtt","language":"en"}]}}"#,
            ),
            (
                "https://fast.wistia.com/a.vtt",
                "1\n00:00:00,000 --> 00:00:01,000\nHi.\n",
            ),
        ]);

        let result = pipeline.extract(PAGE).await.unwrap();
        assert_eq!(result.strategy, Strategy::MediaEmbed);
        assert_eq!(result.as_text(), "Hi.");
    }

    #[tokio::test]
    async fn test_inline_json_strategy() {
        let pipeline = pipeline(&[(
            PAGE,
            r#"<script>{"transcript": ["Line one.", {"text": "Line two."}]}</script>"#,
        )]);

        let result = pipeline.extract(PAGE).await.unwrap();
        assert_eq!(result.strategy, Strategy::InlineJson);
        assert_eq!(result.as_text(), "Line one.\nLine two.");
    }

    #[tokio::test]
    async fn test_page_fetch_failure_is_fatal_network_error() {
        let pipeline = pipeline(&[]);

        let err = pipeline.extract(PAGE).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExtractError>(),
            Some(ExtractError::Network { .. })
        ));
    }

    #[tokio::test]
    async fn test_all_strategies_exhausted_is_transcript_not_found() {
        // The track's caption file 404s and nothing else applies
        let pipeline = pipeline(&[(
            PAGE,
            r#"<track kind="captions" src="gone.vtt" label="English">"#,
        )]);

        let err = pipeline.extract(PAGE).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExtractError>(),
            Some(ExtractError::TranscriptNotFound(url)) if url == PAGE
        ));
    }

    #[tokio::test]
    async fn test_metadata_failure_falls_through_to_inline_json() {
        // Embed identifier present, metadata endpoint unreachable, but the
        // page also inlines a transcript fragment
        let pipeline = pipeline(&[(
            PAGE,
            r#"<div class="wistia_async_dead1"></div>
               <script>{"transcript": ["Fallback line."]}</script>"#,
        )]);

        let result = pipeline.extract(PAGE).await.unwrap();
        assert_eq!(result.strategy, Strategy::InlineJson);
        assert_eq!(result.as_text(), "Fallback line.");
    }

    #[tokio::test]
    async fn test_empty_inline_array_does_not_succeed() {
        let pipeline = pipeline(&[(PAGE, r#"{"transcript": []}"#)]);

        let err = pipeline.extract(PAGE).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExtractError>(),
            Some(ExtractError::TranscriptNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_track_strategy_takes_priority_over_embed() {
        let pipeline = pipeline(&[
            (
                PAGE,
                r#"<track kind="captions" src="cap.vtt" label="English">
                   <div class="wistia_async_abc123"></div>"#,
            ),
            (
                "https://example.com/cap.vtt",
                "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\nFrom track.\n",
            ),
        ]);

        let result = pipeline.extract(PAGE).await.unwrap();
        assert_eq!(result.strategy, Strategy::TrackTags);
        assert_eq!(result.as_text(), "From track.");
    }
}
