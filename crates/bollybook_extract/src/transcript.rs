//! Caption retrieval from YouTube's timed-text endpoint.

use async_trait::async_trait;
use bollybook_error::{BollybookResult, ExtractError, ExtractErrorKind};
use bollybook_interface::{TranscriptEntry, TranscriptSource};
use serde::Deserialize;
use tracing::instrument;

/// Where and in which language to request captions.
///
/// # Examples
///
/// ```
/// use bollybook_extract::YouTubeTranscriptConfig;
///
/// let config = YouTubeTranscriptConfig::builder().language("hi").build().unwrap();
/// assert_eq!(config.base_url(), "https://www.youtube.com");
/// assert_eq!(config.language(), "hi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct YouTubeTranscriptConfig {
    /// Scheme and host serving `/api/timedtext`
    #[builder(default = "\"https://www.youtube.com\".to_string()")]
    base_url: String,
    /// Caption track language code
    #[builder(default = "\"en\".to_string()")]
    language: String,
}

impl YouTubeTranscriptConfig {
    /// Creates a new config builder.
    pub fn builder() -> YouTubeTranscriptConfigBuilder {
        YouTubeTranscriptConfigBuilder::default()
    }
}

#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimedTextEvent {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    segs: Vec<TimedTextSegment>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSegment {
    #[serde(default)]
    utf8: String,
}

/// [`TranscriptSource`] backed by the public `json3` timed-text endpoint.
#[derive(Debug, Clone)]
pub struct YouTubeTranscriptSource {
    config: YouTubeTranscriptConfig,
    client: reqwest::Client,
}

impl YouTubeTranscriptSource {
    /// Create a new transcript source.
    pub fn new(config: YouTubeTranscriptConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

fn unavailable(message: impl Into<String>) -> ExtractError {
    ExtractError::new(ExtractErrorKind::TranscriptUnavailable(message.into()))
}

#[async_trait]
impl TranscriptSource for YouTubeTranscriptSource {
    #[instrument(skip(self), fields(lang = %self.config.language))]
    async fn fetch(&self, video_id: &str) -> BollybookResult<Vec<TranscriptEntry>> {
        let url = format!(
            "{}/api/timedtext",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .get(&url)
            .query(&[
                ("v", video_id),
                ("lang", self.config.language.as_str()),
                ("fmt", "json3"),
            ])
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("caption service returned {}", status)).into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        if body.trim().is_empty() {
            return Err(unavailable(format!("no captions for video {}", video_id)).into());
        }

        let timed: TimedText =
            serde_json::from_str(&body).map_err(|e| unavailable(e.to_string()))?;

        let entries = timed
            .events
            .into_iter()
            .filter(|event| !event.segs.is_empty())
            .map(|event| TranscriptEntry {
                start: event.t_start_ms as f64 / 1000.0,
                text: event
                    .segs
                    .into_iter()
                    .map(|seg| seg.utf8)
                    .collect::<String>()
                    .replace('\n', " "),
            })
            .collect::<Vec<_>>();

        tracing::debug!(entries = entries.len(), "Fetched captions");
        Ok(entries)
    }
}
