//! YouTube URL parsing and transcript assembly.

use bollybook_error::{ExtractError, ExtractErrorKind};
use bollybook_interface::TranscriptSource;
use regex::Regex;
use std::sync::LazyLock;
use tracing::instrument;

static VIDEO_ID_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([A-Za-z0-9_-]{11})")
            .expect("valid video id pattern"),
        Regex::new(r"youtube\.com/embed/([A-Za-z0-9_-]{11})").expect("valid embed pattern"),
    ]
});

static PLAYLIST_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]list=([A-Za-z0-9_-]+)").expect("valid playlist pattern"));

/// The 11-character video id in a watch, short or embed URL.
///
/// # Examples
///
/// ```
/// use bollybook_extract::extract_video_id;
///
/// assert_eq!(
///     extract_video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(),
///     Some("dQw4w9WgXcQ")
/// );
/// assert_eq!(extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ"), None);
/// ```
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .map(|caps| caps[1].to_string())
}

/// The playlist id from a `list=` query parameter.
pub fn extract_playlist_id(url: &str) -> Option<String> {
    PLAYLIST_PATTERN
        .captures(url)
        .map(|caps| caps[1].to_string())
}

/// Fetch and flatten the transcript for a single-video URL.
///
/// Playlist URLs are recognized first and rejected with
/// [`ExtractErrorKind::NotImplemented`] without looking for a video id.
/// Caption entries are ordered by start time and their text joined with
/// single spaces.
#[instrument(skip(source))]
pub async fn get_transcript(
    url: &str,
    source: &dyn TranscriptSource,
) -> Result<String, ExtractError> {
    if let Some(playlist_id) = extract_playlist_id(url) {
        tracing::warn!(%playlist_id, "Playlist URL submitted");
        return Err(ExtractError::new(ExtractErrorKind::NotImplemented(format!(
            "Playlist processing not implemented yet. Playlist ID: {}",
            playlist_id
        ))));
    }

    let video_id = extract_video_id(url)
        .ok_or_else(|| ExtractError::new(ExtractErrorKind::InvalidUrl(url.to_string())))?;

    let mut entries = source.fetch(&video_id).await.map_err(|e| {
        tracing::error!(%video_id, error = %e, "Transcript fetch failed");
        ExtractError::new(ExtractErrorKind::TranscriptUnavailable(e.detail()))
    })?;
    entries.sort_by(|a, b| a.start.total_cmp(&b.start));

    let text = entries
        .iter()
        .map(|entry| entry.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    tracing::debug!(%video_id, entries = entries.len(), "Transcript assembled");
    Ok(text)
}
