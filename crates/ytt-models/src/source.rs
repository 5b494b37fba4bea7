//! Source classification for YouTube URLs.
//!
//! Maps a raw URL string to a video, playlist, or channel reference.
//! Classification is ordered: a playlist parameter wins over a video id in
//! the same URL, because playlist context takes precedence over an
//! individual video within it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What kind of source a URL refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Video,
    Playlist,
    Channel,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Video => write!(f, "video"),
            SourceKind::Playlist => write!(f, "playlist"),
            SourceKind::Channel => write!(f, "channel"),
        }
    }
}

/// A classified source: kind plus extracted identifier.
///
/// Derived once from a raw URL string and never mutated. For channels the
/// identifier keeps its original shape (`UC…` id, `@handle`, or plain
/// legacy name) so the resolver can pick the right lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub kind: SourceKind,
    pub id: String,
}

impl SourceRef {
    /// Canonical URL for this source, suitable for handing to yt-dlp.
    pub fn canonical_url(&self) -> String {
        match self.kind {
            SourceKind::Video => crate::VideoRecord::watch_url(&self.id),
            SourceKind::Playlist => {
                format!("https://www.youtube.com/playlist?list={}", self.id)
            }
            SourceKind::Channel => {
                if self.id.starts_with('@') {
                    format!("https://www.youtube.com/{}/videos", self.id)
                } else if self.id.starts_with("UC") {
                    format!("https://www.youtube.com/channel/{}/videos", self.id)
                } else {
                    format!("https://www.youtube.com/c/{}/videos", self.id)
                }
            }
        }
    }
}

/// Errors from source classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The string matched none of the known URL shapes. Non-fatal: callers
    /// skip the source and continue.
    #[error("unrecognized YouTube source: {0}")]
    Unrecognized(String),
}

/// Classify a raw URL string into a [`SourceRef`].
///
/// Ordered pattern matches: playlist `list=` parameter, then an
/// 11-character video id in standard watch/short/embed forms, then a
/// channel path segment (`/channel/`, `/c/`, `/@handle`).
pub fn classify_source(raw: &str) -> Result<SourceRef, ClassifyError> {
    let url = raw.trim();

    if let Some(id) = extract_playlist_id(url) {
        return Ok(SourceRef {
            kind: SourceKind::Playlist,
            id,
        });
    }

    if let Some(id) = extract_video_id(url) {
        return Ok(SourceRef {
            kind: SourceKind::Video,
            id,
        });
    }

    if let Some(id) = extract_channel_id(url) {
        return Ok(SourceRef {
            kind: SourceKind::Channel,
            id,
        });
    }

    Err(ClassifyError::Unrecognized(url.to_string()))
}

/// Extract a playlist id from a `list=` query parameter.
fn extract_playlist_id(url: &str) -> Option<String> {
    let mut from = 0;
    while let Some(pos) = url[from..].find("list=") {
        let abs = from + pos;
        from = abs + 5;
        // Must be a query parameter, not part of another word ("playlist=").
        if abs > 0 && !matches!(url.as_bytes()[abs - 1], b'?' | b'&') {
            continue;
        }
        let id = take_id_segment(&url[abs + 5..]);
        if !id.is_empty() && is_valid_id_chars(id) {
            return Some(id.to_string());
        }
    }
    None
}

/// Extract an 11-character video id from the standard URL forms.
fn extract_video_id(url: &str) -> Option<String> {
    const MARKERS: [&str; 6] = ["?v=", "&v=", "youtu.be/", "/embed/", "/shorts/", "/v/"];

    for marker in MARKERS {
        if let Some(pos) = url.find(marker) {
            let id = take_id_segment(&url[pos + marker.len()..]);
            if id.len() == 11 && is_valid_id_chars(id) {
                return Some(id.to_string());
            }
        }
    }
    None
}

/// Extract a channel identifier from a channel path segment.
///
/// `/@handle` keeps the leading `@` so downstream resolution can tell a
/// handle apart from a legacy custom name.
fn extract_channel_id(url: &str) -> Option<String> {
    for marker in ["/channel/", "/c/"] {
        if let Some(pos) = url.find(marker) {
            let id = take_channel_segment(&url[pos + marker.len()..]);
            if !id.is_empty() {
                return Some(id.to_string());
            }
        }
    }
    if let Some(pos) = url.find("/@") {
        let handle = take_channel_segment(&url[pos + 2..]);
        if !handle.is_empty() {
            return Some(format!("@{}", handle));
        }
    }
    None
}

/// Take the id-shaped prefix of a URL remainder, up to the next delimiter.
fn take_id_segment(segment: &str) -> &str {
    let end = segment
        .find(['&', '#', '?', '/'])
        .unwrap_or(segment.len());
    &segment[..end]
}

/// Like [`take_id_segment`] but allows dots, which appear in legacy channel
/// names.
fn take_channel_segment(segment: &str) -> &str {
    let end = segment
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'))
        .unwrap_or(segment.len());
    &segment[..end]
}

fn is_valid_id_chars(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_watch_url_as_video() {
        let source = classify_source("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(source.kind, SourceKind::Video);
        assert_eq!(source.id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_classifies_short_embed_and_shorts_forms() {
        for url in [
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
        ] {
            let source = classify_source(url).unwrap();
            assert_eq!(source.kind, SourceKind::Video, "{}", url);
            assert_eq!(source.id, "dQw4w9WgXcQ");
        }
    }

    #[test]
    fn test_playlist_parameter_takes_precedence_over_video_id() {
        let source =
            classify_source("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLrAXtmRdnEQy4qtr")
                .unwrap();
        assert_eq!(source.kind, SourceKind::Playlist);
        assert_eq!(source.id, "PLrAXtmRdnEQy4qtr");
    }

    #[test]
    fn test_classifies_plain_playlist_url() {
        let source =
            classify_source("https://www.youtube.com/playlist?list=PLrAXtmRdnEQy4qtr").unwrap();
        assert_eq!(source.kind, SourceKind::Playlist);
        assert_eq!(source.id, "PLrAXtmRdnEQy4qtr");
    }

    #[test]
    fn test_classifies_channel_forms() {
        let by_id = classify_source("https://www.youtube.com/channel/UC1234567890abcdefgh").unwrap();
        assert_eq!(by_id.kind, SourceKind::Channel);
        assert_eq!(by_id.id, "UC1234567890abcdefgh");

        let by_name = classify_source("https://www.youtube.com/c/SomeChannel/videos").unwrap();
        assert_eq!(by_name.kind, SourceKind::Channel);
        assert_eq!(by_name.id, "SomeChannel");

        let by_handle = classify_source("https://www.youtube.com/@somehandle").unwrap();
        assert_eq!(by_handle.kind, SourceKind::Channel);
        assert_eq!(by_handle.id, "@somehandle");
    }

    #[test]
    fn test_unrecognized_url_is_an_error() {
        assert!(matches!(
            classify_source("https://example.com/video"),
            Err(ClassifyError::Unrecognized(_))
        ));
        assert!(matches!(
            classify_source("not a url at all"),
            Err(ClassifyError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_short_video_id_is_not_a_video() {
        // 7-char token is not a valid video id; nothing else matches either
        assert!(classify_source("https://www.youtube.com/watch?v=abc1234").is_err());
    }

    #[test]
    fn test_playlist_marker_must_be_a_query_param() {
        // "playlist=" must not satisfy the "list=" match
        assert!(extract_playlist_id("https://example.com/page?playlist=xyz").is_none());
        assert!(extract_playlist_id("https://www.youtube.com/watch?list=PLabc").is_some());
    }

    #[test]
    fn test_canonical_urls() {
        let video = SourceRef {
            kind: SourceKind::Video,
            id: "dQw4w9WgXcQ".into(),
        };
        assert_eq!(
            video.canonical_url(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );

        let handle = SourceRef {
            kind: SourceKind::Channel,
            id: "@somehandle".into(),
        };
        assert_eq!(
            handle.canonical_url(),
            "https://www.youtube.com/@somehandle/videos"
        );
    }
}
