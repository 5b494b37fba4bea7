//! Per-video metadata as yielded by a duration source.

use serde::{Deserialize, Serialize};

/// Metadata for a single video, immutable once fetched.
///
/// `duration_secs` is `None` when the source could not determine a duration
/// (upcoming premieres, livestreams, deleted videos). Records with unknown
/// duration are never counted toward a total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    /// 11-character video id
    pub id: String,
    /// Duration in whole seconds, if known
    pub duration_secs: Option<u64>,
    /// Canonical watch URL
    pub url: String,
    /// Video title, if the source provided one
    pub title: Option<String>,
    /// Channel title, if the source provided one
    pub channel_title: Option<String>,
}

impl VideoRecord {
    /// Canonical watch URL for a video id.
    pub fn watch_url(id: &str) -> String {
        format!("https://www.youtube.com/watch?v={}", id)
    }
}
