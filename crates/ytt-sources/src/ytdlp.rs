//! Flat-playlist enumeration via the yt-dlp CLI.
//!
//! Invokes `yt-dlp --flat-playlist -j <url>` once per source and parses the
//! newline-delimited JSON it streams to stdout. Each line is parsed
//! independently: a malformed line is a per-record warning, never a
//! pipeline abort. A missing tool or non-zero exit is fatal for the
//! invocation and surfaces as "no results" upstream.

use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, warn};

use ytt_models::{SourceRef, VideoRecord};

use crate::error::{SourceError, SourceResult};
use crate::VideoSource;

/// Subprocess-based duration source.
pub struct FlatPlaylistLister;

/// One line of yt-dlp's flat-playlist JSON output.
#[derive(Debug, Deserialize)]
struct FlatEntry {
    id: String,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    webpage_url: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    uploader: Option<String>,
}

impl FlatEntry {
    fn into_record(self) -> VideoRecord {
        let url = self
            .webpage_url
            .unwrap_or_else(|| VideoRecord::watch_url(&self.id));
        VideoRecord {
            // yt-dlp reports float seconds; durations are non-negative
            duration_secs: self.duration.map(|d| d.max(0.0).round() as u64),
            url,
            title: self.title,
            channel_title: self.channel.or(self.uploader),
            id: self.id,
        }
    }
}

impl FlatPlaylistLister {
    /// Enumerate a playlist (or any listing URL yt-dlp understands) without
    /// resolving each video's full metadata.
    pub async fn list(&self, url: &str) -> SourceResult<Vec<VideoRecord>> {
        which::which("yt-dlp").map_err(|_| SourceError::YtDlpNotFound)?;

        debug!(url, "Enumerating with yt-dlp --flat-playlist");

        let output = Command::new("yt-dlp")
            .args(["--flat-playlist", "-j"])
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceError::YtDlpFailed {
                stderr: stderr.lines().last().unwrap_or("unknown error").to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_flat_output(&stdout))
    }
}

/// Parse newline-delimited per-video JSON records.
fn parse_flat_output(stdout: &str) -> Vec<VideoRecord> {
    let mut records = Vec::new();
    for line in stdout.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<FlatEntry>(line) {
            Ok(entry) => records.push(entry.into_record()),
            Err(e) => warn!(error = %e, "Could not parse metadata for one entry"),
        }
    }
    records
}

#[async_trait]
impl VideoSource for FlatPlaylistLister {
    async fn fetch_videos(&self, source: &SourceRef) -> SourceResult<Vec<VideoRecord>> {
        self.list(&source.canonical_url()).await
    }
}
