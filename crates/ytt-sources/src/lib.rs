//! Duration source adapters.
//!
//! Two interchangeable strategies yield [`VideoRecord`]s for a classified
//! source:
//! - [`FlatPlaylistLister`]: subprocess flat-playlist enumeration via yt-dlp
//! - [`DataApiClient`]: paginated YouTube Data API v3 lookups
//!
//! The strategy is selected by the caller; the pipeline only ever sees the
//! [`VideoSource`] trait.

use async_trait::async_trait;
use ytt_models::{SourceRef, VideoRecord};

pub mod api;
pub mod config;
pub mod error;
pub mod ytdlp;

pub use api::{DataApiClient, DurationCategory, SearchMatch, SearchPage, SearchRequest, BATCH_SIZE};
pub use config::ApiKey;
pub use error::{SourceError, SourceResult};
pub use ytdlp::FlatPlaylistLister;

/// A strategy that resolves a classified source to per-video metadata.
#[async_trait]
pub trait VideoSource {
    /// Yield one record per video the source contains, in source order.
    async fn fetch_videos(&self, source: &SourceRef) -> SourceResult<Vec<VideoRecord>>;
}
