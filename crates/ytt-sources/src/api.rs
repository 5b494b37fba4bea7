//! Paginated YouTube Data API v3 client.
//!
//! Covers the four operations the toolkit needs: channel uploads-playlist
//! resolution, playlist membership listing, batched video duration lookup,
//! and keyword search. All payloads deserialize into typed structs at this
//! boundary; no raw JSON values escape the crate.
//!
//! Failure policy follows the error taxonomy: a failed page ends the walk
//! with what was collected so far, a failed batch is skipped, and only
//! client construction or a missing credential aborts a run.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use ytt_models::{parse_iso8601_duration, SourceKind, SourceRef, VideoRecord};

use crate::config::ApiKey;
use crate::error::{SourceError, SourceResult};
use crate::VideoSource;

/// API ceiling for page size and for ids per `videos.list` call.
pub const BATCH_SIZE: usize = 50;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Paginated API duration source.
pub struct DataApiClient {
    client: Client,
    api_key: ApiKey,
    base_url: String,
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelResource {
    content_details: ChannelContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemResource {
    content_details: PlaylistItemDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemDetails {
    video_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoResource {
    id: String,
    content_details: VideoContentDetails,
    #[serde(default)]
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoContentDetails {
    #[serde(default)]
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    channel_title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResource {
    id: SearchResourceId,
    #[serde(default)]
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResourceId {
    #[serde(default)]
    video_id: Option<String>,
    #[serde(default)]
    channel_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ============================================================================
// Search types
// ============================================================================

/// Built-in duration category filter for `search.list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationCategory {
    #[default]
    Any,
    Short,
    Medium,
    Long,
}

impl DurationCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DurationCategory::Any => "any",
            DurationCategory::Short => "short",
            DurationCategory::Medium => "medium",
            DurationCategory::Long => "long",
        }
    }
}

impl std::fmt::Display for DurationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword search parameters.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    /// ISO 639-1 relevance language
    pub language: String,
    /// ISO 3166-1 alpha-2 region bias
    pub region: Option<String>,
    pub duration_category: DurationCategory,
    /// Requested number of final results (1..=50)
    pub max_results: usize,
}

/// One video hit from a search page, before duration enrichment.
#[derive(Debug, Clone)]
pub struct SearchMatch {
    pub video_id: String,
    pub title: Option<String>,
    pub channel_title: Option<String>,
}

/// One page of search hits plus the continuation token, if any.
#[derive(Debug)]
pub struct SearchPage {
    pub matches: Vec<SearchMatch>,
    pub next_page_token: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

impl DataApiClient {
    /// Create a client against the production API endpoint.
    pub fn new(api_key: ApiKey) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint (used by tests).
    pub fn with_base_url(api_key: ApiKey, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> SourceResult<T> {
        let url = format!("{}/{}", self.base_url, resource);
        let mut query: Vec<(&str, &str)> = params.to_vec();
        query.push(("key", self.api_key.as_str()));

        debug!(resource, "Data API request");
        let response = self.client.get(&url).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// Resolve a channel identifier to its uploads playlist id.
    ///
    /// Resolution order is deterministic: a `UC`-prefixed id goes through
    /// `channels.list?id=`; an `@handle` goes through a channel search and
    /// then an id lookup; anything else is treated as a legacy username.
    /// `Ok(None)` means the channel could not be resolved (source skipped).
    pub async fn uploads_playlist_id(&self, channel: &str) -> SourceResult<Option<String>> {
        if channel.starts_with("UC") {
            return self.channel_uploads_by("id", channel).await;
        }

        if channel.starts_with('@') {
            let page: PageResponse<SearchResource> = self
                .get_json(
                    "search",
                    &[
                        ("part", "id"),
                        ("type", "channel"),
                        ("q", channel),
                        ("maxResults", "1"),
                    ],
                )
                .await?;
            let channel_id = page.items.into_iter().next().and_then(|hit| hit.id.channel_id);
            return match channel_id {
                Some(id) => self.channel_uploads_by("id", &id).await,
                None => Ok(None),
            };
        }

        self.channel_uploads_by("forUsername", channel).await
    }

    async fn channel_uploads_by(&self, param: &str, value: &str) -> SourceResult<Option<String>> {
        let page: PageResponse<ChannelResource> = self
            .get_json("channels", &[("part", "contentDetails"), (param, value)])
            .await?;
        Ok(page
            .items
            .into_iter()
            .next()
            .map(|channel| channel.content_details.related_playlists.uploads))
    }

    /// Collect all video ids in a playlist, following the continuation
    /// token until exhausted. A failed page is logged and ends the walk
    /// with what was collected so far; the token for anything beyond it is
    /// gone with the failed response.
    pub async fn playlist_video_ids(&self, playlist_id: &str) -> Vec<String> {
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params = vec![
                ("part", "contentDetails"),
                ("playlistId", playlist_id),
                ("maxResults", "50"),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }

            let page: PageResponse<PlaylistItemResource> =
                match self.get_json("playlistItems", &params).await {
                    Ok(page) => page,
                    Err(e) => {
                        warn!(playlist_id, error = %e, "Playlist page fetch failed");
                        break;
                    }
                };

            ids.extend(page.items.into_iter().map(|item| item.content_details.video_id));
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        ids
    }

    /// Fetch duration metadata for ids in batches of up to [`BATCH_SIZE`].
    /// A failed batch contributes nothing; later batches still run. Records
    /// come back in API order within each batch.
    pub async fn video_records(&self, video_ids: &[String]) -> Vec<VideoRecord> {
        let mut records = Vec::with_capacity(video_ids.len());

        for chunk in video_ids.chunks(BATCH_SIZE) {
            let joined = chunk.join(",");
            let page: PageResponse<VideoResource> = match self
                .get_json(
                    "videos",
                    &[("part", "contentDetails,snippet"), ("id", &joined)],
                )
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    warn!(batch_len = chunk.len(), error = %e, "Video details fetch failed, skipping batch");
                    continue;
                }
            };
            records.extend(page.items.into_iter().map(into_record));
        }

        records
    }

    /// Like [`Self::video_records`] but keyed by id, for joining against
    /// search hits.
    pub async fn video_records_by_id(&self, video_ids: &[String]) -> HashMap<String, VideoRecord> {
        self.video_records(video_ids)
            .await
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect()
    }

    /// One page of `search.list` video hits. `page_size` must be at most
    /// [`BATCH_SIZE`]. The `any` category is the API default and is not
    /// sent on the wire.
    pub async fn search_videos(
        &self,
        request: &SearchRequest,
        page_size: usize,
        page_token: Option<&str>,
    ) -> SourceResult<SearchPage> {
        let size = page_size.min(BATCH_SIZE).to_string();
        let mut params = vec![
            ("part", "id,snippet"),
            ("type", "video"),
            ("q", request.query.as_str()),
            ("relevanceLanguage", request.language.as_str()),
            ("maxResults", size.as_str()),
        ];
        if let Some(region) = request.region.as_deref() {
            params.push(("regionCode", region));
        }
        if request.duration_category != DurationCategory::Any {
            params.push(("videoDuration", request.duration_category.as_str()));
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let page: PageResponse<SearchResource> = self.get_json("search", &params).await?;
        let matches = page
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                let (title, channel_title) = match item.snippet {
                    Some(snippet) => (snippet.title, snippet.channel_title),
                    None => (None, None),
                };
                Some(SearchMatch {
                    video_id,
                    title,
                    channel_title,
                })
            })
            .collect();

        Ok(SearchPage {
            matches,
            next_page_token: page.next_page_token,
        })
    }
}

/// Typed parse step: one API video resource to one record. An unparseable
/// duration downgrades the record to unknown duration with a warning.
fn into_record(item: VideoResource) -> VideoRecord {
    let duration_secs = match item.content_details.duration.as_deref() {
        Some(raw) => match parse_iso8601_duration(raw) {
            Ok(secs) => Some(secs),
            Err(e) => {
                warn!(video_id = %item.id, error = %e, "Unparseable duration, treating as unknown");
                None
            }
        },
        None => None,
    };
    let (title, channel_title) = match item.snippet {
        Some(snippet) => (snippet.title, snippet.channel_title),
        None => (None, None),
    };
    VideoRecord {
        url: VideoRecord::watch_url(&item.id),
        id: item.id,
        duration_secs,
        title,
        channel_title,
    }
}

#[async_trait]
impl VideoSource for DataApiClient {
    async fn fetch_videos(&self, source: &SourceRef) -> SourceResult<Vec<VideoRecord>> {
        let video_ids = match source.kind {
            SourceKind::Video => vec![source.id.clone()],
            SourceKind::Playlist => self.playlist_video_ids(&source.id).await,
            SourceKind::Channel => match self.uploads_playlist_id(&source.id).await? {
                Some(uploads) => self.playlist_video_ids(&uploads).await,
                None => {
                    warn!(channel = %source.id, "Could not find uploads playlist for channel");
                    Vec::new()
                }
            },
        };
        Ok(self.video_records(&video_ids).await)
    }
}
