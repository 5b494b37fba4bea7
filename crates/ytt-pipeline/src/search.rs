//! Keyword search with duration filtering.
//!
//! Two paths, mirroring the API's capabilities:
//! - *category path*: one `search.list` call with a built-in duration
//!   category, then one batched duration fetch;
//! - *minimum-duration path*: the API has no >= filter, so page through
//!   results, fetch durations per page, and filter locally. Capped at
//!   [`SEARCH_PAGE_CAP`] pages to bound quota spend even if the API keeps
//!   handing back continuation tokens.

use serde::Serialize;
use tracing::{info, warn};

use ytt_models::format_hms;
use ytt_sources::{DataApiClient, SearchMatch, SearchRequest, BATCH_SIZE};

/// Page budget for the minimum-duration search path.
pub const SEARCH_PAGE_CAP: usize = 5;

/// Duration shown for hits whose metadata was unavailable.
const UNKNOWN_DURATION: &str = "[N/A]";

/// One fully-assembled search result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub channel: String,
    /// Formatted `HH:MM:SS`, or `[N/A]` when unknown
    pub duration: String,
    pub url: String,
    #[serde(rename = "videoId")]
    pub video_id: String,
}

impl SearchHit {
    fn new(matched: SearchMatch, duration: String) -> Self {
        let url = ytt_models::VideoRecord::watch_url(&matched.video_id);
        Self {
            title: matched.title.unwrap_or_default(),
            channel: matched.channel_title.unwrap_or_default(),
            duration,
            url,
            video_id: matched.video_id,
        }
    }
}

/// Run a keyword search. `min_duration_secs` switches to the paged local
/// filter; otherwise the request's duration category applies. Remote
/// failures log and return what was assembled so far.
pub async fn search(
    client: &DataApiClient,
    request: &SearchRequest,
    min_duration_secs: Option<u64>,
) -> Vec<SearchHit> {
    match min_duration_secs {
        Some(min) => search_with_min_duration(client, request, min).await,
        None => search_by_category(client, request).await,
    }
}

async fn search_by_category(client: &DataApiClient, request: &SearchRequest) -> Vec<SearchHit> {
    let page = match client.search_videos(request, request.max_results, None).await {
        Ok(page) => page,
        Err(e) => {
            warn!(query = %request.query, error = %e, "Search failed");
            return Vec::new();
        }
    };

    let ids: Vec<String> = page.matches.iter().map(|m| m.video_id.clone()).collect();
    let records = client.video_records_by_id(&ids).await;

    page.matches
        .into_iter()
        .map(|matched| {
            let duration = records
                .get(&matched.video_id)
                .and_then(|record| record.duration_secs)
                .map(format_hms)
                .unwrap_or_else(|| UNKNOWN_DURATION.to_string());
            SearchHit::new(matched, duration)
        })
        .collect()
}

async fn search_with_min_duration(
    client: &DataApiClient,
    request: &SearchRequest,
    min_duration_secs: u64,
) -> Vec<SearchHit> {
    info!(
        query = %request.query,
        min_duration_secs,
        "Custom duration filter requires fetching more results, this may take longer"
    );

    let mut hits = Vec::new();
    let mut page_token: Option<String> = None;

    for _ in 0..SEARCH_PAGE_CAP {
        let page = match client
            .search_videos(request, BATCH_SIZE, page_token.as_deref())
            .await
        {
            Ok(page) => page,
            Err(e) => {
                warn!(query = %request.query, error = %e, "Search page failed");
                break;
            }
        };
        if page.matches.is_empty() {
            break;
        }

        let ids: Vec<String> = page.matches.iter().map(|m| m.video_id.clone()).collect();
        let records = client.video_records_by_id(&ids).await;

        for matched in page.matches {
            let Some(secs) = records
                .get(&matched.video_id)
                .and_then(|record| record.duration_secs)
            else {
                continue;
            };
            if secs < min_duration_secs {
                continue;
            }
            hits.push(SearchHit::new(matched, format_hms(secs)));
            if hits.len() >= request.max_results {
                return hits;
            }
        }

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use ytt_sources::{ApiKey, DurationCategory};

    fn request(max_results: usize) -> SearchRequest {
        SearchRequest {
            query: "rust tutorial".into(),
            language: "en".into(),
            region: None,
            duration_category: DurationCategory::Any,
            max_results,
        }
    }

    #[tokio::test]
    async fn test_min_duration_path_halts_at_page_cap() {
        let server = MockServer::start().await;

        // The search endpoint hands back a continuation token forever.
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "id": { "videoId": "aaaaaaaaaaa" },
                      "snippet": { "title": "Short clip", "channelTitle": "Chan" } }
                ],
                "nextPageToken": "again"
            })))
            .expect(SEARCH_PAGE_CAP as u64)
            .mount(&server)
            .await;

        // Every hit is below the threshold, so the result count never fills.
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "id": "aaaaaaaaaaa", "contentDetails": { "duration": "PT1M" } }
                ]
            })))
            .mount(&server)
            .await;

        let client = DataApiClient::with_base_url(ApiKey::new("test-key"), server.uri());
        let hits = search(&client, &request(10), Some(3600)).await;
        assert!(hits.is_empty());
        // Mock expectations verify the page count on drop
    }

    #[tokio::test]
    async fn test_min_duration_path_stops_once_result_count_is_reached() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "id": { "videoId": "aaaaaaaaaaa" },
                      "snippet": { "title": "Long one", "channelTitle": "Chan" } },
                    { "id": { "videoId": "bbbbbbbbbbb" },
                      "snippet": { "title": "Longer one", "channelTitle": "Chan" } }
                ],
                "nextPageToken": "again"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "id": "aaaaaaaaaaa", "contentDetails": { "duration": "PT30M" } },
                    { "id": "bbbbbbbbbbb", "contentDetails": { "duration": "PT45M" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DataApiClient::with_base_url(ApiKey::new("test-key"), server.uri());
        let hits = search(&client, &request(1), Some(600)).await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].video_id, "aaaaaaaaaaa");
        assert_eq!(hits[0].duration, "00:30:00");
    }

    #[tokio::test]
    async fn test_category_path_marks_missing_durations() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "id": { "videoId": "aaaaaaaaaaa" },
                      "snippet": { "title": "Known", "channelTitle": "Chan" } },
                    { "id": { "videoId": "bbbbbbbbbbb" },
                      "snippet": { "title": "Unknown", "channelTitle": "Chan" } }
                ]
            })))
            .mount(&server)
            .await;

        // Details come back for only one of the two hits
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "id": "aaaaaaaaaaa", "contentDetails": { "duration": "PT4M13S" } }
                ]
            })))
            .mount(&server)
            .await;

        let client = DataApiClient::with_base_url(ApiKey::new("test-key"), server.uri());
        let hits = search(&client, &request(10), None).await;
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].duration, "00:04:13");
        assert_eq!(hits[1].duration, "[N/A]");
    }
}
