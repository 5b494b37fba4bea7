//! Multi-source watch-time aggregation.

use tracing::{info, warn};

use ytt_models::{classify_source, AggregationResult, VideoRecord};
use ytt_sources::VideoSource;

/// Filter and accumulation settings for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateOptions {
    /// Inclusive minimum duration; a video of exactly this length counts.
    pub min_duration_secs: u64,
    /// Collect the watch URL of every included video.
    pub collect_links: bool,
}

/// What one source contributed to the run.
#[derive(Debug)]
pub struct SourceReport {
    /// The raw source string as given
    pub source: String,
    /// This source's contribution (zero when skipped)
    pub result: AggregationResult,
    /// True when the source was unrecognized or its fetch failed
    pub skipped: bool,
}

/// Walks sources in order and accumulates totals through a single
/// [`VideoSource`]. Strictly sequential; the running totals are the
/// authoritative aggregate across all processed sources.
pub struct Aggregator<'a> {
    source: &'a dyn VideoSource,
    options: AggregateOptions,
}

impl<'a> Aggregator<'a> {
    pub fn new(source: &'a dyn VideoSource, options: AggregateOptions) -> Self {
        Self { source, options }
    }

    /// Process one source string. Classification failures and fetch
    /// failures are logged and contribute zero; neither aborts the run.
    pub async fn run_source(&self, raw: &str) -> SourceReport {
        let skipped = |raw: &str| SourceReport {
            source: raw.to_string(),
            result: AggregationResult::default(),
            skipped: true,
        };

        let source_ref = match classify_source(raw) {
            Ok(source_ref) => source_ref,
            Err(e) => {
                warn!(source = raw, error = %e, "Skipping unrecognized source");
                return skipped(raw);
            }
        };

        let records = match self.source.fetch_videos(&source_ref).await {
            Ok(records) => records,
            Err(e) => {
                warn!(source = raw, error = %e, "Source fetch failed, contributes nothing");
                return skipped(raw);
            }
        };

        let result = aggregate_records(&records, &self.options);
        info!(
            source = raw,
            found = result.videos_found,
            included = result.videos_included,
            "Processed source"
        );
        SourceReport {
            source: raw.to_string(),
            result,
            skipped: false,
        }
    }

    /// Process all sources in order. Returns the per-source reports and the
    /// cross-source totals.
    pub async fn run(&self, sources: &[String]) -> (Vec<SourceReport>, AggregationResult) {
        let mut total = AggregationResult::default();
        let mut reports = Vec::with_capacity(sources.len());
        for raw in sources {
            let report = self.run_source(raw).await;
            total.merge(&report.result);
            reports.push(report);
        }
        (reports, total)
    }
}

/// Fold fetched records into an [`AggregationResult`].
///
/// A record is included iff its duration is known and at least the
/// minimum. Unknown-duration records are never included, regardless of
/// threshold, and emit exactly one warning each.
pub fn aggregate_records(records: &[VideoRecord], options: &AggregateOptions) -> AggregationResult {
    let mut result = AggregationResult::default();
    for record in records {
        result.videos_found += 1;

        let Some(duration) = record.duration_secs else {
            warn!(
                video = %record.id,
                title = record.title.as_deref().unwrap_or("N/A"),
                "Skipping video with no duration info"
            );
            continue;
        };
        if duration < options.min_duration_secs {
            continue;
        }

        result.total_secs += duration;
        result.videos_included += 1;
        if options.collect_links {
            result.included_links.push(record.url.clone());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ytt_models::{format_hms, SourceRef};
    use ytt_sources::{SourceResult, VideoSource};

    struct StubSource {
        records: Vec<VideoRecord>,
    }

    #[async_trait]
    impl VideoSource for StubSource {
        async fn fetch_videos(&self, _source: &SourceRef) -> SourceResult<Vec<VideoRecord>> {
            Ok(self.records.clone())
        }
    }

    fn record(id: &str, duration_secs: Option<u64>) -> VideoRecord {
        VideoRecord {
            id: id.to_string(),
            duration_secs,
            url: VideoRecord::watch_url(id),
            title: Some(format!("Video {id}")),
            channel_title: None,
        }
    }

    #[tokio::test]
    async fn test_playlist_scenario_with_five_minute_filter() {
        let stub = StubSource {
            records: vec![
                record("aaaaaaaaaaa", Some(120)),
                record("bbbbbbbbbbb", Some(600)),
                record("ccccccccccc", Some(1800)),
            ],
        };
        let aggregator = Aggregator::new(
            &stub,
            AggregateOptions {
                min_duration_secs: 300,
                collect_links: true,
            },
        );

        let report = aggregator
            .run_source("https://www.youtube.com/playlist?list=PLtest")
            .await;
        assert!(!report.skipped);
        assert_eq!(report.result.videos_found, 3);
        assert_eq!(report.result.videos_included, 2);
        assert_eq!(report.result.total_secs, 2400);
        assert_eq!(format_hms(report.result.total_secs), "00:40:00");
        // Link order follows fetch order
        assert_eq!(
            report.result.included_links,
            vec![
                VideoRecord::watch_url("bbbbbbbbbbb"),
                VideoRecord::watch_url("ccccccccccc"),
            ]
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let options = AggregateOptions {
            min_duration_secs: 300,
            collect_links: false,
        };
        let result = aggregate_records(
            &[record("aaaaaaaaaaa", Some(300)), record("bbbbbbbbbbb", Some(299))],
            &options,
        );
        assert_eq!(result.videos_found, 2);
        assert_eq!(result.videos_included, 1);
        assert_eq!(result.total_secs, 300);
    }

    #[test]
    fn test_unknown_duration_is_never_included() {
        // Threshold of zero still excludes unknown durations
        let result = aggregate_records(
            &[record("aaaaaaaaaaa", None), record("bbbbbbbbbbb", Some(0))],
            &AggregateOptions::default(),
        );
        assert_eq!(result.videos_found, 2);
        assert_eq!(result.videos_included, 1);
        assert_eq!(result.total_secs, 0);
    }

    #[tokio::test]
    async fn test_unrecognized_source_contributes_zero_and_run_continues() {
        let stub = StubSource {
            records: vec![record("aaaaaaaaaaa", Some(60))],
        };
        let aggregator = Aggregator::new(&stub, AggregateOptions::default());

        let sources = vec![
            "https://example.com/not-youtube".to_string(),
            "https://youtu.be/dQw4w9WgXcQ".to_string(),
        ];
        let (reports, total) = aggregator.run(&sources).await;

        assert!(reports[0].skipped);
        assert_eq!(reports[0].result.videos_found, 0);
        assert!(!reports[1].skipped);
        assert_eq!(total.videos_found, 1);
        assert_eq!(total.total_secs, 60);
        assert!(total.videos_included <= total.videos_found);
    }
}
