//! Human-readable summaries of aggregation results.

use ytt_models::{format_days_hms, AggregationResult};

/// One-line summary for a single processed source.
pub fn summary_line(result: &AggregationResult, min_duration_minutes: u64) -> String {
    let mut line = format!("Processed {} videos.", result.videos_found);
    if min_duration_minutes > 0 {
        line.push_str(&format!(
            " Included {} videos longer than {} minute(s).",
            result.videos_included, min_duration_minutes
        ));
    } else {
        line.push_str(&format!(" Included {} videos.", result.videos_included));
    }
    line
}

/// The final cross-source report block.
pub fn final_report(result: &AggregationResult, min_duration_minutes: u64) -> String {
    let included = if min_duration_minutes > 0 {
        format!(
            "Videos included in calculation (>= {} min): {}",
            min_duration_minutes, result.videos_included
        )
    } else {
        format!("Videos included in calculation: {}", result.videos_included)
    };

    format!(
        "{sep}\n      FINAL REPORT\n{sep}\n\
         Total videos found across all sources: {found}\n\
         {included}\n\
         Total duration of included videos: {total}\n\
         {sep}",
        sep = "=".repeat(20),
        found = result.videos_found,
        included = included,
        total = format_days_hms(result.total_secs),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(found: u64, included: u64, total_secs: u64) -> AggregationResult {
        AggregationResult {
            total_secs,
            videos_found: found,
            videos_included: included,
            included_links: Vec::new(),
        }
    }

    #[test]
    fn test_summary_mentions_filter_only_when_active() {
        let r = result(10, 4, 3600);
        assert_eq!(
            summary_line(&r, 5),
            "Processed 10 videos. Included 4 videos longer than 5 minute(s)."
        );
        assert_eq!(summary_line(&r, 0), "Processed 10 videos. Included 4 videos.");
    }

    #[test]
    fn test_final_report_uses_day_formatting() {
        let report = final_report(&result(100, 90, 90_000), 0);
        assert!(report.contains("Total videos found across all sources: 100"));
        assert!(report.contains("Videos included in calculation: 90"));
        assert!(report.contains("Total duration of included videos: 1 days, 01:00:00"));
    }

    #[test]
    fn test_final_report_shows_threshold() {
        let report = final_report(&result(3, 2, 2400), 5);
        assert!(report.contains("Videos included in calculation (>= 5 min): 2"));
        assert!(report.contains("Total duration of included videos: 00:40:00"));
    }
}
