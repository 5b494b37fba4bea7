//! Running totals accumulated across one or more sources.

use serde::Serialize;

/// Totals, counters, and optionally the links of included videos.
///
/// Built incrementally while sources are processed and finalized once all
/// sources are done. Invariants: `videos_included <= videos_found`, and
/// `total_secs` is exactly the sum of the included videos' durations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregationResult {
    /// Sum of included durations, in seconds
    pub total_secs: u64,
    /// Videos the sources yielded, included or not
    pub videos_found: u64,
    /// Videos that passed the duration filter
    pub videos_included: u64,
    /// Watch URLs of included videos, in fetch order (empty unless link
    /// collection was requested)
    pub included_links: Vec<String>,
}

impl AggregationResult {
    /// Fold another source's contribution into the running totals.
    /// Link order follows processing order.
    pub fn merge(&mut self, other: &AggregationResult) {
        self.total_secs += other.total_secs;
        self.videos_found += other.videos_found;
        self.videos_included += other.videos_included;
        self.included_links.extend(other.included_links.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_accumulates_and_preserves_link_order() {
        let mut total = AggregationResult::default();
        total.merge(&AggregationResult {
            total_secs: 120,
            videos_found: 2,
            videos_included: 1,
            included_links: vec!["a".into()],
        });
        total.merge(&AggregationResult {
            total_secs: 600,
            videos_found: 3,
            videos_included: 2,
            included_links: vec!["b".into(), "c".into()],
        });

        assert_eq!(total.total_secs, 720);
        assert_eq!(total.videos_found, 5);
        assert_eq!(total.videos_included, 3);
        assert_eq!(total.included_links, vec!["a", "b", "c"]);
        assert!(total.videos_included <= total.videos_found);
    }
}
