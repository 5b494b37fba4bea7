//! Aggregation pipeline, search flow, report formatting, and persistence.
//!
//! The pipeline walks an ordered list of source strings, resolves each via
//! a [`ytt_sources::VideoSource`], filters by minimum duration, and folds
//! everything into running totals. The search flow pages through keyword
//! results with a bounded call budget. Reports and persisted files are
//! produced from the accumulated values only.

pub mod aggregate;
pub mod output;
pub mod report;
pub mod search;

pub use aggregate::{aggregate_records, AggregateOptions, Aggregator, SourceReport};
pub use output::{default_links_path, save_links, save_search_results, OutputError};
pub use report::{final_report, summary_line};
pub use search::{search, SearchHit, SEARCH_PAGE_CAP};
