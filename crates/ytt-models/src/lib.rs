//! Shared data models for the YTTally watch-time toolkit.
//!
//! This crate provides Serde-serializable types and pure helpers for:
//! - Per-video metadata records
//! - Source classification (video / playlist / channel URLs)
//! - ISO-8601 duration parsing and human-readable formatting
//! - Cross-source aggregation totals

pub mod aggregate;
pub mod duration;
pub mod record;
pub mod source;

// Re-export common types
pub use aggregate::AggregationResult;
pub use duration::{format_days_hms, format_hms, parse_iso8601_duration, DurationError};
pub use record::VideoRecord;
pub use source::{classify_source, ClassifyError, SourceKind, SourceRef};
