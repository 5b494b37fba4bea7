//! ISO-8601 duration parsing and human-readable formatting.
//!
//! The Data API reports video durations as ISO-8601 strings (`PT1H2M3S`).
//! YouTube emits whole seconds only, so everything here works in integer
//! seconds.

use thiserror::Error;

/// Errors from ISO-8601 duration parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("empty duration string")]
    Empty,

    #[error("invalid ISO-8601 duration: {0}")]
    Invalid(String),
}

/// Parse an ISO-8601 duration (`P[nW][nD][T[nH][nM][nS]]`) into seconds.
///
/// # Examples
/// ```
/// use ytt_models::duration::parse_iso8601_duration;
/// assert_eq!(parse_iso8601_duration("PT4M13S").unwrap(), 253);
/// assert_eq!(parse_iso8601_duration("P1DT2H").unwrap(), 93600);
/// ```
pub fn parse_iso8601_duration(raw: &str) -> Result<u64, DurationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DurationError::Empty);
    }

    let mut chars = raw.chars();
    if chars.next() != Some('P') {
        return Err(DurationError::Invalid(raw.to_string()));
    }

    let mut total: u64 = 0;
    let mut in_time = false;
    let mut seen_component = false;
    let mut digits = String::new();

    for c in chars {
        if c == 'T' {
            if in_time || !digits.is_empty() {
                return Err(DurationError::Invalid(raw.to_string()));
            }
            in_time = true;
            continue;
        }
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if digits.is_empty() {
            return Err(DurationError::Invalid(raw.to_string()));
        }
        let value: u64 = digits
            .parse()
            .map_err(|_| DurationError::Invalid(raw.to_string()))?;
        digits.clear();

        // Months are ambiguous and never emitted for video durations; the
        // date-part 'M' is rejected rather than guessed at.
        let multiplier = match (in_time, c) {
            (false, 'W') => 604_800,
            (false, 'D') => 86_400,
            (true, 'H') => 3_600,
            (true, 'M') => 60,
            (true, 'S') => 1,
            _ => return Err(DurationError::Invalid(raw.to_string())),
        };
        total = total.saturating_add(value.saturating_mul(multiplier));
        seen_component = true;
    }

    if !digits.is_empty() || !seen_component {
        return Err(DurationError::Invalid(raw.to_string()));
    }
    Ok(total)
}

/// Format seconds as `HH:MM:SS`. Hours are not capped at two digits.
///
/// # Examples
/// ```
/// use ytt_models::duration::format_hms;
/// assert_eq!(format_hms(3661), "01:01:01");
/// ```
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format seconds as `D days, HH:MM:SS` once the total reaches a full day,
/// plain `HH:MM:SS` below that.
pub fn format_days_hms(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    if days == 0 {
        return format_hms(total_secs);
    }
    format!("{} days, {}", days, format_hms(total_secs % 86_400))
}
