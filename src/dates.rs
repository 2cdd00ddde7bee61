//! Date parsing and relative-time resolution.
//!
//! Listing pages publish times like `"5 minutes ago"` or `"2 days ago"`. These
//! are resolved against an explicit reference instant so results are
//! reproducible; the binary captures that instant once per run.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::num::IntErrorKind;
use tracing::debug;

/// Format accepted for the operator-supplied target date.
pub const TARGET_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised while reading dates.
///
/// Only [`DateError::InvalidTargetDate`] ends a run; the relative-time
/// variants are per-fragment and cause that article to be skipped.
#[derive(Debug, thiserror::Error)]
pub enum DateError {
    /// The operator's input is not a valid `YYYY-MM-DD` date.
    #[error("Invalid date format '{0}'. Please use YYYY-MM-DD format.")]
    InvalidTargetDate(String),
    /// A unit keyword was found but the phrase does not start with a number.
    #[error("Invalid relative time '{0}': expected a leading number")]
    MissingMagnitude(String),
    /// The number is too large to subtract from the reference instant.
    #[error("Relative time '{0}' is out of range")]
    OutOfRange(String),
}

/// Parse the operator-supplied `YYYY-MM-DD` target date.
///
/// Surrounding whitespace (such as the newline left by an interactive
/// prompt) is ignored.
///
/// # Errors
///
/// Returns [`DateError::InvalidTargetDate`] carrying the trimmed input when it
/// is not a real calendar date in that format.
pub fn parse_target_date(input: &str) -> Result<NaiveDate, DateError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, TARGET_DATE_FORMAT)
        .map_err(|_| DateError::InvalidTargetDate(trimmed.to_string()))
}

/// Resolve a relative phrase such as `"3 hours ago"` against `reference`.
///
/// Units are checked in the order minute, hour, day and only the first match
/// is used. Text containing none of them resolves to `reference` itself, so
/// `"3 weeks ago"` counts as published at the reference instant.
///
/// # Arguments
///
/// * `text` - The phrase as shown on the page, e.g. `"45 minutes ago"`
/// * `reference` - Instant the phrase is relative to
///
/// # Returns
///
/// The reference instant minus the parsed amount. Callers compare only the
/// calendar date of the result.
///
/// # Errors
///
/// - [`DateError::MissingMagnitude`] if a unit matched but the first word is
///   not an integer (`"Yesterday"`, `"an hour ago"`)
/// - [`DateError::OutOfRange`] if the integer overflows or the subtraction
///   leaves chrono's supported range
pub fn resolve_relative(text: &str, reference: NaiveDateTime) -> Result<NaiveDateTime, DateError> {
    let delta: fn(i64) -> Option<TimeDelta> = if text.contains("minute") {
        TimeDelta::try_minutes
    } else if text.contains("hour") {
        TimeDelta::try_hours
    } else if text.contains("day") {
        TimeDelta::try_days
    } else {
        debug!(%text, "No known unit in relative time; using reference instant");
        return Ok(reference);
    };

    let magnitude = leading_magnitude(text)?;
    delta(magnitude)
        .and_then(|d| reference.checked_sub_signed(d))
        .ok_or_else(|| DateError::OutOfRange(text.to_string()))
}

fn leading_magnitude(text: &str) -> Result<i64, DateError> {
    let token = text
        .split_whitespace()
        .next()
        .ok_or_else(|| DateError::MissingMagnitude(text.to_string()))?;
    token.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            DateError::OutOfRange(text.to_string())
        }
        _ => DateError::MissingMagnitude(text.to_string()),
    })
}
