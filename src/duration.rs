//! Parser for human lookback periods like `90 seconds` or `1 day`.

use chrono::{DateTime, TimeDelta, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static PERIOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*([a-z]+)$").expect("period regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration '{0}', expected '<count> <unit>' like '30 seconds' or '1 day'")]
    Malformed(String),
    #[error("invalid duration unit '{0}', expected second, minute, hour, day or week")]
    UnknownUnit(String),
}

/// Parses `<count> <unit>` into a time delta. Units run from seconds to
/// weeks; anything bigger than a week is ambiguous enough that callers
/// should spell it out in weeks.
pub fn parse_duration(input: &str) -> Result<TimeDelta, DurationError> {
    let caps = PERIOD_RE
        .captures(input)
        .ok_or_else(|| DurationError::Malformed(input.to_string()))?;
    let count: i64 = caps[1]
        .parse()
        .map_err(|_| DurationError::Malformed(input.to_string()))?;
    // One trailing `s` is stripped, making singular and plural spellings
    // equivalent: `1 days` and `2 day` both parse.
    let unit = caps[2].strip_suffix('s').unwrap_or(&caps[2]);
    let unit_seconds: i64 = match unit {
        "second" => 1,
        "minute" => 60,
        "hour" => 3_600,
        "day" => 86_400,
        "week" => 604_800,
        _ => return Err(DurationError::UnknownUnit(unit.to_string())),
    };
    let delta = count
        .checked_mul(unit_seconds)
        .and_then(TimeDelta::try_seconds)
        .ok_or_else(|| DurationError::Malformed(input.to_string()))?;
    // A TimeDelta holds close to 300 billion years, far past what calendar
    // arithmetic can represent. Periods larger than the span from the
    // calendar minimum to the epoch would overflow `now - period`, so they
    // are rejected here like any other overflow.
    if delta > DateTime::<Utc>::UNIX_EPOCH - DateTime::<Utc>::MIN_UTC {
        return Err(DurationError::Malformed(input.to_string()));
    }
    Ok(delta)
}
