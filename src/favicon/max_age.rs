//! Cache lifetime normalization
//!
//! Lifetimes are given in milliseconds (or as a duration string such as
//! `"30d"`) and emitted as whole seconds in `Cache-Control`.

use super::error::FaviconError;

/// Upper bound for `max-age`: a 365 day year, in seconds
pub const ONE_YEAR_SECS: u64 = 31_536_000;

const ONE_YEAR_MS: f64 = 31_536_000_000.0;

const SECOND: f64 = 1000.0;
const MINUTE: f64 = SECOND * 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;
const WEEK: f64 = DAY * 7.0;
const YEAR: f64 = DAY * 365.25;

/// Longest duration string accepted
const MAX_DURATION_LEN: usize = 100;

/// Requested cache lifetime
#[derive(Debug, Clone, PartialEq)]
pub enum MaxAge {
    /// Milliseconds; may be fractional, negative or infinite
    Millis(f64),
    /// Duration string, e.g. `"30d"`, `"1.5h"`, `"500"`
    Text(String),
}

impl MaxAge {
    /// Interpret an untyped configuration value
    ///
    /// `null` means "not set". Numbers are milliseconds and strings are
    /// duration strings; anything else is rejected.
    pub fn from_value(value: &serde_json::Value) -> Result<Option<Self>, FaviconError> {
        match value {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(|ms| Some(Self::Millis(ms)))
                .ok_or_else(|| FaviconError::config(format!("max_age is out of range: {n}"))),
            serde_json::Value::String(s) => Ok(Some(Self::Text(s.clone()))),
            other => Err(FaviconError::config(format!(
                "max_age must be a number or duration string, got {other}"
            ))),
        }
    }
}

impl From<u64> for MaxAge {
    #[allow(clippy::cast_precision_loss)]
    fn from(ms: u64) -> Self {
        Self::Millis(ms as f64)
    }
}

impl From<f64> for MaxAge {
    fn from(ms: f64) -> Self {
        Self::Millis(ms)
    }
}

impl From<&str> for MaxAge {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Resolve the configured lifetime to whole seconds in `[0, ONE_YEAR_SECS]`
///
/// An absent lifetime means the maximum.
pub fn normalize(max_age: Option<&MaxAge>) -> Result<u64, FaviconError> {
    let ms = match max_age {
        None => return Ok(ONE_YEAR_SECS),
        Some(MaxAge::Millis(ms)) => *ms,
        Some(MaxAge::Text(text)) => parse_duration(text).ok_or_else(|| {
            FaviconError::config(format!("max_age is not a valid duration: '{text}'"))
        })?,
    };

    if ms.is_nan() {
        return Ok(ONE_YEAR_SECS);
    }

    let clamped = ms.clamp(0.0, ONE_YEAR_MS);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let secs = (clamped / SECOND).floor() as u64;
    Ok(secs)
}

/// Parse a duration string into milliseconds
///
/// Accepts `<number><unit>` with optional whitespace between. A bare number
/// is milliseconds. Units are case-insensitive: ms, s, m, h, d, w, y and
/// their long forms.
pub fn parse_duration(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || text.len() > MAX_DURATION_LEN {
        return None;
    }

    let split = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);

    if !is_decimal(number) {
        return None;
    }
    let value: f64 = number.parse().ok()?;

    let factor = match unit.trim_start().to_ascii_lowercase().as_str() {
        "" | "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1.0,
        "s" | "sec" | "secs" | "second" | "seconds" => SECOND,
        "m" | "min" | "mins" | "minute" | "minutes" => MINUTE,
        "h" | "hr" | "hrs" | "hour" | "hours" => HOUR,
        "d" | "day" | "days" => DAY,
        "w" | "week" | "weeks" => WEEK,
        "y" | "yr" | "yrs" | "year" | "years" => YEAR,
        _ => return None,
    };

    Some(value * factor)
}

/// `-?digits`, `-?.digits` or `-?digits.digits`
fn is_decimal(number: &str) -> bool {
    let unsigned = number.strip_prefix('-').unwrap_or(number);
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    match frac {
        Some(frac) => digits(int) && !frac.is_empty() && digits(frac),
        None => !int.is_empty() && digits(int),
    }
}
