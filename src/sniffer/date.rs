//! Date-validity checks used by the type sniffer
//!
//! A value only becomes a `date` when it passes the check for the active
//! [`DatePolicy`] *and* is either a non-number or a number with at least
//! [`MIN_TIMESTAMP_DIGITS`] integer digits.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

/// Numbers shorter than this are never treated as timestamps
pub const MIN_TIMESTAMP_DIGITS: usize = 10;

/// Largest absolute millisecond offset an ECMAScript `Date` can hold
pub const MAX_TIMESTAMP_MILLIS: i64 = 8_640_000_000_000_000;

const STRICT_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

const STRICT_DATE_FORMATS: &[&str] = &["%Y-%m-%d"];

const LENIENT_DATETIME_FORMATS: &[&str] = &["%Y/%m/%d %H:%M:%S", "%m/%d/%Y %H:%M:%S"];

const LENIENT_DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%d %B %Y", "%b %d %Y"];

/// How eagerly strings and numbers are recognised as dates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePolicy {
    /// ISO-8601 / RFC 3339 strings and millisecond timestamps
    #[default]
    Strict,
    /// Strict plus common human formats and bare numeric strings
    Lenient,
    /// Never classify anything as a date
    Off,
}

impl DatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePolicy::Strict => "strict",
            DatePolicy::Lenient => "lenient",
            DatePolicy::Off => "off",
        }
    }

    /// Whether `value` is an acceptable date representation under this policy
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            DatePolicy::Off => false,
            DatePolicy::Strict | DatePolicy::Lenient => match value {
                Value::String(s) => self.accepts_str(s),
                Value::Number(n) => is_valid_timestamp(n),
                _ => false,
            },
        }
    }

    fn accepts_str(&self, s: &str) -> bool {
        let s = s.trim();
        if s.is_empty() {
            return false;
        }

        if is_strict_date_str(s) {
            return true;
        }

        match self {
            DatePolicy::Lenient => is_lenient_date_str(s),
            _ => false,
        }
    }
}

impl fmt::Display for DatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(DatePolicy::Strict),
            "lenient" | "legacy" => Ok(DatePolicy::Lenient),
            "off" | "none" => Ok(DatePolicy::Off),
            other => Err(format!(
                "Invalid date policy '{}'. Use 'strict', 'lenient', or 'off'",
                other
            )),
        }
    }
}

/// Count the digits in the integer part of a JSON number
pub fn integer_digits(n: &Number) -> usize {
    if let Some(u) = n.as_u64() {
        return count_digits(u);
    }
    if let Some(i) = n.as_i64() {
        return count_digits(i.unsigned_abs());
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => format!("{:.0}", f.abs().trunc()).len(),
        _ => 0,
    }
}

fn count_digits(n: u64) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

/// A number is a valid timestamp when it fits the ECMAScript millisecond range
fn is_valid_timestamp(n: &Number) -> bool {
    let millis = if let Some(i) = n.as_i64() {
        i
    } else {
        match n.as_f64() {
            Some(f) if f.is_finite() && f.abs() <= MAX_TIMESTAMP_MILLIS as f64 => f.trunc() as i64,
            _ => return false,
        }
    };

    millis.unsigned_abs() <= MAX_TIMESTAMP_MILLIS as u64 && DateTime::<Utc>::from_timestamp_millis(millis).is_some()
}

fn is_strict_date_str(s: &str) -> bool {
    if DateTime::parse_from_rfc3339(s).is_ok() {
        return true;
    }

    STRICT_DATETIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
        || STRICT_DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
}

fn is_lenient_date_str(s: &str) -> bool {
    if DateTime::parse_from_rfc2822(s).is_ok() {
        return true;
    }

    // Browser parsers read bare numbers as years ("42" is 2042)
    if s.parse::<f64>().map_or(false, |f| f.is_finite()) {
        return true;
    }

    LENIENT_DATETIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
        || LENIENT_DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
}
