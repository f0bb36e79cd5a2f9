//! Coarse type classification for JSON values
//!
//! Every check runs independently and the last match wins, so a string or a
//! long number that also reads as a date is reported as `date`.

pub mod date;

pub use date::DatePolicy;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Coarse classification of a JSON value, used to pick a UI widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Array,
    Object,
    Boolean,
    Number,
    String,
    Date,
    Undefined,
}

impl TypeTag {
    pub const ALL: [TypeTag; 7] = [
        TypeTag::Array,
        TypeTag::Object,
        TypeTag::Boolean,
        TypeTag::Number,
        TypeTag::String,
        TypeTag::Date,
        TypeTag::Undefined,
    ];

    /// Classify `value`, mapping "no match" to [`TypeTag::Undefined`]
    pub fn of(value: &Value, policy: DatePolicy) -> Self {
        determine_type_with_policy(value, policy).unwrap_or(TypeTag::Undefined)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Array => "array",
            TypeTag::Object => "object",
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Date => "date",
            TypeTag::Undefined => "undefined",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == lowered)
            .ok_or_else(|| {
                format!(
                    "Invalid type '{}'. Use one of: array, object, boolean, number, string, date, undefined",
                    s
                )
            })
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classify a value using the default (strict) date policy
pub fn determine_type(value: &Value) -> Option<TypeTag> {
    determine_type_with_policy(value, DatePolicy::default())
}

/// Classify a value; `None` for `null`
pub fn determine_type_with_policy(value: &Value, policy: DatePolicy) -> Option<TypeTag> {
    let mut tag = None;

    if let Value::Array(_) = value {
        tag = Some(TypeTag::Array);
    } else if let Value::Object(_) = value {
        tag = Some(TypeTag::Object);
    }
    if value.is_boolean() {
        tag = Some(TypeTag::Boolean);
    }
    if value.is_number() {
        tag = Some(TypeTag::Number);
    }
    if value.is_string() {
        tag = Some(TypeTag::String);
    }

    let long_enough = match value {
        Value::Number(n) => date::integer_digits(n) >= date::MIN_TIMESTAMP_DIGITS,
        _ => true,
    };
    if long_enough && policy.accepts(value) {
        tag = Some(TypeTag::Date);
    }

    tag
}
