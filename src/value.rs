/*!
 * Raw field values as delivered by the inspection layer.
 */

use std::fmt;
use std::time::Duration;

use serde_json::Value;

use crate::numeric::Decimal;
use crate::properties::duration::format_duration;

/// A loosely typed field value, owned by the caller.
///
/// Handlers inspect the variant first and fall back to the text form, so
/// the same field can arrive typed from one source and as text from another.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Already a time span
    Duration(Duration),
    /// Whole number
    Integer(i64),
    /// Exact fractional number
    Decimal(Decimal),
    /// Free text, possibly numeric or a clock pattern
    Text(String),
}

impl RawValue {
    /// Convert one JSON field; `null` means the field is absent.
    ///
    /// Non-integral numbers are re-parsed from their JSON text so no
    /// binary rounding leaks into the decimal.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    return Some(Self::Integer(int));
                }
                let text = number.to_string();
                Some(match text.parse::<Decimal>() {
                    Ok(decimal) => Self::Decimal(decimal),
                    Err(_) => Self::Text(text),
                })
            }
            other => Some(Self::Text(other.to_string())),
        }
    }

    /// Text content when the value is a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duration(duration) => write!(f, "{}", format_duration(*duration)),
            Self::Integer(value) => write!(f, "{}", value),
            Self::Decimal(value) => write!(f, "{}", value),
            Self::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<Duration> for RawValue {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Decimal> for RawValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
