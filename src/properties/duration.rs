/*!
 * Duration property.
 *
 * Accepted shapes, in priority order:
 * - an existing `Duration`, returned unchanged
 * - an integer count of `resolution` microseconds
 * - an exact decimal (typed or text) count of `resolution` microseconds
 * - clock text `H:MM:SS[.fff[fff]]`, extra fractional digits truncated
 *
 * Anything else, including negative or out-of-range numbers, is reported.
 */

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{Property, PropertyInfo};
use crate::context::Context;
use crate::numeric::{Decimal, Resolution};
use crate::value::RawValue;

// @const: Clock text, matched from the start of the value
static CLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<hours>[0-9]{1,2}):(?P<minutes>[0-9]{1,2}):(?P<seconds>[0-9]{1,2})(?:\.(?P<millis>[0-9]{3})(?P<micros>[0-9]{3})?[0-9]*)?",
    )
    .unwrap()
});

/// Handler producing `std::time::Duration` values
#[derive(Debug, Clone)]
pub struct DurationProperty {
    info: PropertyInfo,
    resolution: Resolution,
}

impl DurationProperty {
    /// Create a handler with a resolution of one microsecond per unit
    pub fn new(info: impl Into<PropertyInfo>) -> Self {
        Self {
            info: info.into(),
            resolution: Resolution::default(),
        }
    }

    /// Set how many microseconds one bare numeric unit represents
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn scale(&self, value: &Decimal) -> Option<Duration> {
        self.resolution.scale_decimal(value).map(Duration::from_micros)
    }
}

impl Property for DurationProperty {
    type Output = Duration;

    fn info(&self) -> &PropertyInfo {
        &self.info
    }

    fn handle(&self, value: &RawValue, context: &mut Context) -> Option<Duration> {
        let parsed = match value {
            RawValue::Duration(duration) => Some(*duration),
            RawValue::Integer(units) => self
                .resolution
                .scale_integer(*units)
                .map(Duration::from_micros),
            RawValue::Decimal(units) => self.scale(units),
            RawValue::Text(text) => match text.parse::<Decimal>() {
                Ok(units) => self.scale(&units),
                Err(_) => parse_clock(text),
            },
        };

        if parsed.is_none() {
            self.report(value, context);
        }
        parsed
    }
}

fn clock_field(captures: &Captures<'_>, name: &str) -> Option<u64> {
    match captures.name(name) {
        Some(field) => field.as_str().parse().ok(),
        None => Some(0),
    }
}

/// Parse clock text such as `1:02:03.456789`.
///
/// Only the leading clock is considered; trailing text is ignored, and a
/// fraction shorter than three digits is not part of the match.
pub fn parse_clock(text: &str) -> Option<Duration> {
    let captures = CLOCK_REGEX.captures(text)?;

    let hours = clock_field(&captures, "hours")?;
    let minutes = clock_field(&captures, "minutes")?;
    let seconds = clock_field(&captures, "seconds")?;
    let millis = clock_field(&captures, "millis")?;
    let micros = clock_field(&captures, "micros")?;

    Some(
        Duration::from_secs(hours * 3600 + minutes * 60 + seconds)
            + Duration::from_millis(millis)
            + Duration::from_micros(micros),
    )
}

/// Format as `H:MM:SS`, adding `.ffffff` when there are sub-second parts
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    let micros = duration.subsec_micros();

    if micros == 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}:{:02}.{:06}", hours, minutes, seconds, micros)
    }
}
