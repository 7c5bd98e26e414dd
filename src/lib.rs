/*!
 * # trackfacts - canonical media track properties
 *
 * A Rust library that turns the loosely typed fields printed by media
 * inspection tools (MediaInfo and friends) into canonical values.
 *
 * ## Features
 *
 * - Durations from typed values, bare numbers with an exact time base, or
 *   `H:MM:SS[.fff[fff]]` clock text
 * - Quantities (sampling rates, bit rates, sizes) scaled by a unit
 * - Closed caption detection over normalized subtitle properties
 * - Exact decimal arithmetic, no binary floating point drift
 * - Unparseable values are reported per track instead of failing
 *
 * ## Architecture
 *
 * - `numeric`: exact `Decimal` and `Resolution` types
 * - `value`: `RawValue`, the loosely typed input
 * - `context`: per-track diagnostic sink
 * - `properties`: the `Property` contract and its handlers:
 *   - `properties::duration`: durations
 *   - `properties::quantity`: unit quantities
 *   - `properties::text`: free text
 * - `rules`: the `Rule` contract and `rules::closed_caption`
 * - `track`: normalized maps and the `TrackNormalizer`
 * - `profile`: serde-described property and rule records
 * - `errors`: configuration error types
 *
 * ## Example
 *
 * ```rust
 * use trackfacts::{Context, DurationProperty, Property, RawValue, Resolution};
 *
 * let duration = DurationProperty::new("Duration").with_resolution(Resolution::MILLISECOND);
 * let mut context = Context::for_track("Video #0");
 *
 * let value = duration.handle(&RawValue::from("5568"), &mut context);
 * assert_eq!(value, Some(std::time::Duration::from_millis(5568)));
 * assert!(context.is_clean());
 * ```
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::new_without_default)]

pub mod context;
pub mod errors;
pub mod numeric;
pub mod profile;
pub mod properties;
pub mod rules;
pub mod track;
pub mod value;

// Re-export main types for easier usage
pub use context::{Context, Report};
pub use errors::{NumericError, PropertyError};
pub use numeric::{Decimal, Resolution};
pub use profile::TrackProfile;
pub use properties::{
    AnyProperty, DataType, DurationProperty, Number, Property, PropertyInfo, Quantity,
    QuantityProperty, TextProperty, Unit,
};
pub use rules::{AnyRule, ClosedCaptionRule, Rule};
pub use track::{PropertyMap, PropertyValue, RawTrack, TrackNormalizer};
pub use value::RawValue;
