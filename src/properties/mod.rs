/*!
 * Property handlers.
 *
 * A handler converts one raw field value into one canonical value, or
 * reports the value into the track context and yields nothing. Handlers
 * carry only construction-time configuration, so a single instance can
 * serve every track.
 *
 * - `duration`: time spans from typed values, bare numbers and clock text
 * - `quantity`: numbers scaled by a unit
 * - `text`: trimmed free text
 */

use std::fmt;

use log::info;

use crate::context::Context;
use crate::track::PropertyValue;
use crate::value::RawValue;

pub mod duration;
pub mod quantity;
pub mod text;

pub use duration::DurationProperty;
pub use quantity::{DataType, Number, Quantity, QuantityProperty, Unit};
pub use text::TextProperty;

/// Identity and reporting behavior shared by every handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    // @field: Field name in the raw track
    name: String,

    // @field: Label used in reports
    description: Option<String>,

    // @field: Value is only visible to rules
    private: bool,

    // @field: Whether rejected values are reported
    reportable: bool,
}

impl PropertyInfo {
    /// Create info for the raw field `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            private: false,
            reportable: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Keep the normalized value out of the public property map
    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    /// Never report rejected values
    pub fn unreported(mut self) -> Self {
        self.reportable = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Report label, falling back to the field name
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.name)
    }

    pub fn is_private(&self) -> bool {
        self.private
    }

    pub fn is_reportable(&self) -> bool {
        self.reportable
    }
}

impl From<&str> for PropertyInfo {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PropertyInfo {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Contract every property handler implements
pub trait Property {
    /// Canonical value produced on success
    type Output: Into<PropertyValue>;

    fn info(&self) -> &PropertyInfo;

    /// Convert `value`, reporting into `context` when it cannot be interpreted
    fn handle(&self, value: &RawValue, context: &mut Context) -> Option<Self::Output>;

    /// Record `value` as unparseable without failing the track
    fn report(&self, value: &RawValue, context: &mut Context) {
        let info = self.info();
        if !info.is_reportable() {
            return;
        }

        let value = value.to_string();
        match context.track() {
            Some(track) => info!("Invalid {} in {}: {:?}", info.description(), track, value),
            None => info!("Invalid {}: {:?}", info.description(), value),
        }
        context.record(info.description(), value);
    }
}

/// Object-safe view of a `Property` for heterogeneous handler lists
pub trait AnyProperty: fmt::Debug + Send + Sync {
    fn describe(&self) -> &PropertyInfo;

    fn normalize(&self, value: &RawValue, context: &mut Context) -> Option<PropertyValue>;
}

impl<P> AnyProperty for P
where
    P: Property + fmt::Debug + Send + Sync,
{
    fn describe(&self) -> &PropertyInfo {
        self.info()
    }

    fn normalize(&self, value: &RawValue, context: &mut Context) -> Option<PropertyValue> {
        self.handle(value, context).map(Into::into)
    }
}
