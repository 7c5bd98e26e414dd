/*!
 * Quantity property: a number paired with a unit scale.
 *
 * Sampling rates, bit rates and sizes arrive as plain numbers or numeric
 * text. The configured `DataType` decides how text is read, and the
 * `Unit` factor converts the reading into the canonical unit, so a field
 * printed in kHz can land in Hz.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Property, PropertyInfo};
use crate::context::Context;
use crate::errors::{PropertyError, Result};
use crate::numeric::Decimal;
use crate::value::RawValue;

/// Numeric type a quantity field is expected to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    #[default]
    Integer,
    Decimal,
}

impl DataType {
    /// Use `value` directly when it already has this type
    fn accept(&self, value: &RawValue) -> Option<Number> {
        match (self, value) {
            (Self::Integer, RawValue::Integer(v)) => Some(Number::Integer(*v)),
            (Self::Decimal, RawValue::Decimal(v)) => Some(Number::Decimal(v.clone())),
            _ => None,
        }
    }

    /// Read `text` as this type
    pub fn parse(&self, text: &str) -> Option<Number> {
        match self {
            Self::Integer => text.trim().parse::<i64>().ok().map(Number::Integer),
            Self::Decimal => text.parse::<Decimal>().ok().map(Number::Decimal),
        }
    }
}

/// Magnitude of a quantity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Decimal(Decimal),
}

impl Number {
    /// Multiply by a unit factor; integers stay integers for integral factors
    pub fn checked_scale(self, factor: &Decimal) -> Option<Number> {
        match self {
            Self::Integer(value) if factor.is_integer() => {
                value.checked_mul(factor.to_i64()?).map(Self::Integer)
            }
            Self::Integer(value) => Decimal::from(value).checked_mul(factor).map(Self::Decimal),
            Self::Decimal(value) => value.checked_mul(factor).map(Self::Decimal),
        }
    }

    /// Integral value, if it is one
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Decimal(value) => value.to_i64(),
        }
    }

}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{}", value),
            Self::Decimal(value) => write!(f, "{}", value),
        }
    }
}

/// Canonical unit symbol plus the factor from raw readings into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    symbol: String,
    factor: Decimal,
}

impl Unit {
    /// Create a unit; the factor must be positive
    pub fn new(symbol: impl Into<String>, factor: Decimal) -> Result<Self> {
        let symbol = symbol.into();
        if factor.is_zero() || factor.is_negative() {
            return Err(PropertyError::InvalidUnit(format!(
                "factor {} for '{}' must be positive",
                factor, symbol
            )));
        }
        Ok(Self { symbol, factor })
    }

    /// Unit whose readings are already canonical
    pub fn base(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            factor: Decimal::one(),
        }
    }

    /// Unit with an integral factor
    pub fn scaled(symbol: impl Into<String>, factor: i64) -> Result<Self> {
        Self::new(symbol, Decimal::from(factor))
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn factor(&self) -> &Decimal {
        &self.factor
    }
}

/// Scaled number in a canonical unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quantity {
    pub value: Number,
    pub unit: String,
}

impl Quantity {
    pub fn new(value: Number, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

/// Handler producing `Quantity` values
#[derive(Debug, Clone)]
pub struct QuantityProperty {
    info: PropertyInfo,
    unit: Unit,
    data_type: DataType,
}

impl QuantityProperty {
    /// Create an integer quantity handler
    pub fn new(info: impl Into<PropertyInfo>, unit: Unit) -> Self {
        Self {
            info: info.into(),
            unit,
            data_type: DataType::default(),
        }
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

impl Property for QuantityProperty {
    type Output = Quantity;

    fn info(&self) -> &PropertyInfo {
        &self.info
    }

    fn handle(&self, value: &RawValue, context: &mut Context) -> Option<Quantity> {
        let scaled = self
            .data_type
            .accept(value)
            .or_else(|| self.data_type.parse(&value.to_string()))
            .and_then(|number| number.checked_scale(&self.unit.factor));

        match scaled {
            Some(number) => Some(Quantity::new(number, self.unit.symbol.clone())),
            None => {
                self.report(value, context);
                None
            }
        }
    }
}
