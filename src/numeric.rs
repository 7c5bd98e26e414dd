/*!
 * Exact numeric types used when scaling field values.
 *
 * Inspection tools print time bases such as 1/1001 and sizes with long
 * fractional parts. Scaling through binary floating point drifts over long
 * media, so values are kept as:
 * - `Decimal`: an arbitrary precision base-10 number
 * - `Resolution`: a reduced positive fraction of microseconds per unit
 */

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{NumericError, PropertyError};

/// Magnitudes past the f64 range are rejected as overflow
const MAX_INTEGER_DIGITS: i64 = 309;

// @const: `[+-]digits[.digits][e[+-]digits]`
static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<sign>[+-])?(?P<int>[0-9]*)(?:\.(?P<frac>[0-9]*))?(?:[eE](?P<exp>[+-]?[0-9]+))?$",
    )
    .unwrap()
});

fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Number representations accepted in configuration documents
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberRepr {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Exact base-10 number backed by `BigDecimal`.
///
/// Values are always stored without trailing fractional zeros and with a
/// non-negative scale, so derived equality compares numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal(BigDecimal);

impl Decimal {
    pub fn zero() -> Self {
        Self::from(0)
    }

    pub fn one() -> Self {
        Self::from(1)
    }

    /// Create a decimal from a mantissa and a count of fractional digits
    pub fn new(mantissa: i128, scale: u32) -> Result<Self, NumericError> {
        Self::from_big(BigDecimal::new(BigInt::from(mantissa), i64::from(scale)))
    }

    fn from_big(value: BigDecimal) -> Result<Self, NumericError> {
        if value.sign() == Sign::NoSign {
            return Ok(Self::zero());
        }
        let mut value = value.normalized();
        if value.as_bigint_and_exponent().1 < 0 {
            if integer_digits(&value) > MAX_INTEGER_DIGITS {
                return Err(NumericError::Overflow(value.to_string()));
            }
            value = value.with_scale(0);
        }
        Ok(Self(value))
    }

    fn parts(&self) -> (BigInt, i64) {
        self.0.as_bigint_and_exponent()
    }

    pub fn is_zero(&self) -> bool {
        self.0.sign() == Sign::NoSign
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    pub fn is_integer(&self) -> bool {
        self.parts().1 == 0
    }

    /// The value as `i64` when it is integral and in range
    pub fn to_i64(&self) -> Option<i64> {
        let (digits, scale) = self.parts();
        if scale == 0 {
            i64::try_from(&digits).ok()
        } else {
            None
        }
    }

    /// Exact product, `None` past the supported magnitude
    pub fn checked_mul(&self, rhs: &Decimal) -> Option<Decimal> {
        Self::from_big(&self.0 * &rhs.0).ok()
    }
}

/// Digits left of the decimal point, negative for leading fractional zeros
fn integer_digits(value: &BigDecimal) -> i64 {
    let (digits, scale) = value.as_bigint_and_exponent();
    digits.magnitude().to_string().len() as i64 - scale
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self(BigDecimal::from(value))
    }
}

impl FromStr for Decimal {
    type Err = NumericError;

    /// Parse `[+-]digits[.digits][e[+-]digits]`, surrounding whitespace allowed
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(NumericError::Empty);
        }
        let overflow = || NumericError::Overflow(text.to_string());

        let captures = NUMBER_REGEX
            .captures(text)
            .ok_or_else(|| NumericError::Malformed(text.to_string()))?;
        let int_part = captures.name("int").map_or("", |m| m.as_str());
        let frac_part = captures.name("frac").map_or("", |m| m.as_str());
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(NumericError::Malformed(text.to_string()));
        }

        let mut mantissa: BigInt = format!("{}{}", int_part, frac_part)
            .parse()
            .map_err(|_| NumericError::Malformed(text.to_string()))?;
        if mantissa.sign() == Sign::NoSign {
            return Ok(Self::zero());
        }
        if captures.name("sign").is_some_and(|m| m.as_str() == "-") {
            mantissa = -mantissa;
        }

        let exponent = match captures.name("exp") {
            Some(exp) => exp.as_str().parse::<i64>().map_err(|_| overflow())?,
            None => 0,
        };
        let significant = int_part.trim_start_matches('0').len() as i64;
        if significant.saturating_add(exponent) > MAX_INTEGER_DIGITS {
            return Err(overflow());
        }
        let scale = (frac_part.len() as i64)
            .checked_sub(exponent)
            .ok_or_else(overflow)?;
        Self::from_big(BigDecimal::new(mantissa, scale))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match NumberRepr::deserialize(deserializer)? {
            NumberRepr::Integer(value) => Ok(Decimal::from(value)),
            NumberRepr::Float(value) => value.to_string().parse().map_err(D::Error::custom),
            NumberRepr::Text(value) => value.parse().map_err(D::Error::custom),
        }
    }
}

/// Microseconds represented by one unit of a bare numeric duration.
///
/// Stored as a reduced fraction so time bases like `1/3` or `1001/30`
/// scale without rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    numer: u64,
    denom: u64,
}

impl Resolution {
    pub const MICROSECOND: Resolution = Resolution { numer: 1, denom: 1 };
    pub const MILLISECOND: Resolution = Resolution { numer: 1_000, denom: 1 };
    pub const SECOND: Resolution = Resolution {
        numer: 1_000_000,
        denom: 1,
    };

    /// Create a resolution of `numer / denom` microseconds per unit
    pub fn new(numer: u64, denom: u64) -> Result<Self, PropertyError> {
        if numer == 0 || denom == 0 {
            return Err(PropertyError::InvalidResolution(format!("{}/{}", numer, denom)));
        }
        let divisor = gcd(numer, denom);
        Ok(Self {
            numer: numer / divisor,
            denom: denom / divisor,
        })
    }

    /// Create a resolution from an exact positive decimal
    pub fn from_decimal(value: Decimal) -> Result<Self, PropertyError> {
        let invalid = || PropertyError::InvalidResolution(value.to_string());
        if value.is_negative() || value.is_zero() {
            return Err(invalid());
        }
        let (digits, scale) = value.parts();
        let numer = u64::try_from(&digits).map_err(|_| invalid())?;
        let denom = u32::try_from(scale)
            .ok()
            .filter(|scale| *scale < 20)
            .and_then(|scale| u64::try_from(pow10(scale)).ok())
            .ok_or_else(invalid)?;
        Self::new(numer, denom)
    }

    pub fn numer(&self) -> u64 {
        self.numer
    }

    pub fn denom(&self) -> u64 {
        self.denom
    }

    /// Microseconds for `value` units; `None` when negative or out of range
    pub fn scale_integer(&self, value: i64) -> Option<u64> {
        let value = u128::from(u64::try_from(value).ok()?);
        let micros = value * u128::from(self.numer) / u128::from(self.denom);
        u64::try_from(micros).ok()
    }

    /// Microseconds for a decimal count of units, truncated toward zero
    pub fn scale_decimal(&self, value: &Decimal) -> Option<u64> {
        // numer < 10^20, so anything this small truncates to zero
        if integer_digits(&value.0) < -20 {
            return Some(0);
        }
        let (digits, scale) = value.parts();
        let scaled = digits * BigInt::from(self.numer);
        // trunc(trunc(x / a) / b) == trunc(x / (a * b)) for positive a, b
        let micros = scaled / pow10(u32::try_from(scale).ok()?) / BigInt::from(self.denom);
        u64::try_from(micros).ok()
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::MICROSECOND
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

impl FromStr for Resolution {
    type Err = PropertyError;

    /// Parse `"n/d"` or an exact decimal such as `"1000"` or `"0.5"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((numer, denom)) => {
                let invalid = |_| PropertyError::InvalidResolution(s.to_string());
                let numer = numer.trim().parse::<u64>().map_err(invalid)?;
                let denom = denom.trim().parse::<u64>().map_err(invalid)?;
                Self::new(numer, denom)
            }
            None => Self::from_decimal(s.parse()?),
        }
    }
}

impl Serialize for Resolution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.denom == 1 {
            serializer.serialize_u64(self.numer)
        } else {
            serializer.collect_str(self)
        }
    }
}

impl<'de> Deserialize<'de> for Resolution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match NumberRepr::deserialize(deserializer)? {
            NumberRepr::Integer(value) => Resolution::from_decimal(Decimal::from(value)),
            NumberRepr::Float(value) => value.to_string().parse(),
            NumberRepr::Text(value) => value.parse(),
        }
        .map_err(D::Error::custom)
    }
}
