/*!
 * Error types for trackfacts.
 *
 * Malformed field values are never errors: handlers report them into the
 * track context and return nothing. The types here cover configuration
 * defects detected while building handlers, units and profiles.
 */

use thiserror::Error;

/// Errors that can occur while parsing exact numeric values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumericError {
    /// Input was empty or whitespace only
    #[error("Empty numeric value")]
    Empty,

    /// Input is not a decimal number
    #[error("Malformed numeric value: {0}")]
    Malformed(String),

    /// Input magnitude is beyond the supported range
    #[error("Numeric value out of range: {0}")]
    Overflow(String),
}

/// Errors raised when constructing handlers, units or profiles
#[derive(Error, Debug)]
pub enum PropertyError {
    /// Time base for bare numeric durations is unusable
    #[error("Invalid resolution: {0}")]
    InvalidResolution(String),

    /// Unit scale factor is unusable
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    /// Configured number could not be parsed
    #[error("Invalid number: {0}")]
    InvalidNumber(#[from] NumericError),

    /// Raw track data has an unexpected shape
    #[error("Invalid track: {0}")]
    InvalidTrack(String),

    /// Two property records share an output key
    #[error("Duplicate property key: {0}")]
    DuplicateKey(String),

    /// Profile document could not be decoded
    #[error("Invalid profile: {0}")]
    Profile(#[from] serde_json::Error),
}

/// Result type for trackfacts configuration operations
pub type Result<T> = std::result::Result<T, PropertyError>;
