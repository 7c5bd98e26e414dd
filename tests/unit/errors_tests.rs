/*!
 * Tests for error types and conversions
 */

use trackfacts::{Decimal, NumericError, PropertyError, Resolution, TrackProfile, Unit};

#[test]
fn test_numericError_malformed_shouldDisplayInput() {
    let error = "12abc".parse::<Decimal>().unwrap_err();
    let display = format!("{}", error);
    assert!(display.contains("Malformed numeric value"));
    assert!(display.contains("12abc"));
}

#[test]
fn test_propertyError_fromNumericError_shouldWrapCorrectly() {
    let error: PropertyError = NumericError::Empty.into();
    let display = format!("{}", error);
    assert!(display.contains("Invalid number"));
    assert!(display.contains("Empty numeric value"));
}

#[test]
fn test_propertyError_invalidResolution_shouldDisplayFraction() {
    let error = Resolution::new(3, 0).unwrap_err();
    assert_eq!(error.to_string(), "Invalid resolution: 3/0");
}

#[test]
fn test_propertyError_invalidUnit_shouldNameSymbol() {
    let error = Unit::scaled("kHz", 0).unwrap_err();
    let display = error.to_string();
    assert!(display.contains("Invalid unit"));
    assert!(display.contains("kHz"));
}

#[test]
fn test_propertyError_fromSerdeError_shouldWrapAsProfileError() {
    let error = TrackProfile::from_json_str("{ not json").unwrap_err();
    assert!(matches!(error, PropertyError::Profile(_)));
    assert!(error.to_string().contains("Invalid profile"));
}
