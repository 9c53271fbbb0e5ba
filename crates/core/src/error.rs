//! Error types for the charge-field core.

use crate::charge::ChargeId;
use thiserror::Error;

/// Errors produced by charge mutations and configuration constructors.
///
/// Numerical degeneracies (coincident points, vanishing field, empty charge
/// set) are never reported here; the evaluator and tracer absorb them.
#[derive(Debug, Error)]
pub enum FieldError {
    /// A charge position had a NaN or infinite coordinate.
    #[error("non-finite position ({x}, {y})")]
    NonFinitePosition { x: f64, y: f64 },

    /// A charge magnitude was NaN, infinite, zero or negative.
    #[error("invalid magnitude {0}: must be finite and greater than zero")]
    InvalidMagnitude(f64),

    /// No charge with this id exists in the store.
    #[error("unknown charge: {0}")]
    UnknownCharge(ChargeId),

    /// Pixels-per-unit outside [1, 500].
    #[error("scale {0} out of range: pixels per unit must be in [1, 500]")]
    ScaleOutOfRange(u32),

    /// Line density outside [1, 10].
    #[error("density {0} out of range: must be in [1, 10]")]
    DensityOutOfRange(u32),

    /// Scientific-notation exponent outside [-12, 12].
    #[error("exponent {0} out of range: must be in [-12, 12]")]
    InvalidExponent(i32),

    /// Drawing bounds had a zero or non-finite extent.
    #[error("invalid dimensions: width and height must be finite and non-zero")]
    InvalidDimensions,

    /// Grid stride was zero.
    #[error("invalid stride: sampling stride must be at least 1")]
    InvalidStride,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_position_includes_coordinates() {
        let err = FieldError::NonFinitePosition {
            x: f64::NAN,
            y: 12.5,
        };
        let msg = format!("{err}");
        assert!(msg.contains("NaN"), "missing x in: {msg}");
        assert!(msg.contains("12.5"), "missing y in: {msg}");
    }

    #[test]
    fn invalid_magnitude_includes_value() {
        let err = FieldError::InvalidMagnitude(-3.0);
        let msg = format!("{err}");
        assert!(msg.contains("-3"), "missing value in: {msg}");
    }

    #[test]
    fn unknown_charge_displays_label() {
        let err = FieldError::UnknownCharge(ChargeId::from_raw(7));
        let msg = format!("{err}");
        assert!(msg.contains("q7"), "expected charge label in: {msg}");
    }

    #[test]
    fn range_errors_include_offending_value() {
        assert!(FieldError::ScaleOutOfRange(900).to_string().contains("900"));
        assert!(FieldError::DensityOutOfRange(11).to_string().contains("11"));
        assert!(FieldError::InvalidExponent(-20).to_string().contains("-20"));
    }

    #[test]
    fn field_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldError>();
    }

    #[test]
    fn field_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FieldError>();
    }
}
