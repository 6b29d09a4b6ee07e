//! Evaluated result value.

use crate::model::error::EvalError;
use std::fmt;

/// A finite numeric result.
///
/// Smart constructor rejects NaN and infinities, so every `Value` can be
/// stored in the answer register and shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Value(f64);

impl Value {
    /// Smart constructor: rejects non-finite numbers.
    pub fn new(raw: f64) -> Result<Self, EvalError> {
        if raw.is_nan() {
            Err(EvalError::NonFinite("not a number".to_string()))
        } else if raw.is_infinite() {
            let label = if raw.is_sign_positive() {
                "infinity"
            } else {
                "-infinity"
            };
            Err(EvalError::NonFinite(label.to_string()))
        } else {
            Ok(Self(raw))
        }
    }

    /// The raw number.
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::engine::format::format_plain(
            self.0,
            crate::engine::format::DEFAULT_PRECISION,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_finite_numbers() {
        assert_eq!(Value::new(4.0).map(Value::as_f64), Ok(4.0));
        assert_eq!(Value::new(-0.5).map(Value::as_f64), Ok(-0.5));
    }

    #[test]
    fn rejects_nan_and_infinities() {
        assert_eq!(
            Value::new(f64::NAN),
            Err(EvalError::NonFinite("not a number".to_string()))
        );
        assert_eq!(
            Value::new(f64::INFINITY),
            Err(EvalError::NonFinite("infinity".to_string()))
        );
        assert_eq!(
            Value::new(f64::NEG_INFINITY),
            Err(EvalError::NonFinite("-infinity".to_string()))
        );
    }

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(Value::new(0.25).map(|v| v.to_string()), Ok("0.25".to_string()));
        assert_eq!(Value::new(4.0).map(|v| v.to_string()), Ok("4".to_string()));
    }
}
