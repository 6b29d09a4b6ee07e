//! Degree/radian interpretation of trig calls.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How trig function arguments and inverse-trig results are interpreted.
///
/// Global to a session; only affects evaluations made after it changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// Radians: text goes to the engine unchanged.
    #[default]
    Rad,
    /// Degrees: trig calls are rewritten before evaluation.
    Deg,
}

impl AngleMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            AngleMode::Rad => AngleMode::Deg,
            AngleMode::Deg => AngleMode::Rad,
        }
    }

    /// Short uppercase label, as shown on a mode indicator.
    pub fn label(self) -> &'static str {
        match self {
            AngleMode::Rad => "RAD",
            AngleMode::Deg => "DEG",
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for unrecognized angle mode names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown angle mode '{0}' (expected 'rad' or 'deg')")]
pub struct InvalidAngleMode(pub String);

impl FromStr for AngleMode {
    type Err = InvalidAngleMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rad" | "radian" | "radians" => Ok(AngleMode::Rad),
            "deg" | "degree" | "degrees" => Ok(AngleMode::Deg),
            _ => Err(InvalidAngleMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_radians() {
        assert_eq!(AngleMode::default(), AngleMode::Rad);
    }

    #[test]
    fn toggled_flips_both_ways() {
        assert_eq!(AngleMode::Rad.toggled(), AngleMode::Deg);
        assert_eq!(AngleMode::Deg.toggled(), AngleMode::Rad);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("DEG".parse::<AngleMode>(), Ok(AngleMode::Deg));
        assert_eq!(" radians ".parse::<AngleMode>(), Ok(AngleMode::Rad));
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "grad".parse::<AngleMode>().unwrap_err();
        assert_eq!(err, InvalidAngleMode("grad".to_string()));
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(AngleMode::Deg.to_string(), "DEG");
    }
}
