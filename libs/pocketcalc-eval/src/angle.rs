//! Angle convention for trigonometric functions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether `sin`, `cos` and `tan` read their argument in degrees or radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    /// Convert an angle expressed in this mode to radians.
    #[inline]
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleMode::Degrees => angle * std::f64::consts::PI / 180.0,
            AngleMode::Radians => angle,
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            AngleMode::Degrees => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Degrees,
        }
    }

    /// Short label shown on the mode toggle
    pub fn label(self) -> &'static str {
        match self {
            AngleMode::Degrees => "DEG",
            AngleMode::Radians => "RAD",
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AngleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Ok(AngleMode::Degrees),
            "rad" | "radian" | "radians" => Ok(AngleMode::Radians),
            other => Err(format!(
                "Unknown angle mode '{}', expected 'deg' or 'rad'",
                other
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_degrees() {
        assert_eq!(AngleMode::default(), AngleMode::Degrees);
    }

    #[test]
    fn test_to_radians() {
        assert_eq!(AngleMode::Radians.to_radians(1.5), 1.5);
        assert!((AngleMode::Degrees.to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(AngleMode::Degrees.toggled(), AngleMode::Radians);
        assert_eq!(AngleMode::Degrees.toggled().toggled(), AngleMode::Degrees);
    }

    #[test]
    fn test_parse() {
        assert_eq!("DEG".parse::<AngleMode>().unwrap(), AngleMode::Degrees);
        assert_eq!(" radians ".parse::<AngleMode>().unwrap(), AngleMode::Radians);
        assert!("grad".parse::<AngleMode>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&AngleMode::Radians).unwrap();
        assert_eq!(json, "\"radians\"");
    }
}
