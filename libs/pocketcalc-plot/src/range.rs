//! Domain and range resolution
//!
//! The horizontal domain always comes from the user and must be valid.
//! The vertical range comes from the user when both bounds are usable,
//! otherwise from the sampled extrema with a warning.

use crate::error::{Bound, RangeError};
use crate::sampler::Samples;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Half-height added around a flat derived range
pub const FLAT_PADDING: f64 = 0.5;

/// A closed interval with finite bounds and `min < max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

/// Horizontal plotting interval
pub type Domain = Interval;
/// Vertical plotting interval
pub type Range = Interval;

impl Interval {
    pub fn new(min: f64, max: f64) -> Result<Self, RangeError> {
        if !min.is_finite() {
            return Err(RangeError::not_a_number(Bound::Min, min.to_string()));
        }
        if !max.is_finite() {
            return Err(RangeError::not_a_number(Bound::Max, max.to_string()));
        }
        if min >= max {
            return Err(RangeError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// Width of the interval; infinite when the bounds are far apart
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Point at fraction `t` of the way from `min` to `max`.
    pub fn lerp(&self, t: f64) -> f64 {
        let span = self.span();
        if span.is_finite() {
            self.min + t * span
        } else {
            self.min * (1.0 - t) + self.max * t
        }
    }

    /// Where `value` lies relative to the bounds: 0 at `min`, 1 at `max`.
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.span();
        if span.is_finite() {
            (value - self.min) / span
        } else {
            (value / 2.0 - self.min / 2.0) / (self.max / 2.0 - self.min / 2.0)
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// User y-bounds were given but could not be used
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeWarning {
    pub min_text: String,
    pub max_text: String,
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Invalid Y range values, using computed values.")
    }
}

/// Outcome of vertical range resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeResolution {
    pub range: Range,
    pub warning: Option<RangeWarning>,
}

fn parse_finite(bound: Bound, text: &str) -> Result<f64, RangeError> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| RangeError::not_a_number(bound, text))
}

/// Validate the user's horizontal bounds.
pub fn resolve_domain(min_text: &str, max_text: &str) -> Result<Domain, RangeError> {
    let (min_text, max_text) = (min_text.trim(), max_text.trim());
    if min_text.is_empty() || max_text.is_empty() {
        return Err(RangeError::Missing);
    }
    let min = parse_finite(Bound::Min, min_text)?;
    let max = parse_finite(Bound::Max, max_text)?;
    Interval::new(min, max)
}

/// Pick the vertical range: user bounds when both are usable, otherwise
/// the sampled extrema.
pub fn resolve_range(min_text: &str, max_text: &str, samples: &Samples) -> RangeResolution {
    let (min_text, max_text) = (min_text.trim(), max_text.trim());

    let user = parse_finite(Bound::Min, min_text)
        .and_then(|min| Ok((min, parse_finite(Bound::Max, max_text)?)))
        .and_then(|(min, max)| Interval::new(min, max));
    if let Ok(range) = user {
        return RangeResolution {
            range,
            warning: None,
        };
    }

    let warning = if min_text.is_empty() && max_text.is_empty() {
        None
    } else {
        warn!(
            y_min = min_text,
            y_max = max_text,
            "Invalid Y range values, using computed values"
        );
        Some(RangeWarning {
            min_text: min_text.to_string(),
            max_text: max_text.to_string(),
        })
    };

    RangeResolution {
        range: derived_range(samples),
        warning,
    }
}

/// Extrema of the sampled `y` values, widened when flat.
pub fn derived_range(samples: &Samples) -> Range {
    let (min, max) = samples.y_extent();
    if min < max {
        Interval { min, max }
    } else {
        // relative padding once 0.5 is lost in rounding
        let padding = FLAT_PADDING.max(min.abs() * 1e-9);
        Interval {
            min: (min - padding).max(f64::MIN),
            max: (max + padding).min(f64::MAX),
        }
    }
}
