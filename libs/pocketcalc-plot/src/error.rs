//! Error types for pocketcalc-plot

use pocketcalc_eval::CalcError;
use thiserror::Error;

/// Which end of an interval a bound belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Min => f.write_str("min"),
            Bound::Max => f.write_str("max"),
        }
    }
}

/// Bound validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("Please input both X-min and X-max")]
    Missing,

    #[error("Invalid X range values: {bound} '{text}' is not a finite number")]
    NotANumber { bound: Bound, text: String },

    #[error("Invalid X range values: min {min} must be less than max {max}")]
    Inverted { min: f64, max: f64 },
}

impl RangeError {
    pub fn not_a_number(bound: Bound, text: impl Into<String>) -> Self {
        Self::NotANumber {
            bound,
            text: text.into(),
        }
    }
}

/// Plot request errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotError {
    #[error("Please enter a function")]
    EmptyExpression,

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Expression(#[from] CalcError),

    #[error("No plottable points found")]
    NoPlottablePoints,

    #[error("Step count must be at least 1")]
    InvalidStepCount,

    #[error("Invalid surface {width}x{height} with margin {margin}")]
    InvalidSurface {
        width: f64,
        height: f64,
        margin: f64,
    },
}

pub type Result<T> = std::result::Result<T, PlotError>;
