//! Error types for pocketcalc-units

use thiserror::Error;

/// Conversion request errors (bad user input)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown unit '{unit}' for category {category}")]
    UnknownUnit { category: String, unit: String },

    #[error("Value must be a finite number, got {0}")]
    InvalidValue(f64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ConversionError {
    pub fn unknown_category(name: impl Into<String>) -> Self {
        Self::UnknownCategory(name.into())
    }

    pub fn unknown_unit(category: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::UnknownUnit {
            category: category.into(),
            unit: unit.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Table defects found when validating a registry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("Category {0} needs at least two units")]
    TooFewUnits(String),

    #[error("Category {category} lists unit '{unit}' more than once")]
    DuplicateUnit { category: String, unit: String },

    #[error("Category {category}: base unit '{base}' is not in the table")]
    MissingBase { category: String, base: String },

    #[error("Category {category}: unit '{unit}' has invalid factor {factor}")]
    InvalidFactor {
        category: String,
        unit: String,
        factor: f64,
    },

    #[error("Category {category}: unit '{unit}' does not round-trip through the base unit")]
    BrokenPath { category: String, unit: String },

    #[error("Category {0} is registered twice")]
    DuplicateCategory(String),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
