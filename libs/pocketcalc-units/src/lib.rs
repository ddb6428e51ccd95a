//! pocketcalc-units - Unit conversion for pocketcalc
//!
//! Converts a value between two units of one [`Category`]. Length, volume,
//! mass, time and speed are linear: every unit is a multiple of the
//! category's base unit. Temperature is affine and converts through
//! degrees Celsius, so every ordered pair of temperature units works.
//!
//! ```rust
//! use pocketcalc_units::{convert, convert_text, Category};
//!
//! assert_eq!(convert(Category::Length, "cm", "m", 100.0).unwrap(), 1.0);
//! assert_eq!(convert_text("temperature", "°F", "K", "32").unwrap(), 273.15);
//! ```

pub mod category;
pub mod error;
pub mod registry;
pub mod tables;

pub use category::Category;
pub use error::{ConversionError, RegistryError, Result};
pub use registry::UnitRegistry;
pub use tables::{AffineUnit, CategoryTable, LinearUnit, Scale};

/// Convert with the built-in tables.
pub fn convert(category: Category, from: &str, to: &str, value: f64) -> Result<f64> {
    UnitRegistry::builtin().convert(category, from, to, value)
}

/// Convert from user-entered text: category name and value are parsed first.
pub fn convert_text(category: &str, from: &str, to: &str, value: &str) -> Result<f64> {
    let category: Category = category.parse()?;
    let value = parse_value(value)?;
    convert(category, from, to, value)
}

/// Parse a number typed by the user.
///
/// The whole trimmed text must be a number; trailing garbage is rejected.
pub fn parse_value(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::invalid_input("no value entered"));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ConversionError::invalid_input(format!("'{}' is not a number", trimmed)))?;
    if !value.is_finite() {
        return Err(ConversionError::InvalidValue(value));
    }
    Ok(value)
}

/// Unit labels of a built-in category
pub fn units(category: Category) -> Result<Vec<&'static str>> {
    UnitRegistry::builtin().units(category)
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_text() {
        assert_eq!(convert_text("Length", "km", "m", " 2.5 ").unwrap(), 2500.0);
        assert_eq!(convert_text("mass", "kg", "g", "1").unwrap(), 1000.0);
    }

    #[test]
    fn test_convert_text_errors() {
        assert!(matches!(
            convert_text("length", "m", "cm", "abc"),
            Err(ConversionError::InvalidInput(_))
        ));
        assert!(matches!(
            convert_text("length", "m", "cm", ""),
            Err(ConversionError::InvalidInput(_))
        ));
        assert!(matches!(
            convert_text("length", "m", "cm", "12abc"),
            Err(ConversionError::InvalidInput(_))
        ));
        assert!(matches!(
            convert_text("energy", "J", "cal", "1"),
            Err(ConversionError::UnknownCategory(_))
        ));
        assert!(matches!(
            convert_text("length", "m", "cm", "inf"),
            Err(ConversionError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_units() {
        assert_eq!(units(Category::Temperature).unwrap(), vec!["°C", "°F", "K"]);
        assert_eq!(units(Category::Time).unwrap().len(), 5);
    }
}
