//! Conversion categories

use crate::error::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A family of mutually convertible units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Volume,
    Mass,
    Temperature,
    Time,
    Speed,
}

impl Category {
    /// Every category, in picker order
    pub const ALL: [Category; 6] = [
        Category::Length,
        Category::Volume,
        Category::Mass,
        Category::Temperature,
        Category::Time,
        Category::Speed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Volume => "Volume",
            Category::Mass => "Mass",
            Category::Temperature => "Temperature",
            Category::Time => "Time",
            Category::Speed => "Speed",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConversionError::unknown_category(wanted))
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("length".parse::<Category>().unwrap(), Category::Length);
        assert_eq!(" SPEED ".parse::<Category>().unwrap(), Category::Speed);
        assert_eq!(
            "Temperature".parse::<Category>().unwrap(),
            Category::Temperature
        );
    }

    #[test]
    fn test_parse_unknown() {
        let err = "energy".parse::<Category>().unwrap_err();
        assert_eq!(err, ConversionError::UnknownCategory("energy".to_string()));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Category::Mass).unwrap();
        assert_eq!(json, "\"mass\"");
        let back: Category = serde_json::from_str("\"time\"").unwrap();
        assert_eq!(back, Category::Time);
    }
}
