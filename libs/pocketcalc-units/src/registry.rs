//! Unit registry and conversion
//!
//! The registry owns one table per category. Linear categories convert
//! through the base unit by factor ratio; affine categories convert
//! through the base unit with the per-unit function pair.

use crate::category::Category;
use crate::error::{ConversionError, RegistryError, Result};
use crate::tables::{builtin_tables, canonical, CategoryTable, Scale};
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::trace;

/// Probe values used to check affine round trips
const PROBES: [f64; 4] = [-40.0, 0.0, 37.5, 100.0];
const ROUND_TRIP_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct UnitRegistry {
    tables: Vec<CategoryTable>,
}

static BUILTIN: OnceLock<UnitRegistry> = OnceLock::new();

impl UnitRegistry {
    /// The shared built-in registry
    pub fn builtin() -> &'static UnitRegistry {
        BUILTIN.get_or_init(|| UnitRegistry {
            tables: builtin_tables(),
        })
    }

    /// Build a registry from custom tables, rejecting malformed ones.
    pub fn from_tables(tables: Vec<CategoryTable>) -> std::result::Result<Self, RegistryError> {
        let registry = Self { tables };
        registry.validate()?;
        Ok(registry)
    }

    /// Check every table: at least two distinct units, a base unit present
    /// with identity conversion, positive finite factors, and a round trip
    /// through the base for every affine unit.
    pub fn validate(&self) -> std::result::Result<(), RegistryError> {
        let mut seen = HashSet::new();
        for table in &self.tables {
            let category = table.category.to_string();
            if !seen.insert(table.category) {
                return Err(RegistryError::DuplicateCategory(category));
            }

            let labels = table.labels();
            if labels.len() < 2 {
                return Err(RegistryError::TooFewUnits(category));
            }

            let mut names = HashSet::new();
            for label in &labels {
                if !names.insert(canonical(label)) {
                    return Err(RegistryError::DuplicateUnit {
                        category,
                        unit: label.to_string(),
                    });
                }
            }

            if !labels.contains(&table.base) {
                return Err(RegistryError::MissingBase {
                    category,
                    base: table.base.to_string(),
                });
            }

            match table.scale {
                Scale::Linear(units) => {
                    for unit in units {
                        let is_base = unit.label == table.base;
                        if !unit.factor.is_finite()
                            || unit.factor <= 0.0
                            || (is_base && unit.factor != 1.0)
                        {
                            return Err(RegistryError::InvalidFactor {
                                category,
                                unit: unit.label.to_string(),
                                factor: unit.factor,
                            });
                        }
                    }
                },
                Scale::Affine(units) => {
                    for unit in units {
                        let is_base = unit.label == table.base;
                        let broken = PROBES.iter().any(|&probe| {
                            let there = (unit.to_base)(probe);
                            let back = (unit.from_base)(there);
                            (back - probe).abs() > ROUND_TRIP_TOLERANCE
                                || (is_base && there != probe)
                        });
                        if broken {
                            return Err(RegistryError::BrokenPath {
                                category,
                                unit: unit.label.to_string(),
                            });
                        }
                    }
                },
            }
        }
        Ok(())
    }

    pub fn tables(&self) -> &[CategoryTable] {
        &self.tables
    }

    pub fn table(&self, category: Category) -> Result<&CategoryTable> {
        self.tables
            .iter()
            .find(|table| table.category == category)
            .ok_or_else(|| ConversionError::unknown_category(category.name()))
    }

    /// Unit labels for a category, in picker order
    pub fn units(&self, category: Category) -> Result<Vec<&'static str>> {
        Ok(self.table(category)?.labels())
    }

    /// Convert `value` from one unit to another within `category`.
    ///
    /// Converting a unit to itself returns `value` unchanged.
    pub fn convert(&self, category: Category, from: &str, to: &str, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(ConversionError::InvalidValue(value));
        }

        let table = self.table(category)?;
        let from_label = table
            .resolve(from)
            .ok_or_else(|| ConversionError::unknown_unit(category.name(), from))?;
        let to_label = table
            .resolve(to)
            .ok_or_else(|| ConversionError::unknown_unit(category.name(), to))?;

        if from_label == to_label {
            return Ok(value);
        }

        let converted = match table.scale {
            Scale::Linear(units) => {
                let factor = |label: &str| {
                    units
                        .iter()
                        .find(|unit| unit.label == label)
                        .map(|unit| unit.factor)
                        .ok_or_else(|| ConversionError::unknown_unit(category.name(), label))
                };
                value * factor(from_label)? / factor(to_label)?
            },
            Scale::Affine(units) => {
                let unit = |label: &str| {
                    units
                        .iter()
                        .find(|unit| unit.label == label)
                        .ok_or_else(|| ConversionError::unknown_unit(category.name(), label))
                };
                let base = (unit(from_label)?.to_base)(value);
                (unit(to_label)?.from_base)(base)
            },
        };

        trace!(%category, from = from_label, to = to_label, value, converted, "unit conversion");
        Ok(converted)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::tables::{AffineUnit, LinearUnit};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_builtin_is_valid() {
        UnitRegistry::builtin().validate().unwrap();
    }

    #[test]
    fn test_linear_conversions() {
        let registry = UnitRegistry::builtin();
        assert_eq!(
            registry.convert(Category::Length, "cm", "m", 100.0).unwrap(),
            1.0
        );
        assert_eq!(
            registry.convert(Category::Length, "km", "m", 1.0).unwrap(),
            1000.0
        );
        assert!(close(
            registry.convert(Category::Length, "ft", "in", 1.0).unwrap(),
            12.0
        ));
        assert!(close(
            registry.convert(Category::Time, "day", "hr", 2.0).unwrap(),
            48.0
        ));
    }

    #[test]
    fn test_speed_factors_are_metres_per_second() {
        let registry = UnitRegistry::builtin();
        assert!(close(
            registry.convert(Category::Speed, "km/h", "m/s", 36.0).unwrap(),
            10.0
        ));
        assert!(close(
            registry.convert(Category::Speed, "mph", "m/s", 1.0).unwrap(),
            0.44704
        ));
        assert!(close(
            registry.convert(Category::Speed, "ft/s", "m/s", 1.0).unwrap(),
            0.3048
        ));
    }

    #[test]
    fn test_temperature_all_pairs() {
        let registry = UnitRegistry::builtin();
        assert_eq!(
            registry
                .convert(Category::Temperature, "°C", "°F", 100.0)
                .unwrap(),
            212.0
        );
        assert_eq!(
            registry
                .convert(Category::Temperature, "°F", "K", 32.0)
                .unwrap(),
            273.15
        );
        assert_eq!(
            registry
                .convert(Category::Temperature, "K", "°F", 273.15)
                .unwrap(),
            32.0
        );
        assert_eq!(
            registry
                .convert(Category::Temperature, "K", "°C", 0.0)
                .unwrap(),
            -273.15
        );
    }

    #[test]
    fn test_identity_is_exact() {
        let registry = UnitRegistry::builtin();
        let value = 0.1 + 0.2;
        assert_eq!(
            registry.convert(Category::Mass, "oz", "oz", value).unwrap(),
            value
        );
        assert_eq!(
            registry
                .convert(Category::Temperature, "°F", "F", value)
                .unwrap(),
            value
        );
    }

    #[test]
    fn test_unknown_unit() {
        let err = UnitRegistry::builtin()
            .convert(Category::Length, "mile", "m", 1.0)
            .unwrap_err();
        assert_eq!(err, ConversionError::unknown_unit("Length", "mile"));
    }

    #[test]
    fn test_non_finite_value() {
        let registry = UnitRegistry::builtin();
        assert!(matches!(
            registry.convert(Category::Length, "m", "cm", f64::NAN),
            Err(ConversionError::InvalidValue(_))
        ));
        assert!(matches!(
            registry.convert(Category::Length, "m", "cm", f64::INFINITY),
            Err(ConversionError::InvalidValue(_))
        ));
    }

    static ONE_UNIT: [LinearUnit; 1] = [LinearUnit {
        label: "m",
        factor: 1.0,
    }];

    static ZERO_FACTOR: [LinearUnit; 2] = [
        LinearUnit {
            label: "m",
            factor: 1.0,
        },
        LinearUnit {
            label: "nothing",
            factor: 0.0,
        },
    ];

    fn double(v: f64) -> f64 {
        v * 2.0
    }

    fn same(v: f64) -> f64 {
        v
    }

    static BROKEN_AFFINE: [AffineUnit; 2] = [
        AffineUnit {
            label: "°C",
            to_base: same,
            from_base: same,
        },
        AffineUnit {
            label: "odd",
            to_base: double,
            from_base: double,
        },
    ];

    #[test]
    fn test_validate_rejects_defects() {
        let too_few = UnitRegistry::from_tables(vec![CategoryTable {
            category: Category::Length,
            base: "m",
            scale: Scale::Linear(&ONE_UNIT),
        }]);
        assert_eq!(
            too_few.unwrap_err(),
            RegistryError::TooFewUnits("Length".to_string())
        );

        let zero = UnitRegistry::from_tables(vec![CategoryTable {
            category: Category::Length,
            base: "m",
            scale: Scale::Linear(&ZERO_FACTOR),
        }]);
        assert!(matches!(
            zero.unwrap_err(),
            RegistryError::InvalidFactor { .. }
        ));

        let missing_base = UnitRegistry::from_tables(vec![CategoryTable {
            category: Category::Length,
            base: "yd",
            scale: Scale::Linear(&ZERO_FACTOR),
        }]);
        assert!(matches!(
            missing_base.unwrap_err(),
            RegistryError::MissingBase { .. }
        ));

        let broken = UnitRegistry::from_tables(vec![CategoryTable {
            category: Category::Temperature,
            base: "°C",
            scale: Scale::Affine(&BROKEN_AFFINE),
        }]);
        assert!(matches!(
            broken.unwrap_err(),
            RegistryError::BrokenPath { .. }
        ));
    }

    #[test]
    fn test_missing_category() {
        let registry = UnitRegistry::from_tables(
            builtin_tables()
                .into_iter()
                .filter(|t| t.category != Category::Speed)
                .collect(),
        )
        .unwrap();
        assert_eq!(
            registry.units(Category::Speed).unwrap_err(),
            ConversionError::UnknownCategory("Speed".to_string())
        );
    }
}
