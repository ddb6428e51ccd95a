//! Built-in unit tables
//!
//! Linear categories store each unit as a multiple of the base unit.
//! Temperature is affine and stores a pair of functions into and out of
//! degrees Celsius.

use crate::category::Category;

/// A unit whose value is `factor` base units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearUnit {
    pub label: &'static str,
    pub factor: f64,
}

/// A unit related to the base unit by an offset as well as a scale
#[derive(Debug, Clone, Copy)]
pub struct AffineUnit {
    pub label: &'static str,
    pub to_base: fn(f64) -> f64,
    pub from_base: fn(f64) -> f64,
}

#[derive(Debug, Clone, Copy)]
pub enum Scale {
    Linear(&'static [LinearUnit]),
    Affine(&'static [AffineUnit]),
}

/// One category's unit table
#[derive(Debug, Clone, Copy)]
pub struct CategoryTable {
    pub category: Category,
    pub base: &'static str,
    pub scale: Scale,
}

impl CategoryTable {
    /// Unit labels in table order
    pub fn labels(&self) -> Vec<&'static str> {
        match self.scale {
            Scale::Linear(units) => units.iter().map(|u| u.label).collect(),
            Scale::Affine(units) => units.iter().map(|u| u.label).collect(),
        }
    }

    /// First two units, used as the pair a fresh converter shows
    pub fn default_pair(&self) -> Option<(&'static str, &'static str)> {
        let labels = self.labels();
        match labels.as_slice() {
            [from, to, ..] => Some((*from, *to)),
            _ => None,
        }
    }

    /// Resolve a user-typed unit to its table label.
    ///
    /// Exact labels win; otherwise the comparison ignores case, a leading
    /// degree sign and accepts `3` for `³`.
    pub fn resolve(&self, unit: &str) -> Option<&'static str> {
        let labels = self.labels();
        let wanted = unit.trim();
        if let Some(label) = labels.iter().copied().find(|label| *label == wanted) {
            return Some(label);
        }
        let wanted = canonical(wanted);
        labels.into_iter().find(|label| canonical(label) == wanted)
    }
}

pub(crate) fn canonical(label: &str) -> String {
    label
        .trim()
        .trim_start_matches('°')
        .replace('³', "3")
        .to_lowercase()
}

static LENGTH: [LinearUnit; 5] = [
    LinearUnit { label: "cm", factor: 0.01 },
    LinearUnit { label: "m", factor: 1.0 },
    LinearUnit { label: "km", factor: 1000.0 },
    LinearUnit { label: "in", factor: 0.0254 },
    LinearUnit { label: "ft", factor: 0.3048 },
];

static VOLUME: [LinearUnit; 5] = [
    LinearUnit { label: "mL", factor: 0.001 },
    LinearUnit { label: "L", factor: 1.0 },
    LinearUnit { label: "m³", factor: 1000.0 },
    LinearUnit { label: "gal", factor: 3.78541 },
    LinearUnit { label: "ft³", factor: 28.3168 },
];

static MASS: [LinearUnit; 5] = [
    LinearUnit { label: "g", factor: 1.0 },
    LinearUnit { label: "kg", factor: 1000.0 },
    LinearUnit { label: "lb", factor: 453.592 },
    LinearUnit { label: "oz", factor: 28.3495 },
    LinearUnit { label: "ton", factor: 907185.0 },
];

static TIME: [LinearUnit; 5] = [
    LinearUnit { label: "sec", factor: 1.0 },
    LinearUnit { label: "min", factor: 60.0 },
    LinearUnit { label: "hr", factor: 3600.0 },
    LinearUnit { label: "day", factor: 86400.0 },
    LinearUnit { label: "week", factor: 604800.0 },
];

// All factors are metres per second.
static SPEED: [LinearUnit; 5] = [
    LinearUnit { label: "m/s", factor: 1.0 },
    LinearUnit { label: "km/h", factor: 1.0 / 3.6 },
    LinearUnit { label: "mph", factor: 0.44704 },
    LinearUnit { label: "knot", factor: 1852.0 / 3600.0 },
    LinearUnit { label: "ft/s", factor: 0.3048 },
];

fn identity(value: f64) -> f64 {
    value
}

fn fahrenheit_to_celsius(value: f64) -> f64 {
    (value - 32.0) * 5.0 / 9.0
}

fn celsius_to_fahrenheit(value: f64) -> f64 {
    value * 9.0 / 5.0 + 32.0
}

fn kelvin_to_celsius(value: f64) -> f64 {
    value - 273.15
}

fn celsius_to_kelvin(value: f64) -> f64 {
    value + 273.15
}

static TEMPERATURE: [AffineUnit; 3] = [
    AffineUnit {
        label: "°C",
        to_base: identity,
        from_base: identity,
    },
    AffineUnit {
        label: "°F",
        to_base: fahrenheit_to_celsius,
        from_base: celsius_to_fahrenheit,
    },
    AffineUnit {
        label: "K",
        to_base: kelvin_to_celsius,
        from_base: celsius_to_kelvin,
    },
];

/// The tables shipped with pocketcalc, in picker order
pub fn builtin_tables() -> Vec<CategoryTable> {
    vec![
        CategoryTable {
            category: Category::Length,
            base: "m",
            scale: Scale::Linear(&LENGTH),
        },
        CategoryTable {
            category: Category::Volume,
            base: "L",
            scale: Scale::Linear(&VOLUME),
        },
        CategoryTable {
            category: Category::Mass,
            base: "g",
            scale: Scale::Linear(&MASS),
        },
        CategoryTable {
            category: Category::Temperature,
            base: "°C",
            scale: Scale::Affine(&TEMPERATURE),
        },
        CategoryTable {
            category: Category::Time,
            base: "sec",
            scale: Scale::Linear(&TIME),
        },
        CategoryTable {
            category: Category::Speed,
            base: "m/s",
            scale: Scale::Linear(&SPEED),
        },
    ]
}
