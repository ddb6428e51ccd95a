//! Property tests over the built-in unit tables

#![allow(clippy::disallowed_methods)]

use pocketcalc_units::{convert, units, Category};
use proptest::prelude::*;

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

/// A category plus two of its unit labels
fn unit_pair() -> impl Strategy<Value = (Category, &'static str, &'static str)> {
    category().prop_flat_map(|category| {
        let labels = units(category).unwrap();
        (
            Just(category),
            prop::sample::select(labels.clone()),
            prop::sample::select(labels),
        )
    })
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn same_unit_is_identity(
        (category, unit, _) in unit_pair(),
        value in -1.0e9f64..1.0e9,
    ) {
        prop_assert_eq!(convert(category, unit, unit, value).unwrap(), value);
    }

    #[test]
    fn there_and_back_again(
        (category, from, to) in unit_pair(),
        value in -1.0e6f64..1.0e6,
    ) {
        let there = convert(category, from, to, value).unwrap();
        let back = convert(category, to, from, there).unwrap();
        prop_assert!(approx_eq(back, value), "{} {} -> {} -> {}", value, from, to, back);
    }

    #[test]
    fn linear_conversion_scales(
        (category, from, to) in unit_pair(),
        value in 0.001f64..1.0e6,
    ) {
        prop_assume!(category != Category::Temperature);
        let one = convert(category, from, to, 1.0).unwrap();
        let many = convert(category, from, to, value).unwrap();
        prop_assert!(approx_eq(many, one * value));
    }
}

#[test]
fn freezing_point_in_kelvin() {
    assert_eq!(convert(Category::Temperature, "°F", "K", 32.0).unwrap(), 273.15);
}

#[test]
fn every_temperature_pair_converts() {
    let labels = units(Category::Temperature).unwrap();
    for from in &labels {
        for to in &labels {
            let out = convert(Category::Temperature, from, to, 25.0).unwrap();
            assert!(out.is_finite(), "{} -> {}", from, to);
        }
    }
}
