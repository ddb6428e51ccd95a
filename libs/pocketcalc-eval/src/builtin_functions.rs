//! Built-in functions for expression evaluation
//!
//! Pure numeric implementations behind the names registered in the
//! evaluation scope. Trigonometric functions take the angle mode explicitly.

use crate::angle::AngleMode;

/// Largest n for which n! is finite in f64
const MAX_FACTORIAL: f64 = 170.0;

/// Sine of an angle given in `mode` units
#[inline]
pub fn sin(angle: f64, mode: AngleMode) -> f64 {
    mode.to_radians(angle).sin()
}

/// Cosine of an angle given in `mode` units
#[inline]
pub fn cos(angle: f64, mode: AngleMode) -> f64 {
    mode.to_radians(angle).cos()
}

/// Tangent of an angle given in `mode` units
#[inline]
pub fn tan(angle: f64, mode: AngleMode) -> f64 {
    mode.to_radians(angle).tan()
}

/// Base-10 logarithm, the calculator's `log` key
#[inline]
pub fn log(value: f64) -> f64 {
    value.log10()
}

/// Natural logarithm, the calculator's `ln` key
#[inline]
pub fn ln(value: f64) -> f64 {
    value.ln()
}

/// Factorial of a non-negative integer
///
/// Returns NaN for negative or fractional input and infinity past 170!,
/// both of which the evaluator reports as domain errors.
pub fn factorial(value: f64) -> f64 {
    if value < 0.0 || value.fract() != 0.0 {
        return f64::NAN;
    }
    if value > MAX_FACTORIAL {
        return f64::INFINITY;
    }
    (2..=value as u32).fold(1.0, |acc, n| acc * f64::from(n))
}
