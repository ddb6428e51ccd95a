//! pocketcalc-eval - Expression evaluation for pocketcalc
//!
//! Evaluates user formulas in one free variable `x` under a selectable angle
//! convention. Shared by the calculator (single-shot) and the plotter
//! (per-sample).
//!
//! # Features
//!
//! - **Angle-aware scope**: `sin`, `cos`, `tan` read degrees or radians per [`AngleMode`]
//! - **Compiled formulas**: [`Expression`] parses once, evaluates many times
//! - **Typed failures**: syntax, unbound symbol and domain errors via [`CalcError`]
//! - **Display formatting**: calculator truncation and fixed-decimal helpers
//!
//! # Example
//!
//! ```rust
//! use pocketcalc_eval::{evaluate, AngleMode};
//!
//! // Single-shot
//! let result = evaluate("2 + 3 * 4", None, AngleMode::Degrees).unwrap();
//! assert_eq!(result, 14.0);
//!
//! // With x bound, leading `y=` accepted
//! let y = evaluate("y=x^2", Some(3.0), AngleMode::Radians).unwrap();
//! assert_eq!(y, 9.0);
//! ```
//!
//! # Functions
//!
//! | Function | Description |
//! |----------|-------------|
//! | `sin`, `cos`, `tan` | Trigonometry in the current angle mode |
//! | `asin`, `acos`, `atan` | Inverse trigonometry, radian results |
//! | `sqrt` | Square root |
//! | `ln` | Natural logarithm |
//! | `log`, `log10` | Base-10 logarithm |
//! | `log2` | Base-2 logarithm |
//! | `exp` | e^x |
//! | `abs` | Absolute value |
//! | `factorial` | n! for integers 0..=170 |
//!
//! Constants: `pi` (or `π`), `e`.

pub mod angle;
pub mod builtin_functions;
pub mod calculator;
pub mod error;
pub mod evaluator;
pub mod expression;
pub mod format;

// Re-exports for convenience
pub use angle::AngleMode;
pub use calculator::{Calculator, Key};
pub use error::{CalcError, Result};
pub use evaluator::{CalcEngine, VARIABLE};
pub use expression::Expression;

/// Evaluate `formula` once, binding `x` when given.
///
/// Builds a fresh scope for `angle_mode`; for repeated evaluation of the
/// same formula use [`CalcEngine`] with a compiled [`Expression`].
pub fn evaluate(formula: &str, x: Option<f64>, angle_mode: AngleMode) -> Result<f64> {
    CalcEngine::new(angle_mode)?.evaluate_str(formula, x)
}
