//! CalcEngine - Expression evaluator with an angle-aware scope
//!
//! Provides formula evaluation with support for:
//! - Arithmetic: +, -, *, /, %, ^
//! - Constants: pi, e
//! - Trigonometry: sin, cos, tan (angle-mode aware), asin, acos, atan
//! - Other functions: sqrt, ln, log, log10, log2, exp, abs, factorial
//! - Keypad shorthand: `5!`, `2pi`, `3sin(30)` (see [`crate::expression::normalize`])

use crate::angle::AngleMode;
use crate::builtin_functions;
use crate::error::{CalcError, Result};
use crate::expression::Expression;
use evalexpr::{
    ContextWithMutableFunctions, ContextWithMutableVariables, EvalexprError, Function,
    HashMapContext, Value,
};
use tracing::debug;

/// Name of the free variable bound during plotting
pub const VARIABLE: &str = "x";

/// CalcEngine - Formula evaluation engine
///
/// The scope is built once per engine; the angle mode is fixed at
/// construction so one engine never mixes conventions. Build a new engine
/// when the user toggles the mode.
///
/// # Example
/// ```
/// use pocketcalc_eval::{AngleMode, CalcEngine, Expression};
///
/// let mut engine = CalcEngine::new(AngleMode::Degrees).unwrap();
/// let expr = Expression::parse("sin(x)").unwrap();
/// let y = engine.evaluate_at(&expr, 90.0).unwrap();
/// assert!((y - 1.0).abs() < 1e-12);
/// ```
pub struct CalcEngine {
    angle_mode: AngleMode,
    /// Constants and functions only; `x` is never bound here
    scope: HashMapContext,
    /// Copy of `scope` with `x` bound, reused across samples
    bound: HashMapContext,
}

impl CalcEngine {
    /// Create new CalcEngine for the given angle convention
    pub fn new(angle_mode: AngleMode) -> Result<Self> {
        let mut scope = HashMapContext::new();
        Self::register_constants(&mut scope)?;
        Self::register_scope_functions(&mut scope, angle_mode)?;

        let mut bound = scope.clone();
        bound
            .set_value(VARIABLE.to_string(), Value::Float(0.0))
            .map_err(|e| CalcError::function(format!("Failed to bind {}: {}", VARIABLE, e)))?;

        debug!(mode = %angle_mode, "evaluation scope ready");

        Ok(Self {
            angle_mode,
            scope,
            bound,
        })
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Evaluate with no variable bound (single-shot calculator use).
    ///
    /// A reference to `x` fails with [`CalcError::UnboundSymbol`].
    pub fn evaluate(&self, expression: &Expression) -> Result<f64> {
        let value = expression
            .tree()
            .eval_with_context(&self.scope)
            .map_err(|e| Self::map_error(expression, e))?;

        Self::finite(Self::value_to_f64(value, expression.body())?, expression)
    }

    /// Evaluate with `x` bound to the given value.
    pub fn evaluate_at(&mut self, expression: &Expression, x: f64) -> Result<f64> {
        self.bound
            .set_value(VARIABLE.to_string(), Value::Float(x))
            .map_err(|e| CalcError::expression(format!("Failed to set {}: {}", VARIABLE, e)))?;

        let value = expression
            .tree()
            .eval_with_context(&self.bound)
            .map_err(|e| Self::map_error(expression, e))?;

        Self::finite(Self::value_to_f64(value, expression.body())?, expression)
    }

    /// Parse and evaluate in one step, binding `x` when given.
    pub fn evaluate_str(&mut self, formula: &str, x: Option<f64>) -> Result<f64> {
        let expression = Expression::parse(formula)?;
        match x {
            Some(x) => self.evaluate_at(&expression, x),
            None => self.evaluate(&expression),
        }
    }

    fn register_constants(context: &mut HashMapContext) -> Result<()> {
        for (name, value) in [("pi", std::f64::consts::PI), ("e", std::f64::consts::E)] {
            context
                .set_value(name.to_string(), Value::Float(value))
                .map_err(|e| {
                    CalcError::function(format!("Failed to register constant {}: {}", name, e))
                })?;
        }
        Ok(())
    }

    /// Register scope functions with evalexpr context
    fn register_scope_functions(context: &mut HashMapContext, mode: AngleMode) -> Result<()> {
        // Helper to convert Value to f64 (handles both Int and Float)
        fn to_f64(value: &Value) -> std::result::Result<f64, EvalexprError> {
            match value {
                Value::Float(f) => Ok(*f),
                Value::Int(i) => Ok(*i as f64),
                _ => Err(EvalexprError::expected_number(value.clone())),
            }
        }

        fn unary<F>(f: F) -> Function
        where
            F: Fn(f64) -> f64 + Clone + Send + Sync + 'static,
        {
            Function::new(move |argument| Ok(Value::Float(f(to_f64(argument)?))))
        }

        let functions = [
            ("sin", unary(move |v| builtin_functions::sin(v, mode))),
            ("cos", unary(move |v| builtin_functions::cos(v, mode))),
            ("tan", unary(move |v| builtin_functions::tan(v, mode))),
            ("asin", unary(f64::asin)),
            ("acos", unary(f64::acos)),
            ("atan", unary(f64::atan)),
            ("sqrt", unary(f64::sqrt)),
            ("ln", unary(builtin_functions::ln)),
            ("log", unary(builtin_functions::log)),
            ("log10", unary(f64::log10)),
            ("log2", unary(f64::log2)),
            ("exp", unary(f64::exp)),
            ("abs", unary(f64::abs)),
            ("factorial", unary(builtin_functions::factorial)),
        ];

        for (name, function) in functions {
            context
                .set_function(name.to_string(), function)
                .map_err(|e| CalcError::function(format!("Failed to register {}: {}", name, e)))?;
        }

        Ok(())
    }

    fn map_error(expression: &Expression, err: EvalexprError) -> CalcError {
        match err {
            EvalexprError::VariableIdentifierNotFound(name)
            | EvalexprError::FunctionIdentifierNotFound(name) => CalcError::unbound_symbol(name),
            EvalexprError::DivisionError { .. } | EvalexprError::ModulationError { .. } => {
                CalcError::domain(expression.source().trim())
            },
            other => CalcError::expression(format!(
                "Failed to evaluate '{}': {}",
                expression.source().trim(),
                other
            )),
        }
    }

    /// Convert evalexpr Value to f64
    fn value_to_f64(value: Value, formula: &str) -> Result<f64> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            Value::Boolean(b) => Ok(if b { 1.0 } else { 0.0 }),
            _ => Err(CalcError::expression(format!(
                "Expression did not evaluate to a number: {}",
                formula
            ))),
        }
    }

    fn finite(value: f64, expression: &Expression) -> Result<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::domain(expression.source().trim()))
        }
    }
}
