//! Error types for pocketcalc-eval

use thiserror::Error;

/// Evaluation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Expression is empty")]
    Empty,

    #[error("Syntax error in '{formula}': {reason}")]
    Syntax { formula: String, reason: String },

    #[error("Unbound symbol: {0}")]
    UnboundSymbol(String),

    #[error("Domain error: '{formula}' is undefined here")]
    Domain { formula: String },

    #[error("Expression error: {0}")]
    Expression(String),

    #[error("Function error: {0}")]
    Function(String),
}

impl CalcError {
    pub fn syntax(formula: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Syntax {
            formula: formula.into(),
            reason: reason.into(),
        }
    }

    pub fn unbound_symbol(name: impl Into<String>) -> Self {
        Self::UnboundSymbol(name.into())
    }

    pub fn domain(formula: impl Into<String>) -> Self {
        Self::Domain {
            formula: formula.into(),
        }
    }

    pub fn expression(msg: impl Into<String>) -> Self {
        Self::Expression(msg.into())
    }

    pub fn function(msg: impl Into<String>) -> Self {
        Self::Function(msg.into())
    }

    /// True when the formula is well formed but has no finite value at the
    /// evaluated point (division by zero, log of a negative, overflow).
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
