//! Calculator display state
//!
//! Mirrors the keypad screen: keystrokes append to the display, `AC`
//! resets it, `=` evaluates it. A failed evaluation leaves the display as
//! it was so the user can fix the entry.

use crate::angle::AngleMode;
use crate::error::Result;
use crate::evaluator::CalcEngine;
use crate::expression::Expression;
use crate::format::{format_display, truncate_chars, DISPLAY_WIDTH};
use tracing::debug;

/// Longest entry the display accepts
pub const INPUT_LIMIT: usize = 24;

const CLEARED: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Digits, operators, parentheses, function names
    Input(String),
    /// `AC`
    Clear,
    /// `=`
    Evaluate,
}

impl From<&str> for Key {
    fn from(label: &str) -> Self {
        match label {
            "AC" => Key::Clear,
            "=" => Key::Evaluate,
            other => Key::Input(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Calculator {
    display: String,
    angle_mode: AngleMode,
    input_limit: usize,
    display_width: usize,
}

impl Calculator {
    pub fn new(angle_mode: AngleMode) -> Self {
        Self::with_limits(angle_mode, INPUT_LIMIT, DISPLAY_WIDTH)
    }

    pub fn with_limits(angle_mode: AngleMode, input_limit: usize, display_width: usize) -> Self {
        Self {
            display: CLEARED.to_string(),
            angle_mode,
            input_limit,
            display_width,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.angle_mode = mode;
    }

    /// Apply one keystroke. Only [`Key::Evaluate`] can fail.
    pub fn press(&mut self, key: impl Into<Key>) -> Result<()> {
        match key.into() {
            Key::Clear => {
                self.display = CLEARED.to_string();
                Ok(())
            },
            Key::Evaluate => self.evaluate().map(|_| ()),
            Key::Input(text) => {
                let next = if self.display == CLEARED {
                    text
                } else {
                    format!("{}{}", self.display, text)
                };
                self.display = truncate_chars(&next, self.input_limit);
                Ok(())
            },
        }
    }

    /// Evaluate the current entry and replace the display with the result.
    pub fn evaluate(&mut self) -> Result<f64> {
        let expression = Expression::parse(&self.display)?;
        let engine = CalcEngine::new(self.angle_mode)?;
        let value = engine.evaluate(&expression)?;

        debug!(entry = %self.display, value, "calculator evaluated");
        self.display = format_display(value, self.display_width);
        Ok(value)
    }
}
