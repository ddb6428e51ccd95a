//! Expression normalisation and compilation
//!
//! User text goes through these steps before it can be evaluated:
//! - an optional leading `y=` is stripped (case-insensitive) and `π` becomes `pi`
//! - integer literals are promoted to reals so `7/2` is `3.5`, not `3`
//! - keypad shorthand is expanded: `2pi`, `3sin(30)` and `(x+1)(x-1)` get an
//!   explicit `*`, postfix `5!` becomes `factorial(5)`
//! - the result is parsed once into an operator tree
//!
//! The compiled tree is reused for every sample of a plot.

use crate::error::{CalcError, Result};
use evalexpr::Node;
use regex::Regex;
use std::sync::OnceLock;

/// Identifiers, hex integers and decimal numbers (with optional exponent),
/// anchored at the start of the remaining input.
/// Identifiers are matched first so digits inside names like `log10` are left alone.
const TOKEN_PATTERN: &str =
    r"^(?:[A-Za-z_][A-Za-z0-9_:]*|0[xX][0-9A-Fa-f]+|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)";

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> Result<&'static Regex> {
    if let Some(re) = TOKEN_RE.get() {
        return Ok(re);
    }
    let re = Regex::new(TOKEN_PATTERN)
        .map_err(|e| CalcError::expression(format!("Regex error: {}", e)))?;
    Ok(TOKEN_RE.get_or_init(|| re))
}

/// Remove a leading `y=` / `Y =` and surrounding whitespace.
pub fn strip_y_prefix(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix(['y', 'Y'])
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('='))
        .filter(|rest| !rest.starts_with('='))
        .map_or(trimmed, str::trim)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    /// Literal or a completed `factorial(..)`
    Number,
    Name,
    Open,
    Close,
    Bang,
    Space,
    Other,
}

type Piece = (Kind, String);

fn lex(body: &str) -> Result<Vec<Piece>> {
    let re = token_regex()?;
    let mut pieces = Vec::new();
    let mut rest = body;

    while let Some(c) = rest.chars().next() {
        let (piece, consumed) = match re.find(rest) {
            Some(m) => {
                let token = m.as_str();
                let piece = if c.is_ascii_alphabetic() || c == '_' {
                    (Kind::Name, token.to_string())
                } else if token.bytes().all(|b| b.is_ascii_digit()) {
                    (Kind::Number, format!("{}.0", token))
                } else {
                    (Kind::Number, token.to_string())
                };
                (piece, m.end())
            },
            None => {
                let kind = match c {
                    '(' => Kind::Open,
                    ')' => Kind::Close,
                    '!' if !rest[1..].starts_with('=') => Kind::Bang,
                    c if c.is_whitespace() => Kind::Space,
                    _ => Kind::Other,
                };
                ((kind, c.to_string()), c.len_utf8())
            },
        };
        pieces.push(piece);
        rest = &rest[consumed..];
    }

    Ok(pieces)
}

fn last_significant(out: &[Piece]) -> Option<usize> {
    out.iter().rposition(|(kind, _)| *kind != Kind::Space)
}

/// Start of the operand a postfix `!` applies to, and whether that
/// operand is a bare parenthesised group.
fn operand_start(out: &[Piece]) -> Option<(usize, bool)> {
    let last = last_significant(out)?;
    match out[last].0 {
        Kind::Number | Kind::Name => Some((last, false)),
        Kind::Close => {
            let mut depth = 0usize;
            for index in (0..=last).rev() {
                match out[index].0 {
                    Kind::Close => depth += 1,
                    Kind::Open => {
                        depth -= 1;
                        if depth == 0 {
                            let call = index
                                .checked_sub(1)
                                .filter(|&name| out[name].0 == Kind::Name);
                            return Some(call.map_or((index, true), |name| (name, false)));
                        }
                    },
                    _ => {},
                }
            }
            None
        },
        _ => None,
    }
}

fn implicit_product(previous: Option<Kind>, next: Kind) -> bool {
    matches!(
        (previous, next),
        (Some(Kind::Number), Kind::Name | Kind::Open)
            | (Some(Kind::Close), Kind::Name | Kind::Open | Kind::Number)
    )
}

/// Rewrite user text into the form handed to the parser.
pub fn normalize(text: &str) -> Result<String> {
    let body = strip_y_prefix(text).replace('π', "pi");
    if body.is_empty() {
        return Err(CalcError::Empty);
    }

    let mut out: Vec<Piece> = Vec::new();
    for (kind, piece) in lex(&body)? {
        if kind == Kind::Bang {
            match operand_start(&out) {
                Some((start, group)) => {
                    let operand: String = out.drain(start..).map(|(_, text)| text).collect();
                    let operand = operand.trim_end();
                    let call = if group {
                        format!("factorial{}", operand)
                    } else {
                        format!("factorial({})", operand)
                    };
                    out.push((Kind::Number, call));
                },
                // `!` as logical not
                None => out.push((Kind::Other, piece)),
            }
            continue;
        }
        if implicit_product(last_significant(&out).map(|index| out[index].0), kind) {
            out.push((Kind::Other, "*".to_string()));
        }
        out.push((kind, piece));
    }

    Ok(out.into_iter().map(|(_, text)| text).collect())
}

/// A parsed formula in the single free variable `x`
#[derive(Debug, Clone)]
pub struct Expression {
    source: String,
    body: String,
    tree: Node,
}

impl Expression {
    /// Normalise and compile `text`.
    ///
    /// Fails with [`CalcError::Empty`] for blank input and
    /// [`CalcError::Syntax`] when the text does not parse.
    pub fn parse(text: &str) -> Result<Self> {
        let body = normalize(text)?;
        let tree = evalexpr::build_operator_tree(&body)
            .map_err(|e| CalcError::syntax(text.trim(), e.to_string()))?;

        Ok(Self {
            source: text.to_string(),
            body,
            tree,
        })
    }

    /// Text as the user entered it
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Normalised text that was compiled
    pub fn body(&self) -> &str {
        &self.body
    }

    pub(crate) fn tree(&self) -> &Node {
        &self.tree
    }
}

impl std::str::FromStr for Expression {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_y_prefix() {
        assert_eq!(strip_y_prefix("y=x^2"), "x^2");
        assert_eq!(strip_y_prefix("  Y= sin(x) "), "sin(x)");
        assert_eq!(strip_y_prefix("y = x + 1"), "x + 1");
        assert_eq!(strip_y_prefix("x + y"), "x + y");
        assert_eq!(strip_y_prefix("x+y"), "x+y");
        assert_eq!(strip_y_prefix("y"), "y");
    }

    #[test]
    fn test_integer_literals_promoted() {
        assert_eq!(normalize("7/2").unwrap(), "7.0/2.0");
        assert_eq!(normalize("x^2 + 3*x").unwrap(), "x^2.0 + 3.0*x");
    }

    #[test]
    fn test_reals_and_names_untouched() {
        assert_eq!(normalize("2.5 * log10(x)").unwrap(), "2.5 * log10(x)");
        assert_eq!(normalize("1e3 + .5").unwrap(), "1e3 + .5");
        assert_eq!(normalize("0x1F").unwrap(), "0x1F");
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(normalize("2π").unwrap(), "2.0*pi");
        assert_eq!(normalize("3sin(30)").unwrap(), "3.0*sin(30.0)");
        assert_eq!(normalize("2(x+1)").unwrap(), "2.0*(x+1.0)");
        assert_eq!(normalize("(x+1)(x-1)").unwrap(), "(x+1.0)*(x-1.0)");
        // calls and exponents stay as they are
        assert_eq!(normalize("sqrt(x) + 2e-3").unwrap(), "sqrt(x) + 2e-3");
    }

    #[test]
    fn test_postfix_factorial() {
        assert_eq!(normalize("5!").unwrap(), "factorial(5.0)");
        assert_eq!(normalize("2*3!").unwrap(), "2.0*factorial(3.0)");
        assert_eq!(normalize("(x+1)!").unwrap(), "factorial(x+1.0)");
        assert_eq!(normalize("sqrt(9)!").unwrap(), "factorial(sqrt(9.0))");
        assert_eq!(normalize("3!!").unwrap(), "factorial(factorial(3.0))");
        assert_eq!(normalize("x! + 1").unwrap(), "factorial(x) + 1.0");
    }

    #[test]
    fn test_not_operators_kept() {
        assert_eq!(normalize("1 != 2").unwrap(), "1.0 != 2.0");
        assert_eq!(normalize("!(1 == 2)").unwrap(), "!(1.0 == 2.0)");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize("   ").unwrap_err(), CalcError::Empty);
        assert_eq!(Expression::parse("y=").unwrap_err(), CalcError::Empty);
    }

    #[test]
    fn test_parse_keeps_source() {
        let expr = Expression::parse("Y=x + 1").unwrap();
        assert_eq!(expr.source(), "Y=x + 1");
        assert_eq!(expr.body(), "x + 1.0");
    }

    #[test]
    fn test_syntax_error() {
        let err = Expression::parse("(1 + 2").unwrap_err();
        assert!(matches!(err, CalcError::Syntax { .. }));
    }
}
