//! Unit-expression canonicalization.
//!
//! Flattens a free-form unit string into product-of-powers form: every
//! factor becomes `base^exponent`, quotients become negative powers, and an
//! exponent on a bracketed group distributes into every factor inside it
//! (`(kg*m)^2` → `kg^2*m^2`). Standardization then resolves each base to
//! its dictionary singular, merges duplicate bases, and orders the terms so
//! algebraically equal units compare as equal strings.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::dictionary;
use crate::error::GradeError;
use crate::sanitize::sanitize_unit;
use crate::token::{self, Token};

/// One factor of a flattened unit product.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTerm {
    pub base: String,
    pub exponent: f64,
}

/// Numeric sub-fractions inside unit strings (`"1/2 mol"`) reduce to a
/// decimal before structural parsing, rounded to 3 places.
static NUMERIC_FRACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)/(\d+(?:\.\d+)?)").expect("fraction pattern compiles")
});

fn simplify_numeric_fractions(input: &str) -> String {
    NUMERIC_FRACTION
        .replace_all(input, |caps: &regex::Captures<'_>| {
            let numerator: f64 = caps[1].parse().unwrap_or(f64::NAN);
            let denominator: f64 = caps[2].parse().unwrap_or(f64::NAN);
            format_number((numerator / denominator * 1000.0).round() / 1000.0)
        })
        .into_owned()
}

/// Flatten a sanitized unit expression into product-of-powers terms.
pub fn canonicalize_unit(input: &str) -> Result<Vec<UnitTerm>, GradeError> {
    token::precheck(input)?;
    let simplified = simplify_numeric_fractions(input);
    let tokens = token::tokenize(&simplified)?;
    if tokens.is_empty() {
        return Err(GradeError::Malformed("empty unit expression".into()));
    }

    let mut parser = UnitParser { tokens, pos: 0 };
    let mut terms = Vec::new();
    parser.parse_product(1.0, &mut terms)?;
    if parser.pos != parser.tokens.len() {
        return Err(GradeError::Malformed("unexpected trailing unit token".into()));
    }
    Ok(terms)
}

/// Canonicalize and render a unit string in standardized form:
/// dictionary-singular bases with explicit exponents, merged and sorted
/// alphabetically. `"m/s"` → `"meter^1*second^-1"`.
pub fn standardize_unit(input: &str) -> Result<String, GradeError> {
    let terms = canonicalize_unit(input)?;

    let mut merged: HashMap<String, f64> = HashMap::new();
    for term in terms {
        let base = dictionary::find_unit_singular(&term.base)
            .map(str::to_owned)
            .unwrap_or(term.base);
        *merged.entry(base).or_insert(0.0) += term.exponent;
    }

    let mut ordered: Vec<(String, f64)> = merged
        .into_iter()
        .filter(|(_, exponent)| exponent.abs() > 1e-9)
        .collect();
    ordered.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));

    if ordered.is_empty() {
        // Everything cancelled: dimensionless.
        return Ok("1".into());
    }

    Ok(ordered
        .iter()
        .map(|(base, exponent)| format!("{base}^{}", format_number(*exponent)))
        .collect::<Vec<_>>()
        .join("*"))
}

/// A unit is complex when it carries structure the dictionary cannot look
/// up directly: a quotient, a multi-term product, an exponent, or nesting.
pub fn is_complex_unit(sanitized: &str) -> bool {
    sanitized.contains('/')
        || sanitized.contains('*')
        || sanitized.contains('^')
        || sanitized.contains('(')
        || sanitized.contains('[')
}

/// Compare two raw unit strings for equivalence.
///
/// Two simple units go straight through the dictionary; a failed lookup on
/// either side is a mismatch, not an error. Anything structured is
/// canonicalized on both sides and compared in standardized form.
pub fn units_match(correct: &str, submitted: &str) -> bool {
    let correct = sanitize_unit(correct);
    let submitted = sanitize_unit(submitted);

    if !is_complex_unit(&correct) && !is_complex_unit(&submitted) {
        return match (
            dictionary::find_unit_singular(&correct),
            dictionary::find_unit_singular(&submitted),
        ) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };
    }

    match (standardize_unit(&correct), standardize_unit(&submitted)) {
        (Ok(a), Ok(b)) => a == b,
        (correct_result, submitted_result) => {
            if let Err(e) = correct_result {
                tracing::debug!(error = %e, "stored correct unit did not canonicalize");
            }
            if let Err(e) = submitted_result {
                tracing::debug!(error = %e, "submitted unit did not canonicalize");
            }
            false
        }
    }
}

struct UnitParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl UnitParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    /// Parse a `*`/`/`-separated chain of factors, accumulating terms with
    /// `multiplier` applied to every exponent. A `/` flips the sign of the
    /// factor that follows it; a leading `/` is accepted (`"/s"` → `s^-1`).
    fn parse_product(
        &mut self,
        multiplier: f64,
        out: &mut Vec<UnitTerm>,
    ) -> Result<(), GradeError> {
        let mut sign = 1.0;
        if matches!(self.peek(), Some(Token::Slash)) {
            self.advance();
            sign = -1.0;
        }

        loop {
            self.parse_factor(multiplier * sign, out)?;
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    sign = 1.0;
                }
                Some(Token::Slash) => {
                    self.advance();
                    sign = -1.0;
                }
                Some(Token::CloseParen | Token::CloseBracket) | None => return Ok(()),
                Some(other) => {
                    return Err(GradeError::Malformed(format!(
                        "unexpected unit token {other:?}"
                    )))
                }
            }
        }
    }

    /// One factor: an identifier, a number, or a bracketed group, with an
    /// optional signed exponent. A group's exponent distributes into every
    /// factor parsed inside it.
    fn parse_factor(
        &mut self,
        multiplier: f64,
        out: &mut Vec<UnitTerm>,
    ) -> Result<(), GradeError> {
        match self.advance() {
            Some(Token::Ident(name)) => {
                let exponent = self.parse_exponent()?.unwrap_or(1.0);
                out.push(UnitTerm {
                    base: name,
                    exponent: exponent * multiplier,
                });
                Ok(())
            }
            Some(Token::Number(value)) => {
                let exponent = self.parse_exponent()?.unwrap_or(1.0);
                out.push(UnitTerm {
                    base: format_number(value),
                    exponent: exponent * multiplier,
                });
                Ok(())
            }
            Some(open @ (Token::OpenParen | Token::OpenBracket)) => {
                let mut inner = Vec::new();
                self.parse_product(1.0, &mut inner)?;
                let close = match open {
                    Token::OpenParen => Token::CloseParen,
                    _ => Token::CloseBracket,
                };
                if self.advance().as_ref() != Some(&close) {
                    return Err(GradeError::UnbalancedBrackets);
                }
                let exponent = self.parse_exponent()?.unwrap_or(1.0);
                for term in inner {
                    out.push(UnitTerm {
                        base: term.base,
                        exponent: term.exponent * exponent * multiplier,
                    });
                }
                Ok(())
            }
            Some(other) => Err(GradeError::Malformed(format!(
                "unexpected unit token {other:?}"
            ))),
            None => Err(GradeError::Malformed("unexpected end of unit".into())),
        }
    }

    /// `^` followed by an optionally signed number.
    fn parse_exponent(&mut self) -> Result<Option<f64>, GradeError> {
        if !matches!(self.peek(), Some(Token::Caret)) {
            return Ok(None);
        }
        self.advance();
        let mut sign = 1.0;
        if matches!(self.peek(), Some(Token::Minus)) {
            self.advance();
            sign = -1.0;
        }
        match self.advance() {
            Some(Token::Number(value)) => Ok(Some(sign * value)),
            _ => Err(GradeError::Malformed("exponent must be numeric".into())),
        }
    }
}

/// Render without a trailing `.0` for whole numbers; fractional values
/// keep up to 3 decimals.
fn format_number(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{}", value as i64)
    } else {
        let rounded = (value * 1000.0).round() / 1000.0;
        format!("{rounded}")
    }
}
