//! Grading engine error types.
//!
//! These errors classify why an expression or unit string could not be
//! reduced. They never escape `grade_response`: the dispatcher maps every
//! one of them to a zero score, so a malformed student submission can never
//! abort a grading pass.

use thiserror::Error;

/// Reasons an expression or unit string fails to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeError {
    /// Parentheses or square brackets do not balance.
    #[error("unbalanced brackets")]
    UnbalancedBrackets,

    /// A character outside the accepted expression alphabet.
    #[error("disallowed symbol '{0}'")]
    DisallowedSymbol(char),

    /// An alphabetic token that is not a known function or constant.
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),

    /// Bracket nesting beyond the structural limit.
    #[error("nesting depth {depth} exceeds limit {limit}")]
    TooDeep { depth: usize, limit: usize },

    /// Factorial of a negative or non-integer value.
    #[error("factorial requires a non-negative integer")]
    BadFactorial,

    /// The token stream did not form a complete expression.
    #[error("malformed expression: {0}")]
    Malformed(String),
}

impl GradeError {
    /// Returns `true` if the failure is the adversarial-input depth guard
    /// rather than ordinary malformed input.
    pub fn is_depth_guard(&self) -> bool {
        matches!(self, GradeError::TooDeep { .. })
    }
}
