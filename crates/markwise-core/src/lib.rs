//! markwise-core — Short-answer grading engine.
//!
//! This crate implements the grading path for a classroom platform's
//! auto-graded question types: multiple choice and short answer
//! (text / number / measurement). The measurement path combines a numeric
//! expression evaluator with unit-algebra canonicalization so that
//! `"2*sqrt(4)" "m/s"` and `"4" "meters/second"` grade as the same answer.

pub mod dictionary;
pub mod error;
pub mod grade;
pub mod model;
pub mod parser;
pub mod report;
pub mod sanitize;
pub mod tolerance;
pub mod unit;

mod expr;
mod token;

pub use expr::resolve_number;
pub use grade::grade_response;
pub use unit::{standardize_unit, units_match};
