//! Grading dispatcher.
//!
//! Routes a `(Question, Response)` pair to the grading strategy for its
//! type and subtype and assembles the final score. Grading is total: every
//! failure mode inside the engine (malformed expression, excess nesting,
//! unknown unit) downgrades to a zero score, so this function never returns
//! an error and never panics on student input.

use std::collections::BTreeSet;

use crate::expr::resolve_number;
use crate::model::{Choice, GradeResult, Question, QuestionType, Response, Scoring, Subtype};
use crate::sanitize::sanitize_number;
use crate::tolerance::numbers_match;
use crate::unit::units_match;

/// Grade one response against its question. All-or-nothing: the result is
/// either zero or `points_possible`.
pub fn grade_response(question: &Question, response: &Response) -> GradeResult {
    let correct = match question.question_type {
        QuestionType::MultipleChoice => choices_match(&question.choices, &response.selected),
        QuestionType::ShortAnswer => match question.subtype {
            Some(Subtype::Text) => text_matches(question, response),
            Some(Subtype::Number) => number_matches(question, response),
            Some(Subtype::Measurement) => measurement_matches(question, response),
            None => {
                tracing::debug!(question = %question.id, "short answer without subtype");
                false
            }
        },
    };

    if correct {
        GradeResult::correct(question.points_possible)
    } else {
        GradeResult::incorrect()
    }
}

/// Set equality between the selected indices and the `is_correct` indices,
/// order-insensitive for single and multi-select alike.
fn choices_match(choices: &[Choice], selected: &[usize]) -> bool {
    let correct: BTreeSet<usize> = choices
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_correct)
        .map(|(i, _)| i)
        .collect();
    let selected: BTreeSet<usize> = selected.iter().copied().collect();
    !correct.is_empty() && correct == selected
}

fn text_matches(question: &Question, response: &Response) -> bool {
    let (Some(correct), Some(submitted)) = (&question.correct_answer.text, &response.text) else {
        return false;
    };
    let (mut correct, mut submitted) = (correct.clone(), submitted.clone());
    if question.scoring.accept_alt_cap {
        correct = correct.to_lowercase();
        submitted = submitted.to_lowercase();
    }
    if question.scoring.accept_alt_spacing {
        correct = collapse_spacing(&correct);
        submitted = collapse_spacing(&submitted);
    }
    correct == submitted
}

fn collapse_spacing(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn number_matches(question: &Question, response: &Response) -> bool {
    let (Some(correct), Some(submitted)) =
        (&question.correct_answer.number, &response.number)
    else {
        return false;
    };
    numbers_equivalent(correct, submitted, &question.scoring)
}

fn measurement_matches(question: &Question, response: &Response) -> bool {
    let (Some(correct_unit), Some(submitted_unit)) =
        (&question.correct_answer.unit, &response.unit)
    else {
        return false;
    };
    number_matches(question, response) && units_match(correct_unit, submitted_unit)
}

/// Compare two numeric expression strings. An exact sanitized-string match
/// short-circuits to a match without evaluation; otherwise both sides
/// reduce to a value and compare within tolerance.
pub fn numbers_equivalent(correct: &str, submitted: &str, scoring: &Scoring) -> bool {
    let correct = sanitize_number(correct);
    let submitted = sanitize_number(submitted);
    if correct == submitted {
        return true;
    }

    let submitted_value = match resolve_number(&submitted) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "submitted expression did not evaluate");
            return false;
        }
    };
    let correct_value = match resolve_number(&correct) {
        Ok(value) => value,
        Err(e) => {
            // The stored answer is assumed well-formed; if it is not, the
            // question is ungradable and scores zero.
            tracing::debug!(error = %e, "stored correct answer did not evaluate");
            return false;
        }
    };

    numbers_match(
        correct_value,
        submitted_value,
        scoring.percent_tolerance.unwrap_or(0.0),
    )
}
