//! Core document types for markwise.
//!
//! These mirror the shapes the classroom platform stores in its document
//! database, hence the camelCase field names on the wire. A `Question` is
//! immutable once authored; grading is a pure function of
//! `(Question, Response)`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A question as authored by an instructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique identifier for this question.
    pub id: String,
    /// Question type ("multiple choice" or "short answer").
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Short-answer variant; `None` for multiple choice.
    #[serde(default)]
    pub subtype: Option<Subtype>,
    /// Display text. Not consulted during grading.
    #[serde(default)]
    pub prompt: String,
    /// Answer choices (multiple choice only).
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// The stored correct answer.
    #[serde(default)]
    pub correct_answer: CorrectAnswer,
    /// Grading knobs.
    #[serde(default)]
    pub scoring: Scoring,
    /// Points granted for a correct answer.
    pub points_possible: u32,
}

/// One answer choice on a multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Display text of the choice.
    pub text: String,
    /// Whether this choice belongs to the correct answer set.
    #[serde(default)]
    pub is_correct: bool,
}

/// The stored correct answer for a short-answer question.
///
/// `number` and `unit` are expression strings exactly as the instructor
/// typed them (e.g. `"2*sqrt(4)"`, `"m/s^2"`); they are sanitized and
/// evaluated at grading time, not at authoring time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectAnswer {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Grading parameters configured per question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scoring {
    /// Text subtype: accept alternate capitalization.
    #[serde(default)]
    pub accept_alt_cap: bool,
    /// Text subtype: accept alternate whitespace.
    #[serde(default)]
    pub accept_alt_spacing: bool,
    /// Number/measurement subtypes: acceptable percent error.
    #[serde(default)]
    pub percent_tolerance: Option<f64>,
}

/// A student's response, as raw strings from the equation editor.
///
/// The editor-to-string conversion happens upstream; by the time a
/// `Response` reaches this crate, `number` and `unit` are plain text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    /// Selected choice indices (multiple choice only).
    #[serde(default)]
    pub selected: Vec<usize>,
}

/// The outcome of grading one response. All-or-nothing: `points_awarded`
/// is either zero or the question's `points_possible`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
    pub answered_correctly: bool,
    pub points_awarded: u32,
}

impl GradeResult {
    /// Full credit for a question.
    pub fn correct(points_possible: u32) -> Self {
        Self {
            answered_correctly: true,
            points_awarded: points_possible,
        }
    }

    /// Zero credit.
    pub fn incorrect() -> Self {
        Self {
            answered_correctly: false,
            points_awarded: 0,
        }
    }
}

/// A collection of questions, typically one assignment or question set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// One student submission, pairing a question id with the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub question_id: String,
    #[serde(flatten)]
    pub response: Response,
}

/// Auto-gradable question types. Free-response and multipart questions are
/// instructor-graded and never reach this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "multiple choice")]
    MultipleChoice,
    #[serde(rename = "short answer")]
    ShortAnswer,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "multiple choice"),
            QuestionType::ShortAnswer => write!(f, "short answer"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "multiple choice" => Ok(QuestionType::MultipleChoice),
            "short answer" => Ok(QuestionType::ShortAnswer),
            other => Err(format!("unsupported question type: {other}")),
        }
    }
}

/// Short-answer question variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subtype {
    Text,
    Number,
    Measurement,
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subtype::Text => write!(f, "text"),
            Subtype::Number => write!(f, "number"),
            Subtype::Measurement => write!(f, "measurement"),
        }
    }
}

impl FromStr for Subtype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Subtype::Text),
            "number" => Ok(Subtype::Number),
            "measurement" => Ok(Subtype::Measurement),
            other => Err(format!("unknown subtype: {other}")),
        }
    }
}
