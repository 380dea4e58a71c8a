//! TOML question-bank and submissions parser.
//!
//! Loads banks from TOML files and directories, and validates them against
//! the grading engine's requirements before any grading runs.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::expr::resolve_number;
use crate::model::{
    Bank, Choice, CorrectAnswer, Question, QuestionType, Response, Scoring, Submission, Subtype,
};
use crate::sanitize::{sanitize_number, sanitize_unit};
use crate::unit::{is_complex_unit, standardize_unit};

/// Intermediate TOML structure for bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(rename = "type")]
    question_type: String,
    #[serde(default)]
    subtype: Option<String>,
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    choices: Vec<TomlChoice>,
    #[serde(default)]
    correct_answer: Option<TomlCorrectAnswer>,
    #[serde(default)]
    scoring: Option<TomlScoring>,
    #[serde(default = "default_points")]
    points_possible: u32,
}

fn default_points() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct TomlChoice {
    text: String,
    #[serde(default)]
    is_correct: bool,
}

#[derive(Debug, Deserialize)]
struct TomlCorrectAnswer {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    number: Option<String>,
    #[serde(default)]
    unit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlScoring {
    #[serde(default)]
    accept_alt_cap: bool,
    #[serde(default)]
    accept_alt_spacing: bool,
    #[serde(default)]
    percent_tolerance: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TomlSubmissionsFile {
    #[serde(default)]
    submissions: Vec<TomlSubmission>,
}

#[derive(Debug, Deserialize)]
struct TomlSubmission {
    question_id: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    number: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    selected: Vec<usize>,
}

/// Parse a single TOML file into a `Bank`.
pub fn parse_bank(path: &Path) -> Result<Bank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bank file: {}", path.display()))?;
    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `Bank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<Bank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let question_type = QuestionType::from_str(&q.question_type)
                .map_err(|e| anyhow::anyhow!("question '{}': {}", q.id, e))?;
            let subtype = q
                .subtype
                .map(|s| {
                    Subtype::from_str(&s).map_err(|e| anyhow::anyhow!("question '{}': {}", q.id, e))
                })
                .transpose()?;

            let correct_answer = match q.correct_answer {
                Some(answer) => CorrectAnswer {
                    text: answer.text,
                    number: answer.number,
                    unit: answer.unit,
                },
                None => CorrectAnswer::default(),
            };

            let scoring = match q.scoring {
                Some(s) => Scoring {
                    accept_alt_cap: s.accept_alt_cap,
                    accept_alt_spacing: s.accept_alt_spacing,
                    percent_tolerance: s.percent_tolerance,
                },
                None => Scoring::default(),
            };

            Ok(Question {
                id: q.id,
                question_type,
                subtype,
                prompt: q.prompt,
                choices: q
                    .choices
                    .into_iter()
                    .map(|c| Choice {
                        text: c.text,
                        is_correct: c.is_correct,
                    })
                    .collect(),
                correct_answer,
                scoring,
                points_possible: q.points_possible,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Bank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        questions,
    })
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<Bank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// Parse a submissions TOML file.
pub fn parse_submissions(path: &Path) -> Result<Vec<Submission>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read submissions file: {}", path.display()))?;
    parse_submissions_str(&content, path)
}

/// Parse a submissions TOML string.
pub fn parse_submissions_str(content: &str, source_path: &Path) -> Result<Vec<Submission>> {
    let parsed: TomlSubmissionsFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(parsed
        .submissions
        .into_iter()
        .map(|s| Submission {
            question_id: s.question_id,
            response: Response {
                text: s.text,
                number: s.number,
                unit: s.unit,
                selected: s.selected,
            },
        })
        .collect())
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for issues that would make questions ungradable.
pub fn validate_bank(bank: &Bank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut warn = |question_id: Option<&str>, message: String| {
        warnings.push(ValidationWarning {
            question_id: question_id.map(str::to_owned),
            message,
        });
    };

    let mut seen_ids = std::collections::HashSet::new();
    for question in &bank.questions {
        if !seen_ids.insert(&question.id) {
            warn(
                Some(&question.id),
                format!("duplicate question ID: {}", question.id),
            );
        }

        if question.points_possible == 0 {
            warn(Some(&question.id), "points_possible is zero".into());
        }

        match question.question_type {
            QuestionType::MultipleChoice => {
                if question.choices.is_empty() {
                    warn(Some(&question.id), "multiple choice with no choices".into());
                } else if !question.choices.iter().any(|c| c.is_correct) {
                    warn(
                        Some(&question.id),
                        "multiple choice with no correct choice".into(),
                    );
                }
            }
            QuestionType::ShortAnswer => match question.subtype {
                None => warn(Some(&question.id), "short answer without a subtype".into()),
                Some(Subtype::Text) => {
                    if question.correct_answer.text.is_none() {
                        warn(Some(&question.id), "text question without correct text".into());
                    }
                }
                Some(Subtype::Number) => {
                    check_correct_number(question, &mut warn);
                }
                Some(Subtype::Measurement) => {
                    check_correct_number(question, &mut warn);
                    match &question.correct_answer.unit {
                        None => warn(
                            Some(&question.id),
                            "measurement question without correct unit".into(),
                        ),
                        Some(unit) => {
                            let sanitized = sanitize_unit(unit);
                            if is_complex_unit(&sanitized) {
                                if let Err(e) = standardize_unit(&sanitized) {
                                    warn(
                                        Some(&question.id),
                                        format!("correct unit '{unit}' does not canonicalize: {e}"),
                                    );
                                }
                            }
                        }
                    }
                }
            },
        }

        if let Some(tolerance) = question.scoring.percent_tolerance {
            if tolerance < 0.0 {
                warn(
                    Some(&question.id),
                    format!("negative percent tolerance: {tolerance}"),
                );
            }
        }
    }

    warnings
}

fn check_correct_number(question: &Question, warn: &mut impl FnMut(Option<&str>, String)) {
    match &question.correct_answer.number {
        None => warn(
            Some(&question.id),
            "numeric question without correct number".into(),
        ),
        Some(number) => {
            if let Err(e) = resolve_number(&sanitize_number(number)) {
                warn(
                    Some(&question.id),
                    format!("correct answer '{number}' does not evaluate: {e}"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[bank]
id = "phys-101-hw3"
name = "Physics 101 — Homework 3"
description = "Kinematics and units"

[[questions]]
id = "gravity"
type = "short answer"
subtype = "measurement"
prompt = "What is the acceleration due to gravity at sea level?"
points_possible = 2

[questions.correct_answer]
number = "9.8"
unit = "m/s^2"

[questions.scoring]
percent_tolerance = 2.0

[[questions]]
id = "planet"
type = "multiple choice"
prompt = "Which planet is largest?"

[[questions.choices]]
text = "Mars"

[[questions.choices]]
text = "Jupiter"
is_correct = true

[[questions.choices]]
text = "Venus"
"#;

    #[test]
    fn parse_valid_bank() {
        let bank = parse_bank_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(bank.id, "phys-101-hw3");
        assert_eq!(bank.questions.len(), 2);

        let gravity = &bank.questions[0];
        assert_eq!(gravity.question_type, QuestionType::ShortAnswer);
        assert_eq!(gravity.subtype, Some(Subtype::Measurement));
        assert_eq!(gravity.correct_answer.unit.as_deref(), Some("m/s^2"));
        assert_eq!(gravity.scoring.percent_tolerance, Some(2.0));
        assert_eq!(gravity.points_possible, 2);

        let planet = &bank.questions[1];
        assert_eq!(planet.question_type, QuestionType::MultipleChoice);
        assert_eq!(planet.points_possible, 1);
        assert!(planet.choices[1].is_correct);
    }

    #[test]
    fn valid_bank_has_no_warnings() {
        let bank = parse_bank_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_bank(&bank);
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn unsupported_question_type_is_rejected() {
        let toml = r#"
[bank]
id = "bad"
name = "Bad"

[[questions]]
id = "essay"
type = "free response"
"#;
        let result = parse_bank_str(toml, &PathBuf::from("test.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_duplicate_ids() {
        let toml = r#"
[bank]
id = "dupes"
name = "Dupes"

[[questions]]
id = "same"
type = "short answer"
subtype = "text"
[questions.correct_answer]
text = "a"

[[questions]]
id = "same"
type = "short answer"
subtype = "text"
[questions.correct_answer]
text = "b"
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_bank(&bank);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
    }

    #[test]
    fn validate_unevaluable_correct_answer() {
        let toml = r#"
[bank]
id = "bad-answer"
name = "Bad Answer"

[[questions]]
id = "q1"
type = "short answer"
subtype = "number"
[questions.correct_answer]
number = "2*("
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_bank(&bank);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("does not evaluate")));
    }

    #[test]
    fn validate_multiple_choice_without_correct_choice() {
        let toml = r#"
[bank]
id = "mc"
name = "MC"

[[questions]]
id = "q1"
type = "multiple choice"

[[questions.choices]]
text = "only wrong answers"
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_bank(&bank);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("no correct choice")));
    }

    #[test]
    fn validate_measurement_missing_unit() {
        let toml = r#"
[bank]
id = "meas"
name = "Measurement"

[[questions]]
id = "q1"
type = "short answer"
subtype = "measurement"
[questions.correct_answer]
number = "5"
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_bank(&bank);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("without correct unit")));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_bank_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn parse_submissions_file() {
        let toml = r#"
[[submissions]]
question_id = "gravity"
number = "9.81"
unit = "m/s^2"

[[submissions]]
question_id = "planet"
selected = [1]
"#;
        let submissions = parse_submissions_str(toml, &PathBuf::from("subs.toml")).unwrap();
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].question_id, "gravity");
        assert_eq!(submissions[0].response.number.as_deref(), Some("9.81"));
        assert_eq!(submissions[1].response.selected, vec![1]);
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("bank.toml");
        std::fs::write(&file_path, VALID_TOML).unwrap();

        let banks = load_bank_directory(dir.path()).unwrap();
        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0].id, "phys-101-hw3");
    }
}
