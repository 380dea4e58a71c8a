//! Grading report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Bank, GradeResult};

/// The outcome of grading a set of submissions against one bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the bank that was graded against.
    pub bank: BankSummary,
    /// Per-question outcomes, in submission order.
    pub entries: Vec<GradedEntry>,
    /// Total points awarded across all entries.
    pub points_awarded: u32,
    /// Total points possible across all entries.
    pub points_possible: u32,
}

/// Summary of a bank (without the full question definitions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

/// One graded submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedEntry {
    pub question_id: String,
    pub answered_correctly: bool,
    pub points_awarded: u32,
    pub points_possible: u32,
}

impl GradedEntry {
    pub fn new(question_id: &str, result: &GradeResult, points_possible: u32) -> Self {
        Self {
            question_id: question_id.to_owned(),
            answered_correctly: result.answered_correctly,
            points_awarded: result.points_awarded,
            points_possible,
        }
    }
}

impl GradeReport {
    /// Assemble a report from graded entries.
    pub fn new(bank: &Bank, entries: Vec<GradedEntry>) -> Self {
        let points_awarded = entries.iter().map(|e| e.points_awarded).sum();
        let points_possible = entries.iter().map(|e| e.points_possible).sum();
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank: BankSummary {
                id: bank.id.clone(),
                name: bank.name.clone(),
                question_count: bank.questions.len(),
            },
            entries,
            points_awarded,
            points_possible,
        }
    }

    /// Score as a percentage of points possible.
    pub fn percent(&self) -> f64 {
        if self.points_possible == 0 {
            return 0.0;
        }
        100.0 * self.points_awarded as f64 / self.points_possible as f64
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradeReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Bank;

    fn make_bank() -> Bank {
        Bank {
            id: "test-bank".into(),
            name: "Test Bank".into(),
            description: String::new(),
            questions: vec![],
        }
    }

    fn make_entry(question_id: &str, correct: bool, possible: u32) -> GradedEntry {
        GradedEntry {
            question_id: question_id.into(),
            answered_correctly: correct,
            points_awarded: if correct { possible } else { 0 },
            points_possible: possible,
        }
    }

    #[test]
    fn totals_sum_over_entries() {
        let report = GradeReport::new(
            &make_bank(),
            vec![
                make_entry("q1", true, 2),
                make_entry("q2", false, 3),
                make_entry("q3", true, 1),
            ],
        );
        assert_eq!(report.points_awarded, 3);
        assert_eq!(report.points_possible, 6);
        assert!((report.percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn percent_of_empty_report_is_zero() {
        let report = GradeReport::new(&make_bank(), vec![]);
        assert_eq!(report.percent(), 0.0);
    }

    #[test]
    fn json_roundtrip() {
        let report = GradeReport::new(&make_bank(), vec![make_entry("q1", true, 2)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        report.save_json(&path).unwrap();
        let loaded = GradeReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.bank.id, "test-bank");
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.points_awarded, 2);
    }
}
