//! The `markwise grade` command.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;

use markwise_core::grade_response;
use markwise_core::parser::{parse_bank, parse_submissions};
use markwise_core::report::{GradeReport, GradedEntry};

pub fn execute(
    bank_path: PathBuf,
    submissions_path: PathBuf,
    output: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let bank = parse_bank(&bank_path)?;
    let submissions = parse_submissions(&submissions_path)?;

    let questions: HashMap<&str, _> = bank
        .questions
        .iter()
        .map(|q| (q.id.as_str(), q))
        .collect();

    let mut entries = Vec::new();
    for submission in &submissions {
        let Some(question) = questions.get(submission.question_id.as_str()) else {
            tracing::warn!(
                "submission references unknown question '{}', skipping",
                submission.question_id
            );
            continue;
        };
        let result = grade_response(question, &submission.response);
        entries.push(GradedEntry::new(
            &submission.question_id,
            &result,
            question.points_possible,
        ));
    }

    let report = GradeReport::new(&bank, entries);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            print_summary(&report);
        }
    }

    if let Some(output) = output {
        let path = if output.is_dir() {
            let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
            output.join(format!("report-{timestamp}.json"))
        } else {
            output
        };
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &GradeReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Question", "Result", "Points"]);

    for entry in &report.entries {
        let result = if entry.answered_correctly {
            "correct"
        } else {
            "incorrect"
        };
        table.add_row(vec![
            Cell::new(&entry.question_id),
            Cell::new(result),
            Cell::new(format!(
                "{}/{}",
                entry.points_awarded, entry.points_possible
            )),
        ]);
    }

    println!("{table}");
    println!(
        "\nTotal: {}/{} ({:.1}%)",
        report.points_awarded,
        report.points_possible,
        report.percent()
    );
}
