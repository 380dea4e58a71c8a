//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn markwise() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("markwise").unwrap()
}

const TEST_BANK: &str = r#"
[bank]
id = "cli-test"
name = "CLI Test Bank"

[[questions]]
id = "gravity"
type = "short answer"
subtype = "measurement"
prompt = "Acceleration due to gravity?"
points_possible = 2

[questions.correct_answer]
number = "9.8"
unit = "m/s^2"

[questions.scoring]
percent_tolerance = 2.0

[[questions]]
id = "capital"
type = "short answer"
subtype = "text"
prompt = "Capital of France?"

[questions.correct_answer]
text = "Paris"

[questions.scoring]
accept_alt_cap = true

[[questions]]
id = "planet"
type = "multiple choice"
prompt = "Which planet is largest?"

[[questions.choices]]
text = "Mars"

[[questions.choices]]
text = "Jupiter"
is_correct = true
"#;

const TEST_SUBMISSIONS: &str = r#"
[[submissions]]
question_id = "gravity"
number = "9.81"
unit = "m/s^2"

[[submissions]]
question_id = "capital"
text = "paris"

[[submissions]]
question_id = "planet"
selected = [0]
"#;

fn write_fixtures(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let bank_path = dir.path().join("bank.toml");
    let subs_path = dir.path().join("submissions.toml");
    std::fs::write(&bank_path, TEST_BANK).unwrap();
    std::fs::write(&subs_path, TEST_SUBMISSIONS).unwrap();
    (bank_path, subs_path)
}

#[test]
fn grade_prints_summary() {
    let dir = TempDir::new().unwrap();
    let (bank_path, subs_path) = write_fixtures(&dir);

    markwise()
        .arg("grade")
        .arg("--bank")
        .arg(&bank_path)
        .arg("--submissions")
        .arg(&subs_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("gravity"))
        .stdout(predicate::str::contains("Total: 3/4"));
}

#[test]
fn grade_json_format() {
    let dir = TempDir::new().unwrap();
    let (bank_path, subs_path) = write_fixtures(&dir);

    markwise()
        .arg("grade")
        .arg("--bank")
        .arg(&bank_path)
        .arg("--submissions")
        .arg(&subs_path)
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"points_awarded\": 3"))
        .stdout(predicate::str::contains("\"points_possible\": 4"));
}

#[test]
fn grade_writes_report_file() {
    let dir = TempDir::new().unwrap();
    let (bank_path, subs_path) = write_fixtures(&dir);
    let report_path = dir.path().join("report.json");

    markwise()
        .arg("grade")
        .arg("--bank")
        .arg(&bank_path)
        .arg("--submissions")
        .arg(&subs_path)
        .arg("--output")
        .arg(&report_path)
        .assert()
        .success();

    assert!(report_path.exists());
    let content = std::fs::read_to_string(&report_path).unwrap();
    assert!(content.contains("cli-test"));
}

#[test]
fn grade_skips_unknown_question_ids() {
    let dir = TempDir::new().unwrap();
    let bank_path = dir.path().join("bank.toml");
    let subs_path = dir.path().join("submissions.toml");
    std::fs::write(&bank_path, TEST_BANK).unwrap();
    std::fs::write(
        &subs_path,
        r#"
[[submissions]]
question_id = "no-such-question"
text = "anything"

[[submissions]]
question_id = "capital"
text = "Paris"
"#,
    )
    .unwrap();

    markwise()
        .arg("grade")
        .arg("--bank")
        .arg(&bank_path)
        .arg("--submissions")
        .arg(&subs_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 1/1"));
}

#[test]
fn grade_nonexistent_bank() {
    markwise()
        .arg("grade")
        .arg("--bank")
        .arg("no_such_bank.toml")
        .arg("--submissions")
        .arg("no_such_subs.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_valid_bank() {
    let dir = TempDir::new().unwrap();
    let (bank_path, _) = write_fixtures(&dir);

    markwise()
        .arg("validate")
        .arg("--bank")
        .arg(&bank_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 questions, 0 warning(s)"))
        .stdout(predicate::str::contains("All banks valid"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let bank_path = dir.path().join("bank.toml");
    std::fs::write(
        &bank_path,
        r#"
[bank]
id = "warn"
name = "Warnings"

[[questions]]
id = "q1"
type = "short answer"
subtype = "number"

[questions.correct_answer]
number = "2*("
"#,
    )
    .unwrap();

    markwise()
        .arg("validate")
        .arg("--bank")
        .arg(&bank_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 questions, 1 warning(s)"))
        .stdout(predicate::str::contains("[q1]"))
        .stdout(predicate::str::contains("does not evaluate"))
        .stdout(predicate::str::contains("1 warning(s) across 1 bank(s)"));
}

#[test]
fn validate_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bank.toml"), TEST_BANK).unwrap();

    markwise()
        .arg("validate")
        .arg("--bank")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CLI Test Bank"));
}

#[test]
fn validate_nonexistent_file() {
    markwise()
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    markwise()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created banks/example.toml"))
        .stdout(predicate::str::contains("Created submissions.toml"));

    assert!(dir.path().join("banks/example.toml").exists());
    assert!(dir.path().join("submissions.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    markwise()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    markwise()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_output_grades_cleanly() {
    let dir = TempDir::new().unwrap();

    markwise()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    markwise()
        .current_dir(dir.path())
        .arg("grade")
        .arg("--bank")
        .arg("banks/example.toml")
        .arg("--submissions")
        .arg("submissions.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 6/6"));
}

#[test]
fn help_output() {
    markwise()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch grader for question banks"));
}

#[test]
fn version_output() {
    markwise()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("markwise"));
}
