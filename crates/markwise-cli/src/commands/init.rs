//! The `markwise init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create example bank
    std::fs::create_dir_all("banks")?;
    let bank_path = std::path::Path::new("banks/example.toml");
    if bank_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(bank_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    // Create example submissions
    if std::path::Path::new("submissions.toml").exists() {
        println!("submissions.toml already exists, skipping.");
    } else {
        std::fs::write("submissions.toml", EXAMPLE_SUBMISSIONS)?;
        println!("Created submissions.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit banks/example.toml with your questions");
    println!("  2. Run: markwise validate --bank banks/example.toml");
    println!("  3. Run: markwise grade --bank banks/example.toml --submissions submissions.toml");

    Ok(())
}

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Bank"
description = "A small bank to get started"

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
id = "circle-area"
type = "short answer"
subtype = "number"
prompt = "What is the area of a circle with radius 2? You may answer symbolically."

[questions.correct_answer]
number = "4*pi"

[questions.scoring]
percent_tolerance = 1.0

[[questions]]
id = "capital"
type = "short answer"
subtype = "text"
prompt = "What is the capital of France?"

[questions.correct_answer]
text = "Paris"

[questions.scoring]
accept_alt_cap = true

[[questions]]
id = "noble-gases"
type = "multiple choice"
prompt = "Which of these are noble gases?"
points_possible = 2

[[questions.choices]]
text = "Helium"
is_correct = true

[[questions.choices]]
text = "Oxygen"

[[questions.choices]]
text = "Neon"
is_correct = true

[[questions.choices]]
text = "Nitrogen"
"#;

const EXAMPLE_SUBMISSIONS: &str = r#"[[submissions]]
question_id = "gravity"
number = "9.81"
unit = "m/s^2"

[[submissions]]
question_id = "circle-area"
number = "12.566"

[[submissions]]
question_id = "capital"
text = "paris"

[[submissions]]
question_id = "noble-gases"
selected = [0, 2]
"#;
