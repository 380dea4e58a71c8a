//! The `markwise validate` command.

use std::path::PathBuf;

use anyhow::Result;

use markwise_core::parser::{load_bank_directory, parse_bank, validate_bank};

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = if bank_path.is_dir() {
        load_bank_directory(&bank_path)?
    } else {
        vec![parse_bank(&bank_path)?]
    };

    let mut total_warnings = 0;

    for bank in &banks {
        let warnings = validate_bank(bank);
        println!(
            "Bank: {} ({} questions, {} warning(s))",
            bank.name,
            bank.questions.len(),
            warnings.len()
        );
        for w in &warnings {
            match &w.question_id {
                Some(id) => println!("  [{id}] {}", w.message),
                None => println!("  {}", w.message),
            }
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All banks valid.");
    } else {
        println!(
            "\n{total_warnings} warning(s) across {} bank(s).",
            banks.len()
        );
    }

    Ok(())
}
