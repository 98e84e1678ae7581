//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `loopletter_core` linkage with deterministic output.
//! - Print the dashboard card and composed edition of a loop JSON file.
//!
//! # Environment
//! - `LOOPLETTER_LOG_DIR`: absolute directory for rolling logs; unset disables logging.
//! - `LOOPLETTER_LOG_LEVEL`: log level, defaults to the build-mode default.

use loopletter_core::{default_log_level, init_logging, Edition, Loop, LoopCard};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(message) = configure_logging() {
        eprintln!("logging disabled: {message}");
    }

    println!("loopletter_core ping={}", loopletter_core::ping());
    println!("loopletter_core version={}", loopletter_core::core_version());

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };
    match load_loop(&path) {
        Ok(record) => {
            print_loop(&record);
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn configure_logging() -> Result<(), String> {
    let Ok(log_dir) = std::env::var("LOOPLETTER_LOG_DIR") else {
        return Ok(());
    };
    let level = std::env::var("LOOPLETTER_LOG_LEVEL")
        .unwrap_or_else(|_| default_log_level().to_string());
    init_logging(&level, &log_dir)
}

fn load_loop(path: &str) -> Result<Loop, String> {
    let raw =
        std::fs::read_to_string(path).map_err(|err| format!("cannot read `{path}`: {err}"))?;
    serde_json::from_str(&raw).map_err(|err| format!("invalid loop JSON in `{path}`: {err}"))
}

fn print_loop(record: &Loop) {
    let card = LoopCard::from_loop(record);
    let overflow = if card.hidden_member_count > 0 {
        format!(" +{}", card.hidden_member_count)
    } else {
        String::new()
    };
    println!(
        "{} {} [{} / {}] members={}{} next={}",
        card.category_icon,
        card.name,
        card.category_label,
        card.frequency_label,
        card.avatar_preview.len(),
        overflow,
        card.next_send_label
    );

    let edition = Edition::compose(record);
    println!();
    println!("# {}", edition.title);
    println!("{}", edition.edition_label);
    println!();
    println!("{}", edition.intro_text);
    for section in &edition.sections {
        println!();
        println!("## {}", section.question);
        for entry in &section.entries {
            println!("- {}: {}", entry.name, entry.answer.trim());
        }
    }
}
