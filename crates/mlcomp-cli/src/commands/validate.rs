//! Validate command implementation
//!
//! Loads an environment document and checks it without generating.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{to_json, ChordInfo, JsonError, ValidateOutput};
use crate::input::{load_environment, LoadedEnvironment};

/// Run the validate command
///
/// # Arguments
/// * `input_path` - Path to the environment document
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(input_path: &str, json_output: bool) -> Result<ExitCode> {
    let loaded = load_environment(Path::new(input_path));

    if json_output {
        let output = match &loaded {
            Ok(env) => ValidateOutput {
                success: true,
                errors: Vec::new(),
                input: input_path.to_string(),
                source_hash: Some(env.source_hash.clone()),
                measures: Some(env.reference.measure_count()),
                current_chords: Some(env.current_chords.iter().map(ChordInfo::from).collect()),
            },
            Err(e) => ValidateOutput {
                success: false,
                errors: vec![JsonError::from(e)],
                input: input_path.to_string(),
                source_hash: None,
                measures: None,
                current_chords: None,
            },
        };
        println!("{}", to_json(&output, true)?);
    } else {
        println!("{} {}", "Validating:".cyan().bold(), input_path);
        match &loaded {
            Ok(env) => print_summary(env),
            Err(e) => println!("  {} [{}] {}", "x".red(), e.code(), e),
        }
    }

    Ok(if loaded.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn print_summary(env: &LoadedEnvironment) {
    println!("{} {}", "Source:".dimmed(), &env.source_hash[..16]);
    println!(
        "{} {} measure(s), {} note(s)",
        "Reference:".dimmed(),
        env.reference.measure_count(),
        env.reference.notes().len()
    );
    for (chord, relationship) in env.current_chords.iter().zip(&env.relationships) {
        println!("  {} {} ({})", "-".dimmed(), chord.identifier(), relationship);
    }
    println!("{} Environment is valid", "SUCCESS".green().bold());
}
