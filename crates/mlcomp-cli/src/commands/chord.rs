//! Chord command implementation
//!
//! Parses a chord identifier and prints its chord tones and tensions.

use anyhow::Result;
use colored::Colorize;
use mlcomp_harmony::Chord;
use std::process::ExitCode;

use super::json_output::{to_json, ChordInfo, ChordOutput, JsonError};

/// Run the chord command
///
/// # Arguments
/// * `identifier` - Chord identifier (e.g. "C_maj7")
/// * `duration` - Chord duration in beats
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if the chord parsed, 1 otherwise
pub fn run(identifier: &str, duration: u32, json_output: bool) -> Result<ExitCode> {
    let parsed = Chord::parse(identifier, duration);

    if json_output {
        let output = match &parsed {
            Ok(chord) => ChordOutput {
                success: true,
                errors: Vec::new(),
                chord: Some(ChordInfo::from(chord)),
            },
            Err(e) => ChordOutput {
                success: false,
                errors: vec![JsonError::from(e)],
                chord: None,
            },
        };
        println!("{}", to_json(&output, true)?);
    } else {
        match &parsed {
            Ok(chord) => print_chord(chord),
            Err(e) => {
                println!(
                    "{} {} [{}]: {}",
                    "INVALID".red().bold(),
                    identifier,
                    e.code(),
                    e
                );
            }
        }
    }

    Ok(if parsed.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn print_chord(chord: &Chord) {
    println!(
        "{} {} ({} beats)",
        "Chord:".cyan().bold(),
        chord.identifier(),
        chord.duration()
    );
    println!("  {} {}", "Chord tones:".dimmed(), chord.chord_tones().join(" "));
    println!("  {} {}", "Tensions:".dimmed(), chord.tensions().join(" "));
}
