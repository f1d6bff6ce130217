//! Generate command implementation
//!
//! Generates one or more distinct reactions for an environment document.

use anyhow::Result;
use colored::Colorize;
use mlcomp_harmony::rng::{default_source, derive_take_seed, seeded_source};
use mlcomp_harmony::{collect_distinct, generate_distinct, Environment, HarmonyResult, Reaction};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{to_json, GenerateOutput, JsonError};
use crate::input::load_environment;

/// Default cap on generation attempts per requested take.
pub const ATTEMPTS_PER_TAKE: u32 = 16;

/// Run the generate command
///
/// # Arguments
/// * `input_path` - Path to the environment document
/// * `seed` - Base seed; each take uses a seed derived from it. Without a seed
///   the process-wide random source is used.
/// * `count` - Number of distinct takes to generate
/// * `max_attempts` - Generation attempts before giving up (default: 16 per take)
/// * `json_output` - Whether to output machine-readable JSON
/// * `pretty` - Pretty-print JSON output
///
/// # Returns
/// Exit code: 0 on success, 1 on validation or generation failure
pub fn run(
    input_path: &str,
    seed: Option<u64>,
    count: usize,
    max_attempts: Option<u32>,
    json_output: bool,
    pretty: bool,
) -> Result<ExitCode> {
    let max_attempts = max_attempts.unwrap_or_else(|| default_max_attempts(count));

    let loaded = match load_environment(Path::new(input_path)) {
        Ok(loaded) => loaded,
        Err(e) => {
            if json_output {
                let output = failure(input_path, seed, JsonError::from(&e));
                println!("{}", to_json(&output, pretty)?);
            } else {
                eprintln!("{} [{}] {}", "error".red().bold(), e.code(), e);
            }
            return Ok(ExitCode::from(1));
        }
    };

    let takes = loaded
        .environment()
        .and_then(|env| generate_takes(&env, seed, count, max_attempts));

    match takes {
        Ok(takes) => {
            if json_output {
                let output = GenerateOutput {
                    success: true,
                    errors: Vec::new(),
                    input: input_path.to_string(),
                    seed,
                    takes: takes.iter().map(Reaction::summary).collect(),
                };
                println!("{}", to_json(&output, pretty)?);
            } else {
                print_takes(input_path, &takes);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if json_output {
                let output = failure(input_path, seed, JsonError::from(&e));
                println!("{}", to_json(&output, pretty)?);
            } else {
                eprintln!("{} [{}] {}", "error".red().bold(), e.code(), e);
            }
            Ok(ExitCode::from(1))
        }
    }
}

/// Generates `count` takes with distinct notes.
///
/// With a seed, attempt `i` draws from a PCG32 stream seeded with
/// `derive_take_seed(seed, i)`, so a take can be reproduced on its own.
pub fn generate_takes<'a>(
    environment: &Environment<'a>,
    seed: Option<u64>,
    count: usize,
    max_attempts: u32,
) -> HarmonyResult<Vec<Reaction<'a>>> {
    match seed {
        Some(seed) => collect_distinct(count, max_attempts, |attempt| {
            let mut source = seeded_source(derive_take_seed(seed, attempt));
            Reaction::generate(environment.clone(), &mut source)
        }),
        None => generate_distinct(environment, &mut default_source(), count, max_attempts),
    }
}

/// Attempt cap when none is given: [`ATTEMPTS_PER_TAKE`] per take, saturating.
fn default_max_attempts(count: usize) -> u32 {
    u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(ATTEMPTS_PER_TAKE)
}

fn failure(input_path: &str, seed: Option<u64>, error: JsonError) -> GenerateOutput {
    GenerateOutput {
        success: false,
        errors: vec![error],
        input: input_path.to_string(),
        seed,
        takes: Vec::new(),
    }
}

fn print_takes(input_path: &str, takes: &[Reaction<'_>]) {
    println!("{} {}", "Generating:".cyan().bold(), input_path);
    for (i, take) in takes.iter().enumerate() {
        let phrase = take.generated_phrase();
        let chords: Vec<String> = phrase.chords().iter().map(|c| c.identifier()).collect();
        let notes: Vec<String> = phrase.notes().iter().map(|n| n.to_string()).collect();
        println!(
            "{} {} {}",
            format!("Take {}:", i + 1).green().bold(),
            "fingerprint".dimmed(),
            take.fingerprint()
        );
        println!("  {} {}", "Chords:".dimmed(), chords.join(" "));
        println!("  {} {}", "Notes:".dimmed(), notes.join(" "));
        println!("  {} {}", "Hash:".dimmed(), &take.content_hash()[..16]);
    }
}
