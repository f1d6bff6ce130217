//! mlcomp CLI - Command-line interface for chord inspection and phrase generation
//!
//! This binary provides commands for parsing chords, validating environment
//! documents, and generating candidate phrases against them.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

// Use modules from the library crate
use mlcomp_cli::commands;

/// mlcomp - Constrained-random phrase generation over tonal harmony
#[derive(Parser)]
#[command(name = "mlcomp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a chord identifier and print its chord tones and tensions
    Chord {
        /// Chord identifier, e.g. C_maj7, F#_min7, Bb_dim
        identifier: String,

        /// Chord duration in beats
        #[arg(short, long, default_value_t = mlcomp_harmony::BEATS_PER_MEASURE)]
        duration: u32,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate an environment document without generating
    Validate {
        /// Path to the environment document (JSON)
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Generate phrases for an environment document
    Generate {
        /// Path to the environment document (JSON)
        #[arg(short, long)]
        input: String,

        /// Base seed for reproducible takes (default: process-wide RNG)
        #[arg(long)]
        seed: Option<u64>,

        /// Number of distinct takes to generate
        #[arg(short, long, default_value_t = 1)]
        count: usize,

        /// Generation attempts before giving up (default: 16 per take)
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// Pretty-print the output JSON
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Chord {
            identifier,
            duration,
            json,
        } => commands::chord::run(&identifier, duration, json),
        Commands::Validate { input, json } => commands::validate::run(&input, json),
        Commands::Generate {
            input,
            seed,
            count,
            max_attempts,
            json,
            pretty,
        } => commands::generate::run(&input, seed, count, max_attempts, json, pretty),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
