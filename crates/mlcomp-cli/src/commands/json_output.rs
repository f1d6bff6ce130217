//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag on `chord`, `validate`, and `generate`.

use mlcomp_harmony::{Chord, HarmonyError, ReactionSummary};
use serde::Serialize;

use crate::input::InputError;

/// Error codes for CLI operations.
///
/// Harmony validation errors pass through with their own `HARMONY_xxx` codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "HARMONY_004")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Offending document field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
        }
    }
}

impl From<&HarmonyError> for JsonError {
    fn from(err: &HarmonyError) -> Self {
        JsonError::new(err.code(), err.to_string())
    }
}

impl From<&InputError> for JsonError {
    fn from(err: &InputError) -> Self {
        JsonError {
            code: err.code().to_string(),
            message: err.to_string(),
            field: err.field().map(str::to_string),
        }
    }
}

/// Parsed chord details.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChordInfo {
    pub identifier: String,
    pub root: String,
    pub quality: String,
    pub duration: u32,
    pub chord_tones: Vec<String>,
    pub tensions: Vec<String>,
}

impl From<&Chord> for ChordInfo {
    fn from(chord: &Chord) -> Self {
        ChordInfo {
            identifier: chord.identifier(),
            root: chord.root().to_string(),
            quality: chord.quality().tag().to_string(),
            duration: chord.duration(),
            chord_tones: chord.chord_tones().iter().map(|s| s.to_string()).collect(),
            tensions: chord.tensions().iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Output of the `chord` command.
#[derive(Debug, Clone, Serialize)]
pub struct ChordOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chord: Option<ChordInfo>,
}

/// Output of the `validate` command.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measures: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_chords: Option<Vec<ChordInfo>>,
}

/// Output of the `generate` command.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub takes: Vec<ReactionSummary>,
}

/// Serializes an output value, compact or pretty.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
