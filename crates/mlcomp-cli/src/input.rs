//! Loading environment documents.
//!
//! An environment document is a JSON file describing the reference phrase,
//! the chords to generate over, and one relationship per chord:
//!
//! ```json
//! {
//!   "reference": { "chords": ["C_maj7:8"], "notes": ["C:4", "E:4"], "measures": 1 },
//!   "current_chords": ["D_min7:4", "G_7:4"],
//!   "relationships": ["twoFive", "twoFive"]
//! }
//! ```
//!
//! Chords are written `<identifier>` or `<identifier>:<beats>`, notes
//! `<pitch>:<beats>`.

use mlcomp_harmony::{
    Chord, ChordRelationship, Environment, HarmonyError, HarmonyResult, Note, Phrase,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Raw environment document as read from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentDocument {
    pub reference: ReferenceDocument,
    pub current_chords: Vec<String>,
    pub relationships: Vec<ChordRelationship>,
}

/// Reference phrase section of an environment document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceDocument {
    pub chords: Vec<String>,
    pub notes: Vec<String>,
    #[serde(default = "default_measures")]
    pub measures: u32,
}

fn default_measures() -> u32 {
    1
}

/// Errors that can occur while loading an environment document.
#[derive(Debug)]
pub enum InputError {
    /// The file could not be read
    FileRead {
        path: String,
        source: std::io::Error,
    },
    /// The file is not a valid environment document
    Parse {
        path: String,
        source: serde_json::Error,
    },
    /// A field failed harmony validation
    Invalid { field: String, source: HarmonyError },
}

impl InputError {
    /// Returns the stable CLI error code.
    pub fn code(&self) -> &'static str {
        use crate::commands::json_output::error_codes;
        match self {
            InputError::FileRead { .. } => error_codes::FILE_READ,
            InputError::Parse { .. } => error_codes::JSON_PARSE,
            InputError::Invalid { source, .. } => source.code(),
        }
    }

    /// JSON-path-like location of the offending field, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            InputError::Invalid { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "Failed to read {}: {}", path, source)
            }
            InputError::Parse { path, source } => {
                write!(f, "Failed to parse {}: {}", path, source)
            }
            InputError::Invalid { field, source } => write!(f, "{}: {}", field, source),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            InputError::Parse { source, .. } => Some(source),
            InputError::Invalid { source, .. } => Some(source),
        }
    }
}

/// A validated environment document, owning the values an [`Environment`]
/// borrows.
#[derive(Debug, Clone)]
pub struct LoadedEnvironment {
    pub reference: Phrase,
    pub current_chords: Vec<Chord>,
    pub relationships: Vec<ChordRelationship>,
    /// BLAKE3 hash of the source text (hex string).
    pub source_hash: String,
}

impl LoadedEnvironment {
    /// Builds the generation environment.
    ///
    /// Fails if the relationship count does not match the chord count.
    pub fn environment(&self) -> HarmonyResult<Environment<'_>> {
        Environment::new(
            &self.reference,
            self.relationships.clone(),
            &self.current_chords,
        )
    }
}

/// Loads and validates an environment document from a file.
pub fn load_environment(path: &Path) -> Result<LoadedEnvironment, InputError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| InputError::FileRead {
        path: display.clone(),
        source,
    })?;
    parse_environment(&content).map_err(|err| match err {
        InputError::Parse { source, .. } => InputError::Parse {
            path: display,
            source,
        },
        other => other,
    })
}

/// Parses and validates an environment document from JSON text.
pub fn parse_environment(content: &str) -> Result<LoadedEnvironment, InputError> {
    let document: EnvironmentDocument =
        serde_json::from_str(content).map_err(|source| InputError::Parse {
            path: "<input>".to_string(),
            source,
        })?;
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();
    build(document, source_hash)
}

fn build(
    document: EnvironmentDocument,
    source_hash: String,
) -> Result<LoadedEnvironment, InputError> {
    let reference_chords = parse_chords(&document.reference.chords, "reference.chords")?;
    let notes = document
        .reference
        .notes
        .iter()
        .enumerate()
        .map(|(i, text)| text.parse::<Note>().map_err(invalid(format!("reference.notes[{}]", i))))
        .collect::<Result<Vec<_>, _>>()?;
    let reference = Phrase::new(reference_chords, notes, document.reference.measures)
        .map_err(invalid("reference".to_string()))?;
    let current_chords = parse_chords(&document.current_chords, "current_chords")?;

    let loaded = LoadedEnvironment {
        reference,
        current_chords,
        relationships: document.relationships,
        source_hash,
    };
    loaded
        .environment()
        .map_err(invalid("relationships".to_string()))?;
    Ok(loaded)
}

fn parse_chords(texts: &[String], field: &str) -> Result<Vec<Chord>, InputError> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            text.parse::<Chord>()
                .map_err(invalid(format!("{}[{}]", field, i)))
        })
        .collect()
}

fn invalid(field: String) -> impl FnOnce(HarmonyError) -> InputError {
    move |source| InputError::Invalid { field, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const TWO_FIVE: &str = r#"{
        "reference": { "chords": ["C_maj7:8"], "notes": ["C:4", "E:4"], "measures": 1 },
        "current_chords": ["D_min7:4", "G_7:4"],
        "relationships": ["twoFive", "twoFive"]
    }"#;

    #[test]
    fn test_parse_valid_document() {
        let loaded = parse_environment(TWO_FIVE).unwrap();
        assert_eq!(loaded.reference.measure_count(), 1);
        assert_eq!(loaded.reference.notes().len(), 2);
        assert_eq!(loaded.current_chords.len(), 2);
        assert_eq!(loaded.current_chords[1].identifier(), "G_7");
        assert_eq!(loaded.source_hash.len(), 64);
        assert!(loaded.environment().is_ok());
    }

    #[test]
    fn test_measures_default_to_one() {
        let loaded = parse_environment(
            r#"{
                "reference": { "chords": ["A_min"], "notes": ["A:8"] },
                "current_chords": [],
                "relationships": []
            }"#,
        )
        .unwrap();
        assert_eq!(loaded.reference.measure_count(), 1);
        assert_eq!(loaded.reference.chords()[0].duration(), 8);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = parse_environment(
            r#"{
                "reference": { "chords": [], "notes": ["A:8"], "tempo": 120 },
                "current_chords": [],
                "relationships": []
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, InputError::Parse { .. }));
        assert_eq!(err.code(), "CLI_002");
    }

    #[test]
    fn test_bad_note_reports_field() {
        let err = parse_environment(
            r#"{
                "reference": { "chords": [], "notes": ["C:4", "E:3"] },
                "current_chords": [],
                "relationships": []
            }"#,
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("reference"));
        assert_eq!(err.code(), "HARMONY_004");

        let err = parse_environment(
            r#"{
                "reference": { "chords": [], "notes": ["C:4", "H:4"] },
                "current_chords": [],
                "relationships": []
            }"#,
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("reference.notes[1]"));
    }

    #[test]
    fn test_oversized_numbers_rejected() {
        let err = parse_environment(
            r#"{
                "reference": { "chords": [], "notes": ["C:4294967295", "C:9"] },
                "current_chords": [],
                "relationships": []
            }"#,
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("reference"));
        assert_eq!(err.code(), "HARMONY_004");

        let err = parse_environment(
            r#"{
                "reference": { "chords": [], "notes": [], "measures": 536870912 },
                "current_chords": [],
                "relationships": []
            }"#,
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("reference"));
        assert_eq!(err.code(), "HARMONY_008");
    }

    #[test]
    fn test_bad_chord_reports_field() {
        let err = parse_environment(
            r#"{
                "reference": { "chords": [], "notes": ["C:8"] },
                "current_chords": ["D_min7", "G7"],
                "relationships": ["twoFive", "twoFive"]
            }"#,
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("current_chords[1]"));
        assert_eq!(err.code(), "HARMONY_001");
    }

    #[test]
    fn test_relationship_mismatch() {
        let err = parse_environment(
            r#"{
                "reference": { "chords": [], "notes": ["C:8"] },
                "current_chords": ["D_min7", "G_7"],
                "relationships": ["twoFive"]
            }"#,
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("relationships"));
        assert_eq!(err.code(), "HARMONY_005");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_FIVE.as_bytes()).unwrap();

        let loaded = load_environment(file.path()).unwrap();
        assert_eq!(loaded.relationships, vec![ChordRelationship::TwoFive; 2]);
    }

    #[test]
    fn test_demo_documents_load() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
        for name in ["two_five.json", "relative_minor.json"] {
            let loaded = load_environment(&demos.join(name))
                .unwrap_or_else(|e| panic!("{} failed to load: {}", name, e));
            assert!(loaded.environment().is_ok());
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_environment(Path::new("/nonexistent/environment.json")).unwrap_err();
        assert!(matches!(err, InputError::FileRead { .. }));
        assert_eq!(err.code(), "CLI_001");
    }
}
