//! Error types for harmony construction and phrase generation.

use thiserror::Error;

/// Result type for harmony operations.
pub type HarmonyResult<T> = Result<T, HarmonyError>;

/// Errors raised while building harmony objects or generating phrases.
///
/// Every variant is a construction-time validation failure; nothing is
/// partially built when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarmonyError {
    /// Chord identifier did not split into exactly `<root>_<quality>`.
    #[error("malformed chord identifier '{identifier}': expected '<root>_<quality>'")]
    MalformedIdentifier {
        /// The rejected identifier.
        identifier: String,
    },

    /// Root token is not a pitch spelling, or is longer than two characters.
    #[error("unknown chord root '{root}'")]
    UnknownRoot {
        /// The rejected root token.
        root: String,
    },

    /// Quality token is not one of the recognized tags.
    #[error("unknown chord quality '{quality}'")]
    UnknownQuality {
        /// The rejected quality token.
        quality: String,
    },

    /// Note durations do not add up to the phrase's beat budget.
    #[error("note durations sum to {actual} beats, expected {expected}")]
    BeatBudgetMismatch {
        /// Required beats (`8 * measure_count`).
        expected: u64,
        /// Beats actually supplied.
        actual: u64,
    },

    /// Environment relationship list does not line up with its chords.
    #[error("{relationships} relationship(s) supplied for {chords} chord(s)")]
    RelationshipCountMismatch {
        /// Number of relationships supplied.
        relationships: usize,
        /// Number of current chords supplied.
        chords: usize,
    },

    /// Pitch spelling is in neither the sharp nor the flat table.
    #[error("unknown pitch spelling '{spelling}'")]
    UnknownPitch {
        /// The rejected spelling.
        spelling: String,
    },

    /// Notes and chords must last at least one beat.
    #[error("invalid duration {duration}: must be at least one beat")]
    InvalidDuration {
        /// The rejected duration.
        duration: u32,
    },

    /// Phrases span at least one measure, and no more than [`MAX_MEASURE_COUNT`].
    ///
    /// [`MAX_MEASURE_COUNT`]: crate::phrase::MAX_MEASURE_COUNT
    #[error("invalid measure count {count}: must be between 1 and {}", crate::phrase::MAX_MEASURE_COUNT)]
    InvalidMeasureCount {
        /// The rejected measure count.
        count: u32,
    },

    /// Textual note was not `<pitch>:<duration>`.
    #[error("malformed note '{text}': expected '<pitch>:<duration>'")]
    MalformedNote {
        /// The rejected text.
        text: String,
    },

    /// Relationship tag not recognized.
    #[error("unknown chord relationship '{tag}'")]
    UnknownRelationship {
        /// The rejected tag.
        tag: String,
    },

    /// Could not collect enough distinct reactions.
    #[error("only {found} distinct reaction(s) after {attempts} attempt(s), wanted {wanted}")]
    AttemptsExhausted {
        /// Distinct reactions requested.
        wanted: usize,
        /// Distinct reactions collected.
        found: usize,
        /// Generation attempts made.
        attempts: u32,
    },
}

impl HarmonyError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            HarmonyError::MalformedIdentifier { .. } => "HARMONY_001",
            HarmonyError::UnknownRoot { .. } => "HARMONY_002",
            HarmonyError::UnknownQuality { .. } => "HARMONY_003",
            HarmonyError::BeatBudgetMismatch { .. } => "HARMONY_004",
            HarmonyError::RelationshipCountMismatch { .. } => "HARMONY_005",
            HarmonyError::UnknownPitch { .. } => "HARMONY_006",
            HarmonyError::InvalidDuration { .. } => "HARMONY_007",
            HarmonyError::InvalidMeasureCount { .. } => "HARMONY_008",
            HarmonyError::MalformedNote { .. } => "HARMONY_009",
            HarmonyError::UnknownRelationship { .. } => "HARMONY_010",
            HarmonyError::AttemptsExhausted { .. } => "HARMONY_011",
        }
    }

    /// Returns the error category.
    pub fn category(&self) -> &'static str {
        match self {
            HarmonyError::MalformedIdentifier { .. }
            | HarmonyError::UnknownRoot { .. }
            | HarmonyError::UnknownQuality { .. } => "chord",
            HarmonyError::UnknownPitch { .. } | HarmonyError::MalformedNote { .. } => "pitch",
            HarmonyError::BeatBudgetMismatch { .. }
            | HarmonyError::InvalidDuration { .. }
            | HarmonyError::InvalidMeasureCount { .. } => "phrase",
            HarmonyError::RelationshipCountMismatch { .. }
            | HarmonyError::UnknownRelationship { .. } => "environment",
            HarmonyError::AttemptsExhausted { .. } => "generation",
        }
    }
}
