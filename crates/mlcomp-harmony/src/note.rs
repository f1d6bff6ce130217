//! Melodic notes: a pitch spelling held for a whole number of beats.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{HarmonyError, HarmonyResult};
use crate::pitch;

/// A single note.
///
/// Two notes are equal when both the spelling and the duration match, so
/// `C#:2` and `Db:2` are different notes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Note {
    pitch: String,
    duration: u32,
}

impl Note {
    /// Creates a note, validating the spelling and duration.
    ///
    /// # Examples
    /// ```
    /// use mlcomp_harmony::Note;
    ///
    /// let note = Note::new("Eb", 3).unwrap();
    /// assert_eq!(note.pitch(), "Eb");
    /// assert_eq!(note.duration(), 3);
    /// assert!(Note::new("Eb", 0).is_err());
    /// ```
    pub fn new(pitch: impl Into<String>, duration: u32) -> HarmonyResult<Self> {
        let pitch = pitch.into();
        if duration == 0 {
            return Err(HarmonyError::InvalidDuration { duration });
        }
        pitch::index_of(&pitch)?;
        Ok(Self { pitch, duration })
    }

    /// The pitch spelling as supplied.
    pub fn pitch(&self) -> &str {
        &self.pitch
    }

    /// Duration in beats.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Chromatic position of the pitch (0 = C).
    pub fn pitch_class(&self) -> u8 {
        // Spelling was validated on construction.
        pitch::index_of(&self.pitch).unwrap_or_default()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pitch, self.duration)
    }
}

impl FromStr for Note {
    type Err = HarmonyError;

    /// Parses `<pitch>:<duration>`, e.g. `"F#:2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || HarmonyError::MalformedNote {
            text: s.to_string(),
        };
        let (pitch, duration) = s.trim().split_once(':').ok_or_else(malformed)?;
        let duration: u32 = duration.trim().parse().map_err(|_| malformed())?;
        Note::new(pitch.trim(), duration)
    }
}
