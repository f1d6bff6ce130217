//! Chord identifiers, qualities, and their derived pitch sets.
//!
//! A chord is named by a `<root>_<quality>` identifier such as `"C_maj7"`,
//! `"F#_min7"`, or `"Bb_dim"`. The root and quality fully determine the
//! chord tones and tensions; the duration is carried alongside.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::Serialize;

use crate::error::{HarmonyError, HarmonyResult};
use crate::phrase::BEATS_PER_MEASURE;
use crate::pitch;

/// Separator between the root and quality tokens of an identifier.
pub const IDENTIFIER_SEPARATOR: char = '_';

/// Longest accepted root token ("C", "F#", "Bb").
const MAX_ROOT_LEN: usize = 2;

/// Chord quality tags.
///
/// Some tags share an interval structure (`min`/`min7`, `6`/`min6`,
/// `dim`/`dim7`) but remain distinct tags for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChordQuality {
    #[serde(rename = "maj")]
    Major,
    #[serde(rename = "maj7")]
    MajorSeventh,
    #[serde(rename = "min")]
    Minor,
    #[serde(rename = "min7")]
    MinorSeventh,
    #[serde(rename = "6")]
    Sixth,
    #[serde(rename = "min6")]
    MinorSixth,
    #[serde(rename = "7")]
    DominantSeventh,
    #[serde(rename = "dim")]
    Diminished,
    #[serde(rename = "dim7")]
    DiminishedSeventh,
}

impl ChordQuality {
    /// All recognized qualities.
    pub const ALL: [ChordQuality; 9] = [
        ChordQuality::Major,
        ChordQuality::MajorSeventh,
        ChordQuality::Minor,
        ChordQuality::MinorSeventh,
        ChordQuality::Sixth,
        ChordQuality::MinorSixth,
        ChordQuality::DominantSeventh,
        ChordQuality::Diminished,
        ChordQuality::DiminishedSeventh,
    ];

    /// The textual tag used in chord identifiers.
    pub fn tag(&self) -> &'static str {
        match self {
            ChordQuality::Major => "maj",
            ChordQuality::MajorSeventh => "maj7",
            ChordQuality::Minor => "min",
            ChordQuality::MinorSeventh => "min7",
            ChordQuality::Sixth => "6",
            ChordQuality::MinorSixth => "min6",
            ChordQuality::DominantSeventh => "7",
            ChordQuality::Diminished => "dim",
            ChordQuality::DiminishedSeventh => "dim7",
        }
    }

    /// Root-relative semitone offsets of the chord tones.
    pub fn chord_tone_offsets(&self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::MajorSeventh => &[0, 4, 7, 11],
            ChordQuality::Minor | ChordQuality::MinorSeventh => &[0, 3, 7, 10],
            ChordQuality::Sixth | ChordQuality::MinorSixth => &[0, 3, 7, 9],
            ChordQuality::DominantSeventh => &[0, 4, 7, 10],
            ChordQuality::Diminished | ChordQuality::DiminishedSeventh => &[0, 3, 6, 9],
        }
    }

    /// Root-relative semitone offsets of the available tensions.
    pub fn tension_offsets(&self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[2, 9, 11],
            ChordQuality::MajorSeventh => &[2],
            ChordQuality::Minor | ChordQuality::MinorSeventh => &[2, 5],
            ChordQuality::Sixth | ChordQuality::MinorSixth => &[2, 5],
            ChordQuality::DominantSeventh => &[1, 2, 6, 8],
            ChordQuality::Diminished | ChordQuality::DiminishedSeventh => &[2, 5, 8, 11],
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ChordQuality {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChordQuality::ALL
            .iter()
            .copied()
            .find(|q| q.tag() == s)
            .ok_or_else(|| HarmonyError::UnknownQuality {
                quality: s.to_string(),
            })
    }
}

/// A chord with its derived chord tones and tensions.
///
/// Equality and hashing consider only the root spelling and quality; the
/// duration and derived pitch lists are ignored.
#[derive(Debug, Clone, Serialize)]
pub struct Chord {
    root: String,
    quality: ChordQuality,
    chord_tones: Vec<&'static str>,
    tensions: Vec<&'static str>,
    duration: u32,
}

impl Chord {
    /// Parses a `<root>_<quality>` identifier.
    ///
    /// # Examples
    /// ```
    /// use mlcomp_harmony::Chord;
    ///
    /// let chord = Chord::parse("C_maj7", 4).unwrap();
    /// assert_eq!(chord.chord_tones(), ["C", "E", "G", "B"]);
    /// assert_eq!(chord.tensions(), ["D"]);
    /// ```
    pub fn parse(identifier: &str, duration: u32) -> HarmonyResult<Self> {
        let tokens: Vec<&str> = identifier.split(IDENTIFIER_SEPARATOR).collect();
        let [root, quality] = tokens.as_slice() else {
            return Err(HarmonyError::MalformedIdentifier {
                identifier: identifier.to_string(),
            });
        };

        if root.chars().count() > MAX_ROOT_LEN || !pitch::is_valid_spelling(root) {
            return Err(HarmonyError::UnknownRoot {
                root: root.to_string(),
            });
        }
        let quality: ChordQuality = quality.parse()?;

        Chord::new(root, quality, duration)
    }

    /// Builds a chord from an already-split root and quality.
    pub fn new(root: &str, quality: ChordQuality, duration: u32) -> HarmonyResult<Self> {
        if duration == 0 {
            return Err(HarmonyError::InvalidDuration { duration });
        }
        let root_index = pitch::index_of(root).map_err(|_| HarmonyError::UnknownRoot {
            root: root.to_string(),
        })?;

        Ok(Self {
            root: root.to_string(),
            quality,
            chord_tones: resolve_offsets(root_index, quality.chord_tone_offsets()),
            tensions: resolve_offsets(root_index, quality.tension_offsets()),
            duration,
        })
    }

    /// Root spelling as supplied.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Chord quality.
    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    /// Chord tones, root first, in sharp spelling.
    pub fn chord_tones(&self) -> &[&'static str] {
        &self.chord_tones
    }

    /// Tensions in sharp spelling.
    pub fn tensions(&self) -> &[&'static str] {
        &self.tensions
    }

    /// Duration in beats.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// The `<root>_<quality>` identifier.
    pub fn identifier(&self) -> String {
        format!("{}{}{}", self.root, IDENTIFIER_SEPARATOR, self.quality.tag())
    }

    /// Whether the pitch class of `spelling` is a chord tone.
    pub fn contains_chord_tone(&self, spelling: &str) -> bool {
        contains_class(&self.chord_tones, spelling)
    }

    /// Whether the pitch class of `spelling` is a tension.
    pub fn contains_tension(&self, spelling: &str) -> bool {
        contains_class(&self.tensions, spelling)
    }

    /// Chord tones followed by tensions.
    pub fn available_pitches(&self) -> Vec<&'static str> {
        self.chord_tones
            .iter()
            .chain(self.tensions.iter())
            .copied()
            .collect()
    }
}

/// Resolves root-relative offsets to sharp spellings.
fn resolve_offsets(root_index: u8, offsets: &[u8]) -> Vec<&'static str> {
    offsets
        .iter()
        .map(|offset| pitch::spelling_at(root_index as i64 + *offset as i64, true))
        .collect()
}

fn contains_class(spellings: &[&'static str], spelling: &str) -> bool {
    let Ok(index) = pitch::index_of(spelling) else {
        return false;
    };
    spellings
        .iter()
        .any(|s| pitch::index_of(s).map(|i| i == index).unwrap_or(false))
}

impl PartialEq for Chord {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.quality == other.quality
    }
}

impl Eq for Chord {}

impl Hash for Chord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.root.hash(state);
        self.quality.hash(state);
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.root, IDENTIFIER_SEPARATOR, self.quality)
    }
}

impl FromStr for Chord {
    type Err = HarmonyError;

    /// Parses `<identifier>` (one measure long) or `<identifier>:<duration>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once(':') {
            Some((identifier, duration)) => {
                let duration: u32 =
                    duration
                        .trim()
                        .parse()
                        .map_err(|_| HarmonyError::MalformedIdentifier {
                            identifier: s.to_string(),
                        })?;
                Chord::parse(identifier.trim(), duration)
            }
            None => Chord::parse(s, BEATS_PER_MEASURE),
        }
    }
}
