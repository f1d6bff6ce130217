//! Twelve-tone pitch class table.
//!
//! Pitch classes are positions `0..12` on the chromatic circle, with C at 0.
//! Each position has a sharp-preferred and a flat-preferred spelling. Both
//! spellings are accepted as input; output always uses the sharp table.

use crate::error::{HarmonyError, HarmonyResult};

/// Number of pitch classes in the chromatic scale.
pub const PITCH_CLASS_COUNT: usize = 12;

/// Sharp-preferred spellings, indexed by pitch class.
pub const SHARP_SPELLINGS: [&str; PITCH_CLASS_COUNT] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat-preferred spellings, indexed by pitch class.
pub const FLAT_SPELLINGS: [&str; PITCH_CLASS_COUNT] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Looks up the pitch class of a spelling.
///
/// The sharp table is searched first, then the flat table.
///
/// # Examples
/// ```
/// use mlcomp_harmony::pitch::index_of;
///
/// assert_eq!(index_of("C#").unwrap(), 1);
/// assert_eq!(index_of("Db").unwrap(), 1);
/// assert!(index_of("H").is_err());
/// ```
pub fn index_of(spelling: &str) -> HarmonyResult<u8> {
    SHARP_SPELLINGS
        .iter()
        .position(|s| *s == spelling)
        .or_else(|| FLAT_SPELLINGS.iter().position(|s| *s == spelling))
        .map(|pos| pos as u8)
        .ok_or_else(|| HarmonyError::UnknownPitch {
            spelling: spelling.to_string(),
        })
}

/// Returns true if the spelling appears in either table.
pub fn is_valid_spelling(spelling: &str) -> bool {
    index_of(spelling).is_ok()
}

/// Returns the spelling at a chromatic position.
///
/// `position` wraps modulo 12, so negative and out-of-range positions are
/// accepted.
pub fn spelling_at(position: i64, sharp_preferred: bool) -> &'static str {
    let index = position.rem_euclid(PITCH_CLASS_COUNT as i64) as usize;
    if sharp_preferred {
        SHARP_SPELLINGS[index]
    } else {
        FLAT_SPELLINGS[index]
    }
}

/// Shifts a spelling by a number of semitones, returning the sharp spelling.
pub fn transpose(spelling: &str, semitones: i64) -> HarmonyResult<&'static str> {
    let index = index_of(spelling)?;
    Ok(spelling_at(index as i64 + semitones, true))
}
