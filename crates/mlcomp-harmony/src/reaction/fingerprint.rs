//! Note-sequence fingerprints.
//!
//! Each note contributes its pitch spelling followed by `duration - 1` filler
//! characters, so a three-beat C becomes `"C__"`. The resulting text is folded
//! into an integer with `acc = acc * 10000 + char_code`. The fold wraps on
//! overflow. Since `10000^16` is a multiple of `2^64`, only the last 16
//! characters survive; equal note sequences still always produce equal
//! fingerprints.

use crate::note::Note;

/// Character padding each note out to its duration.
pub const FILLER: char = '_';

const FOLD_RADIX: u64 = 10_000;

/// Builds the fingerprint text for a note sequence.
pub fn fingerprint_text(notes: &[Note]) -> String {
    let mut text = String::new();
    for note in notes {
        text.push_str(note.pitch());
        text.extend(std::iter::repeat(FILLER).take(note.duration().saturating_sub(1) as usize));
    }
    text
}

/// Folds text into an integer, left to right, with wrapping arithmetic.
pub fn fold_fingerprint(text: &str) -> u64 {
    text.chars().fold(0u64, |acc, c| {
        acc.wrapping_mul(FOLD_RADIX).wrapping_add(c as u64)
    })
}
