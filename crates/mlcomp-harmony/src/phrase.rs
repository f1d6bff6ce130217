//! Phrases: notes laid over chords, filling an exact beat budget.

use serde::Serialize;

use crate::chord::Chord;
use crate::error::{HarmonyError, HarmonyResult};
use crate::note::Note;

/// Beats in one measure.
pub const BEATS_PER_MEASURE: u32 = 8;

/// Largest measure count whose beat budget fits in a `u32`.
pub const MAX_MEASURE_COUNT: u32 = u32::MAX / BEATS_PER_MEASURE;

/// An ordered run of notes spanning one or more measures.
///
/// The note durations always sum to exactly `BEATS_PER_MEASURE * measure_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phrase {
    chords: Vec<Chord>,
    notes: Vec<Note>,
    measure_count: u32,
}

impl Phrase {
    /// Creates a phrase, checking the beat budget.
    ///
    /// # Examples
    /// ```
    /// use mlcomp_harmony::{Chord, Note, Phrase};
    ///
    /// let chord = Chord::parse("C_maj7", 8).unwrap();
    /// let notes = vec![Note::new("C", 4).unwrap(), Note::new("E", 4).unwrap()];
    /// let phrase = Phrase::new(vec![chord], notes, 1).unwrap();
    /// assert_eq!(phrase.total_beats(), 8);
    /// ```
    pub fn new(chords: Vec<Chord>, notes: Vec<Note>, measure_count: u32) -> HarmonyResult<Self> {
        let expected = budget_for(measure_count)?;
        let actual: u64 = notes.iter().map(|n| u64::from(n.duration())).sum();
        if actual != u64::from(expected) {
            return Err(HarmonyError::BeatBudgetMismatch {
                expected: u64::from(expected),
                actual,
            });
        }

        Ok(Self {
            chords,
            notes,
            measure_count,
        })
    }

    /// Creates a one-measure phrase.
    pub fn single_measure(chords: Vec<Chord>, notes: Vec<Note>) -> HarmonyResult<Self> {
        Self::new(chords, notes, 1)
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn measure_count(&self) -> u32 {
        self.measure_count
    }

    /// Required total duration in beats.
    pub fn beat_budget(&self) -> u32 {
        BEATS_PER_MEASURE * self.measure_count
    }

    /// Sum of the note durations. Always equal to [`Phrase::beat_budget`].
    pub fn total_beats(&self) -> u32 {
        self.notes.iter().map(Note::duration).sum()
    }
}

/// Beat budget for `measure_count` measures.
///
/// Fails with `InvalidMeasureCount` for zero or for counts above
/// [`MAX_MEASURE_COUNT`].
pub fn budget_for(measure_count: u32) -> HarmonyResult<u32> {
    if measure_count == 0 {
        return Err(HarmonyError::InvalidMeasureCount {
            count: measure_count,
        });
    }
    BEATS_PER_MEASURE
        .checked_mul(measure_count)
        .ok_or(HarmonyError::InvalidMeasureCount {
            count: measure_count,
        })
}
