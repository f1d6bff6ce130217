//! Phrase generation against a harmonic context.
//!
//! A [`Reaction`] is a freshly generated phrase that fills the same beat
//! budget as the environment's reference phrase and is laid over the
//! environment's current chords. Pitches and durations are sampled
//! uniformly; there is no learned model behind the draws.
//!
//! # Termination
//!
//! Each duration is drawn from `1..=min(MAX_NOTE_BEATS, beats_remaining)`,
//! so the final note always lands exactly on the budget and generation takes
//! at most `BEATS_PER_MEASURE * measure_count` iterations. Draws outside the
//! requested range are clamped back into it.

use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::environment::Environment;
use crate::error::HarmonyResult;
use crate::note::Note;
use crate::phrase::Phrase;
use crate::pitch::{self, PITCH_CLASS_COUNT};
use crate::rng::{default_source, RandomSource};

mod fingerprint;

pub use fingerprint::{fingerprint_text, fold_fingerprint, FILLER};

/// Longest note the generator will draw, in beats.
pub const MAX_NOTE_BEATS: u32 = 8;

/// A generated phrase and the context it was generated for.
///
/// Two reactions are equal when their generated notes and chords match;
/// the environment and fingerprint are not compared.
#[derive(Debug, Clone)]
pub struct Reaction<'a> {
    generated_phrase: Phrase,
    environment: Environment<'a>,
    fingerprint: u64,
}

impl<'a> Reaction<'a> {
    /// Generates a reaction using the process-wide default random source.
    pub fn new(environment: Environment<'a>) -> HarmonyResult<Self> {
        Self::generate(environment, &mut default_source())
    }

    /// Generates a reaction, drawing every random number from `source`.
    ///
    /// For each note the duration is drawn first, then the pitch.
    ///
    /// # Examples
    /// ```
    /// use mlcomp_harmony::rng::SequenceSource;
    /// use mlcomp_harmony::{Chord, ChordRelationship, Environment, Note, Phrase, Reaction};
    ///
    /// let reference = Phrase::single_measure(
    ///     vec![Chord::parse("C_maj7", 8).unwrap()],
    ///     vec![Note::new("C", 8).unwrap()],
    /// )
    /// .unwrap();
    /// let chords = vec![Chord::parse("A_min7", 8).unwrap()];
    /// let env = Environment::new(&reference, vec![ChordRelationship::Relative], &chords).unwrap();
    ///
    /// // Durations 5 then 3, pitches E (4) then G (7).
    /// let mut source = SequenceSource::new(vec![5, 4, 3, 7]);
    /// let reaction = Reaction::generate(env, &mut source).unwrap();
    /// assert_eq!(reaction.fingerprint_text(), "E____G__");
    /// ```
    pub fn generate<S>(environment: Environment<'a>, source: &mut S) -> HarmonyResult<Self>
    where
        S: RandomSource + ?Sized,
    {
        let reference = environment.reference_phrase();
        let measure_count = reference.measure_count();
        let notes = draw_notes(reference.beat_budget(), source)?;

        let generated_phrase =
            Phrase::new(environment.current_chords().to_vec(), notes, measure_count)?;
        let fingerprint = fold_fingerprint(&fingerprint_text(generated_phrase.notes()));

        Ok(Self {
            generated_phrase,
            environment,
            fingerprint,
        })
    }

    pub fn generated_phrase(&self) -> &Phrase {
        &self.generated_phrase
    }

    pub fn environment(&self) -> &Environment<'a> {
        &self.environment
    }

    /// Folded fingerprint of the generated notes.
    ///
    /// The fold wraps, and each step multiplies by `2^4 * 625`, so only the
    /// last 16 characters of the fingerprint text affect it. Use
    /// [`Reaction::content_digest`] to tell longer phrases apart.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// The character stream the fingerprint is folded from.
    pub fn fingerprint_text(&self) -> String {
        fingerprint_text(self.generated_phrase.notes())
    }

    /// BLAKE3 digest of the fingerprint text.
    pub fn content_digest(&self) -> blake3::Hash {
        blake3::hash(self.fingerprint_text().as_bytes())
    }

    /// BLAKE3 hex digest of the fingerprint text.
    pub fn content_hash(&self) -> String {
        self.content_digest().to_hex().to_string()
    }

    /// Serializable view of the generated phrase.
    pub fn summary(&self) -> ReactionSummary {
        ReactionSummary {
            chords: self
                .generated_phrase
                .chords()
                .iter()
                .map(|c| c.identifier())
                .collect(),
            notes: self
                .generated_phrase
                .notes()
                .iter()
                .map(|n| n.to_string())
                .collect(),
            measure_count: self.generated_phrase.measure_count(),
            fingerprint: self.fingerprint,
            fingerprint_text: self.fingerprint_text(),
            content_hash: self.content_hash(),
        }
    }
}

/// Fills `budget` beats with uniformly drawn notes.
fn draw_notes<S>(budget: u32, source: &mut S) -> HarmonyResult<Vec<Note>>
where
    S: RandomSource + ?Sized,
{
    let mut remaining = budget;
    let mut notes = Vec::new();
    while remaining > 0 {
        let longest = MAX_NOTE_BEATS.min(remaining);
        let duration = source.next_in_range(1, longest).clamp(1, longest);
        let pitch_index = source.next_in_range(0, PITCH_CLASS_COUNT as u32 - 1);
        notes.push(Note::new(
            pitch::spelling_at(pitch_index as i64, true),
            duration,
        )?);
        remaining -= duration;
    }
    Ok(notes)
}

impl PartialEq for Reaction<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.generated_phrase.notes() == other.generated_phrase.notes()
            && self.generated_phrase.chords() == other.generated_phrase.chords()
    }
}

impl Eq for Reaction<'_> {}

impl Hash for Reaction<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.generated_phrase.notes().hash(state);
        self.generated_phrase.chords().hash(state);
    }
}

/// Host-facing summary of a reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionSummary {
    /// Chord identifiers of the generated phrase.
    pub chords: Vec<String>,
    /// Notes as `<pitch>:<duration>`.
    pub notes: Vec<String>,
    pub measure_count: u32,
    pub fingerprint: u64,
    pub fingerprint_text: String,
    /// BLAKE3 hex digest of `fingerprint_text`.
    pub content_hash: String,
}

#[cfg(test)]
mod tests;
