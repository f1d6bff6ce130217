//! mlcomp Harmony Library
//!
//! Elementary tonal-harmony objects and a constrained-random melody generator.
//!
//! # Overview
//!
//! - Chords are named `<root>_<quality>` (`"C_maj7"`, `"F#_min7"`, `"Bb_dim"`)
//!   and derive their chord tones and tensions from a fixed quality table.
//! - A [`Phrase`] pairs chords with notes whose durations fill exactly
//!   [`BEATS_PER_MEASURE`] beats per measure.
//! - An [`Environment`] wraps a reference phrase with the chords to generate
//!   over and how each relates to the preceding harmony.
//! - A [`Reaction`] is a phrase generated for an environment, with a
//!   fingerprint for spotting repeated output.
//!
//! # Example
//!
//! ```
//! use mlcomp_harmony::rng::seeded_source;
//! use mlcomp_harmony::{Chord, ChordRelationship, Environment, Note, Phrase, Reaction};
//!
//! let reference = Phrase::single_measure(
//!     vec![Chord::parse("C_maj7", 8).unwrap()],
//!     vec![Note::new("C", 4).unwrap(), Note::new("E", 4).unwrap()],
//! )
//! .unwrap();
//! let chords = vec![Chord::parse("D_min7", 4).unwrap(), Chord::parse("G_7", 4).unwrap()];
//! let env = Environment::new(
//!     &reference,
//!     vec![ChordRelationship::TwoFive, ChordRelationship::TwoFive],
//!     &chords,
//! )
//! .unwrap();
//!
//! let reaction = Reaction::generate(env, &mut seeded_source(42)).unwrap();
//! assert_eq!(reaction.generated_phrase().total_beats(), 8);
//! ```
//!
//! # Modules
//!
//! - [`pitch`]: Twelve-tone spelling table
//! - [`note`]: Notes
//! - [`chord`]: Chord identifiers and the quality table
//! - [`phrase`]: Beat-budgeted phrases
//! - [`environment`]: Generation context and chord relationships
//! - [`rng`]: Injectable random sources
//! - [`reaction`]: Phrase generation and fingerprints
//! - [`novelty`]: Duplicate filtering across takes

pub mod chord;
pub mod environment;
pub mod error;
pub mod note;
pub mod novelty;
pub mod phrase;
pub mod pitch;
pub mod reaction;
pub mod rng;

// Re-export commonly used types at the crate root
pub use chord::{Chord, ChordQuality};
pub use environment::{ChordRelationship, Environment};
pub use error::{HarmonyError, HarmonyResult};
pub use note::Note;
pub use novelty::{collect_distinct, generate_distinct, DuplicateFilter};
pub use phrase::{Phrase, BEATS_PER_MEASURE, MAX_MEASURE_COUNT};
pub use reaction::{Reaction, ReactionSummary};
pub use rng::{RandomSource, RngSource, SequenceSource};
