//! Tests for reaction generation and fingerprinting.

use super::*;
use crate::chord::Chord;
use crate::environment::ChordRelationship;
use crate::rng::{seeded_source, RandomSource, SequenceSource};
use pretty_assertions::assert_eq;

fn reference(measures: u32) -> Phrase {
    let notes = (0..measures).map(|_| Note::new("C", 8).unwrap()).collect();
    Phrase::new(vec![Chord::parse("C_maj7", 8).unwrap()], notes, measures).unwrap()
}

fn two_five() -> Vec<Chord> {
    vec![
        Chord::parse("D_min7", 4).unwrap(),
        Chord::parse("G_7", 4).unwrap(),
    ]
}

fn env<'a>(phrase: &'a Phrase, chords: &'a [Chord]) -> Environment<'a> {
    Environment::new(phrase, vec![ChordRelationship::TwoFive; chords.len()], chords).unwrap()
}

#[test]
fn test_scripted_generation() {
    let phrase = reference(1);
    let chords = two_five();
    // (duration, pitch) pairs: (3, D), (4, F), (1, A)
    let mut source = SequenceSource::new(vec![3, 2, 4, 5, 1, 9]);
    let reaction = Reaction::generate(env(&phrase, &chords), &mut source).unwrap();

    let notes: Vec<String> = reaction
        .generated_phrase()
        .notes()
        .iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(notes, vec!["D:3", "F:4", "A:1"]);
    assert_eq!(reaction.fingerprint_text(), "D__F___A");
    assert_eq!(reaction.fingerprint(), fold_fingerprint("D__F___A"));
    assert_eq!(source.draws(), 6);
}

#[test]
fn test_final_duration_is_clamped_to_remaining() {
    let phrase = reference(1);
    let chords = two_five();
    // First note takes 7 beats; the script asks for 8 next but only 1 remains.
    let mut source = SequenceSource::new(vec![7, 0, 8, 2]);
    let reaction = Reaction::generate(env(&phrase, &chords), &mut source).unwrap();

    assert_eq!(reaction.fingerprint_text(), "C______D");
    assert_eq!(reaction.generated_phrase().total_beats(), 8);
}

/// Ignores the requested range entirely.
struct OutOfRangeSource(u32);

impl RandomSource for OutOfRangeSource {
    fn next_in_range(&mut self, _low: u32, _high: u32) -> u32 {
        self.0
    }
}

#[test]
fn test_out_of_range_draws_are_clamped() {
    let phrase = reference(2);
    let chords = two_five();

    let reaction = Reaction::generate(env(&phrase, &chords), &mut OutOfRangeSource(100)).unwrap();
    assert_eq!(reaction.generated_phrase().total_beats(), 16);
    assert_eq!(reaction.fingerprint_text(), "E_______E_______");

    let reaction = Reaction::generate(env(&phrase, &chords), &mut OutOfRangeSource(0)).unwrap();
    assert_eq!(reaction.generated_phrase().notes().len(), 16);
}

#[test]
fn test_whole_measure_note() {
    let phrase = reference(1);
    let chords = two_five();
    let mut source = SequenceSource::new(vec![8, 11]);
    let reaction = Reaction::generate(env(&phrase, &chords), &mut source).unwrap();

    assert_eq!(reaction.generated_phrase().notes(), &[Note::new("B", 8).unwrap()]);
}

#[test]
fn test_same_script_same_reaction() {
    let phrase = reference(2);
    let chords = two_five();
    let script = vec![2, 5, 6, 0, 1, 11, 3, 7, 8, 4];

    let a = Reaction::generate(env(&phrase, &chords), &mut SequenceSource::new(script.clone()))
        .unwrap();
    let b = Reaction::generate(env(&phrase, &chords), &mut SequenceSource::new(script)).unwrap();

    assert_eq!(a.generated_phrase().notes(), b.generated_phrase().notes());
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.content_hash(), b.content_hash());
    assert!(a == b);
}

#[test]
fn test_same_seed_same_reaction() {
    let phrase = reference(4);
    let chords = two_five();

    let a = Reaction::generate(env(&phrase, &chords), &mut seeded_source(99)).unwrap();
    let b = Reaction::generate(env(&phrase, &chords), &mut seeded_source(99)).unwrap();

    assert!(a == b);
    assert_eq!(a.summary(), b.summary());
}

#[test]
fn test_budget_met_for_all_measure_counts() {
    let chords = two_five();
    for measures in 1..=8 {
        let phrase = reference(measures);
        for seed in 0..50 {
            let mut source = SequenceSource::new(Vec::<u32>::new());
            let reaction = Reaction::generate(env(&phrase, &chords), &mut seeded_source(seed))
                .unwrap_or_else(|e| panic!("seed {} measures {}: {}", seed, measures, e));
            assert_eq!(reaction.generated_phrase().total_beats(), 8 * measures);
            assert_eq!(reaction.generated_phrase().measure_count(), measures);
            assert!(reaction.generated_phrase().notes().len() <= (8 * measures) as usize);

            // All-minimum draws produce the longest possible phrase.
            let longest = Reaction::generate(env(&phrase, &chords), &mut source).unwrap();
            assert_eq!(longest.generated_phrase().notes().len(), (8 * measures) as usize);
            assert_eq!(source.draws(), 2 * (8 * measures) as usize);
        }
    }
}

#[test]
fn test_generated_phrase_uses_current_chords() {
    let phrase = reference(1);
    let chords = two_five();
    let reaction = Reaction::generate(env(&phrase, &chords), &mut seeded_source(3)).unwrap();

    assert_eq!(reaction.generated_phrase().chords(), chords.as_slice());
    assert_eq!(reaction.environment().current_chords().len(), 2);
    assert_eq!(
        reaction.environment().reference_phrase().chords()[0].identifier(),
        "C_maj7"
    );
}

#[test]
fn test_equality_ignores_environment() {
    let phrase_a = reference(1);
    let phrase_b = Phrase::single_measure(
        vec![Chord::parse("F_maj", 8).unwrap()],
        vec![Note::new("F", 4).unwrap(), Note::new("A", 4).unwrap()],
    )
    .unwrap();
    let chords = vec![Chord::parse("A_min7", 8).unwrap()];

    let env_a = Environment::new(&phrase_a, vec![ChordRelationship::Relative], &chords).unwrap();
    let env_b = Environment::new(&phrase_b, vec![ChordRelationship::NearKey], &chords).unwrap();

    let a = Reaction::generate(env_a, &mut SequenceSource::new(vec![4, 9, 4, 0])).unwrap();
    let b = Reaction::generate(env_b, &mut SequenceSource::new(vec![4, 9, 4, 0])).unwrap();
    assert!(a == b);
}

#[test]
fn test_different_chords_not_equal() {
    let phrase = reference(1);
    let chords_a = vec![Chord::parse("A_min7", 8).unwrap()];
    let chords_b = vec![Chord::parse("A_min6", 8).unwrap()];

    let a = Reaction::generate(env(&phrase, &chords_a), &mut SequenceSource::new(vec![8, 9]))
        .unwrap();
    let b = Reaction::generate(env(&phrase, &chords_b), &mut SequenceSource::new(vec![8, 9]))
        .unwrap();

    assert_eq!(a.fingerprint(), b.fingerprint());
    assert!(a != b);
}

#[test]
fn test_default_source_generation() {
    let phrase = reference(2);
    let chords = two_five();
    let reaction = Reaction::new(env(&phrase, &chords)).unwrap();
    assert_eq!(reaction.generated_phrase().total_beats(), 16);
}

#[test]
fn test_summary() {
    let phrase = reference(1);
    let chords = two_five();
    let reaction =
        Reaction::generate(env(&phrase, &chords), &mut SequenceSource::new(vec![6, 1, 2, 10]))
            .unwrap();

    let summary = reaction.summary();
    assert_eq!(summary.chords, vec!["D_min7", "G_7"]);
    assert_eq!(summary.notes, vec!["C#:6", "A#:2"]);
    assert_eq!(summary.measure_count, 1);
    assert_eq!(summary.fingerprint_text, "C#_____A#_");
    assert_eq!(summary.content_hash.len(), 64);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["fingerprint"], reaction.fingerprint());
}
