//! Harmonic context for generation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chord::Chord;
use crate::error::{HarmonyError, HarmonyResult};
use crate::phrase::Phrase;

/// How a current chord relates to the harmony that preceded it.
///
/// Supplied by the caller; never inferred from the chords themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChordRelationship {
    /// ii-V motion.
    TwoFive,
    /// Relative major/minor.
    Relative,
    /// Same chord.
    Same,
    /// Subdominant minor.
    SubMinor,
    /// Closely related key.
    NearKey,
    /// No particular relationship.
    None,
}

impl ChordRelationship {
    pub const ALL: [ChordRelationship; 6] = [
        ChordRelationship::TwoFive,
        ChordRelationship::Relative,
        ChordRelationship::Same,
        ChordRelationship::SubMinor,
        ChordRelationship::NearKey,
        ChordRelationship::None,
    ];

    /// Returns the tag used in documents and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChordRelationship::TwoFive => "twoFive",
            ChordRelationship::Relative => "relative",
            ChordRelationship::Same => "same",
            ChordRelationship::SubMinor => "subMinor",
            ChordRelationship::NearKey => "nearKey",
            ChordRelationship::None => "none",
        }
    }
}

impl fmt::Display for ChordRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChordRelationship {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChordRelationship::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| HarmonyError::UnknownRelationship { tag: s.to_string() })
    }
}

/// The context a reaction is generated against.
///
/// Borrows the reference phrase and current chords from the caller; one
/// relationship is held per current chord.
#[derive(Debug, Clone, Serialize)]
pub struct Environment<'a> {
    reference_phrase: &'a Phrase,
    current_chords: &'a [Chord],
    relationships: Vec<ChordRelationship>,
}

impl<'a> Environment<'a> {
    /// Creates an environment.
    ///
    /// Fails unless there is exactly one relationship per current chord.
    pub fn new(
        reference_phrase: &'a Phrase,
        relationships: Vec<ChordRelationship>,
        current_chords: &'a [Chord],
    ) -> HarmonyResult<Self> {
        if relationships.len() != current_chords.len() {
            return Err(HarmonyError::RelationshipCountMismatch {
                relationships: relationships.len(),
                chords: current_chords.len(),
            });
        }

        Ok(Self {
            reference_phrase,
            current_chords,
            relationships,
        })
    }

    pub fn reference_phrase(&self) -> &'a Phrase {
        self.reference_phrase
    }

    pub fn current_chords(&self) -> &'a [Chord] {
        self.current_chords
    }

    pub fn relationships(&self) -> &[ChordRelationship] {
        &self.relationships
    }

    /// Each current chord with its relationship.
    pub fn pairs(&self) -> impl Iterator<Item = (&'a Chord, ChordRelationship)> + '_ {
        self.current_chords
            .iter()
            .zip(self.relationships.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Note;

    fn reference() -> Phrase {
        Phrase::single_measure(
            vec![Chord::parse("C_maj7", 8).unwrap()],
            vec![Note::new("C", 4).unwrap(), Note::new("E", 4).unwrap()],
        )
        .unwrap()
    }

    #[test]
    fn test_matching_counts() {
        let phrase = reference();
        let chords = vec![
            Chord::parse("D_min7", 4).unwrap(),
            Chord::parse("G_7", 4).unwrap(),
        ];
        let env = Environment::new(
            &phrase,
            vec![ChordRelationship::TwoFive, ChordRelationship::TwoFive],
            &chords,
        )
        .unwrap();

        assert_eq!(env.current_chords().len(), 2);
        assert_eq!(env.reference_phrase().measure_count(), 1);
        let pairs: Vec<_> = env.pairs().map(|(c, r)| (c.identifier(), r)).collect();
        assert_eq!(
            pairs,
            vec![
                ("D_min7".to_string(), ChordRelationship::TwoFive),
                ("G_7".to_string(), ChordRelationship::TwoFive),
            ]
        );
    }

    #[test]
    fn test_count_mismatch() {
        let phrase = reference();
        let chords = vec![
            Chord::parse("D_min7", 4).unwrap(),
            Chord::parse("G_7", 4).unwrap(),
        ];
        let result = Environment::new(&phrase, vec![ChordRelationship::Same], &chords);
        assert!(matches!(
            result,
            Err(HarmonyError::RelationshipCountMismatch {
                relationships: 1,
                chords: 2
            })
        ));
    }

    #[test]
    fn test_empty_environment() {
        let phrase = reference();
        let env = Environment::new(&phrase, vec![], &[]).unwrap();
        assert_eq!(env.pairs().count(), 0);
    }

    #[test]
    fn test_relationship_tags() {
        for relationship in ChordRelationship::ALL {
            let parsed: ChordRelationship = relationship.as_str().parse().unwrap();
            assert_eq!(parsed, relationship);
        }
        assert!(matches!(
            "farAway".parse::<ChordRelationship>(),
            Err(HarmonyError::UnknownRelationship { .. })
        ));
    }

    #[test]
    fn test_relationship_serde_uses_tags() {
        let json = serde_json::to_string(&ChordRelationship::SubMinor).unwrap();
        assert_eq!(json, "\"subMinor\"");
        let parsed: ChordRelationship = serde_json::from_str("\"twoFive\"").unwrap();
        assert_eq!(parsed, ChordRelationship::TwoFive);
    }
}
