//! Duplicate filtering across repeated generations.

use std::collections::HashSet;

use crate::environment::Environment;
use crate::error::{HarmonyError, HarmonyResult};
use crate::reaction::Reaction;
use crate::rng::RandomSource;

/// Remembers the content digests of reactions seen so far.
///
/// Keyed on [`Reaction::content_digest`] rather than the folded fingerprint,
/// which only reflects the tail of a long phrase. Meant for takes generated
/// over one environment, where every take shares the same chords.
#[derive(Debug, Clone, Default)]
pub struct DuplicateFilter {
    seen: HashSet<blake3::Hash>,
}

impl DuplicateFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the reaction, returning false if its notes were already seen.
    pub fn admit(&mut self, reaction: &Reaction<'_>) -> bool {
        self.seen.insert(reaction.content_digest())
    }

    pub fn contains(&self, reaction: &Reaction<'_>) -> bool {
        self.seen.contains(&reaction.content_digest())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Generates up to `count` distinct reactions, drawing from one source.
///
/// Stops after `max_attempts` generations; fails with
/// [`HarmonyError::AttemptsExhausted`] if fewer than `count` distinct
/// reactions were found by then.
pub fn generate_distinct<'a, S>(
    environment: &Environment<'a>,
    source: &mut S,
    count: usize,
    max_attempts: u32,
) -> HarmonyResult<Vec<Reaction<'a>>>
where
    S: RandomSource + ?Sized,
{
    collect_distinct(count, max_attempts, |_| Reaction::generate(environment.clone(), &mut *source))
}

/// Runs `attempt` with indices `0..max_attempts` until `count` distinct
/// reactions have been collected.
///
/// Errors from `attempt` are returned immediately.
pub fn collect_distinct<'a, F>(
    count: usize,
    max_attempts: u32,
    mut attempt: F,
) -> HarmonyResult<Vec<Reaction<'a>>>
where
    F: FnMut(u32) -> HarmonyResult<Reaction<'a>>,
{
    let mut filter = DuplicateFilter::new();
    let mut reactions = Vec::with_capacity(count);
    let mut attempts = 0;

    while reactions.len() < count && attempts < max_attempts {
        let reaction = attempt(attempts)?;
        attempts += 1;
        if filter.admit(&reaction) {
            reactions.push(reaction);
        }
    }

    if reactions.len() < count {
        return Err(HarmonyError::AttemptsExhausted {
            wanted: count,
            found: reactions.len(),
            attempts,
        });
    }
    Ok(reactions)
}
