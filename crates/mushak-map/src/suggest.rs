//! Closest-header suggestion by normalized edit distance.

use serde::{Deserialize, Serialize};

use crate::distance::levenshtein;
use crate::utils::normalize_header;

/// Headers within this many edits of a field name (after normalization)
/// are offered as suggestions.
pub const DEFAULT_MAX_DISTANCE: usize = 2;

/// Acceptance rule for fuzzy suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionPolicy {
    /// Largest accepted edit distance, inclusive.
    pub max_distance: usize,
}

impl SuggestionPolicy {
    #[must_use]
    pub const fn new(max_distance: usize) -> Self {
        Self { max_distance }
    }

    #[must_use]
    pub const fn accepts(&self, distance: usize) -> bool {
        distance <= self.max_distance
    }
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISTANCE)
    }
}

/// A candidate header and its distance from the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion<'a> {
    pub candidate: &'a str,
    pub distance: usize,
}

/// The closest candidate regardless of policy.
///
/// Ties keep the earliest candidate. Returns `None` for an empty list.
pub fn closest_candidate<'a, S: AsRef<str>>(
    target: &str,
    candidates: &'a [S],
) -> Option<Suggestion<'a>> {
    let target = normalize_header(target);
    let mut best: Option<Suggestion<'a>> = None;
    for candidate in candidates {
        let candidate = candidate.as_ref();
        let distance = levenshtein(&target, &normalize_header(candidate));
        if best.is_none_or(|current| distance < current.distance) {
            best = Some(Suggestion {
                candidate,
                distance,
            });
        }
    }
    best
}

/// The closest candidate if the policy accepts its distance.
pub fn suggest_with_distance<'a, S: AsRef<str>>(
    target: &str,
    candidates: &'a [S],
    policy: SuggestionPolicy,
) -> Option<Suggestion<'a>> {
    closest_candidate(target, candidates).filter(|best| policy.accepts(best.distance))
}

/// The accepted candidate header, if any.
pub fn suggest<'a, S: AsRef<str>>(
    target: &str,
    candidates: &'a [S],
    policy: SuggestionPolicy,
) -> Option<&'a str> {
    suggest_with_distance(target, candidates, policy).map(|best| best.candidate)
}
