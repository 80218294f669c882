//! The capability contract every searchable puzzle implements, and the
//! visited-set shared across one solve.

use std::collections::hash_set;
use std::collections::HashSet;
use std::fmt;

/// A full-information puzzle state.
///
/// Implementors are immutable snapshots: `extensions` builds fresh states and
/// never changes `self`. The solvers rely on these rules without checking them:
///
/// - `fingerprint` is deterministic, and two states share a fingerprint
///   exactly when they are equivalent.
/// - `fail_fast` is sound. It may miss dead ends but must never return
///   `true` for a state from which a solved state is reachable.
/// - `extensions` is finite and never contains `self`.
pub trait Puzzle: fmt::Display + Sized {
    /// Canonical identity used for deduplication. Defaults to the `Display`
    /// rendering.
    fn fingerprint(&self) -> String {
        self.to_string()
    }

    /// Whether this state is a solution.
    fn is_solved(&self) -> bool;

    /// Whether this state can be discarded without looking at its extensions.
    fn fail_fast(&self) -> bool;

    /// Every state one legal move away, in no particular order.
    fn extensions(&self) -> Vec<Self>;
}

/// Fingerprints of states already explored, or forbidden by the caller.
///
/// A pre-populated set excludes those states from any returned path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Seen {
    fingerprints: HashSet<String>,
}

impl Seen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set pre-seeded with forbidden fingerprints
    pub fn with_fingerprints<I, S>(fingerprints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fingerprints: fingerprints.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, fingerprint: &str) -> bool {
        self.fingerprints.contains(fingerprint)
    }

    /// Mark a fingerprint visited. Returns `true` if it was not already present.
    pub fn mark(&mut self, fingerprint: impl Into<String>) -> bool {
        self.fingerprints.insert(fingerprint.into())
    }

    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, String> {
        self.fingerprints.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for Seen {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::with_fingerprints(iter)
    }
}

impl<'a> IntoIterator for &'a Seen {
    type Item = &'a String;
    type IntoIter = hash_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
