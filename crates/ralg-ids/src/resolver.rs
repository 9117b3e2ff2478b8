//! # Composition Resolver
//!
//! Maps an ordered tuple of radicals to the compound character they form.
//!
//! ## Selection Rule
//!
//! 1. Fold the radicals through the variant table and look the sequence up
//!    in the [`DecompositionIndex`].
//! 2. Drop candidates the oracle does not accept (not a valid ideograph in
//!    an enabled block, or a simplified form). Dropped candidates are kept
//!    in [`CompositionResult::rejected`].
//! 3. Order the rest by block priority, then code point. The first one is
//!    the result.
//!
//! No candidates, or none accepted, is `found = false`. Lookup misses are
//! never errors.

use ralg_core::{CharacterOracle, IdeographOracle, Radical};
use serde::Serialize;

use crate::index::DecompositionIndex;

/// Outcome of resolving one coordinate tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CompositionResult {
    coordinates: Vec<Radical>,
    character: Option<char>,
    found: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    candidates: Vec<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ids: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rejected: Vec<char>,
}

impl CompositionResult {
    /// A miss for `coordinates`.
    pub fn not_found(coordinates: Vec<Radical>) -> Self {
        Self {
            coordinates,
            character: None,
            found: false,
            candidates: Vec::new(),
            ids: None,
            rejected: Vec::new(),
        }
    }

    /// A hit with a single candidate.
    pub fn found(coordinates: Vec<Radical>, character: char, ids: Option<String>) -> Self {
        Self {
            coordinates,
            character: Some(character),
            found: true,
            candidates: vec![character],
            ids,
            rejected: Vec::new(),
        }
    }

    /// The radical tuple that was resolved.
    pub fn coordinates(&self) -> &[Radical] {
        &self.coordinates
    }

    /// The selected character, if any.
    pub fn character(&self) -> Option<char> {
        self.character
    }

    /// True iff a character was selected.
    pub fn is_found(&self) -> bool {
        self.found
    }

    /// Every accepted candidate in selection order.
    pub fn candidates(&self) -> &[char] {
        &self.candidates
    }

    /// IDS of the decomposition that produced the selected character.
    pub fn ids(&self) -> Option<&str> {
        self.ids.as_deref()
    }

    /// Candidates the oracle refused.
    pub fn rejected(&self) -> &[char] {
        &self.rejected
    }
}

/// Resolves a radical tuple to a composition result.
pub trait Resolve: Send + Sync {
    /// Resolve one ordered tuple. Total: misses are `found = false`.
    fn resolve(&self, radicals: &[Radical]) -> CompositionResult;
}

impl<R: Resolve + ?Sized> Resolve for &R {
    fn resolve(&self, radicals: &[Radical]) -> CompositionResult {
        (**self).resolve(radicals)
    }
}

/// Index-backed resolver filtered through a validity oracle.
#[derive(Debug, Clone)]
pub struct CompositionResolver<O = CharacterOracle> {
    oracle: O,
    index: DecompositionIndex,
}

impl<O: IdeographOracle> CompositionResolver<O> {
    /// Combine an oracle and an index.
    pub fn new(oracle: O, index: DecompositionIndex) -> Self {
        Self { oracle, index }
    }

    /// The validity oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// The decomposition index.
    pub fn index(&self) -> &DecompositionIndex {
        &self.index
    }
}

impl<O: IdeographOracle> Resolve for CompositionResolver<O> {
    fn resolve(&self, radicals: &[Radical]) -> CompositionResult {
        let components: Vec<char> = radicals.iter().map(|r| r.as_char()).collect();
        let (mut accepted, rejected): (Vec<_>, Vec<_>) = self
            .index
            .candidates(&components)
            .into_iter()
            .partition(|entry| self.oracle.is_accepted(entry.character));

        accepted.sort_by_key(|entry| {
            (
                self.oracle.block_priority(entry.character).unwrap_or(usize::MAX),
                entry.character,
            )
        });

        let rejected: Vec<char> = rejected.into_iter().map(|e| e.character).collect();
        if !rejected.is_empty() {
            tracing::trace!(?components, ?rejected, "oracle rejected candidates");
        }

        let Some(winner) = accepted.first() else {
            return CompositionResult {
                rejected,
                ..CompositionResult::not_found(radicals.to_vec())
            };
        };
        CompositionResult {
            coordinates: radicals.to_vec(),
            character: Some(winner.character),
            found: true,
            candidates: accepted.iter().map(|e| e.character).collect(),
            ids: Some(winner.ids.render()),
            rejected,
        }
    }
}
