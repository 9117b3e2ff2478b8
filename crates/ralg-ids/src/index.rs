//! # Decomposition Index
//!
//! Inverts the decomposition table so that compounds can be found from
//! their components. Built once; read-only afterwards.
//!
//! Every entry is indexed under:
//!
//! - its **sequence key**: the leaf components in reading order, variants
//!   folded (`⿰氵金` → `[水, 金]`);
//! - its **expanded sequence key**, when different: each component that has
//!   a decomposition of its own is replaced by that decomposition's
//!   expansion (`⿱金鍂` → `[金, 金, 金]`);
//! - its folded IDS string, for exact lookups;
//! - the sorted forms of both sequence keys, for multiset lookups.
//!
//! Expansion follows each component's first decomposition in table order,
//! stops at [`MAX_EXPANSION_DEPTH`], and never re-enters a character
//! already being expanded.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use ralg_core::{sha256_digest, CanonicalBytes, ConfigError, ContentDigest};
use serde::Serialize;

use crate::ids::IdsNode;
use crate::table::{DecompositionEntry, DecompositionTable};
use crate::variant::VariantTable;

/// Recursion limit for component expansion.
pub const MAX_EXPANSION_DEPTH: usize = 8;

/// Component-to-compound lookup structure.
#[derive(Debug, Clone)]
pub struct DecompositionIndex {
    entries: Vec<DecompositionEntry>,
    variants: VariantTable,
    by_sequence: HashMap<Vec<char>, Vec<usize>>,
    by_ids: HashMap<String, Vec<usize>>,
    by_components: HashMap<Vec<char>, Vec<usize>>,
    by_composition: HashMap<Vec<char>, Vec<usize>>,
    primary: HashMap<char, usize>,
    table_digest: ContentDigest,
}

/// Identity of the data an index was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexFingerprint {
    /// Digest of the decomposition table source.
    pub decomposition: ContentDigest,
    /// Digest of the variant folding map.
    pub variants: ContentDigest,
}

impl DecompositionIndex {
    /// Index every entry of `table`, folding components through `variants`.
    pub fn build(table: &DecompositionTable, variants: VariantTable) -> Self {
        let entries = table.entries().to_vec();

        let mut primary = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            primary.entry(entry.character).or_insert(i);
        }

        let mut index = Self {
            entries,
            variants,
            by_sequence: HashMap::new(),
            by_ids: HashMap::new(),
            by_components: HashMap::new(),
            by_composition: HashMap::new(),
            primary,
            table_digest: table.digest(),
        };

        let mut expanded_keys = 0usize;
        for i in 0..index.entries.len() {
            let entry = &index.entries[i];
            let written = index.fold_all(&entry.ids.leaves());
            let mut stack = vec![entry.character];
            let expanded = index.expand_components(&written, 0, &mut stack);
            let ids_key = index.fold_ids(&entry.ids);

            push_unique(&mut index.by_sequence, written.clone(), i);
            if expanded != written {
                expanded_keys += 1;
                push_unique(&mut index.by_sequence, expanded.clone(), i);
            }
            push_unique(&mut index.by_ids, ids_key, i);
            push_unique(&mut index.by_components, sorted(written), i);
            push_unique(&mut index.by_composition, sorted(expanded), i);
        }

        tracing::debug!(
            entries = index.entries.len(),
            characters = index.primary.len(),
            sequence_keys = index.by_sequence.len(),
            expanded_keys,
            "built decomposition index"
        );
        index
    }

    /// Index built from the embedded decomposition and variant tables.
    pub fn embedded() -> Result<Self, ConfigError> {
        let table = DecompositionTable::embedded()?;
        let variants = VariantTable::embedded()?;
        Ok(Self::build(&table, variants))
    }

    /// Fold a single component onto its base form.
    pub fn fold(&self, c: char) -> char {
        self.variants.fold(c)
    }

    fn fold_all(&self, components: &[char]) -> Vec<char> {
        components.iter().map(|&c| self.fold(c)).collect()
    }

    fn fold_ids(&self, ids: &IdsNode) -> String {
        ids.map_leaves(&|c| self.variants.fold(c)).render()
    }

    fn expand_components(
        &self,
        components: &[char],
        depth: usize,
        stack: &mut Vec<char>,
    ) -> Vec<char> {
        let mut out = Vec::with_capacity(components.len());
        for &c in components {
            let decomposition = self.primary.get(&c).map(|&i| &self.entries[i]);
            match decomposition {
                Some(entry) if depth < MAX_EXPANSION_DEPTH && !stack.contains(&c) => {
                    stack.push(c);
                    let leaves = self.fold_all(&entry.ids.leaves());
                    out.extend(self.expand_components(&leaves, depth + 1, stack));
                    stack.pop();
                }
                _ => out.push(c),
            }
        }
        out
    }

    /// Fully expanded, folded component sequence of `c`.
    ///
    /// An atomic component expands to itself.
    pub fn expand(&self, c: char) -> Vec<char> {
        let mut stack = Vec::new();
        self.expand_components(&[self.fold(c)], 0, &mut stack)
    }

    /// Entries whose sequence key equals the folded `components`, one per
    /// character, in table order.
    pub fn candidates(&self, components: &[char]) -> Vec<&DecompositionEntry> {
        let key = self.fold_all(components);
        let mut seen = HashSet::new();
        self.by_sequence
            .get(&key)
            .into_iter()
            .flatten()
            .map(|&i| &self.entries[i])
            .filter(|e| seen.insert(e.character))
            .collect()
    }

    /// Characters whose IDS is exactly `ids`, after variant folding.
    ///
    /// An unparseable `ids` matches nothing.
    pub fn lookup_by_ids(&self, ids: &str) -> BTreeSet<char> {
        let Ok(node) = IdsNode::parse(ids) else {
            return BTreeSet::new();
        };
        self.characters_at(self.by_ids.get(&self.fold_ids(&node)))
    }

    /// Characters whose written components equal `components` as a
    /// multiset.
    pub fn lookup_by_components(&self, components: &[char]) -> BTreeSet<char> {
        let key = sorted(self.fold_all(components));
        self.characters_at(self.by_components.get(&key))
    }

    /// Characters whose fully expanded components have exactly `counts`.
    ///
    /// Zero counts are ignored.
    pub fn lookup_by_composition(&self, counts: &BTreeMap<char, usize>) -> BTreeSet<char> {
        let mut key: Vec<char> = counts
            .iter()
            .flat_map(|(&c, &n)| std::iter::repeat(self.fold(c)).take(n))
            .collect();
        key.sort_unstable();
        self.characters_at(self.by_composition.get(&key))
    }

    fn characters_at(&self, hits: Option<&Vec<usize>>) -> BTreeSet<char> {
        hits.into_iter()
            .flatten()
            .map(|&i| self.entries[i].character)
            .collect()
    }

    /// All decompositions of `c` in table order.
    pub fn decompositions_of(&self, c: char) -> impl Iterator<Item = &DecompositionEntry> {
        self.entries.iter().filter(move |e| e.character == c)
    }

    /// Number of indexed decompositions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct described characters.
    pub fn character_count(&self) -> usize {
        self.primary.len()
    }

    /// Number of variants folded before keying.
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Digests of the source tables.
    pub fn fingerprint(&self) -> IndexFingerprint {
        IndexFingerprint {
            decomposition: self.table_digest,
            variants: self.variants.digest(),
        }
    }

    /// Single digest covering both source tables.
    pub fn digest(&self) -> Result<ContentDigest, ralg_core::CanonicalizationError> {
        Ok(sha256_digest(&CanonicalBytes::new(&self.fingerprint())?))
    }
}

fn push_unique<K: std::hash::Hash + Eq>(map: &mut HashMap<K, Vec<usize>>, key: K, i: usize) {
    let slot = map.entry(key).or_default();
    if !slot.contains(&i) {
        slot.push(i);
    }
}

fn sorted(mut v: Vec<char>) -> Vec<char> {
    v.sort_unstable();
    v
}
