//! # ralg-ids — Ideographic Description Sequences and Composition
//!
//! Turns decomposition data into a composition lookup:
//!
//! - **IDS** (`ids.rs`): the twelve description operators and a
//!   prefix-notation parser producing [`IdsNode`] trees.
//!
//! - **Structures** (`structure.rs`): enumeration and counting of IDS
//!   shapes over `n` slots.
//!
//! - **Tables** (`table.rs`, `variant.rs`): the cjkvi-ids decomposition
//!   table and the component-variant folding map, both embedded by default
//!   and loadable from files.
//!
//! - **Index** (`index.rs`): [`DecompositionIndex`], keyed by ordered
//!   component sequence, expanded sequence, exact IDS and multiset.
//!
//! - **Resolver** (`resolver.rs`): [`CompositionResolver`] applies the
//!   oracle and the tie-break rule behind the [`Resolve`] trait.
//!
//! ## Crate Policy
//!
//! - Depends only on `ralg-core` internally.
//! - Tables are fully validated at load; lookups never fail.

pub mod ids;
pub mod index;
pub mod resolver;
pub mod structure;
pub mod table;
pub mod variant;

pub use ids::{IdsNode, IdsOperator, MAX_IDS_DEPTH};
pub use index::{DecompositionIndex, IndexFingerprint, MAX_EXPANSION_DEPTH};
pub use resolver::{CompositionResolver, CompositionResult, Resolve};
pub use structure::{enumerate_structures, structure_count, IdsStructure, MAX_ENUMERATED_SLOTS};
pub use table::{DecompositionEntry, DecompositionTable, EMBEDDED_IDS_TABLE};
pub use variant::{VariantTable, EMBEDDED_VARIANT_TABLE};
