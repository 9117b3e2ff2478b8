//! # ralg-core — Foundational Types for Radical Algebra
//!
//! The leaf crate of the workspace. It defines the validated primitives
//! every other crate builds on, and depends on nothing internal.
//!
//! ## Contents
//!
//! - **Oracle** (`oracle.rs`): [`CharacterOracle`] answers "is this a CJK
//!   Unified Ideograph?" and "is this a simplified form?" from a static,
//!   versioned table. The [`IdeographOracle`] trait is the seam the
//!   resolver depends on.
//! - **Radicals** (`radical.rs`): [`Radical`] and [`RadicalSet`], validated
//!   at construction and immutable afterwards.
//! - **Configuration** (`config.rs`): [`EngineConfig`], loaded from YAML.
//! - **Fingerprints** (`canonical.rs`, `digest.rs`): [`CanonicalBytes`] and
//!   [`ContentDigest`] identify table versions and generated tensors.
//! - **Errors** (`error.rs`): the `thiserror` hierarchy rooted at
//!   [`RalgError`].
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Table loading fails at construction, never at query time.

pub mod canonical;
pub mod config;
pub mod digest;
pub mod error;
pub mod oracle;
pub mod presets;
pub mod radical;

pub use canonical::CanonicalBytes;
pub use config::{EngineConfig, DEFAULT_MAX_CELLS, MAX_RANK, MIN_RANK};
pub use digest::{sha256_digest, sha256_raw, ContentDigest};
pub use error::{
    CanonicalizationError, ConfigError, IdsError, RalgError, TensorError, ValidationError,
};
pub use oracle::{CharacterOracle, IdeographOracle, OracleTable, UnicodeBlock};
pub use radical::{Radical, RadicalSet};
