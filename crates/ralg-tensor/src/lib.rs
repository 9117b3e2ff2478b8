//! # ralg-tensor — Radical Tensors
//!
//! Builds rank-N outer products of a radical set and resolves every cell.
//!
//! - **Tensor** (`tensor.rs`): [`Tensor`], a flat row-major arena of
//!   composition results that borrows its radical set.
//!
//! - **Generator** (`generator.rs`): [`TensorGenerator`], generic over any
//!   [`ralg_ids::Resolve`] implementation. Checks rank and size bounds
//!   before resolving anything.
//!
//! - **Commitment** (`commitment.rs`): [`TensorCommitment`], a SHA-256
//!   digest over the canonical serialization of a tensor.
//!
//! - **Engine** (`engine.rs`): [`Engine`], which loads every table named
//!   by an [`ralg_core::EngineConfig`] and exposes generation, resolution
//!   and table summaries.
//!
//! ## Example
//!
//! ```
//! use ralg_tensor::Engine;
//!
//! let engine = Engine::embedded()?;
//! let wu_xing = engine.radical_set("五行", "金木水火土")?;
//! let tensor = engine.generate(&wu_xing, 2)?;
//! assert_eq!(tensor.len(), 25);
//! assert_eq!(tensor.at(&[1, 1])?.character(), Some('林'));
//! # Ok::<(), ralg_core::RalgError>(())
//! ```

pub mod commitment;
pub mod engine;
pub mod generator;
pub mod tensor;

pub use commitment::TensorCommitment;
pub use engine::{Engine, TableSummary};
pub use generator::{cell_count, TensorGenerator};
pub use tensor::Tensor;
