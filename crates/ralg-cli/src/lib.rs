//! # ralg-cli — CLI for Radical Algebra
//!
//! Provides the `ralg` command-line interface over the composition engine.
//!
//! ## Subcommands
//!
//! - `ralg generate` — Generate a composition tensor and render it.
//! - `ralg resolve` — Resolve a single ordered tuple of radicals.
//! - `ralg structures` — Count IDS shapes and match them against the index.
//! - `ralg tables` — Show versions, sizes and digests of the loaded tables.
//!
//! ```bash
//! ralg generate --rank 3
//! ralg generate --radicals 日月 --format json
//! ralg resolve 火土
//! ralg structures 3 --radicals 金金金
//! ralg --config ralg.yaml tables
//! ```

pub mod generate;
pub mod render;
pub mod resolve;
pub mod structures;
pub mod tables;

use std::path::Path;

use anyhow::{Context, Result};
use ralg_core::EngineConfig;
use ralg_tensor::Engine;

/// Build the engine from `--config`, or from the embedded tables.
pub fn load_engine(config: Option<&Path>) -> Result<Engine> {
    let config = match config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => EngineConfig::default(),
    };
    Engine::from_config(&config).context("failed to load engine tables")
}
