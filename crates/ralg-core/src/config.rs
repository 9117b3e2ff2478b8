//! # Engine Configuration
//!
//! YAML configuration for the composition engine. Every field is optional
//! in the file; missing fields take the defaults below.
//!
//! ```yaml
//! max_cells: 1000000
//! oracle_table: data/oracle.json          # omit for the embedded table
//! decomposition_table: data/ids.txt       # omit for the embedded table
//! variant_table: data/variants.json       # omit for the embedded table
//! enabled_blocks:                         # omit to enable every block
//!   - CJK Unified Ideographs
//!   - CJK Unified Ideographs Extension A
//! ```
//!
//! Relative table paths are resolved against the directory containing the
//! configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default upper bound on `len^rank` for a single tensor.
pub const DEFAULT_MAX_CELLS: u64 = 1_000_000;

/// Smallest supported tensor rank.
pub const MIN_RANK: usize = 2;

/// Largest supported tensor rank.
pub const MAX_RANK: usize = 5;

/// Composition engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Upper bound on the number of cells a single tensor may have.
    pub max_cells: u64,
    /// Oracle table path; `None` uses the embedded table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_table: Option<PathBuf>,
    /// IDS decomposition table path; `None` uses the embedded table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decomposition_table: Option<PathBuf>,
    /// Component variant table path; `None` uses the embedded table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_table: Option<PathBuf>,
    /// Ideograph blocks to enable, by name; `None` enables all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_blocks: Option<Vec<String>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_cells: DEFAULT_MAX_CELLS,
            oracle_table: None,
            decomposition_table: None,
            variant_table: None,
            enabled_blocks: None,
        }
    }
}

impl EngineConfig {
    /// Parse a YAML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] for malformed YAML, unknown
    /// keys, a zero cell bound, or an empty `enabled_blocks` list.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, resolving relative table paths against
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            table: "engine configuration".to_string(),
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_yaml(&yaml)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        tracing::debug!(path = %path.display(), max_cells = config.max_cells, "loaded engine configuration");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cells == 0 {
            return Err(ConfigError::InvalidConfig(
                "max_cells must be greater than zero".into(),
            ));
        }
        if matches!(&self.enabled_blocks, Some(blocks) if blocks.is_empty()) {
            return Err(ConfigError::InvalidConfig(
                "enabled_blocks must name at least one block when present".into(),
            ));
        }
        Ok(())
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [
            &mut self.oracle_table,
            &mut self.decomposition_table,
            &mut self.variant_table,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
