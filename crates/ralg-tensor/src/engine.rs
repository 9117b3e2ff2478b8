//! # Engine
//!
//! Loads the oracle, decomposition and variant tables described by an
//! [`EngineConfig`] and wires them into a [`TensorGenerator`]. Everything
//! is loaded once at construction; afterwards the engine is immutable and
//! can be shared across threads behind an `Arc`.

use ralg_core::oracle::EMBEDDED_ORACLE_TABLE;
use ralg_core::{
    presets, CanonicalizationError, CharacterOracle, ConfigError, EngineConfig,
    Radical, RadicalSet, TensorError, ValidationError,
};
use ralg_ids::{
    CompositionResolver, CompositionResult, DecompositionIndex, DecompositionTable, Resolve,
    VariantTable,
};
use serde::Serialize;

use crate::generator::TensorGenerator;
use crate::tensor::Tensor;

/// Fully loaded composition engine.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    generator: TensorGenerator<CompositionResolver>,
}

/// Versions and sizes of the loaded tables. Digests are rendered as
/// `sha256:<hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    /// Oracle table version string.
    pub oracle_version: String,
    /// Oracle table digest.
    pub oracle_digest: String,
    /// Names of the enabled ideograph blocks in priority order.
    pub enabled_blocks: Vec<String>,
    /// Size of the simplified exclusion list.
    pub simplified_forms: usize,
    /// Number of decompositions.
    pub decompositions: usize,
    /// Number of distinct decomposed characters.
    pub decomposed_characters: usize,
    /// Decomposition table digest.
    pub decomposition_digest: String,
    /// Number of component variants.
    pub variants: usize,
    /// Variant table digest.
    pub variant_digest: String,
    /// Digest covering the decomposition and variant tables together.
    pub index_digest: String,
    /// Configured cell limit.
    pub max_cells: u64,
}

impl Engine {
    /// Load every table named by `config`, falling back to the embedded
    /// tables for unset paths.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from reading or validating a table.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        let enabled = config.enabled_blocks.as_deref();
        let oracle = match &config.oracle_table {
            Some(path) => CharacterOracle::load(path, enabled)?,
            None => CharacterOracle::from_json(EMBEDDED_ORACLE_TABLE, enabled)?,
        };
        let table = match &config.decomposition_table {
            Some(path) => DecompositionTable::load(path)?,
            None => DecompositionTable::embedded()?,
        };
        let variants = match &config.variant_table {
            Some(path) => VariantTable::load(path)?,
            None => VariantTable::embedded()?,
        };
        let index = DecompositionIndex::build(&table, variants);
        let generator = TensorGenerator::new(CompositionResolver::new(oracle, index))
            .with_max_cells(config.max_cells);
        tracing::debug!(
            max_cells = config.max_cells,
            decompositions = table.len(),
            "engine ready"
        );
        Ok(Self {
            config: config.clone(),
            generator,
        })
    }

    /// Engine over the embedded tables with default limits.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_config(&EngineConfig::default())
    }

    /// The configuration the engine was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The validity oracle.
    pub fn oracle(&self) -> &CharacterOracle {
        self.generator.resolver().oracle()
    }

    /// The decomposition index.
    pub fn index(&self) -> &DecompositionIndex {
        self.generator.resolver().index()
    }

    /// The resolver.
    pub fn resolver(&self) -> &CompositionResolver {
        self.generator.resolver()
    }

    /// Validate a single radical.
    pub fn radical(&self, c: char) -> Result<Radical, ValidationError> {
        Radical::new(c, self.oracle())
    }

    /// Validate `chars` into a named radical set.
    pub fn radical_set(&self, name: &str, chars: &str) -> Result<RadicalSet, ValidationError> {
        RadicalSet::from_chars(name, chars.chars(), self.oracle())
    }

    /// A preset radical set by CLI name, if one exists.
    pub fn preset(&self, name: &str) -> Option<Result<RadicalSet, ValidationError>> {
        presets::by_name(name, self.oracle())
    }

    /// Resolve one ordered tuple.
    pub fn resolve(&self, radicals: &[Radical]) -> CompositionResult {
        self.generator.resolver().resolve(radicals)
    }

    /// Generate the rank-`rank` tensor over `radicals`.
    pub fn generate<'a>(
        &self,
        radicals: &'a RadicalSet,
        rank: usize,
    ) -> Result<Tensor<'a>, TensorError> {
        self.generator.generate(radicals, rank)
    }

    /// Versions, sizes and digests of the loaded tables.
    pub fn table_summary(&self) -> Result<TableSummary, CanonicalizationError> {
        let oracle = self.oracle();
        let index = self.index();
        let fingerprint = index.fingerprint();
        Ok(TableSummary {
            oracle_version: oracle.version().to_string(),
            oracle_digest: oracle.digest().to_string(),
            enabled_blocks: oracle.blocks().iter().map(|b| b.name.clone()).collect(),
            simplified_forms: oracle.simplified_count(),
            decompositions: index.len(),
            decomposed_characters: index.character_count(),
            decomposition_digest: fingerprint.decomposition.to_string(),
            variants: index.variant_count(),
            variant_digest: fingerprint.variants.to_string(),
            index_digest: index.digest()?.to_string(),
            max_cells: self.generator.max_cells(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_engine_resolves_wu_xing() {
        let engine = Engine::embedded().unwrap();
        let set = engine.preset("wu-xing").unwrap().unwrap();
        let tensor = engine.generate(&set, 2).unwrap();
        assert_eq!(tensor.len(), 25);
        let wood = engine.radical('木').unwrap();
        assert_eq!(tensor.at_radicals(&[wood, wood]).unwrap().character(), Some('林'));
    }

    #[test]
    fn config_cell_limit_applies() {
        let config = EngineConfig {
            max_cells: 100,
            ..EngineConfig::default()
        };
        let engine = Engine::from_config(&config).unwrap();
        let set = engine.radical_set("五行", "金木水火土").unwrap();
        assert!(engine.generate(&set, 2).is_ok());
        assert!(matches!(
            engine.generate(&set, 3),
            Err(TensorError::TensorSizeExceeded { limit: 100, .. })
        ));
    }

    #[test]
    fn enabled_blocks_restrict_embedded_oracle() {
        let config = EngineConfig {
            enabled_blocks: Some(vec!["CJK Unified Ideographs Extension A".into()]),
            ..EngineConfig::default()
        };
        let engine = Engine::from_config(&config).unwrap();
        assert!(engine.radical('木').is_err());
        assert!(engine.radical('㐂').is_ok());
        assert_eq!(
            engine.table_summary().unwrap().enabled_blocks,
            vec!["CJK Unified Ideographs Extension A".to_string()]
        );
    }

    #[test]
    fn unknown_enabled_block_is_config_error() {
        let config = EngineConfig {
            enabled_blocks: Some(vec!["CJK Unified Ideographs Extension Z".into()]),
            ..EngineConfig::default()
        };
        assert!(matches!(
            Engine::from_config(&config),
            Err(ConfigError::UnknownBlock(_))
        ));
    }

    #[test]
    fn tables_load_from_paths() {
        let dir = tempfile::tempdir().unwrap();
        let ids = dir.path().join("ids.txt");
        let variants = dir.path().join("variants.json");
        std::fs::write(&ids, "U+6797\t林\t⿰木木\n").unwrap();
        std::fs::write(&variants, "{}").unwrap();
        let config = EngineConfig {
            decomposition_table: Some(ids),
            variant_table: Some(variants),
            ..EngineConfig::default()
        };
        let engine = Engine::from_config(&config).unwrap();
        let summary = engine.table_summary().unwrap();
        assert_eq!(summary.decompositions, 1);
        assert_eq!(summary.variants, 0);
    }

    #[test]
    fn missing_table_path_names_table() {
        let config = EngineConfig {
            decomposition_table: Some("/nonexistent/ids.txt".into()),
            ..EngineConfig::default()
        };
        let err = Engine::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("decomposition table"));
    }

    #[test]
    fn summary_reports_embedded_tables() {
        let engine = Engine::embedded().unwrap();
        let summary = engine.table_summary().unwrap();
        assert_eq!(summary.enabled_blocks.len(), 10);
        assert_eq!(summary.enabled_blocks[0], "CJK Unified Ideographs");
        assert!(summary.decompositions > 30);
        assert!(summary.variants > 10);
        assert_eq!(summary.max_cells, ralg_core::DEFAULT_MAX_CELLS);
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }
}
