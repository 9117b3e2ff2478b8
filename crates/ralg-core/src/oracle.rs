//! # Character Validity Oracle
//!
//! Decides whether a code point is a usable CJKV ideograph. Two questions
//! are answered from a static table:
//!
//! - **Is it an ideograph?** The code point falls inside the assigned range
//!   of an enabled CJK Unified Ideographs block (Basic plus Extensions A–I
//!   by default).
//! - **Is it a simplified form?** The code point appears in the
//!   simplified-Chinese exclusion list.
//!
//! The embedded exclusion list holds every GB 2312 hanzi that has no Big5
//! encoding (the forms introduced by simplification), plus the simplified
//! components of the CJK Radicals Supplement. Characters shared by both
//! standards (后, 干, 面) are simplification-invariant and not listed.
//!
//! A character is *accepted* iff it is an ideograph and not a simplified
//! form. Composition results are only ever reported for accepted characters.
//!
//! ## Table Lifecycle
//!
//! The table is parsed and validated once, in [`CharacterOracle::from_table`]
//! and friends. Every failure is a [`ConfigError`] raised at construction;
//! after that every query is infallible and the oracle is immutable, so it
//! can be shared across threads behind an `Arc` without locking.
//!
//! ## Block Priority
//!
//! Each ideograph block keeps the position it has in the table (Basic = 0,
//! then extensions in table order). The composition resolver uses that
//! position to prefer canonical Unified Ideographs over extension
//! characters when several compounds share one radical tuple.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::canonical::CanonicalBytes;
use crate::digest::{sha256_digest, ContentDigest};
use crate::error::ConfigError;

/// The oracle table shipped with the crate.
pub const EMBEDDED_ORACLE_TABLE: &str = include_str!("../data/oracle.json");

const TABLE_NAME: &str = "oracle table";

// ---------------------------------------------------------------------------
// Oracle trait
// ---------------------------------------------------------------------------

/// The validity questions the composition engine asks about a character.
///
/// [`CharacterOracle`] is the table-backed implementation. Tests substitute
/// small hand-written oracles.
pub trait IdeographOracle: Send + Sync + fmt::Debug {
    /// True if `c` is inside an enabled CJK Unified Ideographs block.
    fn is_valid_ideograph(&self, c: char) -> bool;

    /// True if `c` is a simplified-Chinese form.
    fn is_simplified_form(&self, c: char) -> bool;

    /// True if `c` is a radical-only code point (Kangxi Radicals, CJK
    /// Radicals Supplement) that is acceptable as a radical but never as a
    /// composition result.
    fn is_radical_form(&self, _c: char) -> bool {
        false
    }

    /// Position of the block containing `c`; lower is preferred.
    ///
    /// `None` if `c` is not a valid ideograph.
    fn block_priority(&self, c: char) -> Option<usize>;

    /// The acceptance rule for composition results.
    fn is_accepted(&self, c: char) -> bool {
        self.is_valid_ideograph(c) && !self.is_simplified_form(c)
    }
}

// ---------------------------------------------------------------------------
// Table format
// ---------------------------------------------------------------------------

/// The serialized oracle table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleTable {
    /// Data version label, e.g. `unicode-15.1+ralg-simplified-2`.
    pub version: String,
    /// CJK Unified Ideograph blocks, in priority order.
    pub ideograph_blocks: Vec<BlockSpec>,
    /// Radical-only ranges.
    #[serde(default)]
    pub radical_blocks: Vec<BlockSpec>,
    /// Simplified-Chinese forms, one character per entry.
    pub simplified: Vec<String>,
}

/// A named code point range as written in the table (`U+4E00` notation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpec {
    /// Unicode block name.
    pub name: String,
    /// First assigned code point, `U+XXXX`.
    pub start: String,
    /// Last assigned code point, `U+XXXX`.
    pub end: String,
}

/// A validated block range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnicodeBlock {
    /// Unicode block name.
    pub name: String,
    /// First assigned code point.
    pub start: char,
    /// Last assigned code point.
    pub end: char,
    /// Position in the table; lower is preferred.
    pub priority: usize,
}

impl UnicodeBlock {
    /// True if `c` lies within this block's assigned range.
    pub fn contains(&self, c: char) -> bool {
        self.start <= c && c <= self.end
    }
}

/// Parse `U+XXXX` (or bare hex) into a `char`.
pub fn parse_code_point(raw: &str) -> Option<char> {
    let hex = raw
        .strip_prefix("U+")
        .or_else(|| raw.strip_prefix("u+"))
        .unwrap_or(raw);
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

fn malformed(reason: impl Into<String>) -> ConfigError {
    ConfigError::Malformed {
        table: TABLE_NAME.to_string(),
        reason: reason.into(),
    }
}

fn validate_block(spec: &BlockSpec, priority: usize) -> Result<UnicodeBlock, ConfigError> {
    let start = parse_code_point(&spec.start)
        .ok_or_else(|| malformed(format!("block '{}': bad start '{}'", spec.name, spec.start)))?;
    let end = parse_code_point(&spec.end)
        .ok_or_else(|| malformed(format!("block '{}': bad end '{}'", spec.name, spec.end)))?;
    if start > end {
        return Err(malformed(format!(
            "block '{}': start {} is after end {}",
            spec.name, spec.start, spec.end
        )));
    }
    Ok(UnicodeBlock {
        name: spec.name.clone(),
        start,
        end,
        priority,
    })
}

// ---------------------------------------------------------------------------
// CharacterOracle
// ---------------------------------------------------------------------------

/// Table-backed [`IdeographOracle`].
#[derive(Debug, Clone)]
pub struct CharacterOracle {
    version: String,
    blocks: Vec<UnicodeBlock>,
    radical_blocks: Vec<UnicodeBlock>,
    simplified: HashSet<char>,
    digest: ContentDigest,
}

impl CharacterOracle {
    /// Build an oracle from a parsed table.
    ///
    /// `enabled_blocks` restricts the active ideograph blocks by name;
    /// `None` enables every block in the table. Disabled blocks keep their
    /// table position so priorities do not shift.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the table has no ideograph blocks, a range
    /// is inverted or unparseable, two ideograph blocks overlap or share a
    /// name, a simplified entry is not exactly one character, or an enabled
    /// block name is unknown.
    pub fn from_table(
        table: &OracleTable,
        enabled_blocks: Option<&[String]>,
    ) -> Result<Self, ConfigError> {
        if table.ideograph_blocks.is_empty() {
            return Err(ConfigError::Empty {
                table: TABLE_NAME.to_string(),
            });
        }

        let mut all_blocks = Vec::with_capacity(table.ideograph_blocks.len());
        let mut names = BTreeSet::new();
        for (priority, spec) in table.ideograph_blocks.iter().enumerate() {
            if !names.insert(spec.name.as_str()) {
                return Err(malformed(format!("duplicate block name '{}'", spec.name)));
            }
            all_blocks.push(validate_block(spec, priority)?);
        }

        let mut by_start: Vec<&UnicodeBlock> = all_blocks.iter().collect();
        by_start.sort_by_key(|b| b.start);
        for pair in by_start.windows(2) {
            if pair[1].start <= pair[0].end {
                return Err(malformed(format!(
                    "blocks '{}' and '{}' overlap",
                    pair[0].name, pair[1].name
                )));
            }
        }

        let blocks = match enabled_blocks {
            None => all_blocks,
            Some(enabled) => {
                for name in enabled {
                    if !names.contains(name.as_str()) {
                        return Err(ConfigError::UnknownBlock(name.clone()));
                    }
                }
                all_blocks
                    .into_iter()
                    .filter(|b| enabled.iter().any(|n| n == &b.name))
                    .collect()
            }
        };

        let radical_blocks = table
            .radical_blocks
            .iter()
            .enumerate()
            .map(|(i, spec)| validate_block(spec, i))
            .collect::<Result<Vec<_>, _>>()?;

        let mut simplified = HashSet::with_capacity(table.simplified.len());
        for entry in &table.simplified {
            let mut chars = entry.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    if !simplified.insert(c) {
                        tracing::warn!(entry = %c, "duplicate simplified entry");
                    }
                }
                _ => {
                    return Err(malformed(format!(
                        "simplified entry {entry:?} is not a single character"
                    )))
                }
            }
        }

        let canonical = CanonicalBytes::new(table).map_err(|e| malformed(e.to_string()))?;
        let digest = sha256_digest(&canonical);

        tracing::debug!(
            version = %table.version,
            blocks = blocks.len(),
            radical_blocks = radical_blocks.len(),
            simplified = simplified.len(),
            digest = %digest.short_hex(),
            "loaded oracle table"
        );

        Ok(Self {
            version: table.version.clone(),
            blocks,
            radical_blocks,
            simplified,
            digest,
        })
    }

    /// Parse a JSON oracle table.
    pub fn from_json(json: &str, enabled_blocks: Option<&[String]>) -> Result<Self, ConfigError> {
        let table: OracleTable =
            serde_json::from_str(json).map_err(|e| malformed(e.to_string()))?;
        Self::from_table(&table, enabled_blocks)
    }

    /// Load a JSON oracle table from disk.
    pub fn load(path: &Path, enabled_blocks: Option<&[String]>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            table: TABLE_NAME.to_string(),
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json, enabled_blocks)
    }

    /// The oracle built from [`EMBEDDED_ORACLE_TABLE`].
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(EMBEDDED_ORACLE_TABLE, None)
    }

    /// Data version label from the table.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Content digest of the table this oracle was built from.
    pub fn digest(&self) -> ContentDigest {
        self.digest
    }

    /// The enabled ideograph blocks, in table order.
    pub fn blocks(&self) -> &[UnicodeBlock] {
        &self.blocks
    }

    /// Number of simplified forms in the exclusion list.
    pub fn simplified_count(&self) -> usize {
        self.simplified.len()
    }

    /// The enabled block containing `c`, if any.
    pub fn block_of(&self, c: char) -> Option<&UnicodeBlock> {
        self.blocks.iter().find(|b| b.contains(c))
    }
}

impl IdeographOracle for CharacterOracle {
    fn is_valid_ideograph(&self, c: char) -> bool {
        self.block_of(c).is_some()
    }

    fn is_simplified_form(&self, c: char) -> bool {
        self.simplified.contains(&c)
    }

    fn is_radical_form(&self, c: char) -> bool {
        self.radical_blocks.iter().any(|b| b.contains(c))
    }

    fn block_priority(&self, c: char) -> Option<usize> {
        self.block_of(c).map(|b| b.priority)
    }
}
