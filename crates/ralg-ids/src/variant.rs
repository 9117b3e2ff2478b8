//! # Component Variants
//!
//! Positional and radical-block forms of an ideograph (氵 for 水, ⽊ for 木)
//! are folded onto their base before keying, both for table entries and
//! for query radicals.
//!
//! The table is a JSON object mapping variant to base. Keys and values are
//! `U+XXXX` code points or literal characters.

use std::collections::BTreeMap;
use std::path::Path;

use ralg_core::oracle::parse_code_point;
use ralg_core::{sha256_digest, sha256_raw, CanonicalBytes, ConfigError, ContentDigest};

/// The variant table compiled into the binary.
pub const EMBEDDED_VARIANT_TABLE: &str = include_str!("../data/variants.json");

const TABLE_NAME: &str = "variant table";

/// Variant-to-base folding map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantTable {
    map: BTreeMap<char, char>,
    digest: ContentDigest,
}

impl VariantTable {
    /// Parse the JSON form.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Malformed`] if the JSON is invalid, an entry is not a
    /// single code point, an entry maps to itself, or a base is itself a
    /// variant (chains are not followed).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(|e| malformed(e.to_string()))?;
        let mut map = BTreeMap::new();
        for (variant, base) in &raw {
            let v = parse_entry(variant)?;
            let b = parse_entry(base)?;
            if v == b {
                return Err(malformed(format!("'{variant}' maps to itself")));
            }
            map.insert(v, b);
        }
        if let Some((v, b)) = map.iter().find(|(_, b)| map.contains_key(b)) {
            return Err(malformed(format!(
                "base '{b}' of variant '{v}' is itself a variant"
            )));
        }
        let canonical = CanonicalBytes::new(&map).map_err(|e| malformed(e.to_string()))?;
        let digest = sha256_digest(&canonical);
        tracing::debug!(variants = map.len(), digest = %digest.short_hex(), "loaded variant table");
        Ok(Self { map, digest })
    }

    /// Load the JSON form from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            table: TABLE_NAME.to_string(),
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The embedded table.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(EMBEDDED_VARIANT_TABLE)
    }

    /// A table that folds nothing.
    pub fn empty() -> Self {
        // Canonical form of an empty map.
        Self {
            map: BTreeMap::new(),
            digest: sha256_raw(b"{}"),
        }
    }

    /// The base form of `c`, or `c` itself.
    pub fn fold(&self, c: char) -> char {
        self.map.get(&c).copied().unwrap_or(c)
    }

    /// Number of variants.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if nothing is folded.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Content digest of the folding map.
    pub fn digest(&self) -> ContentDigest {
        self.digest
    }
}

fn parse_entry(raw: &str) -> Result<char, ConfigError> {
    let mut chars = raw.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(c);
    }
    parse_code_point(raw).ok_or_else(|| malformed(format!("'{raw}' is not a single code point")))
}

fn malformed(reason: impl Into<String>) -> ConfigError {
    ConfigError::Malformed {
        table: TABLE_NAME.to_string(),
        reason: reason.into(),
    }
}
