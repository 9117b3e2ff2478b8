//! # Decomposition Table
//!
//! Loads Ideographic Description Sequences in the cjkvi-ids text layout:
//!
//! ```text
//! U+946B<TAB>鑫<TAB>⿱金⿰金金[GTJKV]<TAB>⿱金鍂[X]
//! ```
//!
//! - `#` and `;;` lines are comments.
//! - Each IDS may end in a bracketed region tag, which is dropped.
//! - An IDS equal to the character itself marks an atomic component and
//!   produces no entry.
//! - An IDS containing an unencoded-component placeholder (①..⑳) is
//!   skipped, as is one using an operator outside the supported twelve.
//! - A code field that disagrees with the character, or an unparseable
//!   IDS, fails the whole load with the line number.

use std::path::Path;

use ralg_core::oracle::parse_code_point;
use ralg_core::{sha256_raw, ConfigError, ContentDigest, IdsError};
use serde::Serialize;

use crate::ids::IdsNode;

/// The decomposition table compiled into the binary.
pub const EMBEDDED_IDS_TABLE: &str = include_str!("../data/ids.txt");

const TABLE_NAME: &str = "decomposition table";

/// One decomposition of one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecompositionEntry {
    /// The described character.
    pub character: char,
    /// Its decomposition.
    pub ids: IdsNode,
    /// Region tag without brackets, e.g. `GTJKV`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// 1-based source line.
    pub line: usize,
}

/// All decompositions in source order.
///
/// A character with several IDS alternatives contributes one entry per
/// alternative; the first is its primary decomposition.
#[derive(Debug, Clone)]
pub struct DecompositionTable {
    entries: Vec<DecompositionEntry>,
    digest: ContentDigest,
}

impl DecompositionTable {
    /// Parse table text.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MalformedLine`] for a bad line.
    /// - [`ConfigError::Empty`] if no decompositions remain.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut entries = Vec::new();
        let mut skipped = 0usize;
        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let raw = raw.trim_end_matches('\r');
            if raw.trim().is_empty() || raw.starts_with('#') || raw.starts_with(";;") {
                continue;
            }
            let fields: Vec<&str> = raw.split('\t').collect();
            if fields.len() < 3 {
                return Err(malformed_line(
                    line,
                    format!("expected at least 3 tab-separated fields, found {}", fields.len()),
                ));
            }
            let character = single_char(fields[1]).ok_or_else(|| {
                malformed_line(line, format!("{:?} is not a single character", fields[1]))
            })?;
            match parse_code_point(fields[0]) {
                Some(code) if code == character => {}
                _ => {
                    return Err(malformed_line(
                        line,
                        format!("code field {} does not match '{character}'", fields[0]),
                    ))
                }
            }

            for field in &fields[2..] {
                let (ids, tag) = split_tag(field.trim());
                if ids.is_empty() {
                    return Err(malformed_line(line, IdsError::Empty.to_string()));
                }
                if single_char(ids) == Some(character) {
                    continue;
                }
                if ids.chars().any(is_placeholder) {
                    tracing::trace!(line, %character, ids, "skipping IDS with unencoded component");
                    skipped += 1;
                    continue;
                }
                let node = match IdsNode::parse(ids) {
                    Ok(node) => node,
                    Err(IdsError::UnsupportedOperator(op)) => {
                        tracing::trace!(line, %character, %op, "skipping IDS with unsupported operator");
                        skipped += 1;
                        continue;
                    }
                    Err(e) => return Err(malformed_line(line, e.to_string())),
                };
                entries.push(DecompositionEntry {
                    character,
                    ids: node,
                    tag: tag.map(str::to_string),
                    line,
                });
            }
        }
        if entries.is_empty() {
            return Err(ConfigError::Empty {
                table: TABLE_NAME.to_string(),
            });
        }
        let digest = sha256_raw(text.as_bytes());
        tracing::debug!(
            entries = entries.len(),
            skipped,
            digest = %digest.short_hex(),
            "loaded decomposition table"
        );
        Ok(Self { entries, digest })
    }

    /// Load table text from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            table: TABLE_NAME.to_string(),
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    /// The embedded table.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::parse(EMBEDDED_IDS_TABLE)
    }

    /// Entries in source order.
    pub fn entries(&self) -> &[DecompositionEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a loaded table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Digest of the source text.
    pub fn digest(&self) -> ContentDigest {
        self.digest
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn split_tag(field: &str) -> (&str, Option<&str>) {
    if let Some(body) = field.strip_suffix(']') {
        if let Some(open) = body.rfind('[') {
            return (&body[..open], Some(&body[open + 1..]));
        }
    }
    (field, None)
}

fn is_placeholder(c: char) -> bool {
    ('\u{2460}'..='\u{2473}').contains(&c)
}

fn malformed_line(line: usize, reason: impl Into<String>) -> ConfigError {
    ConfigError::MalformedLine {
        table: TABLE_NAME.to_string(),
        line,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_loads() {
        let table = DecompositionTable::embedded().unwrap();
        assert!(table.len() > 30);
        assert!(table.entries().iter().any(|e| e.character == '林'));
    }

    #[test]
    fn atomic_lines_produce_no_entries() {
        let table = DecompositionTable::embedded().unwrap();
        assert!(!table.entries().iter().any(|e| e.character == '木'));
    }

    #[test]
    fn multiple_ids_keep_order_and_tags() {
        let table = DecompositionTable::embedded().unwrap();
        let xin: Vec<&DecompositionEntry> =
            table.entries().iter().filter(|e| e.character == '鑫').collect();
        assert_eq!(xin.len(), 2);
        assert_eq!(xin[0].ids.render(), "⿱金⿰金金");
        assert_eq!(xin[0].tag.as_deref(), Some("GTJKV"));
        assert_eq!(xin[1].ids.render(), "⿱金鍂");
        assert_eq!(xin[0].line, xin[1].line);
    }

    #[test]
    fn every_embedded_entry_round_trips() {
        let table = DecompositionTable::embedded().unwrap();
        for entry in table.entries() {
            let rendered = entry.ids.render();
            assert_eq!(IdsNode::parse(&rendered).unwrap(), entry.ids, "{}", entry.character);
        }
    }

    #[test]
    fn comments_and_blank_lines_ignored() {
        let text = "# header\n;; note\n\nU+6797\t林\t⿰木木\n";
        let table = DecompositionTable::parse(text).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].line, 4);
    }

    #[test]
    fn placeholder_ids_skipped() {
        let text = "U+6797\t林\t⿰木木\nU+4E22\t丢\t⿱①去\n";
        let table = DecompositionTable::parse(text).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn unsupported_operator_skipped() {
        let text = "U+6797\t林\t⿰木木\t\u{2FFC}木木\n";
        let table = DecompositionTable::parse(text).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn code_mismatch_reports_line() {
        let text = "U+6797\t林\t⿰木木\nU+6797\t森\t⿱木⿰木木\n";
        match DecompositionTable::parse(text).unwrap_err() {
            ConfigError::MalformedLine { line, table, .. } => {
                assert_eq!(line, 2);
                assert_eq!(table, "decomposition table");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_ids_reports_line() {
        let text = "# c\nU+6797\t林\t⿰木木\nU+68EE\t森\t⿱木⿰木\n";
        let err = DecompositionTable::parse(text).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedLine { line: 3, .. }));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn runaway_nesting_reports_line() {
        let text = format!("U+6797\t林\t⿰木木\nU+68EE\t森\t{}\n", "⿰".repeat(100_000));
        let err = DecompositionTable::parse(&text).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedLine { line: 2, .. }));
        assert!(err.to_string().contains("deeper than"));
    }

    #[test]
    fn missing_field_reports_line() {
        let err = DecompositionTable::parse("U+6797\t林\n").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn table_of_only_atomics_is_empty() {
        let err = DecompositionTable::parse("U+6728\t木\t木\n# end\n").unwrap_err();
        assert!(matches!(err, ConfigError::Empty { .. }));
    }

    #[test]
    fn digest_tracks_source_text() {
        let a = DecompositionTable::parse("U+6797\t林\t⿰木木\n").unwrap();
        let b = DecompositionTable::parse("# v2\nU+6797\t林\t⿰木木\n").unwrap();
        assert_ne!(a.digest(), b.digest());
        assert_eq!(a.digest(), DecompositionTable::parse("U+6797\t林\t⿰木木\n").unwrap().digest());
    }

    #[test]
    fn load_missing_file_names_table() {
        let err = DecompositionTable::load(Path::new("/nonexistent/ids.txt")).unwrap_err();
        assert!(err.to_string().contains("decomposition table"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.txt");
        std::fs::write(&path, "U+708E\t炎\t⿱火火[GTJKV]\n").unwrap();
        let table = DecompositionTable::load(&path).unwrap();
        assert_eq!(table.entries()[0].character, '炎');
    }
}
