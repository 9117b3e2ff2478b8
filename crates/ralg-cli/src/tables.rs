//! # `ralg tables`
//!
//! Prints the version, size and digest of each loaded table.

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::Args;
use ralg_tensor::{Engine, TableSummary};

use crate::generate::OutputFormat;

/// Arguments for `ralg tables`.
#[derive(Args, Debug)]
pub struct TablesArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute `ralg tables`.
pub fn run_tables(args: &TablesArgs, engine: &Engine) -> Result<u8> {
    print!("{}", tables_output(args, engine)?);
    Ok(0)
}

/// Render the table summary without printing.
pub fn tables_output(args: &TablesArgs, engine: &Engine) -> Result<String> {
    let summary = engine
        .table_summary()
        .context("failed to fingerprint tables")?;
    match args.format {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => Ok(describe(&summary)),
    }
}

fn describe(s: &TableSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "oracle          {}", s.oracle_version);
    let _ = writeln!(out, "  digest        {}", s.oracle_digest);
    let _ = writeln!(out, "  blocks        {}", s.enabled_blocks.len());
    for block in &s.enabled_blocks {
        let _ = writeln!(out, "                {block}");
    }
    let _ = writeln!(out, "  simplified    {}", s.simplified_forms);
    let _ = writeln!(
        out,
        "decompositions  {} ({} characters)",
        s.decompositions, s.decomposed_characters
    );
    let _ = writeln!(out, "  digest        {}", s.decomposition_digest);
    let _ = writeln!(out, "variants        {}", s.variants);
    let _ = writeln!(out, "  digest        {}", s.variant_digest);
    let _ = writeln!(out, "index digest    {}", s.index_digest);
    let _ = writeln!(out, "max cells       {}", s.max_cells);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lists_every_table() {
        let engine = Engine::embedded().unwrap();
        let out = tables_output(
            &TablesArgs {
                format: OutputFormat::Text,
            },
            &engine,
        )
        .unwrap();
        assert!(out.starts_with("oracle          unicode-15.1"));
        assert!(out.contains("CJK Unified Ideographs Extension I"));
        assert!(out.contains("decompositions  "));
        assert!(out.contains("variants        "));
        assert!(out.contains("max cells       1000000"));
        assert_eq!(out.matches("sha256:").count(), 4);
    }

    #[test]
    fn json_summary() {
        let engine = Engine::embedded().unwrap();
        let out = tables_output(
            &TablesArgs {
                format: OutputFormat::Json,
            },
            &engine,
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["enabled_blocks"].as_array().unwrap().len(), 10);
        assert_eq!(json["max_cells"], 1_000_000);
    }
}
