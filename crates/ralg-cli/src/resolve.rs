//! # `ralg resolve`
//!
//! Resolves one ordered tuple of radicals and prints the selected
//! character, the IDS it came from, and any other candidates.
//!
//! ```bash
//! ralg resolve 火土        # 火土 → 灶 ⿰火土
//! ralg resolve 金金金      # 金金金 → 鑫 ⿱金⿰金金
//! ```

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::Args;
use ralg_core::Radical;
use ralg_ids::CompositionResult;
use ralg_tensor::Engine;

use crate::generate::OutputFormat;
use crate::render::MISSING;

/// Arguments for `ralg resolve`.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// The ordered radicals, one character each (e.g. 火土).
    pub radicals: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute `ralg resolve`.
pub fn run_resolve(args: &ResolveArgs, engine: &Engine) -> Result<u8> {
    print!("{}", resolve_output(args, engine)?);
    Ok(0)
}

/// Resolve and render without printing.
pub fn resolve_output(args: &ResolveArgs, engine: &Engine) -> Result<String> {
    let radicals = args
        .radicals
        .chars()
        .map(|c| engine.radical(c))
        .collect::<Result<Vec<Radical>, _>>()
        .with_context(|| format!("invalid radicals {:?}", args.radicals))?;
    if radicals.is_empty() {
        anyhow::bail!("no radicals given");
    }
    let result = engine.resolve(&radicals);
    match args.format {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&result).context("failed to serialize result")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => Ok(describe(&result)),
    }
}

fn describe(result: &CompositionResult) -> String {
    let tuple: String = result.coordinates().iter().map(|r| r.as_char()).collect();
    let mut out = String::new();
    match (result.character(), result.ids()) {
        (Some(c), Some(ids)) => {
            let _ = writeln!(out, "{tuple} → {c} {ids}");
        }
        (Some(c), None) => {
            let _ = writeln!(out, "{tuple} → {c}");
        }
        (None, _) => {
            let _ = writeln!(out, "{tuple} → {MISSING}");
        }
    }
    if result.candidates().len() > 1 {
        let others: String = result.candidates()[1..].iter().collect();
        let _ = writeln!(out, "  also: {others}");
    }
    if !result.rejected().is_empty() {
        let rejected: String = result.rejected().iter().collect();
        let _ = writeln!(out, "  rejected: {rejected}");
    }
    out
}
