//! # `ralg structures`
//!
//! Prints the number of IDS shapes over `N` slots. With `--radicals`, fills
//! every shape with the radicals in order and lists the ones the
//! decomposition index knows.

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::Args;
use ralg_core::Radical;
use ralg_ids::{enumerate_structures, structure_count};
use ralg_tensor::Engine;

/// Arguments for `ralg structures`.
#[derive(Args, Debug)]
pub struct StructuresArgs {
    /// Number of slots.
    pub slots: usize,

    /// Radicals to fill the slots with, in order; one per slot.
    #[arg(long)]
    pub radicals: Option<String>,
}

/// Execute `ralg structures`.
pub fn run_structures(args: &StructuresArgs, engine: &Engine) -> Result<u8> {
    print!("{}", structures_output(args, engine)?);
    Ok(0)
}

/// Count and optionally match structures without printing.
pub fn structures_output(args: &StructuresArgs, engine: &Engine) -> Result<String> {
    let count = structure_count(args.slots)
        .with_context(|| format!("T({}) does not fit in 128 bits", args.slots))?;
    let mut out = format!("T({}) = {count}\n", args.slots);

    let Some(chars) = &args.radicals else {
        return Ok(out);
    };
    let radicals = chars
        .chars()
        .map(|c| engine.radical(c))
        .collect::<Result<Vec<Radical>, _>>()
        .with_context(|| format!("invalid radicals {chars:?}"))?;
    let shapes = enumerate_structures(args.slots)
        .with_context(|| format!("cannot enumerate structures over {} slots", args.slots))?;

    let mut matches = 0usize;
    for shape in &shapes {
        let ids = shape
            .render(&radicals)
            .with_context(|| format!("{} radicals for {} slots", radicals.len(), args.slots))?;
        let hits = engine.index().lookup_by_ids(&ids);
        if !hits.is_empty() {
            matches += 1;
            let chars: String = hits.into_iter().collect();
            let _ = writeln!(out, "{ids}  {chars}");
        }
    }
    tracing::debug!(slots = args.slots, shapes = shapes.len(), matches, "matched structures");
    let _ = writeln!(out, "{matches} of {} structures known", shapes.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(slots: usize, radicals: Option<&str>) -> Result<String> {
        let engine = Engine::embedded().unwrap();
        let args = StructuresArgs {
            slots,
            radicals: radicals.map(str::to_string),
        };
        structures_output(&args, &engine)
    }

    #[test]
    fn prints_counts() {
        assert_eq!(output(3, None).unwrap(), "T(3) = 202\n");
        assert_eq!(output(5, None).unwrap(), "T(5) = 144212\n");
    }

    #[test]
    fn large_counts_without_enumeration() {
        assert!(output(12, None).unwrap().starts_with("T(12) = "));
        assert!(output(40, None).is_err());
    }

    #[test]
    fn lists_known_shapes() {
        let out = output(2, Some("火火")).unwrap();
        assert!(out.contains("⿰火火  炏\n"));
        assert!(out.contains("⿱火火  炎\n"));
        assert!(out.ends_with("2 of 10 structures known\n"));
    }

    #[test]
    fn folded_lookup_finds_variant_entries() {
        let out = output(2, Some("水金")).unwrap();
        assert!(out.contains("⿰水金  淦\n"));
    }

    #[test]
    fn triple_shapes() {
        let out = output(3, Some("金金金")).unwrap();
        assert!(out.contains("⿱金⿰金金  鑫\n"));
        assert!(out.ends_with("1 of 202 structures known\n"));
    }

    #[test]
    fn radical_count_must_match_slots() {
        assert!(output(3, Some("金金")).is_err());
    }

    #[test]
    fn too_many_slots_to_enumerate() {
        assert!(output(6, Some("金木水火土日")).is_err());
    }
}
