//! # Text and JSON Rendering
//!
//! Rank-2 tensors render as a matrix with row and column headers. Higher
//! ranks render as nested blocks: one labelled matrix per prefix of the
//! leading `rank - 2` coordinates. A missing cell renders as `--`.
//!
//! Every rendered item is two terminal columns wide (one CJK character or
//! `--`), so columns line up with a fixed two-space gutter.

use std::fmt::Write;

use anyhow::{Context, Result};
use ralg_ids::CompositionResult;
use ralg_tensor::Tensor;
use serde::Serialize;

/// Placeholder for a cell with no composition.
pub const MISSING: &str = "--";

const GUTTER: &str = "  ";

/// The text of one cell.
pub fn cell_text(cell: &CompositionResult) -> String {
    cell.character()
        .map_or_else(|| MISSING.to_string(), |c| c.to_string())
}

/// Matrix or nested-block rendering, by rank.
pub fn render_text(tensor: &Tensor<'_>) -> String {
    if tensor.rank() == 2 {
        render_matrix(tensor, 0)
    } else {
        render_blocks(tensor)
    }
}

/// The `n x n` matrix whose cells start at flat offset `offset`.
fn render_matrix(tensor: &Tensor<'_>, offset: usize) -> String {
    let labels = tensor.axis_labels();
    let n = labels.len();
    let cells = tensor.cells();
    let mut out = String::new();

    let header: Vec<String> = labels.iter().map(|r| r.to_string()).collect();
    let _ = writeln!(out, "{GUTTER}{GUTTER}{}", header.join(GUTTER));
    for (row, label) in labels.iter().enumerate() {
        let start = offset + row * n;
        let row_cells: Vec<String> = cells[start..start + n].iter().map(cell_text).collect();
        let _ = writeln!(out, "{label}{GUTTER}{}", row_cells.join(GUTTER));
    }
    out
}

fn render_blocks(tensor: &Tensor<'_>) -> String {
    let labels = tensor.axis_labels();
    let n = labels.len();
    let outer_axes = tensor.rank() - 2;
    let blocks = n.pow(outer_axes as u32);
    let mut out = String::new();

    for block in 0..blocks {
        let mut prefix = vec![0usize; outer_axes];
        let mut rest = block;
        for slot in prefix.iter_mut().rev() {
            *slot = rest % n;
            rest /= n;
        }
        let names: Vec<String> = prefix.iter().map(|&i| labels[i].to_string()).collect();
        if block > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "[{}]", names.join(" "));
        out.push_str(&render_matrix(tensor, block * n * n));
    }
    out
}

/// One-line summary: set, rank, hit rate.
pub fn summary_line(tensor: &Tensor<'_>) -> String {
    format!(
        "{} rank {}: {}/{} found",
        tensor.radical_set(),
        tensor.rank(),
        tensor.found_count(),
        tensor.len()
    )
}

#[derive(Serialize)]
struct TensorDocument<'t, 'a> {
    tensor: &'t Tensor<'a>,
    found: usize,
    commitment: String,
}

/// Full tensor as pretty JSON, with its commitment.
pub fn render_json(tensor: &Tensor<'_>) -> Result<String> {
    let commitment = tensor
        .commitment()
        .context("failed to compute tensor commitment")?;
    let document = TensorDocument {
        tensor,
        found: tensor.found_count(),
        commitment: commitment.to_string(),
    };
    serde_json::to_string_pretty(&document).context("failed to serialize tensor")
}
