//! # Tensor Generator
//!
//! Enumerates the Cartesian power of a radical set in row-major order and
//! resolves every coordinate tuple.
//!
//! Bounds are checked before any cell is resolved: the rank must lie in
//! [`MIN_RANK`]..=[`MAX_RANK`], and `len^rank` must not exceed the cell
//! limit. Overflow while computing `len^rank` counts as exceeding it.
//! Generation either returns a complete tensor or an error, never a
//! partial one.

use ralg_core::{RadicalSet, TensorError, DEFAULT_MAX_CELLS, MAX_RANK, MIN_RANK};
use ralg_ids::Resolve;

use crate::tensor::Tensor;

/// Builds tensors with a resolver.
#[derive(Debug, Clone)]
pub struct TensorGenerator<R> {
    resolver: R,
    max_cells: u64,
}

impl<R: Resolve> TensorGenerator<R> {
    /// A generator with the default cell limit.
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }

    /// Replace the cell limit.
    pub fn with_max_cells(mut self, max_cells: u64) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// The cell limit.
    pub fn max_cells(&self) -> u64 {
        self.max_cells
    }

    /// The resolver used for every cell.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Generate the rank-`rank` tensor over `radicals`.
    ///
    /// # Errors
    ///
    /// [`TensorError::RankOutOfRange`] or [`TensorError::TensorSizeExceeded`],
    /// both raised before any resolution work.
    pub fn generate<'a>(
        &self,
        radicals: &'a RadicalSet,
        rank: usize,
    ) -> Result<Tensor<'a>, TensorError> {
        let total = cell_count(radicals.len(), rank, self.max_cells)?;
        let elements = radicals.as_slice();
        let size = elements.len();

        let mut cells = Vec::with_capacity(total);
        let mut coords = vec![0usize; rank];
        let mut tuple = Vec::with_capacity(rank);
        for _ in 0..total {
            tuple.clear();
            tuple.extend(coords.iter().map(|&i| elements[i]));
            cells.push(self.resolver.resolve(&tuple));

            // Advance the odometer, last axis fastest.
            for slot in coords.iter_mut().rev() {
                *slot += 1;
                if *slot < size {
                    break;
                }
                *slot = 0;
            }
        }

        let tensor = Tensor::from_cells(radicals, rank, cells);
        tracing::debug!(
            set = radicals.name(),
            rank,
            cells = tensor.len(),
            found = tensor.found_count(),
            "generated tensor"
        );
        Ok(tensor)
    }
}

/// Validate `rank` and return `len^rank`.
///
/// # Errors
///
/// [`TensorError::RankOutOfRange`] outside [`MIN_RANK`]..=[`MAX_RANK`];
/// [`TensorError::TensorSizeExceeded`] if `len^rank > max_cells` or the
/// power overflows.
pub fn cell_count(len: usize, rank: usize, max_cells: u64) -> Result<usize, TensorError> {
    if !(MIN_RANK..=MAX_RANK).contains(&rank) {
        return Err(TensorError::RankOutOfRange {
            rank,
            min: MIN_RANK,
            max: MAX_RANK,
        });
    }
    let exceeded = TensorError::TensorSizeExceeded {
        len,
        rank,
        limit: max_cells,
    };
    let exponent = u32::try_from(rank).map_err(|_| exceeded.clone())?;
    let cells = u64::try_from(len)
        .ok()
        .and_then(|len| len.checked_pow(exponent))
        .filter(|&cells| cells <= max_cells)
        .ok_or_else(|| exceeded.clone())?;
    usize::try_from(cells).map_err(|_| exceeded)
}
