//! # Radical Tensor
//!
//! A rank-N tensor over a radical set: every axis is labelled by the
//! set's radicals in order, and every cell holds the composition result
//! for its coordinate tuple.
//!
//! Cells live in a flat row-major arena. Axis 0 varies slowest and the
//! last axis fastest, so the flat index of `(i_0, ..., i_{r-1})` over a set
//! of length `n` is `sum(i_k * n^(r-1-k))`.
//!
//! A tensor owns its cells and borrows its radical set; it is immutable
//! once generated.

use ralg_core::{CanonicalizationError, Radical, RadicalSet, TensorError};
use ralg_ids::CompositionResult;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::commitment::TensorCommitment;

/// A fully populated rank-N composition tensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tensor<'a> {
    radicals: &'a RadicalSet,
    rank: usize,
    cells: Vec<CompositionResult>,
}

impl<'a> Tensor<'a> {
    /// Assemble a tensor from row-major cells. The generator guarantees
    /// `cells.len() == radicals.len().pow(rank)`.
    pub(crate) fn from_cells(
        radicals: &'a RadicalSet,
        rank: usize,
        cells: Vec<CompositionResult>,
    ) -> Self {
        Self {
            radicals,
            rank,
            cells,
        }
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The radical set labelling every axis.
    pub fn radical_set(&self) -> &'a RadicalSet {
        self.radicals
    }

    /// Labels shared by every axis, in order.
    pub fn axis_labels(&self) -> &'a [Radical] {
        self.radicals.as_slice()
    }

    /// Length of each axis.
    pub fn shape(&self) -> Vec<usize> {
        vec![self.radicals.len(); self.rank]
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a generated tensor has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[CompositionResult] {
        &self.cells
    }

    /// The cell at `coords`.
    ///
    /// # Errors
    ///
    /// [`TensorError::ArityMismatch`] if `coords.len() != rank`, and
    /// [`TensorError::IndexOutOfBounds`] if any coordinate is off its axis.
    pub fn at(&self, coords: &[usize]) -> Result<&CompositionResult, TensorError> {
        let flat = self.flat_index(coords)?;
        self.cells.get(flat).ok_or(TensorError::IndexOutOfBounds {
            axis: 0,
            index: flat,
            size: self.cells.len(),
        })
    }

    /// The cell labelled by `radicals`.
    ///
    /// # Errors
    ///
    /// As [`Tensor::at`], plus [`TensorError::UnknownLabel`] for a radical
    /// outside the set.
    pub fn at_radicals(&self, radicals: &[Radical]) -> Result<&CompositionResult, TensorError> {
        self.check_arity(radicals.len())?;
        let coords = radicals
            .iter()
            .map(|&r| {
                self.radicals
                    .index_of(r)
                    .ok_or(TensorError::UnknownLabel(r.as_char()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.at(&coords)
    }

    /// `(coordinates, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Vec<usize>, &CompositionResult)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(flat, cell)| (self.coords_of(flat), cell))
    }

    /// Cells whose coordinates are all equal, in axis order.
    pub fn diagonal(&self) -> Vec<&CompositionResult> {
        let n = self.radicals.len();
        // Sum of all strides: 1 + n + ... + n^(rank-1).
        let step: usize = (0..self.rank).map(|k| n.pow(k as u32)).sum();
        (0..n).filter_map(|i| self.cells.get(i * step)).collect()
    }

    /// Number of cells with `found = true`.
    pub fn found_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_found()).count()
    }

    /// Content-addressed commitment over the canonical serialization.
    pub fn commitment(&self) -> Result<TensorCommitment, CanonicalizationError> {
        TensorCommitment::compute(self)
    }

    fn check_arity(&self, actual: usize) -> Result<(), TensorError> {
        if actual != self.rank {
            return Err(TensorError::ArityMismatch {
                expected: self.rank,
                actual,
            });
        }
        Ok(())
    }

    fn flat_index(&self, coords: &[usize]) -> Result<usize, TensorError> {
        self.check_arity(coords.len())?;
        let size = self.radicals.len();
        let mut flat = 0usize;
        for (axis, &index) in coords.iter().enumerate() {
            if index >= size {
                return Err(TensorError::IndexOutOfBounds { axis, index, size });
            }
            flat = flat * size + index;
        }
        Ok(flat)
    }

    fn coords_of(&self, mut flat: usize) -> Vec<usize> {
        let size = self.radicals.len();
        let mut coords = vec![0; self.rank];
        for slot in coords.iter_mut().rev() {
            *slot = flat % size;
            flat /= size;
        }
        coords
    }
}

impl Serialize for Tensor<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Tensor", 4)?;
        state.serialize_field("radical_set", self.radicals)?;
        state.serialize_field("rank", &self.rank)?;
        state.serialize_field("shape", &self.shape())?;
        state.serialize_field("cells", &self.cells)?;
        state.end()
    }
}
