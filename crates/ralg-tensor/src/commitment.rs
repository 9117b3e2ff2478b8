//! # Tensor Commitment
//!
//! Content-addressed commitment to a generated tensor, computed via
//! [`CanonicalBytes`] → SHA-256.
//!
//! Two tensors generated from the same radical set, rank and table
//! versions commit to the same digest. The digest covers the radical set
//! (name and elements), the rank, and every cell in row-major order.

use ralg_core::{sha256_digest, CanonicalBytes, CanonicalizationError, ContentDigest};
use serde::Serialize;

use crate::tensor::Tensor;

/// A content-addressed commitment to a tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TensorCommitment {
    digest: ContentDigest,
    cells: usize,
    found: usize,
}

impl TensorCommitment {
    /// Canonicalize `tensor` and digest it.
    pub fn compute(tensor: &Tensor<'_>) -> Result<Self, CanonicalizationError> {
        let canonical = CanonicalBytes::new(tensor)?;
        let digest = sha256_digest(&canonical);
        tracing::debug!(
            rank = tensor.rank(),
            cells = tensor.len(),
            bytes = canonical.len(),
            digest = %digest.short_hex(),
            "computed tensor commitment"
        );
        Ok(Self {
            digest,
            cells: tensor.len(),
            found: tensor.found_count(),
        })
    }

    /// The SHA-256 digest.
    pub fn digest(&self) -> ContentDigest {
        self.digest
    }

    /// Number of committed cells.
    pub fn cell_count(&self) -> usize {
        self.cells
    }

    /// Number of committed cells with `found = true`.
    pub fn found_count(&self) -> usize {
        self.found
    }
}

impl std::fmt::Display for TensorCommitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digest)
    }
}

#[cfg(test)]
mod tests {
    use ralg_core::{CharacterOracle, RadicalSet};
    use ralg_ids::{CompositionResolver, DecompositionIndex};

    use crate::generator::TensorGenerator;

    fn generator() -> TensorGenerator<CompositionResolver> {
        TensorGenerator::new(CompositionResolver::new(
            CharacterOracle::embedded().unwrap(),
            DecompositionIndex::embedded().unwrap(),
        ))
    }

    #[test]
    fn commitment_is_stable_across_generations() {
        let g = generator();
        let set = RadicalSet::from_chars("五行", "金木水火土".chars(), g.resolver().oracle()).unwrap();
        let a = g.generate(&set, 2).unwrap().commitment().unwrap();
        let b = g.generate(&set, 2).unwrap().commitment().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.cell_count(), 25);
        assert_eq!(a.digest().to_hex().len(), 64);
        assert!(a.to_string().starts_with("sha256:"));
    }

    #[test]
    fn commitment_distinguishes_rank_and_order() {
        let g = generator();
        let oracle = g.resolver().oracle();
        let forward = RadicalSet::from_chars("五行", "金木水火土".chars(), oracle).unwrap();
        let reversed = RadicalSet::from_chars("五行", "土火水木金".chars(), oracle).unwrap();
        let c2 = g.generate(&forward, 2).unwrap().commitment().unwrap();
        let c3 = g.generate(&forward, 3).unwrap().commitment().unwrap();
        let r2 = g.generate(&reversed, 2).unwrap().commitment().unwrap();
        assert_ne!(c2.digest(), c3.digest());
        assert_ne!(c2.digest(), r2.digest());
        assert_eq!(c2.found_count(), r2.found_count());
    }

    #[test]
    fn commitment_covers_set_name() {
        let g = generator();
        let oracle = g.resolver().oracle();
        let a = RadicalSet::from_chars("五行", "木土".chars(), oracle).unwrap();
        let b = RadicalSet::from_chars("other", "木土".chars(), oracle).unwrap();
        assert_ne!(
            g.generate(&a, 2).unwrap().commitment().unwrap(),
            g.generate(&b, 2).unwrap().commitment().unwrap()
        );
    }
}
