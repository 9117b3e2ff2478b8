//! # IDS Structures
//!
//! An [`IdsStructure`] is an IDS tree shape with empty slots in place of
//! components. Filling the slots with radicals in order yields an IDS
//! string that can be looked up in the decomposition index.
//!
//! The number of shapes over `n` slots follows
//!
//! ```text
//! T(1) = 1
//! T(n) = 10 * sum T(a)T(b)        over a + b = n
//!      +  2 * sum T(a)T(b)T(c)    over a + b + c = n
//! ```
//!
//! giving 1, 10, 202, 5100, 144212, ... Shapes are built bottom-up by
//! dynamic programming with shared subtrees, so enumerating T(5) allocates
//! one node per shape rather than one per tree.

use std::fmt;
use std::sync::Arc;

use ralg_core::{IdsError, Radical};

use crate::ids::{IdsNode, IdsOperator};

/// Largest slot count [`enumerate_structures`] will materialize.
pub const MAX_ENUMERATED_SLOTS: usize = 5;

/// An IDS shape with unfilled slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdsStructure {
    /// A position to be filled by one component.
    Slot,
    /// An operator over sub-shapes.
    Node {
        /// The operator.
        operator: IdsOperator,
        /// Exactly `operator.arity()` sub-shapes.
        children: Vec<Arc<IdsStructure>>,
    },
}

impl IdsStructure {
    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        match self {
            Self::Slot => 1,
            Self::Node { children, .. } => children.iter().map(|c| c.slot_count()).sum(),
        }
    }

    /// Fill the slots with `components` in reading order.
    ///
    /// # Errors
    ///
    /// [`IdsError::ArityMismatch`] unless exactly one component is given
    /// per slot.
    pub fn fill(&self, components: &[char]) -> Result<IdsNode, IdsError> {
        let mismatch = IdsError::ArityMismatch {
            expected: self.slot_count(),
            actual: components.len(),
        };
        let mut rest = components.iter().copied();
        let node = self.fill_from(&mut rest, &mismatch)?;
        if rest.next().is_some() {
            return Err(mismatch);
        }
        Ok(node)
    }

    fn fill_from(
        &self,
        components: &mut impl Iterator<Item = char>,
        mismatch: &IdsError,
    ) -> Result<IdsNode, IdsError> {
        match self {
            Self::Slot => components
                .next()
                .map(IdsNode::Leaf)
                .ok_or_else(|| mismatch.clone()),
            Self::Node { operator, children } => Ok(IdsNode::Compound {
                operator: *operator,
                children: children
                    .iter()
                    .map(|c| c.fill_from(components, mismatch))
                    .collect::<Result<_, _>>()?,
            }),
        }
    }

    /// Fill the slots with radicals and render the IDS string.
    pub fn render(&self, radicals: &[Radical]) -> Result<String, IdsError> {
        let components: Vec<char> = radicals.iter().map(|r| r.as_char()).collect();
        Ok(self.fill(&components)?.render())
    }
}

impl fmt::Display for IdsStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slot => write!(f, "□"),
            Self::Node { operator, children } => {
                write!(f, "{operator}")?;
                for child in children {
                    write!(f, "{child}")?;
                }
                Ok(())
            }
        }
    }
}

/// Every IDS shape over exactly `n` slots.
///
/// Binary operators come first in code point order, then ternary; within an
/// operator, shapes are ordered by slot split and then by sub-shape order.
///
/// # Errors
///
/// [`IdsError::ZeroSlots`] for `n == 0`, and [`IdsError::TooManySlots`]
/// above [`MAX_ENUMERATED_SLOTS`]. Use [`structure_count`] for larger `n`.
pub fn enumerate_structures(n: usize) -> Result<Vec<Arc<IdsStructure>>, IdsError> {
    if n == 0 {
        return Err(IdsError::ZeroSlots);
    }
    if n > MAX_ENUMERATED_SLOTS {
        return Err(IdsError::TooManySlots {
            slots: n,
            max: MAX_ENUMERATED_SLOTS,
        });
    }

    // table[k] holds every shape over k slots.
    let mut table: Vec<Vec<Arc<IdsStructure>>> =
        vec![Vec::new(), vec![Arc::new(IdsStructure::Slot)]];
    for k in 2..=n {
        let mut shapes = Vec::new();
        for operator in IdsOperator::ALL {
            match operator.arity() {
                2 => {
                    for a in 1..k {
                        for left in &table[a] {
                            for right in &table[k - a] {
                                shapes.push(Arc::new(IdsStructure::Node {
                                    operator,
                                    children: vec![Arc::clone(left), Arc::clone(right)],
                                }));
                            }
                        }
                    }
                }
                _ => {
                    for a in 1..k {
                        for b in 1..(k - a) {
                            let c = k - a - b;
                            for first in &table[a] {
                                for second in &table[b] {
                                    for third in &table[c] {
                                        shapes.push(Arc::new(IdsStructure::Node {
                                            operator,
                                            children: vec![
                                                Arc::clone(first),
                                                Arc::clone(second),
                                                Arc::clone(third),
                                            ],
                                        }));
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        table.push(shapes);
    }
    tracing::debug!(slots = n, shapes = table[n].len(), "enumerated IDS structures");
    Ok(table.swap_remove(n))
}

/// Number of IDS shapes over `n` slots, without materializing them.
///
/// Returns `None` if the count overflows `u128`.
pub fn structure_count(n: usize) -> Option<u128> {
    if n == 0 {
        return Some(0);
    }
    let binary = IdsOperator::ALL.iter().filter(|op| op.arity() == 2).count() as u128;
    let ternary = IdsOperator::ALL.iter().filter(|op| op.arity() == 3).count() as u128;

    let mut t: Vec<u128> = vec![0, 1];
    for k in 2..=n {
        let mut pairs: u128 = 0;
        for a in 1..k {
            pairs = pairs.checked_add(t[a].checked_mul(t[k - a])?)?;
        }
        let mut triples: u128 = 0;
        for a in 1..k {
            for b in 1..(k - a) {
                let c = k - a - b;
                let term = t[a].checked_mul(t[b])?.checked_mul(t[c])?;
                triples = triples.checked_add(term)?;
            }
        }
        t.push(
            binary
                .checked_mul(pairs)?
                .checked_add(ternary.checked_mul(triples)?)?,
        );
    }
    t.get(n).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn counts_match_recurrence() {
        assert_eq!(structure_count(0), Some(0));
        assert_eq!(structure_count(1), Some(1));
        assert_eq!(structure_count(2), Some(10));
        assert_eq!(structure_count(3), Some(202));
        assert_eq!(structure_count(4), Some(5100));
        assert_eq!(structure_count(5), Some(144_212));
    }

    #[test]
    fn count_eventually_overflows() {
        assert!(structure_count(25).is_some());
        assert!(structure_count(30).is_none());
    }

    #[test]
    fn enumeration_matches_count() {
        for n in 1..=4 {
            let shapes = enumerate_structures(n).unwrap();
            assert_eq!(Some(shapes.len() as u128), structure_count(n), "n = {n}");
            assert!(shapes.iter().all(|s| s.slot_count() == n));
        }
    }

    #[test]
    fn enumerated_shapes_are_distinct() {
        let shapes = enumerate_structures(3).unwrap();
        let rendered: HashSet<String> = shapes.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered.len(), 202);
    }

    #[test]
    fn two_slot_shapes_in_operator_order() {
        let shapes = enumerate_structures(2).unwrap();
        let rendered: Vec<String> = shapes.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered[0], "⿰□□");
        assert_eq!(rendered[1], "⿱□□");
        assert_eq!(rendered[9], "⿻□□");
    }

    #[test]
    fn enumeration_limits() {
        assert_eq!(enumerate_structures(0).unwrap_err(), IdsError::ZeroSlots);
        assert_eq!(
            enumerate_structures(6).unwrap_err(),
            IdsError::TooManySlots { slots: 6, max: 5 }
        );
    }

    #[test]
    fn fill_renders_ids() {
        let shapes = enumerate_structures(3).unwrap();
        let filled: Vec<String> = shapes
            .iter()
            .map(|s| s.fill(&['金', '金', '金']).unwrap().render())
            .collect();
        assert!(filled.contains(&"⿱金⿰金金".to_string()));
        assert!(filled.contains(&"⿳金金金".to_string()));
    }

    #[test]
    fn fill_arity_mismatch() {
        let shapes = enumerate_structures(2).unwrap();
        assert_eq!(
            shapes[0].fill(&['木']).unwrap_err(),
            IdsError::ArityMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn fill_with_extra_components_rejected() {
        let shapes = enumerate_structures(2).unwrap();
        assert_eq!(
            shapes[0].fill(&['木', '木', '木']).unwrap_err(),
            IdsError::ArityMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn fill_never_invents_components() {
        let shape = &enumerate_structures(3).unwrap()[0];
        for n in 0..3 {
            let components = vec!['火'; n];
            assert!(matches!(
                shape.fill(&components),
                Err(IdsError::ArityMismatch { expected: 3, .. })
            ));
        }
        assert_eq!(shape.fill(&['火'; 3]).unwrap().leaves(), vec!['火'; 3]);
    }
}
