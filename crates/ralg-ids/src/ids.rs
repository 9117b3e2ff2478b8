//! # Ideographic Description Sequences
//!
//! Parses prefix-notation IDS strings such as `⿱金⿰金金` into an
//! [`IdsNode`] tree and renders trees back to strings.
//!
//! Twelve operators are supported: ten binary (⿰⿱⿴⿵⿶⿷⿸⿹⿺⿻) and two
//! ternary (⿲⿳). Every other character is a leaf component.

use std::fmt;

use ralg_core::IdsError;
use serde::Serialize;

/// Deepest operator nesting [`IdsNode::parse`] accepts. Real decompositions
/// stay well under ten levels.
pub const MAX_IDS_DEPTH: usize = 32;

/// An Ideographic Description Character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdsOperator {
    /// ⿰ left to right
    LeftToRight,
    /// ⿱ above to below
    AboveToBelow,
    /// ⿲ left to middle and right
    LeftToMiddleAndRight,
    /// ⿳ above to middle and below
    AboveToMiddleAndBelow,
    /// ⿴ full surround
    FullSurround,
    /// ⿵ surround from above
    SurroundFromAbove,
    /// ⿶ surround from below
    SurroundFromBelow,
    /// ⿷ surround from left
    SurroundFromLeft,
    /// ⿸ surround from upper left
    SurroundFromUpperLeft,
    /// ⿹ surround from upper right
    SurroundFromUpperRight,
    /// ⿺ surround from lower left
    SurroundFromLowerLeft,
    /// ⿻ overlaid
    Overlaid,
}

impl IdsOperator {
    /// All supported operators in code point order.
    pub const ALL: [IdsOperator; 12] = [
        Self::LeftToRight,
        Self::AboveToBelow,
        Self::LeftToMiddleAndRight,
        Self::AboveToMiddleAndBelow,
        Self::FullSurround,
        Self::SurroundFromAbove,
        Self::SurroundFromBelow,
        Self::SurroundFromLeft,
        Self::SurroundFromUpperLeft,
        Self::SurroundFromUpperRight,
        Self::SurroundFromLowerLeft,
        Self::Overlaid,
    ];

    /// The operator's character.
    pub fn as_char(self) -> char {
        match self {
            Self::LeftToRight => '⿰',
            Self::AboveToBelow => '⿱',
            Self::LeftToMiddleAndRight => '⿲',
            Self::AboveToMiddleAndBelow => '⿳',
            Self::FullSurround => '⿴',
            Self::SurroundFromAbove => '⿵',
            Self::SurroundFromBelow => '⿶',
            Self::SurroundFromLeft => '⿷',
            Self::SurroundFromUpperLeft => '⿸',
            Self::SurroundFromUpperRight => '⿹',
            Self::SurroundFromLowerLeft => '⿺',
            Self::Overlaid => '⿻',
        }
    }

    /// Map a character to an operator, if it is one of the twelve.
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_char() == c)
    }

    /// Number of operands.
    pub fn arity(self) -> usize {
        match self {
            Self::LeftToMiddleAndRight | Self::AboveToMiddleAndBelow => 3,
            _ => 2,
        }
    }
}

impl fmt::Display for IdsOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Serialize for IdsOperator {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.as_char())
    }
}

/// True for any character in the Ideographic Description Characters block
/// (U+2FF0..U+2FFF) or U+31EF, supported or not.
pub fn is_description_character(c: char) -> bool {
    ('\u{2FF0}'..='\u{2FFF}').contains(&c) || c == '\u{31EF}'
}

/// A parsed IDS tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdsNode {
    /// A component character.
    Leaf(char),
    /// An operator applied to its operands.
    Compound {
        /// The operator.
        operator: IdsOperator,
        /// Exactly `operator.arity()` operands.
        children: Vec<IdsNode>,
    },
}

impl IdsNode {
    /// Parse a complete IDS string.
    ///
    /// # Errors
    ///
    /// - [`IdsError::Empty`] for an empty string.
    /// - [`IdsError::Truncated`] if an operator lacks operands.
    /// - [`IdsError::TrailingInput`] if characters remain after the tree.
    /// - [`IdsError::UnsupportedOperator`] for description characters other
    ///   than the twelve supported operators.
    /// - [`IdsError::TooDeep`] if operators nest deeper than
    ///   [`MAX_IDS_DEPTH`].
    pub fn parse(ids: &str) -> Result<Self, IdsError> {
        let chars: Vec<char> = ids.chars().collect();
        if chars.is_empty() {
            return Err(IdsError::Empty);
        }
        let mut pos = 0;
        let node = parse_node(&chars, &mut pos, 0)?;
        if pos < chars.len() {
            return Err(IdsError::TrailingInput {
                position: pos,
                rest: chars[pos..].iter().collect(),
            });
        }
        Ok(node)
    }

    /// True for a single component.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// The root operator, if any.
    pub fn operator(&self) -> Option<IdsOperator> {
        match self {
            Self::Leaf(_) => None,
            Self::Compound { operator, .. } => Some(*operator),
        }
    }

    /// Leaf components in reading order.
    pub fn leaves(&self) -> Vec<char> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<char>) {
        match self {
            Self::Leaf(c) => out.push(*c),
            Self::Compound { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Number of leaf components.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Compound { children, .. } => children.iter().map(Self::leaf_count).sum(),
        }
    }

    /// Replace every leaf with `f(leaf)`, keeping the shape.
    pub fn map_leaves(&self, f: &impl Fn(char) -> char) -> Self {
        match self {
            Self::Leaf(c) => Self::Leaf(f(*c)),
            Self::Compound { operator, children } => Self::Compound {
                operator: *operator,
                children: children.iter().map(|c| c.map_leaves(f)).collect(),
            },
        }
    }

    /// Render back to prefix notation.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

fn parse_node(chars: &[char], pos: &mut usize, depth: usize) -> Result<IdsNode, IdsError> {
    let c = chars[*pos];
    *pos += 1;
    let Some(operator) = IdsOperator::from_char(c) else {
        if is_description_character(c) {
            return Err(IdsError::UnsupportedOperator(c));
        }
        return Ok(IdsNode::Leaf(c));
    };
    if depth >= MAX_IDS_DEPTH {
        return Err(IdsError::TooDeep { max: MAX_IDS_DEPTH });
    }
    let expected = operator.arity();
    let mut children = Vec::with_capacity(expected);
    for found in 0..expected {
        if *pos >= chars.len() {
            return Err(IdsError::Truncated {
                operator: c,
                expected,
                found,
            });
        }
        children.push(parse_node(chars, pos, depth + 1)?);
    }
    Ok(IdsNode::Compound { operator, children })
}

impl fmt::Display for IdsNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(c) => write!(f, "{c}"),
            Self::Compound { operator, children } => {
                write!(f, "{operator}")?;
                for child in children {
                    write!(f, "{child}")?;
                }
                Ok(())
            }
        }
    }
}

impl Serialize for IdsNode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_arity() {
        let ternary: Vec<char> = IdsOperator::ALL
            .into_iter()
            .filter(|op| op.arity() == 3)
            .map(IdsOperator::as_char)
            .collect();
        assert_eq!(ternary, vec!['⿲', '⿳']);
        assert_eq!(IdsOperator::ALL.iter().filter(|op| op.arity() == 2).count(), 10);
    }

    #[test]
    fn operators_are_consecutive_code_points() {
        for (i, op) in IdsOperator::ALL.into_iter().enumerate() {
            assert_eq!(u32::from(op.as_char()), 0x2FF0 + i as u32);
            assert_eq!(IdsOperator::from_char(op.as_char()), Some(op));
        }
        assert_eq!(IdsOperator::from_char('木'), None);
    }

    #[test]
    fn parse_single_leaf() {
        assert_eq!(IdsNode::parse("木").unwrap(), IdsNode::Leaf('木'));
    }

    #[test]
    fn parse_binary() {
        let node = IdsNode::parse("⿰木木").unwrap();
        assert_eq!(node.operator(), Some(IdsOperator::LeftToRight));
        assert_eq!(node.leaves(), vec!['木', '木']);
    }

    #[test]
    fn parse_nested() {
        let node = IdsNode::parse("⿱金⿰金金").unwrap();
        assert_eq!(node.leaves(), vec!['金', '金', '金']);
        assert_eq!(node.leaf_count(), 3);
        assert_eq!(node.render(), "⿱金⿰金金");
    }

    #[test]
    fn parse_ternary() {
        let node = IdsNode::parse("⿲彳山攵").unwrap();
        assert_eq!(node.leaves(), vec!['彳', '山', '攵']);
    }

    #[test]
    fn empty_input_rejected() {
        assert_eq!(IdsNode::parse(""), Err(IdsError::Empty));
    }

    #[test]
    fn truncated_input_rejected() {
        assert_eq!(
            IdsNode::parse("⿰木"),
            Err(IdsError::Truncated {
                operator: '⿰',
                expected: 2,
                found: 1
            })
        );
        assert!(matches!(
            IdsNode::parse("⿱金⿰金"),
            Err(IdsError::Truncated { operator: '⿰', .. })
        ));
    }

    #[test]
    fn trailing_input_rejected() {
        assert_eq!(
            IdsNode::parse("⿰木木木"),
            Err(IdsError::TrailingInput {
                position: 3,
                rest: "木".into()
            })
        );
    }

    #[test]
    fn unsupported_operator_rejected() {
        assert_eq!(
            IdsNode::parse("\u{2FFC}木木"),
            Err(IdsError::UnsupportedOperator('\u{2FFC}'))
        );
    }

    #[test]
    fn map_leaves_keeps_shape() {
        let node = IdsNode::parse("⿰氵金").unwrap();
        let folded = node.map_leaves(&|c| if c == '氵' { '水' } else { c });
        assert_eq!(folded.render(), "⿰水金");
    }

    fn nested(depth: usize) -> String {
        let mut ids = "⿰".repeat(depth);
        ids.push_str(&"木".repeat(depth + 1));
        ids
    }

    #[test]
    fn nesting_up_to_limit_parses() {
        let node = IdsNode::parse(&nested(MAX_IDS_DEPTH)).unwrap();
        assert_eq!(node.leaf_count(), MAX_IDS_DEPTH + 1);
    }

    #[test]
    fn nesting_past_limit_rejected() {
        assert_eq!(
            IdsNode::parse(&nested(MAX_IDS_DEPTH + 1)).unwrap_err(),
            IdsError::TooDeep { max: MAX_IDS_DEPTH }
        );
    }

    #[test]
    fn long_operator_run_is_an_error_not_an_overflow() {
        let handle = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(|| IdsNode::parse(&"⿰".repeat(200_000)))
            .unwrap();
        assert_eq!(
            handle.join().unwrap().unwrap_err(),
            IdsError::TooDeep { max: MAX_IDS_DEPTH }
        );
    }

    #[test]
    fn serializes_as_string() {
        let node = IdsNode::parse("⿱火火").unwrap();
        assert_eq!(serde_json::to_value(&node).unwrap(), serde_json::json!("⿱火火"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_node() -> impl Strategy<Value = IdsNode> {
        let leaf = prop::sample::select(vec!['金', '木', '水', '火', '土', '口', '日'])
            .prop_map(IdsNode::Leaf);
        leaf.prop_recursive(4, 32, 3, |inner| {
            prop::sample::select(IdsOperator::ALL.to_vec()).prop_flat_map(move |operator| {
                prop::collection::vec(inner.clone(), operator.arity())
                    .prop_map(move |children| IdsNode::Compound { operator, children })
            })
        })
    }

    proptest! {
        /// Rendering then parsing yields the same tree.
        #[test]
        fn render_parse_identity(node in arb_node()) {
            let rendered = node.render();
            prop_assert_eq!(IdsNode::parse(&rendered).unwrap(), node);
        }

        /// Leaf count matches the number of non-operator characters.
        #[test]
        fn leaf_count_matches_rendering(node in arb_node()) {
            let rendered = node.render();
            let non_ops = rendered.chars().filter(|c| IdsOperator::from_char(*c).is_none()).count();
            prop_assert_eq!(node.leaf_count(), non_ops);
        }
    }
}
