//! # Radicals and Radical Sets
//!
//! [`Radical`] is a validated single code point; [`RadicalSet`] is the
//! named, ordered, duplicate-free generating vector for tensor
//! construction.
//!
//! Both are immutable once built. A radical set is shared read-only by any
//! number of tensors, which borrow it for their axis labels.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::ValidationError;
use crate::oracle::IdeographOracle;

/// A single CJKV radical or simple ideograph.
///
/// # Validation
///
/// The code point must be a valid ideograph or a radical-only form
/// (Kangxi Radicals, CJK Radicals Supplement), and must not be a
/// simplified-Chinese form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Radical(char);

impl Radical {
    /// Validate a character against the oracle.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InvalidRadical`] if `c` is neither an ideograph
    ///   nor a radical form.
    /// - [`ValidationError::SimplifiedRadical`] if `c` is a simplified form.
    pub fn new(c: char, oracle: &dyn IdeographOracle) -> Result<Self, ValidationError> {
        if !oracle.is_valid_ideograph(c) && !oracle.is_radical_form(c) {
            return Err(ValidationError::InvalidRadical(c));
        }
        if oracle.is_simplified_form(c) {
            return Err(ValidationError::SimplifiedRadical(c));
        }
        Ok(Self(c))
    }

    /// Validate a string that must hold exactly one character.
    pub fn parse(s: &str, oracle: &dyn IdeographOracle) -> Result<Self, ValidationError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c, oracle),
            _ => Err(ValidationError::NotSingleCharacter(s.to_string())),
        }
    }

    /// The underlying character.
    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Radical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Radical> for char {
    fn from(r: Radical) -> char {
        r.0
    }
}

/// A named, ordered collection of distinct radicals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadicalSet {
    name: String,
    elements: Vec<Radical>,
    #[serde(skip)]
    positions: HashMap<Radical, usize>,
}

impl RadicalSet {
    /// Build a radical set.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptySet`] if `elements` is empty.
    /// - [`ValidationError::DuplicateRadical`] if any radical repeats.
    pub fn new(name: impl Into<String>, elements: Vec<Radical>) -> Result<Self, ValidationError> {
        if elements.is_empty() {
            return Err(ValidationError::EmptySet);
        }
        let mut positions = HashMap::with_capacity(elements.len());
        for (i, &r) in elements.iter().enumerate() {
            if let Some(&first) = positions.get(&r) {
                return Err(ValidationError::DuplicateRadical {
                    radical: r.as_char(),
                    first,
                    second: i,
                });
            }
            positions.insert(r, i);
        }
        Ok(Self {
            name: name.into(),
            elements,
            positions,
        })
    }

    /// Validate each character, then build the set.
    pub fn from_chars(
        name: impl Into<String>,
        chars: impl IntoIterator<Item = char>,
        oracle: &dyn IdeographOracle,
    ) -> Result<Self, ValidationError> {
        let elements = chars
            .into_iter()
            .map(|c| Radical::new(c, oracle))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, elements)
    }

    /// Human-readable label, e.g. "五行".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of radicals.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false; a radical set cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The radical at `index`, if in range.
    pub fn element_at(&self, index: usize) -> Option<Radical> {
        self.elements.get(index).copied()
    }

    /// Position of `radical` in the set.
    pub fn index_of(&self, radical: Radical) -> Option<usize> {
        self.positions.get(&radical).copied()
    }

    /// The radicals in order.
    pub fn as_slice(&self) -> &[Radical] {
        &self.elements
    }

    /// Iterate the radicals in order.
    pub fn iter(&self) -> impl Iterator<Item = Radical> + '_ {
        self.elements.iter().copied()
    }
}

impl fmt::Display for RadicalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.name)?;
        for r in &self.elements {
            write!(f, "{r}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::CharacterOracle;

    fn oracle() -> CharacterOracle {
        CharacterOracle::embedded().unwrap()
    }

    #[test]
    fn wu_xing_set_builds() {
        let set = RadicalSet::from_chars("五行", "金木水火土".chars(), &oracle()).unwrap();
        assert_eq!(set.name(), "五行");
        assert_eq!(set.len(), 5);
        assert_eq!(set.element_at(0).map(Radical::as_char), Some('金'));
        assert_eq!(set.element_at(4).map(Radical::as_char), Some('土'));
        assert_eq!(set.element_at(5), None);
    }

    #[test]
    fn index_of_finds_position() {
        let o = oracle();
        let set = RadicalSet::from_chars("五行", "金木水火土".chars(), &o).unwrap();
        let fire = Radical::new('火', &o).unwrap();
        let sun = Radical::new('日', &o).unwrap();
        assert_eq!(set.index_of(fire), Some(3));
        assert_eq!(set.index_of(sun), None);
    }

    #[test]
    fn empty_set_rejected() {
        assert_eq!(
            RadicalSet::new("empty", vec![]).unwrap_err(),
            ValidationError::EmptySet
        );
    }

    #[test]
    fn duplicate_radical_rejected() {
        let err = RadicalSet::from_chars("dup", "木水木".chars(), &oracle()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateRadical {
                radical: '木',
                first: 0,
                second: 2,
            }
        );
    }

    #[test]
    fn non_cjk_radical_rejected() {
        let err = RadicalSet::from_chars("latin", "木A".chars(), &oracle()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidRadical('A'));
    }

    #[test]
    fn simplified_radical_rejected() {
        let err = Radical::new('们', &oracle()).unwrap_err();
        assert_eq!(err, ValidationError::SimplifiedRadical('们'));
    }

    #[test]
    fn kangxi_radical_accepted() {
        let r = Radical::new('\u{2F4A}', &oracle()).unwrap();
        assert_eq!(r.as_char(), '\u{2F4A}');
    }

    #[test]
    fn parse_requires_single_character() {
        let o = oracle();
        assert!(Radical::parse("木", &o).is_ok());
        assert_eq!(
            Radical::parse("木木", &o).unwrap_err(),
            ValidationError::NotSingleCharacter("木木".into())
        );
        assert!(Radical::parse("", &o).is_err());
    }

    #[test]
    fn iteration_preserves_order() {
        let set = RadicalSet::from_chars("日月", "日月".chars(), &oracle()).unwrap();
        let chars: String = set.iter().map(char::from).collect();
        assert_eq!(chars, "日月");
        assert_eq!(set.to_string(), "日月 [日月]");
    }

    #[test]
    fn serializes_name_and_elements_only() {
        let set = RadicalSet::from_chars("五行", "金木".chars(), &oracle()).unwrap();
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!({"name": "五行", "elements": ["金", "木"]}));
    }
}
