//! # Canonical Serialization
//!
//! Defines [`CanonicalBytes`], the only input accepted by the digest
//! functions in [`crate::digest`]. Data tables and generated tensors are
//! fingerprinted through this type so that two processes loading the same
//! table, or generating the same tensor, always agree on its digest.
//!
//! ## Rules
//!
//! 1. Values are converted to a JSON tree with `serde_json`.
//! 2. Non-integer numbers are rejected. Nothing in a table or tensor is a
//!    float, and float formatting is the usual source of digest drift.
//! 3. The tree is serialized with `serde_jcs` (RFC 8785): sorted keys,
//!    compact separators, UTF-8 passthrough.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced by RFC 8785 canonicalization of a float-free value.
///
/// The inner vector is private; [`CanonicalBytes::new`] is the only
/// constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::FloatRejected`] if the value contains
    /// a non-integer number, or [`CanonicalizationError::SerializationFailed`]
    /// if serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let bytes = serde_jcs::to_vec(&value)?;
        Ok(Self(bytes))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_f64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(())
        }
        Value::Array(items) => items.iter().try_for_each(reject_floats),
        Value::Object(map) => map.values().try_for_each(reject_floats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn keys_are_sorted() {
        let mut map = HashMap::new();
        map.insert("zeta", 1);
        map.insert("alpha", 2);
        let cb = CanonicalBytes::new(&map).unwrap();
        assert_eq!(cb.as_bytes(), br#"{"alpha":2,"zeta":1}"#);
    }

    #[test]
    fn floats_are_rejected() {
        let data = serde_json::json!({"weight": 0.5});
        assert!(matches!(
            CanonicalBytes::new(&data),
            Err(CanonicalizationError::FloatRejected(_))
        ));
    }

    #[test]
    fn nested_floats_are_rejected() {
        let data = serde_json::json!({"cells": [[1, 2], [3, 1.25]]});
        assert!(CanonicalBytes::new(&data).is_err());
    }

    #[test]
    fn ideographs_pass_through_as_utf8() {
        let data = serde_json::json!({"character": "鑫"});
        let cb = CanonicalBytes::new(&data).unwrap();
        let s = std::str::from_utf8(cb.as_bytes()).unwrap();
        assert_eq!(s, r#"{"character":"鑫"}"#);
    }

    #[test]
    fn integers_pass() {
        let data = serde_json::json!({"rank": 3, "offset": -1, "cells": 125});
        assert!(CanonicalBytes::new(&data).is_ok());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Canonicalization is deterministic for arbitrary string maps.
        #[test]
        fn canonical_bytes_deterministic(
            entries in prop::collection::btree_map("[a-z]{1,8}", "\\PC{0,8}", 0..16)
        ) {
            let a = CanonicalBytes::new(&entries).unwrap();
            let b = CanonicalBytes::new(&entries).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }

        /// Canonical output always parses back as JSON.
        #[test]
        fn canonical_bytes_valid_json(values in prop::collection::vec(any::<i64>(), 0..32)) {
            let cb = CanonicalBytes::new(&values).unwrap();
            let parsed: Result<Value, _> = serde_json::from_slice(cb.as_bytes());
            prop_assert!(parsed.is_ok());
        }
    }
}
