//! Index document representation.
//!
//! An [`IndexDocument`] is the flat, multi-valued document handed to a
//! search engine: field name → ordered list of normalized values. Writes only
//! ever append, so several sources can be merged into one document.
//!
//! # Example
//!
//! ```rust
//! use fabryk_fieldmap::IndexDocument;
//!
//! let mut doc = IndexDocument::new();
//! doc.insert("title_t", "  Major   Triad ").insert("title_t", "Triad");
//!
//! assert_eq!(doc.values("title_t"), ["Major Triad", "Triad"]);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::normalize;
use crate::value::FieldValue;

/// Resolved field names mapped to their value lists.
pub type FieldMap = BTreeMap<String, Vec<String>>;

/// A flat, multi-valued search document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexDocument {
    fields: FieldMap,
}

impl IndexDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize `value` and append it to `field_name`.
    pub fn insert(&mut self, field_name: &str, value: impl Into<FieldValue>) -> &mut Self {
        let value = value.into();
        normalize::insert(self, field_name, Some(&value))
    }

    /// Append every value of a resolved field map, preserving order.
    ///
    /// Fields that resolved to no values are still created.
    pub fn merge_fields(&mut self, fields: FieldMap) -> &mut Self {
        for (name, values) in fields {
            let entry = self.fields.entry(name).or_default();
            entry.extend(values);
        }
        self
    }

    /// Values for a field, if the field exists.
    pub fn get(&self, field_name: &str) -> Option<&[String]> {
        self.fields.get(field_name).map(Vec::as_slice)
    }

    /// Values for a field, or an empty slice.
    pub fn values(&self, field_name: &str) -> &[String] {
        self.get(field_name).unwrap_or(&[])
    }

    /// Check whether a field exists (possibly with no values).
    pub fn contains_field(&self, field_name: &str) -> bool {
        self.fields.contains_key(field_name)
    }

    /// Iterate over field names in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterate over `(field, values)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow the underlying field map.
    pub fn as_map(&self) -> &FieldMap {
        &self.fields
    }

    /// Take ownership of the underlying field map.
    pub fn into_map(self) -> FieldMap {
        self.fields
    }

    pub(crate) fn push_normalized(&mut self, field_name: &str, normalized: String) {
        self.fields
            .entry(field_name.to_string())
            .or_default()
            .push(normalized);
    }
}

impl From<FieldMap> for IndexDocument {
    fn from(fields: FieldMap) -> Self {
        Self { fields }
    }
}

// ============================================================================
// Tests
// ============================================================================
