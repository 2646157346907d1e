//! Field name and value resolution.
//!
//! Given a field base name, a data type, and the index types a caller asks
//! for, the resolver produces final field names and transformed, normalized
//! values using a [`MappingRegistry`].
//!
//! # Active index types
//!
//! Every index type declared with `default` is applied unless excluded. A
//! request for `not_<type>` excludes `<type>`; excluding something that is
//! not active has no effect. Unknown index types are logged and skipped.
//!
//! # Example
//!
//! ```rust
//! use fabryk_fieldmap::{FieldValue, IndexTypeOptions, MappingRegistry};
//!
//! let mut registry = MappingRegistry::new();
//! registry
//!     .declare_index_type("searchable", IndexTypeOptions::new().suffix("_s").included_by_default(true))
//!     .declare_index_type("edible", IndexTypeOptions::new().suffix("_food"));
//!
//! let fields = registry.resolve_fields("bar", &FieldValue::from("x"), Some("string"), &["edible"]);
//! assert_eq!(fields.get("bar_s").unwrap(), &["x"]);
//! assert_eq!(fields.get("bar_food").unwrap(), &["x"]);
//! ```

use crate::document::FieldMap;
use crate::normalize::normalize;
use crate::registry::MappingRegistry;
use crate::value::FieldValue;

/// Prefix marking an index type as excluded in a request.
pub const EXCLUSION_PREFIX: &str = "not_";

/// Index type used by [`MappingRegistry::resolve_searchable_name`].
pub const DEFAULT_INDEX_TYPE: &str = "searchable";

impl MappingRegistry {
    /// Resolve the field name for one index type.
    ///
    /// Suffix precedence: the exact data-type override, then the default
    /// data-type override, then the container suffix. An override declared
    /// without a suffix falls through to the container suffix. Returns `None`
    /// (and logs a warning) for an unknown index type.
    pub fn resolve_name(
        &self,
        base_name: &str,
        data_type: Option<&str>,
        index_type: &str,
    ) -> Option<String> {
        let Some(rule) = self.rule(index_type) else {
            log::warn!("Unknown index type '{index_type}' for field {base_name}");
            return None;
        };
        Some(format!("{base_name}{}", rule.suffix_for(data_type)))
    }

    /// Resolve the field name for the `searchable` index type.
    pub fn resolve_searchable_name(
        &self,
        base_name: &str,
        data_type: Option<&str>,
    ) -> Option<String> {
        self.resolve_name(base_name, data_type, DEFAULT_INDEX_TYPE)
    }

    /// Resolve every active index type into field names and values.
    ///
    /// Each value is run through the governing transform (the selected
    /// data-type override's, else the container's, else identity) and then
    /// normalized. A field receives a value only if an equal normalized value
    /// is not already in its list, so two index types that resolve to the
    /// same field name contribute one entry per distinct value.
    pub fn resolve_fields<S: AsRef<str>>(
        &self,
        base_name: &str,
        value: &FieldValue,
        data_type: Option<&str>,
        index_types: &[S],
    ) -> FieldMap {
        let mut fields = FieldMap::new();

        for index_type in self.active_index_types(index_types) {
            let Some(name) = self.resolve_name(base_name, data_type, index_type) else {
                continue;
            };
            // resolve_name succeeded, so the rule exists.
            let Some(rule) = self.rule(index_type) else {
                continue;
            };

            let transformed = match rule.transform_for(data_type) {
                Some(transform) => transform(value, base_name),
                None => Some(value.clone()),
            };

            let entry = fields.entry(name).or_default();
            if let Some(transformed) = transformed {
                let normalized = normalize(Some(&transformed));
                if !entry.contains(&normalized) {
                    entry.push(normalized);
                }
            }
        }

        fields
    }

    /// Compute the active index types for a request.
    ///
    /// Requested types come first in request order, followed by default
    /// types in registry order; exclusions are removed last.
    pub fn active_index_types<'a, S: AsRef<str>>(&'a self, requested: &'a [S]) -> Vec<&'a str> {
        let mut active: Vec<&str> = Vec::new();
        let mut excluded: Vec<&str> = Vec::new();

        for index_type in requested {
            let index_type = index_type.as_ref();
            match index_type.strip_prefix(EXCLUSION_PREFIX) {
                Some(target) => excluded.push(target),
                None if !active.contains(&index_type) => active.push(index_type),
                None => {}
            }
        }

        for index_type in self.default_index_types() {
            if !active.contains(&index_type) {
                active.push(index_type);
            }
        }

        active.retain(|index_type| !excluded.contains(index_type));
        active
    }
}

// ============================================================================
// Tests
// ============================================================================
