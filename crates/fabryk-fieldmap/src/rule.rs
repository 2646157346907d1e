//! Index-type rules and the option structures used to declare them.
//!
//! An [`IndexTypeRule`] describes one purpose for indexing a value
//! (`searchable`, `displayable`, ...): the suffix appended to the field base
//! name and an optional value transform. Rules can refine both per data type
//! through [`DataTypeOverride`]s, plus one *default* override used when no
//! exact data type matches.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::value::FieldValue;

/// Value transform: `(raw value, field base name) -> value`.
///
/// Returning `None` means the value could not be produced (for example an
/// unparseable date); the field is still created but receives no entry.
pub type Transform = Arc<dyn Fn(&FieldValue, &str) -> Option<FieldValue> + Send + Sync>;

/// Wrap a closure as a [`Transform`].
pub fn transform<F>(f: F) -> Transform
where
    F: Fn(&FieldValue, &str) -> Option<FieldValue> + Send + Sync + 'static,
{
    Arc::new(f)
}

// ============================================================================
// Options
// ============================================================================

/// Options for declaring or redeclaring an index type.
///
/// Unset fields leave an inherited rule untouched when merging.
#[derive(Clone, Default)]
pub struct IndexTypeOptions {
    /// Container suffix.
    pub suffix: Option<String>,
    /// Whether the index type is applied without being requested.
    pub default: Option<bool>,
    /// Container transform.
    pub transform: Option<Transform>,
}

impl IndexTypeOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the container suffix.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Set whether the index type is included by default.
    pub fn included_by_default(mut self, default: bool) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the container transform.
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldValue, &str) -> Option<FieldValue> + Send + Sync + 'static,
    {
        self.transform = Some(transform(f));
        self
    }
}

impl fmt::Debug for IndexTypeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexTypeOptions")
            .field("suffix", &self.suffix)
            .field("default", &self.default)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// Options for a data-type override within an index type.
#[derive(Clone, Default)]
pub struct DataTypeOptions {
    /// Suffix for this data type; falls back to the container suffix.
    pub suffix: Option<String>,
    /// Transform for this data type; falls back to the container transform.
    pub transform: Option<Transform>,
}

impl DataTypeOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the suffix.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Set the transform.
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldValue, &str) -> Option<FieldValue> + Send + Sync + 'static,
    {
        self.transform = Some(transform(f));
        self
    }
}

impl fmt::Debug for DataTypeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTypeOptions")
            .field("suffix", &self.suffix)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

// ============================================================================
// DataTypeOverride
// ============================================================================

/// Per-data-type naming and value rule.
#[derive(Clone, Default)]
pub struct DataTypeOverride {
    suffix: Option<String>,
    transform: Option<Transform>,
}

impl DataTypeOverride {
    /// Suffix declared for this data type, if any.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Transform declared for this data type, if any.
    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }
}

impl From<DataTypeOptions> for DataTypeOverride {
    fn from(options: DataTypeOptions) -> Self {
        Self {
            suffix: options.suffix,
            transform: options.transform,
        }
    }
}

impl fmt::Debug for DataTypeOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTypeOverride")
            .field("suffix", &self.suffix)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

// ============================================================================
// IndexTypeRule
// ============================================================================

/// Naming and value rule for one index type.
#[derive(Clone)]
pub struct IndexTypeRule {
    name: String,
    default: bool,
    suffix: String,
    transform: Option<Transform>,
    data_types: BTreeMap<String, DataTypeOverride>,
    // Override for values whose data type was not supplied at all.
    untyped: Option<DataTypeOverride>,
    default_data_type: Option<DataTypeOverride>,
}

impl IndexTypeRule {
    /// Create an empty rule with no suffix that is not applied by default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: false,
            suffix: String::new(),
            transform: None,
            data_types: BTreeMap::new(),
            untyped: None,
            default_data_type: None,
        }
    }

    /// Index type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this index type applies without being requested.
    pub fn is_default(&self) -> bool {
        self.default
    }

    /// Container suffix (possibly empty).
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Container transform, if any.
    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    /// Override registered for an exact data type.
    ///
    /// `None` looks up the override for values with no data type, which is a
    /// tag of its own rather than a wildcard.
    pub fn data_type(&self, data_type: Option<&str>) -> Option<&DataTypeOverride> {
        match data_type {
            Some(tag) => self.data_types.get(tag),
            None => self.untyped.as_ref(),
        }
    }

    /// The default data-type override, if registered.
    pub fn default_data_type(&self) -> Option<&DataTypeOverride> {
        self.default_data_type.as_ref()
    }

    /// Data types with an explicit override, in sorted order.
    pub fn data_type_tags(&self) -> impl Iterator<Item = &str> {
        self.data_types.keys().map(String::as_str)
    }

    /// The override that governs `data_type`: exact match first, then the
    /// default override.
    pub fn select(&self, data_type: Option<&str>) -> Option<&DataTypeOverride> {
        self.data_type(data_type)
            .or(self.default_data_type.as_ref())
    }

    /// Suffix for `data_type`, falling back to the container suffix.
    pub fn suffix_for(&self, data_type: Option<&str>) -> &str {
        self.select(data_type)
            .and_then(DataTypeOverride::suffix)
            .unwrap_or(&self.suffix)
    }

    /// Transform for `data_type`, falling back to the container transform.
    pub fn transform_for(&self, data_type: Option<&str>) -> Option<&Transform> {
        self.select(data_type)
            .and_then(DataTypeOverride::transform)
            .or(self.transform.as_ref())
    }

    /// Overlay declared options; unset options keep their current value.
    pub(crate) fn apply(&mut self, options: IndexTypeOptions) {
        if let Some(suffix) = options.suffix {
            self.suffix = suffix;
        }
        if let Some(default) = options.default {
            self.default = default;
        }
        if let Some(transform) = options.transform {
            self.transform = Some(transform);
        }
    }

    pub(crate) fn set_data_type(&mut self, data_type: Option<&str>, entry: DataTypeOverride) {
        match data_type {
            Some(tag) => {
                self.data_types.insert(tag.to_string(), entry);
            }
            None => self.untyped = Some(entry),
        }
    }

    pub(crate) fn set_default_data_type(&mut self, entry: DataTypeOverride) {
        self.default_data_type = Some(entry);
    }
}

impl fmt::Debug for IndexTypeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexTypeRule")
            .field("name", &self.name)
            .field("default", &self.default)
            .field("suffix", &self.suffix)
            .field("transform", &self.transform.is_some())
            .field("data_types", &self.data_types)
            .field("untyped", &self.untyped)
            .field("default_data_type", &self.default_data_type)
            .finish()
    }
}

// ============================================================================
// TypeBuilder
// ============================================================================

/// Declares data-type overrides while an index type is being declared.
///
/// Each declaration replaces any override previously registered for the same
/// data type; other data types are left alone.
pub struct TypeBuilder<'a> {
    rule: &'a mut IndexTypeRule,
}

impl<'a> TypeBuilder<'a> {
    pub(crate) fn new(rule: &'a mut IndexTypeRule) -> Self {
        Self { rule }
    }

    /// Register an override for one data type.
    pub fn data_type(&mut self, tag: &str, options: DataTypeOptions) -> &mut Self {
        self.rule.set_data_type(Some(tag), options.into());
        self
    }

    /// Register an override for values with no data type.
    pub fn untyped(&mut self, options: DataTypeOptions) -> &mut Self {
        self.rule.set_data_type(None, options.into());
        self
    }

    /// Register the default override used when no data type matches.
    pub fn default_data_type(&mut self, options: DataTypeOptions) -> &mut Self {
        self.rule.set_default_data_type(options.into());
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
