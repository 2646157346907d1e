//! Per-configuration-type mapping registry.
//!
//! A [`MappingRegistry`] holds the id field name and the set of index-type
//! rules for one configuration type (one record schema). Registries are
//! declared once, then read without locking while documents are built.
//!
//! # Declaring mappings
//!
//! ```rust
//! use fabryk_fieldmap::{DataTypeOptions, IndexTypeOptions, MappingRegistry};
//!
//! let mut registry = MappingRegistry::new();
//! registry
//!     .declare_id_field("ident")
//!     .declare_index_type(
//!         "searchable",
//!         IndexTypeOptions::new().suffix("_s").included_by_default(true),
//!     )
//!     .declare_index_type_with("fungible", IndexTypeOptions::new().suffix("_f0"), |t| {
//!         t.data_type("integer", DataTypeOptions::new().suffix("_f1"))
//!             .default_data_type(DataTypeOptions::new().suffix("_f2"));
//!     });
//!
//! assert_eq!(registry.id_field(), "ident");
//! assert_eq!(registry.resolve_name("foo", Some("integer"), "fungible").as_deref(), Some("foo_f1"));
//! ```
//!
//! # Inheritance
//!
//! A specialized configuration type starts from [`MappingRegistry::derive`],
//! a deep copy of its parent, and overlays its own declarations. Redeclaring
//! an inherited index type only replaces what is mentioned.

use std::collections::BTreeMap;

use fabryk_core::Result;

use crate::config::{IndexTypeConfig, MappingConfig, MappingSource};
use crate::rule::{DataTypeOptions, IndexTypeOptions, IndexTypeRule, TypeBuilder};

/// Id field used when none is declared.
pub const DEFAULT_ID_FIELD: &str = "id";

/// Index-type rules for one configuration type.
#[derive(Debug, Clone)]
pub struct MappingRegistry {
    id_field: String,
    rules: BTreeMap<String, IndexTypeRule>,
}

impl Default for MappingRegistry {
    fn default() -> Self {
        Self {
            id_field: DEFAULT_ID_FIELD.to_string(),
            rules: BTreeMap::new(),
        }
    }
}

impl MappingRegistry {
    /// Create an empty registry with the `id` id field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed configuration.
    pub fn from_config(config: &MappingConfig) -> Self {
        let mut registry = Self::new();
        registry.replace_with(config);
        registry
    }

    /// Starting point for a configuration type that specializes this one.
    ///
    /// The copy is independent: later declarations on either side do not
    /// leak into the other.
    pub fn derive(&self) -> Self {
        self.clone()
    }

    // ------------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------------

    /// Set the id field name.
    pub fn declare_id_field(&mut self, name: impl Into<String>) -> &mut Self {
        self.id_field = name.into();
        self
    }

    /// Create an index type, or merge options into an existing one.
    pub fn declare_index_type(&mut self, name: &str, options: IndexTypeOptions) -> &mut Self {
        self.rule_entry(name).apply(options);
        self
    }

    /// Like [`declare_index_type`](Self::declare_index_type), then declare
    /// data-type overrides through a [`TypeBuilder`].
    pub fn declare_index_type_with<F>(
        &mut self,
        name: &str,
        options: IndexTypeOptions,
        build: F,
    ) -> &mut Self
    where
        F: FnOnce(&mut TypeBuilder<'_>),
    {
        let rule = self.rule_entry(name);
        rule.apply(options);
        build(&mut TypeBuilder::new(rule));
        self
    }

    fn rule_entry(&mut self, name: &str) -> &mut IndexTypeRule {
        self.rules
            .entry(name.to_string())
            .or_insert_with(|| IndexTypeRule::new(name))
    }

    // ------------------------------------------------------------------------
    // Bulk loading
    // ------------------------------------------------------------------------

    /// Replace the id field and every rule from a structured configuration.
    ///
    /// The configuration is validated before anything changes; on error the
    /// registry keeps its previous contents.
    pub fn load_from(&mut self, raw: &serde_yaml::Value) -> Result<()> {
        let config = MappingConfig::from_value(raw)?;
        self.replace_with(&config);
        Ok(())
    }

    /// Replace this registry's contents from any mapping source.
    pub fn load_mappings(&mut self, source: MappingSource) -> Result<()> {
        let config = source.resolve()?;
        self.replace_with(&config);
        log::debug!(
            "Loaded {} index types (id field '{}')",
            self.rules.len(),
            self.id_field
        );
        Ok(())
    }

    fn replace_with(&mut self, config: &MappingConfig) {
        let mut rules = BTreeMap::new();

        for (name, index_type) in &config.index_types {
            let mut rule = IndexTypeRule::new(name.as_str());
            match index_type {
                IndexTypeConfig::Suffix(suffix) => {
                    rule.apply(IndexTypeOptions::new().suffix(suffix.as_str()));
                }
                IndexTypeConfig::DataTypes {
                    default,
                    default_suffix,
                    suffixes,
                } => {
                    if let Some(default) = default {
                        rule.apply(IndexTypeOptions::new().included_by_default(*default));
                    }
                    let mut builder = TypeBuilder::new(&mut rule);
                    if let Some(suffix) = default_suffix {
                        builder.default_data_type(DataTypeOptions::new().suffix(suffix.as_str()));
                    }
                    for (tag, suffix) in suffixes {
                        builder.data_type(tag, DataTypeOptions::new().suffix(suffix.as_str()));
                    }
                }
            }
            rules.insert(name.clone(), rule);
        }

        self.id_field = config.id_field.clone();
        self.rules = rules;
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Name of the document id field.
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Rule for an index type.
    pub fn rule(&self, index_type: &str) -> Option<&IndexTypeRule> {
        self.rules.get(index_type)
    }

    /// Check whether an index type is declared.
    pub fn contains(&self, index_type: &str) -> bool {
        self.rules.contains_key(index_type)
    }

    /// All declared index types, in sorted order.
    pub fn index_types(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Index types applied without being requested, in sorted order.
    pub fn default_index_types(&self) -> impl Iterator<Item = &str> {
        self.rules
            .values()
            .filter(|rule| rule.is_default())
            .map(IndexTypeRule::name)
    }

    /// All rules, in sorted order.
    pub fn rules(&self) -> impl Iterator<Item = &IndexTypeRule> {
        self.rules.values()
    }

    /// Number of declared index types.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no index types are declared.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
