//! Named configuration types.
//!
//! A [`MappingCatalog`] owns one [`MappingRegistry`] per configuration type
//! and remembers which type each was specialized from. Defining a type with
//! a parent copies the parent's registry at that moment; later changes to
//! either side stay local.
//!
//! ```rust
//! use fabryk_fieldmap::{IndexTypeOptions, MappingCatalog};
//!
//! let mut catalog = MappingCatalog::new();
//! catalog.define("record", None).unwrap();
//! catalog
//!     .define("article", Some("record"))
//!     .unwrap()
//!     .declare_index_type("edible", IndexTypeOptions::new().suffix("_food"));
//!
//! assert!(catalog.get("article").unwrap().contains("edible"));
//! assert!(!catalog.get("record").unwrap().contains("edible"));
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use fabryk_core::{Error, Result};

use crate::config::MappingSource;
use crate::defaults::default_registry;
use crate::registry::MappingRegistry;

#[derive(Debug, Clone)]
struct CatalogEntry {
    parent: Option<String>,
    registry: MappingRegistry,
}

/// Registry of configuration types by name.
#[derive(Debug, Clone, Default)]
pub struct MappingCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl MappingCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) a configuration type.
    ///
    /// With a parent, the new registry is a copy of the parent's current
    /// one; without, it starts from [`default_registry`]. Returns the new
    /// registry for further declarations.
    pub fn define(&mut self, name: &str, parent: Option<&str>) -> Result<&mut MappingRegistry> {
        let registry = match parent {
            Some(parent_name) => self
                .get(parent_name)
                .map(MappingRegistry::derive)
                .ok_or_else(|| {
                    Error::config(format!(
                        "Cannot define '{name}': unknown parent configuration type '{parent_name}'"
                    ))
                })?,
            None => default_registry(),
        };

        log::debug!(
            "Defined configuration type '{name}'{}",
            parent.map(|p| format!(" from '{p}'")).unwrap_or_default()
        );

        let entry = CatalogEntry {
            parent: parent.map(str::to_string),
            registry,
        };
        let entry = match self.entries.entry(name.to_string()) {
            Entry::Occupied(mut occupied) => {
                occupied.insert(entry);
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => vacant.insert(entry),
        };
        Ok(&mut entry.registry)
    }

    /// Registry for a configuration type.
    pub fn get(&self, name: &str) -> Option<&MappingRegistry> {
        self.entries.get(name).map(|entry| &entry.registry)
    }

    /// Mutable registry for a configuration type.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut MappingRegistry> {
        self.entries.get_mut(name).map(|entry| &mut entry.registry)
    }

    /// Parent a configuration type was defined from, if any.
    pub fn parent(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(|entry| entry.parent.as_deref())
    }

    /// Check whether a configuration type is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Defined configuration type names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Replace one configuration type's mappings from a source.
    ///
    /// Other configuration types, including ones derived from this one, are
    /// not affected.
    pub fn load_into(&mut self, name: &str, source: MappingSource) -> Result<()> {
        let registry = self
            .get_mut(name)
            .ok_or_else(|| Error::config(format!("Unknown configuration type '{name}'")))?;
        registry.load_mappings(source)
    }
}

// ============================================================================
// Tests
// ============================================================================
