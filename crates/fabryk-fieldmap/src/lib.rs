//! Field mapping and value normalization for Fabryk index documents.
//!
//! This crate turns a field base name, a raw value, a data type and a list of
//! requested index types into final search-index field names and normalized
//! values. Naming and transform rules are held per configuration type in an
//! inheritable [`MappingRegistry`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      fabryk-fieldmap                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  FieldMapper trait                                          │
//! │  └── MappingRegistry (id field + IndexTypeRules)            │
//! │      ├── declare_* (typed options, TypeBuilder)             │
//! │      ├── load_mappings (MappingSource → MappingConfig)      │
//! │      └── resolve_name / resolve_fields                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MappingCatalog (named configuration types + parents)       │
//! │  defaults::default_registry (stock mapper, date parsing)    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  FieldValue → normalize → IndexDocument                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use fabryk_fieldmap::{IndexDocument, MappingRegistry, MappingSource};
//!
//! let mut registry = MappingRegistry::new();
//! registry.load_mappings(MappingSource::Default)?;
//!
//! let mut doc = IndexDocument::new();
//! doc.merge_fields(registry.resolve_fields(
//!     "title",
//!     &"Major  Triad".into(),
//!     Some("string"),
//!     &["searchable", "displayable"],
//! ));
//!
//! assert_eq!(doc.values("title_t"), ["Major Triad"]);
//! assert_eq!(doc.values("title_display"), ["Major Triad"]);
//! # Ok::<(), fabryk_core::Error>(())
//! ```

pub mod catalog;
pub mod config;
pub mod defaults;
pub mod document;
pub mod mapper;
pub mod normalize;
pub mod registry;
pub mod resolver;
pub mod rule;
pub mod value;

// Re-exports
pub use catalog::MappingCatalog;
pub use config::{IndexTypeConfig, MappingConfig, MappingSource};
pub use defaults::default_registry;
pub use document::{FieldMap, IndexDocument};
pub use mapper::FieldMapper;
pub use normalize::normalize;
pub use registry::MappingRegistry;
pub use resolver::{DEFAULT_INDEX_TYPE, EXCLUSION_PREFIX};
pub use rule::{
    DataTypeOptions, DataTypeOverride, IndexTypeOptions, IndexTypeRule, Transform, TypeBuilder,
};
pub use value::FieldValue;
