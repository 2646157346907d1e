//! The `FieldMapper` trait.
//!
//! Document builders depend on this narrow interface rather than on a
//! concrete registry, so a configuration type can hand out whichever
//! registry it owns (plain, shared behind `Arc`, or wrapped in a type of the
//! caller's own).

use std::sync::Arc;

use crate::document::FieldMap;
use crate::registry::MappingRegistry;
use crate::value::FieldValue;

/// Resolves field names and values for one configuration type.
pub trait FieldMapper: Send + Sync {
    /// The registry holding this configuration type's rules.
    fn registry(&self) -> &MappingRegistry;

    /// Name of the document id field.
    fn id_field(&self) -> &str {
        self.registry().id_field()
    }

    /// Resolve a field name for one index type.
    fn resolve_name(
        &self,
        base_name: &str,
        data_type: Option<&str>,
        index_type: &str,
    ) -> Option<String> {
        self.registry().resolve_name(base_name, data_type, index_type)
    }

    /// Resolve names and values for every active index type.
    fn resolve_fields(
        &self,
        base_name: &str,
        value: &FieldValue,
        data_type: Option<&str>,
        index_types: &[String],
    ) -> FieldMap {
        self.registry()
            .resolve_fields(base_name, value, data_type, index_types)
    }
}

impl FieldMapper for MappingRegistry {
    fn registry(&self) -> &MappingRegistry {
        self
    }
}

impl<M: FieldMapper + ?Sized> FieldMapper for Arc<M> {
    fn registry(&self) -> &MappingRegistry {
        (**self).registry()
    }
}

impl<M: FieldMapper + ?Sized> FieldMapper for &M {
    fn registry(&self) -> &MappingRegistry {
        (**self).registry()
    }
}
