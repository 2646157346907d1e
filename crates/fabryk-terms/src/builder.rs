//! Terminology-driven index document assembly.
//!
//! [`DocumentBuilder`] walks a record's term tree depth-first. For every node
//! a term selects it resolves field names and values through a
//! [`FieldMapper`] and appends them to the target document:
//!
//! - always under the generic base name (`person_last_name`)
//! - below the top level, also under the hierarchical base name
//!   (`person_1_last_name`)
//!
//! Child terms are visited once per parent node, scoped to that node.
//!
//! # Example
//!
//! ```rust
//! use fabryk_fieldmap::default_registry;
//! use fabryk_terms::{DocumentBuilder, Term, Terminology, XmlRecord};
//!
//! let terminology = Terminology::new().with_term(
//!     Term::new("name").with_child(Term::new("namePart").with_index_as(["searchable"])),
//! );
//! let xml = "<mods><name><namePart>Gautama</namePart></name></mods>";
//! let record = XmlRecord::parse(xml, terminology)?;
//!
//! let mapper = default_registry();
//! let doc = DocumentBuilder::new(&mapper).build(&record);
//!
//! assert_eq!(doc.values("name_namePart_t"), ["Gautama"]);
//! assert_eq!(doc.values("name_0_namePart_t"), ["Gautama"]);
//! # Ok::<(), fabryk_core::Error>(())
//! ```

use fabryk_fieldmap::{FieldMapper, FieldValue, IndexDocument};

use crate::breadcrumb::PathBreadcrumb;
use crate::record::{Record, RecordNode};
use crate::term::Term;

/// Builds index documents from records using one configuration type's
/// mappings.
pub struct DocumentBuilder<'m, M: FieldMapper + ?Sized> {
    mapper: &'m M,
}

impl<'m, M: FieldMapper + ?Sized> DocumentBuilder<'m, M> {
    /// Create a builder resolving fields through `mapper`.
    pub fn new(mapper: &'m M) -> Self {
        Self { mapper }
    }

    /// The mapper fields are resolved through.
    pub fn mapper(&self) -> &M {
        self.mapper
    }

    /// Build a fresh document from `record`.
    pub fn build<R: Record>(&self, record: &R) -> IndexDocument {
        self.build_into(record, IndexDocument::new())
    }

    /// Add `record`'s fields to an existing document and return it.
    ///
    /// A record without a term tree leaves the document untouched.
    pub fn build_into<R: Record>(&self, record: &R, mut document: IndexDocument) -> IndexDocument {
        let Some(terminology) = record.terminology() else {
            log::debug!("Record has no terminology; nothing to index");
            return document;
        };

        for term in terminology.terms() {
            self.visit_term(record, term, &mut document, PathBreadcrumb::root());
        }
        document
    }

    /// Index every node `term` selects below `breadcrumb`, then recurse into
    /// the term's children once per node.
    pub fn visit_term<R: Record>(
        &self,
        record: &R,
        term: &Term,
        document: &mut IndexDocument,
        breadcrumb: PathBreadcrumb,
    ) {
        let path = breadcrumb.path_to(term.name());
        let nodes = record.find_nodes(&path);
        log::debug!(
            "Term '{}' matched {} node(s)",
            breadcrumb.generic_name(term.name()),
            nodes.len()
        );

        for (index, node) in nodes.iter().enumerate() {
            self.visit_node(node, term, &breadcrumb, document);
            if term.children().is_empty() {
                continue;
            }
            let child_crumb = breadcrumb.descend(term.name(), index);
            for child in term.children() {
                self.visit_term(record, child, document, child_crumb.clone());
            }
        }
    }

    /// Resolve and insert the fields for one node.
    pub fn visit_node<N: RecordNode>(
        &self,
        node: &N,
        term: &Term,
        breadcrumb: &PathBreadcrumb,
        document: &mut IndexDocument,
    ) {
        let raw = if term.is_attribute() {
            node.value()
        } else {
            node.text()
        };
        let value = FieldValue::Text(raw);

        let generic = breadcrumb.generic_name(term.name());
        document.merge_fields(self.mapper.resolve_fields(
            &generic,
            &value,
            term.data_type(),
            term.index_as(),
        ));

        if !breadcrumb.is_root() {
            let hierarchical = breadcrumb.hierarchical_name(term.name());
            document.merge_fields(self.mapper.resolve_fields(
                &hierarchical,
                &value,
                term.data_type(),
                term.index_as(),
            ));
        }
    }
}

/// Build a document from `record` with `mapper`.
pub fn build_document<R, M>(record: &R, mapper: &M) -> IndexDocument
where
    R: Record,
    M: FieldMapper + ?Sized,
{
    DocumentBuilder::new(mapper).build(record)
}

// ============================================================================
// Tests
// ============================================================================
