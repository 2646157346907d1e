//! XML-backed records.
//!
//! [`XmlRecord`] pairs a parsed XML document with a [`Terminology`] and
//! answers term-path lookups:
//!
//! - a top-level term matches any element in the document (root included)
//! - a child term matches direct children of the selected parent element
//! - element locators compare local names and any required attributes
//! - attribute locators select that attribute on the context element
//!
//! Matches are returned in document order.
//!
//! Flat records with no term tree (one level of simple elements under the
//! root) can be indexed directly with [`extract_flat`].

use fabryk_core::{Error, Result};
use fabryk_fieldmap::{DEFAULT_INDEX_TYPE, FieldMapper, IndexDocument};
use roxmltree::{Document, Node};

use crate::breadcrumb::PathSegment;
use crate::record::{Record, RecordNode};
use crate::term::{TermLocator, Terminology};

/// A parsed XML document governed by a terminology.
#[derive(Debug)]
pub struct XmlRecord<'input> {
    document: Document<'input>,
    terminology: Option<Terminology>,
}

impl<'input> XmlRecord<'input> {
    /// Parse `xml` and attach `terminology`.
    pub fn parse(xml: &'input str, terminology: Terminology) -> Result<Self> {
        Ok(Self {
            document: parse_document(xml)?,
            terminology: Some(terminology),
        })
    }

    /// Parse `xml` without a terminology; building from it is a no-op.
    pub fn parse_untyped(xml: &'input str) -> Result<Self> {
        Ok(Self {
            document: parse_document(xml)?,
            terminology: None,
        })
    }

    /// The parsed document.
    pub fn document(&self) -> &Document<'input> {
        &self.document
    }

    /// Mutable access to the terminology, e.g. to adjust requested index
    /// types before building.
    pub fn terminology_mut(&mut self) -> Option<&mut Terminology> {
        self.terminology.as_mut()
    }
}

fn parse_document(xml: &str) -> Result<Document<'_>> {
    Document::parse(xml).map_err(|e| Error::xml(format!("Failed to parse XML record: {e}")))
}

impl<'input> Record for XmlRecord<'input> {
    type Node<'a>
        = XmlNode<'a, 'input>
    where
        Self: 'a;

    fn terminology(&self) -> Option<&Terminology> {
        self.terminology.as_ref()
    }

    fn find_nodes<'a>(&'a self, path: &[PathSegment]) -> Vec<XmlNode<'a, 'input>> {
        let Some(terminology) = &self.terminology else {
            return Vec::new();
        };
        let Some((first, rest)) = path.split_first() else {
            return Vec::new();
        };
        let Some(mut term) = terminology.retrieve(&[first.name.as_str()]) else {
            log::warn!("Unknown term '{}' in lookup path", first.name);
            return Vec::new();
        };

        let locator = term.locator();
        let matches = self
            .document
            .root_element()
            .descendants()
            .filter(Node::is_element)
            .flat_map(|node| select(node, &locator, true))
            .collect();
        let mut current = pin(matches, first.index);

        for segment in rest {
            let Some(child) = term.child_named(&segment.name) else {
                log::warn!(
                    "Term '{}' has no child term '{}'",
                    term.name(),
                    segment.name
                );
                return Vec::new();
            };
            let locator = child.locator();
            let matches = current
                .iter()
                .flat_map(|parent| {
                    parent
                        .node
                        .children()
                        .filter(Node::is_element)
                        .flat_map(|node| select(node, &locator, false))
                        .chain(attribute_of(parent, &locator))
                        .collect::<Vec<_>>()
                })
                .collect();
            current = pin(matches, segment.index);
            term = child;
        }

        current
    }
}

/// Apply `locator` to one candidate element.
///
/// Element locators test the candidate itself. Attribute locators only
/// apply at the top level, where every element is a candidate context.
fn select<'a, 'input>(
    node: Node<'a, 'input>,
    locator: &TermLocator,
    top_level: bool,
) -> Option<XmlNode<'a, 'input>> {
    match locator {
        TermLocator::Element { name, attributes } => {
            let matches = node.tag_name().name() == name
                && attributes
                    .iter()
                    .all(|(key, value)| node.attribute(key.as_str()) == Some(value.as_str()));
            matches.then_some(XmlNode::element(node))
        }
        TermLocator::Attribute { name } if top_level => node
            .attribute(name.as_str())
            .map(|value| XmlNode::attribute(node, value)),
        TermLocator::Attribute { .. } => None,
    }
}

/// Attribute-locator match on the parent context itself.
fn attribute_of<'a, 'input>(
    parent: &XmlNode<'a, 'input>,
    locator: &TermLocator,
) -> Option<XmlNode<'a, 'input>> {
    match locator {
        TermLocator::Attribute { name } if parent.attribute.is_none() => parent
            .node
            .attribute(name.as_str())
            .map(|value| XmlNode::attribute(parent.node, value)),
        _ => None,
    }
}

fn pin<T>(nodes: Vec<T>, index: Option<usize>) -> Vec<T> {
    match index {
        Some(index) => nodes.into_iter().nth(index).into_iter().collect(),
        None => nodes,
    }
}

// ============================================================================
// Flat extraction
// ============================================================================

/// Index a flat XML record without a terminology.
///
/// Every element child of the root becomes a searchable field named after
/// the element's local name; repeated elements append to the same field.
/// Elements whose name the mapper cannot resolve are skipped.
pub fn extract_flat<M: FieldMapper + ?Sized>(xml: &str, mapper: &M) -> Result<IndexDocument> {
    let document = parse_document(xml)?;
    let mut index_document = IndexDocument::new();

    for element in document.root_element().children().filter(Node::is_element) {
        let name = element.tag_name().name();
        let Some(field_name) = mapper.resolve_name(name, None, DEFAULT_INDEX_TYPE) else {
            continue;
        };
        index_document.insert(&field_name, XmlNode::element(element).text());
    }

    log::debug!(
        "Extracted {} field(s) from flat record",
        index_document.len()
    );
    Ok(index_document)
}

// ============================================================================
// XmlNode
// ============================================================================

/// An element, or one attribute of an element, selected from an
/// [`XmlRecord`].
#[derive(Debug, Clone, Copy)]
pub struct XmlNode<'a, 'input> {
    node: Node<'a, 'input>,
    attribute: Option<&'a str>,
}

impl<'a, 'input> XmlNode<'a, 'input> {
    fn element(node: Node<'a, 'input>) -> Self {
        Self {
            node,
            attribute: None,
        }
    }

    fn attribute(node: Node<'a, 'input>, value: &'a str) -> Self {
        Self {
            node,
            attribute: Some(value),
        }
    }

    /// Local name of the element (the owning element for attributes).
    pub fn element_name(&self) -> &'a str {
        self.node.tag_name().name()
    }

    /// Returns `true` if this node is an attribute.
    pub fn is_attribute(&self) -> bool {
        self.attribute.is_some()
    }
}

impl RecordNode for XmlNode<'_, '_> {
    fn text(&self) -> String {
        match self.attribute {
            Some(value) => value.to_string(),
            None => self
                .node
                .descendants()
                .filter(Node::is_text)
                .filter_map(|n| n.text())
                .collect(),
        }
    }

    fn value(&self) -> String {
        self.text()
    }
}

// ============================================================================
// Tests
// ============================================================================
