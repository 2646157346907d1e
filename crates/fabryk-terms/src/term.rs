//! Term trees.
//!
//! A [`Terminology`] names the parts of a record worth indexing. Each
//! [`Term`] says where its nodes live (a [`TermLocator`]), which index types
//! its values are requested for, and which data type they carry; terms nest
//! to follow the record's structure.
//!
//! Terminologies are built in code or loaded from YAML (or JSON):
//!
//! ```yaml
//! terms:
//!   - name: title_info
//!     path: titleInfo
//!     children:
//!       - name: main_title
//!         path: title
//!         index_as: [searchable, displayable]
//!       - name: language
//!         path: "@lang"
//!         index_as: [searchable]
//!   - name: person
//!     path:
//!       element: name
//!       attributes: { type: personal }
//! ```
//!
//! `path` defaults to an element named like the term. A string path starting
//! with `@` selects an attribute of the parent's element.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use fabryk_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Where a term's nodes are found relative to the parent node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LocatorRepr", into = "LocatorRepr")]
pub enum TermLocator {
    /// Child elements with this local name whose attributes include every
    /// listed pair.
    Element {
        /// Element local name.
        name: String,
        /// Required attribute values.
        attributes: BTreeMap<String, String>,
    },
    /// An attribute of the context element.
    Attribute {
        /// Attribute name.
        name: String,
    },
}

impl TermLocator {
    /// Element locator without attribute filters.
    pub fn element(name: impl Into<String>) -> Self {
        TermLocator::Element {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Element locator requiring `attribute="value"`.
    pub fn element_with(
        name: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        TermLocator::Element {
            name: name.into(),
            attributes: BTreeMap::from([(attribute.into(), value.into())]),
        }
    }

    /// Attribute locator.
    pub fn attribute(name: impl Into<String>) -> Self {
        TermLocator::Attribute { name: name.into() }
    }

    /// Returns `true` for attribute locators.
    pub fn is_attribute(&self) -> bool {
        matches!(self, TermLocator::Attribute { .. })
    }
}

impl fmt::Display for TermLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermLocator::Attribute { name } => write!(f, "@{name}"),
            TermLocator::Element { name, attributes } => {
                write!(f, "{name}")?;
                for (key, value) in attributes {
                    write!(f, "[@{key}='{value}']")?;
                }
                Ok(())
            }
        }
    }
}

/// Serialized shape of a [`TermLocator`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum LocatorRepr {
    Short(String),
    Attribute {
        attribute: String,
    },
    Element {
        element: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
    },
}

impl From<LocatorRepr> for TermLocator {
    fn from(repr: LocatorRepr) -> Self {
        match repr {
            LocatorRepr::Short(path) => match path.strip_prefix('@') {
                Some(attribute) => TermLocator::attribute(attribute),
                None => TermLocator::element(path),
            },
            LocatorRepr::Attribute { attribute } => TermLocator::attribute(attribute),
            LocatorRepr::Element {
                element,
                attributes,
            } => TermLocator::Element {
                name: element,
                attributes,
            },
        }
    }
}

impl From<TermLocator> for LocatorRepr {
    fn from(locator: TermLocator) -> Self {
        match locator {
            TermLocator::Attribute { name } => LocatorRepr::Short(format!("@{name}")),
            TermLocator::Element { name, attributes } if attributes.is_empty() => {
                LocatorRepr::Short(name)
            }
            TermLocator::Element { name, attributes } => LocatorRepr::Element {
                element: name,
                attributes,
            },
        }
    }
}

// ============================================================================
// Term
// ============================================================================

/// One named node kind in a term tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<TermLocator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    index_as: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Term>,
}

impl Term {
    /// Create a term located by an element of the same name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            data_type: None,
            index_as: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the locator.
    pub fn with_path(mut self, locator: TermLocator) -> Self {
        self.path = Some(locator);
        self
    }

    /// Locate this term by an element name.
    pub fn with_element(self, name: impl Into<String>) -> Self {
        self.with_path(TermLocator::element(name))
    }

    /// Locate this term by an attribute of the parent's element.
    pub fn with_attribute(self, name: impl Into<String>) -> Self {
        self.with_path(TermLocator::attribute(name))
    }

    /// Set the data type.
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    /// Set the requested index types.
    pub fn with_index_as<I, S>(mut self, index_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index_as = index_types.into_iter().map(Into::into).collect();
        self
    }

    /// Add a child term.
    pub fn with_child(mut self, term: Term) -> Self {
        self.children.push(term);
        self
    }

    /// Term name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Effective locator: the declared one, else an element named like the
    /// term.
    pub fn locator(&self) -> TermLocator {
        self.path
            .clone()
            .unwrap_or_else(|| TermLocator::element(self.name.as_str()))
    }

    /// Declared locator, if any.
    pub fn path(&self) -> Option<&TermLocator> {
        self.path.as_ref()
    }

    /// Returns `true` if this term reads an attribute value.
    pub fn is_attribute(&self) -> bool {
        self.path.as_ref().is_some_and(TermLocator::is_attribute)
    }

    /// Data type tag, if declared.
    pub fn data_type(&self) -> Option<&str> {
        self.data_type.as_deref()
    }

    /// Requested index types.
    pub fn index_as(&self) -> &[String] {
        &self.index_as
    }

    /// Replace the requested index types in place.
    pub fn set_index_as(&mut self, index_types: Vec<String>) {
        self.index_as = index_types;
    }

    /// Child terms in declaration order.
    pub fn children(&self) -> &[Term] {
        &self.children
    }

    /// Child term by name.
    pub fn child_named(&self, name: &str) -> Option<&Term> {
        self.children.iter().find(|term| term.name == name)
    }

    /// Mutable child term by name.
    pub fn child_named_mut(&mut self, name: &str) -> Option<&mut Term> {
        self.children.iter_mut().find(|term| term.name == name)
    }
}

// ============================================================================
// Terminology
// ============================================================================

/// The term tree for one record type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terminology {
    #[serde(default)]
    terms: Vec<Term>,
}

impl Terminology {
    /// Create an empty terminology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level term.
    pub fn with_term(mut self, term: Term) -> Self {
        self.terms.push(term);
        self
    }

    /// Parse a YAML (or JSON) terminology.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::parse(format!("Failed to parse terminology: {e}")))
    }

    /// Read and parse a terminology file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        log::info!("Loading terminology from {}", path.display());
        Self::from_yaml_str(&content)
    }

    /// Top-level terms in declaration order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Returns `true` if there are no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Follow a path of term names from the top level.
    pub fn retrieve<S: AsRef<str>>(&self, names: &[S]) -> Option<&Term> {
        let (first, rest) = names.split_first()?;
        let mut term = self.terms.iter().find(|t| t.name == first.as_ref())?;
        for name in rest {
            term = term.child_named(name.as_ref())?;
        }
        Some(term)
    }

    /// Mutable version of [`retrieve`](Self::retrieve).
    pub fn retrieve_mut<S: AsRef<str>>(&mut self, names: &[S]) -> Option<&mut Term> {
        let (first, rest) = names.split_first()?;
        let mut term = self.terms.iter_mut().find(|t| t.name == first.as_ref())?;
        for name in rest {
            term = term.child_named_mut(name.as_ref())?;
        }
        Some(term)
    }
}

// ============================================================================
// Tests
// ============================================================================
