//! Traversal breadcrumbs and field base names.
//!
//! While walking a term tree, the builder records which instance of each
//! ancestor term it descended through. That trail scopes node lookups to one
//! subtree and produces the two field base names:
//!
//! - generic: term names joined with `_` (`name_namePart`)
//! - hierarchical: ancestors annotated with their positions
//!   (`name_1_namePart`)

use std::fmt;

/// One step of a term path: a term name, pinned to one matching node when an
/// index is present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    /// Term name.
    pub name: String,
    /// Position among the nodes matched for this term, if pinned.
    pub index: Option<usize>,
}

impl PathSegment {
    /// Segment matching every node of a term.
    pub fn all(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }

    /// Segment pinned to the node at `index`.
    pub fn at(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index: Some(index),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{index}]", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Ancestor terms and positions accumulated during descent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathBreadcrumb {
    entries: Vec<(String, usize)>,
}

impl PathBreadcrumb {
    /// Breadcrumb at the top of the tree.
    pub fn root() -> Self {
        Self::default()
    }

    /// A copy extended by one ancestor position.
    pub fn descend(&self, term_name: &str, index: usize) -> Self {
        let mut entries = self.entries.clone();
        entries.push((term_name.to_string(), index));
        Self { entries }
    }

    /// Number of ancestors.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` at the top of the tree.
    pub fn is_root(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookup path for `term_name` below this breadcrumb.
    pub fn path_to(&self, term_name: &str) -> Vec<PathSegment> {
        self.entries
            .iter()
            .map(|(name, index)| PathSegment::at(name.as_str(), *index))
            .chain(std::iter::once(PathSegment::all(term_name)))
            .collect()
    }

    /// Generic base name for `term_name`: every name joined with `_`.
    pub fn generic_name(&self, term_name: &str) -> String {
        self.entries
            .iter()
            .map(|(name, _)| name.as_str())
            .chain(std::iter::once(term_name))
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Hierarchical base name for `term_name`: each ancestor followed by its
    /// position.
    pub fn hierarchical_name(&self, term_name: &str) -> String {
        let mut name = String::new();
        for (ancestor, index) in &self.entries {
            name.push_str(ancestor);
            name.push('_');
            name.push_str(&index.to_string());
            name.push('_');
        }
        name.push_str(term_name);
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_names() {
        let crumb = PathBreadcrumb::root();
        assert!(crumb.is_root());
        assert_eq!(crumb.generic_name("abstract"), "abstract");
        assert_eq!(crumb.hierarchical_name("abstract"), "abstract");
        assert_eq!(crumb.path_to("abstract"), vec![PathSegment::all("abstract")]);
    }

    #[test]
    fn test_nested_names() {
        let crumb = PathBreadcrumb::root()
            .descend("person", 1)
            .descend("role", 0);
        assert_eq!(crumb.depth(), 2);
        assert_eq!(crumb.generic_name("text"), "person_role_text");
        assert_eq!(crumb.hierarchical_name("text"), "person_1_role_0_text");
    }

    #[test]
    fn test_descend_copies() {
        let parent = PathBreadcrumb::root().descend("name", 0);
        let first = parent.descend("namePart", 0);
        let second = parent.descend("namePart", 1);
        assert_eq!(parent.depth(), 1);
        assert_ne!(first, second);
    }

    #[test]
    fn test_path_to_pins_ancestors() {
        let crumb = PathBreadcrumb::root().descend("name", 1);
        assert_eq!(
            crumb.path_to("namePart"),
            vec![PathSegment::at("name", 1), PathSegment::all("namePart")]
        );
    }

    #[test]
    fn test_segment_display() {
        assert_eq!(PathSegment::at("name", 2).to_string(), "name[2]");
        assert_eq!(PathSegment::all("title").to_string(), "title");
    }
}
