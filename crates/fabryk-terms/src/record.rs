//! Record capabilities consumed by the document builder.
//!
//! The builder never parses anything itself. A record only has to expose its
//! term tree and answer "which nodes does this term path select?". See
//! [`XmlRecord`](crate::XmlRecord) for the XML-backed implementation.

use crate::breadcrumb::PathSegment;
use crate::term::Terminology;

/// A node selected by a term path.
pub trait RecordNode {
    /// Text content of the node and its descendants.
    fn text(&self) -> String;

    /// The node's own value: the attribute value for attribute nodes, the
    /// text content otherwise.
    fn value(&self) -> String {
        self.text()
    }
}

/// A structured record governed by a term tree.
pub trait Record {
    /// Node handle borrowed from the record.
    type Node<'a>: RecordNode
    where
        Self: 'a;

    /// The term tree, or `None` if the record type has none.
    fn terminology(&self) -> Option<&Terminology>;

    /// Nodes selected by a term path, in document order.
    ///
    /// Pinned segments narrow the search to one instance of that term; the
    /// last segment is normally unpinned. Paths naming unknown terms select
    /// nothing.
    fn find_nodes<'a>(&'a self, path: &[PathSegment]) -> Vec<Self::Node<'a>>;
}
