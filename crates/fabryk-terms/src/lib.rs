//! Term trees and terminology-driven index document assembly for Fabryk.
//!
//! A record type describes its indexable structure as a [`Terminology`]. The
//! [`DocumentBuilder`] walks that term tree against a [`Record`], resolving
//! field names and values through a [`FieldMapper`](fabryk_fieldmap::FieldMapper)
//! and appending them to an [`IndexDocument`](fabryk_fieldmap::IndexDocument).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       fabryk-terms                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Terminology / Term / TermLocator (YAML or code)            │
//! │  Record + RecordNode traits                                 │
//! │  └── XmlRecord (roxmltree), extract_flat for flat records   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  DocumentBuilder                                            │
//! │  ├── visit_term (PathBreadcrumb scoping, recursion)         │
//! │  └── visit_node (generic + hierarchical field names)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod breadcrumb;
pub mod builder;
pub mod record;
pub mod term;
pub mod xml;

// Re-exports
pub use breadcrumb::{PathBreadcrumb, PathSegment};
pub use builder::{DocumentBuilder, build_document};
pub use record::{Record, RecordNode};
pub use term::{Term, TermLocator, Terminology};
pub use xml::{XmlNode, XmlRecord, extract_flat};
