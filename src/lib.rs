//! Samyama LDP
//!
//! Linked Data Platform rendering for a hierarchical content repository:
//! resource descriptions, `ldp:contains` containment and membership triples
//! for basic, direct and indirect containers.
//!
//! # Layers
//!
//! - `graph`: in-memory content store (nodes, types, properties, children,
//!   reference values with a back-reference index)
//! - `rdf`: RDF terms, prefixes, server-managed classification, Turtle and
//!   N-Triples output
//! - `ldp`: node ↔ URI mapping, value conversion, membership resolution and
//!   description assembly
//! - `config`: YAML configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use samyama_ldp::{ContextOptions, GraphStore, IdentifierConverter, RdfContext, RdfFormat, RdfSerializer};
//!
//! let mut store = GraphStore::new();
//! let photos = store.create_container(store.root(), "photos").unwrap();
//! store.set_property(photos, "dcterms:title", "Photos").unwrap();
//! store.create_container(photos, "beach").unwrap();
//!
//! let ids = IdentifierConverter::new("http://localhost:8080/rest").unwrap();
//! let triples = RdfContext::new(&store, &ids, ContextOptions::default())
//!     .collect(photos)
//!     .unwrap();
//!
//! let turtle = RdfSerializer::serialize(&triples, RdfFormat::Turtle).unwrap();
//! assert!(turtle.contains("<http://localhost:8080/rest/photos/beach>"));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod graph;
pub mod ldp;
pub mod lexicon;
pub mod rdf;

// Re-export main types for convenience
pub use graph::{GraphError, GraphResult, GraphStore, Label, Node, NodeId, PropertyMap, PropertyValue};

pub use rdf::{
    is_managed_mixin, is_managed_triple, Literal, NamedNode, NamespaceManager, RdfFormat,
    RdfObject, RdfPredicate, RdfSerializer, RdfSubject, Triple,
};

pub use ldp::{
    ContextOptions, IdentifierConverter, LdpError, LdpResult, MembershipResolver,
    MembershipTriples, RdfContext,
};

pub use config::{ConfigError, LdpConfig};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
