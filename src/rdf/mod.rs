//! RDF support for the LDP layer
//!
//! This module implements:
//! - RDF terms and triples (wrappers around oxrdf)
//! - Namespace/prefix management for storage names
//! - Classification of server-managed triples and types
//! - Serialization (Turtle, N-Triples)
//!
//! # Example
//!
//! ```rust
//! use samyama_ldp::rdf::{is_managed_triple, Literal, NamedNode, RdfPredicate, Triple};
//!
//! let subject = NamedNode::new("http://localhost:8080/rest/photos").unwrap();
//! let predicate = RdfPredicate::new("http://purl.org/dc/terms/title").unwrap();
//! let triple = Triple::new(subject.into(), predicate, Literal::new_simple_literal("Photos").into());
//!
//! assert!(!is_managed_triple(&triple));
//! ```

mod managed;
mod namespace;
mod serialization;
mod types;

pub use types::{
    split_iri, BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult,
    RdfSubject, Triple,
};

pub use managed::{is_managed_mixin, is_managed_namespace, is_managed_predicate, is_managed_triple};

pub use namespace::{Namespace, NamespaceManager, PrefixError, PrefixResult};

pub use serialization::{
    NTriplesSerializerWrapper, RdfFormat, RdfSerializer, SerializeError, SerializeResult,
    TurtleSerializerWrapper,
};
