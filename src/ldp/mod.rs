//! Linked Data Platform rendering
//!
//! This module implements:
//! - Node ↔ URI conversion
//! - Predicate ↔ storage property name resolution
//! - Stored value → RDF term conversion
//! - Membership triples for direct and indirect containers
//! - Assembly of a resource's full description
//!
//! # Example
//!
//! ```rust
//! use samyama_ldp::graph::{GraphStore, PropertyValue};
//! use samyama_ldp::ldp::{IdentifierConverter, MembershipResolver};
//! use samyama_ldp::lexicon::{LDP_DIRECT_CONTAINER, LDP_HAS_MEMBER_RELATION, LDP_MEMBER_RESOURCE};
//!
//! let mut store = GraphStore::new();
//! let book = store.create_container(store.root(), "book").unwrap();
//! let pages = store.create_ldp_container(book, "pages", LDP_DIRECT_CONTAINER).unwrap();
//! store.set_property(pages, LDP_MEMBER_RESOURCE, PropertyValue::Reference(book)).unwrap();
//! store
//!     .set_property(pages, LDP_HAS_MEMBER_RELATION, PropertyValue::Uri("http://pcdm.org/models#hasMember".into()))
//!     .unwrap();
//! store.create_container(pages, "p1").unwrap();
//!
//! let ids = IdentifierConverter::new("http://localhost:8080/rest").unwrap();
//! let triples: Vec<_> = MembershipResolver::new(&store, &ids)
//!     .membership_triples(book)
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(
//!     triples[0].to_string(),
//!     "<http://localhost:8080/rest/book> <http://pcdm.org/models#hasMember> <http://localhost:8080/rest/book/pages/p1> ."
//! );
//! ```

mod context;
mod error;
mod identifiers;
mod membership;
mod properties;
mod values;

pub use context::{ContextOptions, RdfContext, TripleStream};
pub use error::{LdpError, LdpResult};
pub use identifiers::{IdentifierConverter, IdentifierError, IdentifierResult};
pub use membership::{
    MemberSource, MembershipConfig, MembershipResolver, MembershipTriples, ReferencingContainer,
};
pub use properties::{reference_property_name, PropertyNameResolver};
pub use values::ValueConverter;
