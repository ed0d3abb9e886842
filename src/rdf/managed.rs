//! Predicates for telling server-managed RDF apart from user RDF
//!
//! The repository asserts some triples itself (containment, fixity, its own
//! bookkeeping namespace). Clients may read them but never set them, so
//! these checks are used both to filter descriptions and to guard writes.

use super::types::{NamedNode, RdfPredicate, Triple};
use crate::lexicon::{INTERNAL_NAMESPACE_ROOTS, MANAGED_PREDICATES, REPOSITORY_NAMESPACE};

/// Whether a namespace IRI is reserved for the repository
pub fn is_managed_namespace(namespace: &str) -> bool {
    namespace == REPOSITORY_NAMESPACE
        || INTERNAL_NAMESPACE_ROOTS
            .iter()
            .any(|root| namespace.starts_with(root))
}

/// Whether only the repository may assert this predicate
pub fn is_managed_predicate(predicate: &RdfPredicate) -> bool {
    MANAGED_PREDICATES.contains(&predicate.as_str())
        || is_managed_namespace(predicate.as_named_node().namespace())
}

/// Whether a triple is server-managed, judged by its predicate
pub fn is_managed_triple(triple: &Triple) -> bool {
    is_managed_predicate(&triple.predicate)
}

/// Whether a resource type belongs to a reserved namespace
pub fn is_managed_mixin(type_iri: &NamedNode) -> bool {
    is_managed_namespace(type_iri.namespace())
}
