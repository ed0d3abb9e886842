//! Storage names for RDF predicates
//!
//! Properties are stored under `prefix:local` names using the store's
//! namespace registry. A predicate whose namespace has no registered prefix
//! is stored under `{namespace}local`. Reference-valued properties may also
//! be stored under a pseudo name carrying the `_ref` suffix.

use super::error::LdpResult;
use crate::lexicon::REFERENCE_PROPERTY_SUFFIX;
use crate::rdf::{split_iri, NamedNode, NamespaceManager, PrefixError, RdfPredicate};

/// Translates predicates to property names and back
#[derive(Debug, Clone, Copy)]
pub struct PropertyNameResolver<'a> {
    namespaces: &'a NamespaceManager,
}

impl<'a> PropertyNameResolver<'a> {
    pub fn new(namespaces: &'a NamespaceManager) -> Self {
        Self { namespaces }
    }

    /// Storage name of a predicate
    ///
    /// The longest registered namespace the IRI starts with wins, so a
    /// namespace need not end in `#`, `/` or `:`.
    pub fn property_name(&self, predicate: &NamedNode) -> String {
        self.namespaces
            .compact(predicate.as_str())
            .unwrap_or_else(|| {
                let (namespace, local) = split_iri(predicate.as_str());
                format!("{{{}}}{}", namespace, local)
            })
    }

    /// Predicate stored under a property name
    ///
    /// The `_ref` suffix of a pseudo name is dropped.
    pub fn predicate_for(&self, property_name: &str) -> LdpResult<RdfPredicate> {
        let name = property_name
            .strip_suffix(REFERENCE_PROPERTY_SUFFIX)
            .unwrap_or(property_name);

        let iri = match name.strip_prefix('{') {
            Some(expanded) => {
                let (namespace, local) = expanded
                    .split_once('}')
                    .ok_or_else(|| PrefixError::InvalidIri(property_name.to_string()))?;
                format!("{}{}", namespace, local)
            }
            None => self.namespaces.expand(name)?,
        };

        Ok(RdfPredicate::new(&iri)?)
    }
}

/// Pseudo name under which a reference-valued property may be stored
pub fn reference_property_name(property_name: &str) -> String {
    format!("{}{}", property_name, REFERENCE_PROPERTY_SUFFIX)
}
