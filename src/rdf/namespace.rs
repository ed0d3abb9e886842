//! RDF namespace and prefix management
//!
//! Storage names are compact IRIs (`prefix:local`). This registry maps
//! between them and full IRIs in both directions.

use crate::lexicon::{
    DCTERMS_NAMESPACE, DC_NAMESPACE, EBUCORE_NAMESPACE, FOAF_NAMESPACE, JCR_MIX_NAMESPACE,
    JCR_NAMESPACE, JCR_NT_NAMESPACE, LDP_NAMESPACE, MODE_NAMESPACE, PCDM_NAMESPACE,
    PREMIS_NAMESPACE, RDFS_NAMESPACE, RDF_NAMESPACE, REPOSITORY_NAMESPACE, XSD_NAMESPACE,
};
use indexmap::IndexMap;
use thiserror::Error;

/// Prefix errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Invalid IRI
    #[error("Invalid compact IRI: {0}")]
    InvalidIri(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Namespace (prefix → IRI mapping)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix
    pub prefix: String,
    /// IRI
    pub iri: String,
}

impl Namespace {
    /// Create a new namespace
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// Namespace manager with the repository's prefixes
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    /// Prefix → IRI mappings, in registration order
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    /// Create a new namespace manager with the repository prefixes
    pub fn new() -> Self {
        let mut mgr = Self::empty();

        mgr.add_prefix("rdf", RDF_NAMESPACE);
        mgr.add_prefix("rdfs", RDFS_NAMESPACE);
        mgr.add_prefix("xsd", XSD_NAMESPACE);
        mgr.add_prefix("ldp", LDP_NAMESPACE);
        mgr.add_prefix("fedora", REPOSITORY_NAMESPACE);
        mgr.add_prefix("premis", PREMIS_NAMESPACE);
        mgr.add_prefix("ebucore", EBUCORE_NAMESPACE);
        mgr.add_prefix("pcdm", PCDM_NAMESPACE);
        mgr.add_prefix("foaf", FOAF_NAMESPACE);
        mgr.add_prefix("dc", DC_NAMESPACE);
        mgr.add_prefix("dcterms", DCTERMS_NAMESPACE);
        mgr.add_prefix("jcr", JCR_NAMESPACE);
        mgr.add_prefix("nt", JCR_NT_NAMESPACE);
        mgr.add_prefix("mix", JCR_MIX_NAMESPACE);
        mgr.add_prefix("mode", MODE_NAMESPACE);

        mgr
    }

    /// Create a namespace manager with no prefixes at all
    pub fn empty() -> Self {
        Self {
            prefixes: IndexMap::new(),
        }
    }

    /// Add a prefix, replacing any previous mapping for it
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Get the prefix registered for a namespace IRI
    ///
    /// When several prefixes share the namespace, the first registered wins.
    pub fn prefix_for(&self, namespace: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|(_, iri)| iri.as_str() == namespace)
            .map(|(prefix, _)| prefix.as_str())
    }

    /// Expand a compact IRI (prefix:local) to full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        if let Some((prefix, local)) = compact_iri.split_once(':') {
            let iri = self.get_iri(prefix)?;
            Ok(format!("{}{}", iri, local))
        } else {
            Err(PrefixError::InvalidIri(compact_iri.to_string()))
        }
    }

    /// Compact an IRI using the longest matching namespace
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, namespace_iri)| iri.starts_with(namespace_iri.as_str()))
            .max_by_key(|(_, namespace_iri)| namespace_iri.len())
            .map(|(prefix, namespace_iri)| format!("{}:{}", prefix, &iri[namespace_iri.len()..]))
    }

    /// Get all registered prefixes
    pub fn prefixes(&self) -> Vec<Namespace> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| Namespace::new(prefix.clone(), iri.clone()))
            .collect()
    }
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}
