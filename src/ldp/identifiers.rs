//! Mapping between nodes and the URIs clients see
//!
//! A node's URI is the repository base URI followed by its percent-encoded
//! path. Binaries are the exception: the content node is addressed by its
//! description's path, and the description moves to `<path>/fcr:metadata`.

use crate::graph::{GraphError, GraphStore, NodeId};
use crate::lexicon::{FCR_METADATA, FEDORA_BINARY, FEDORA_NON_RDF_SOURCE_DESCRIPTION};
use crate::rdf::{NamedNode, RdfError};
use oxiri::Iri;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use thiserror::Error;

/// Characters escaped inside a path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Identifier errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IdentifierError {
    /// The configured base is not an absolute IRI
    #[error("Invalid base URI {uri:?}: {reason}")]
    InvalidBase { uri: String, reason: String },

    /// The URI does not start with the base URI
    #[error("{0} is outside the repository")]
    OutsideBase(String),

    /// No node lives at the URI's path
    #[error("No resource at {0}")]
    UnknownPath(String),

    #[error(transparent)]
    Storage(#[from] GraphError),

    #[error(transparent)]
    Rdf(#[from] RdfError),
}

pub type IdentifierResult<T> = Result<T, IdentifierError>;

/// Converts node identifiers to URIs and back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierConverter {
    /// Base URI without trailing slash
    base: String,
}

impl IdentifierConverter {
    /// Create a converter rooted at `base_uri`
    pub fn new(base_uri: &str) -> IdentifierResult<Self> {
        Iri::parse(base_uri).map_err(|e| IdentifierError::InvalidBase {
            uri: base_uri.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base: base_uri.trim_end_matches('/').to_string(),
        })
    }

    /// The base URI, without trailing slash
    pub fn base_uri(&self) -> &str {
        &self.base
    }

    /// URI of a node
    pub fn uri_for(&self, store: &GraphStore, id: NodeId) -> IdentifierResult<NamedNode> {
        let node = store.node(id)?;

        let uri = if node.has_type(FEDORA_BINARY) {
            let addressed = match node.parent {
                Some(description) => &store.node(description)?.path,
                None => &node.path,
            };
            format!("{}{}", self.base, encode_path(addressed))
        } else if node.has_type(FEDORA_NON_RDF_SOURCE_DESCRIPTION) {
            format!("{}{}/{}", self.base, encode_path(&node.path), FCR_METADATA)
        } else {
            format!("{}{}", self.base, encode_path(&node.path))
        };

        Ok(NamedNode::new(&uri)?)
    }

    /// Node addressed by a URI
    pub fn node_for(&self, store: &GraphStore, uri: &str) -> IdentifierResult<NodeId> {
        let rest = uri
            .strip_prefix(self.base.as_str())
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .ok_or_else(|| IdentifierError::OutsideBase(uri.to_string()))?;

        let metadata_suffix = format!("/{}", FCR_METADATA);
        let (rest, wants_description) = match rest.strip_suffix(metadata_suffix.as_str()) {
            Some(rest) => (rest, true),
            None => (rest, false),
        };

        let path = decode_path(rest).ok_or_else(|| IdentifierError::UnknownPath(uri.to_string()))?;
        let id = store
            .get_node_by_path(&path)
            .ok_or_else(|| IdentifierError::UnknownPath(uri.to_string()))?;

        let is_description = store.node(id)?.has_type(FEDORA_NON_RDF_SOURCE_DESCRIPTION);
        match (is_description, wants_description) {
            (true, false) => Ok(store.described_resource(id)?),
            (false, true) => Err(IdentifierError::UnknownPath(uri.to_string())),
            _ => Ok(id),
        }
    }
}

fn encode_path(path: &str) -> String {
    if path == "/" {
        return "/".to_string();
    }
    path.split('/')
        .skip(1)
        .map(|segment| format!("/{}", utf8_percent_encode(segment, PATH_SEGMENT)))
        .collect()
}

fn decode_path(rest: &str) -> Option<String> {
    let trimmed = rest.trim_end_matches('/');
    if trimmed.is_empty() {
        return Some("/".to_string());
    }

    let mut path = String::new();
    for segment in trimmed.split('/').skip(1) {
        let decoded = percent_decode_str(segment).decode_utf8().ok()?;
        if decoded.is_empty() {
            return None;
        }
        path.push('/');
        path.push_str(&decoded);
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8080/rest/";

    #[test]
    fn test_invalid_base() {
        assert!(matches!(
            IdentifierConverter::new("not a uri"),
            Err(IdentifierError::InvalidBase { .. })
        ));
    }

    #[test]
    fn test_root_and_container_uris() {
        let mut store = GraphStore::new();
        let photos = store.create_container(store.root(), "photos").unwrap();
        let converter = IdentifierConverter::new(BASE).unwrap();

        assert_eq!(converter.base_uri(), "http://localhost:8080/rest");
        assert_eq!(
            converter.uri_for(&store, store.root()).unwrap().as_str(),
            "http://localhost:8080/rest/"
        );
        assert_eq!(
            converter.uri_for(&store, photos).unwrap().as_str(),
            "http://localhost:8080/rest/photos"
        );
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let mut store = GraphStore::new();
        let odd = store.create_container(store.root(), "summer 2024?").unwrap();
        let converter = IdentifierConverter::new(BASE).unwrap();

        let uri = converter.uri_for(&store, odd).unwrap();
        assert_eq!(uri.as_str(), "http://localhost:8080/rest/summer%202024%3F");
        assert_eq!(converter.node_for(&store, uri.as_str()).unwrap(), odd);
    }

    #[test]
    fn test_binary_uris() {
        let mut store = GraphStore::new();
        let (description, content) = store.create_binary(store.root(), "cat.jpg").unwrap();
        let converter = IdentifierConverter::new(BASE).unwrap();

        assert_eq!(
            converter.uri_for(&store, content).unwrap().as_str(),
            "http://localhost:8080/rest/cat.jpg"
        );
        assert_eq!(
            converter.uri_for(&store, description).unwrap().as_str(),
            "http://localhost:8080/rest/cat.jpg/fcr:metadata"
        );

        assert_eq!(
            converter.node_for(&store, "http://localhost:8080/rest/cat.jpg").unwrap(),
            content
        );
        assert_eq!(
            converter
                .node_for(&store, "http://localhost:8080/rest/cat.jpg/fcr:metadata")
                .unwrap(),
            description
        );
    }

    #[test]
    fn test_node_for_rejects_foreign_and_unknown_uris() {
        let mut store = GraphStore::new();
        store.create_container(store.root(), "a").unwrap();
        let converter = IdentifierConverter::new(BASE).unwrap();

        assert_eq!(converter.node_for(&store, "http://localhost:8080/rest").unwrap(), store.root());
        assert!(matches!(
            converter.node_for(&store, "http://example.org/a"),
            Err(IdentifierError::OutsideBase(_))
        ));
        assert!(matches!(
            converter.node_for(&store, "http://localhost:8080/restless"),
            Err(IdentifierError::OutsideBase(_))
        ));
        assert!(matches!(
            converter.node_for(&store, "http://localhost:8080/rest/b"),
            Err(IdentifierError::UnknownPath(_))
        ));
        assert!(matches!(
            converter.node_for(&store, "http://localhost:8080/rest/a/fcr:metadata"),
            Err(IdentifierError::UnknownPath(_))
        ));
    }

    #[test]
    fn test_missing_node() {
        let store = GraphStore::new();
        let converter = IdentifierConverter::new(BASE).unwrap();
        assert_eq!(
            converter.uri_for(&store, NodeId::new(9)),
            Err(IdentifierError::Storage(GraphError::NodeNotFound(NodeId::new(9))))
        );
    }
}
