//! In-memory content store
//!
//! Nodes live in an arena indexed by [`NodeId`]. Next to the arena the store
//! keeps:
//! - ordered child lists (the containment hierarchy)
//! - a path index for addressing nodes by path
//! - a back-reference index answering "which properties point at X"
//! - the namespace registry used to map predicates to storage names

use super::node::Node;
use super::property::PropertyValue;
use super::types::{Label, NodeId, PropertyRef};
use crate::lexicon::{
    FEDORA_BINARY, FEDORA_CONTAINER, FEDORA_NON_RDF_SOURCE_DESCRIPTION, FEDORA_REPOSITORY_ROOT,
    FEDORA_RESOURCE, JCR_CONTENT, LDP_BASIC_CONTAINER, LDP_CONTAINER, LDP_NON_RDF_SOURCE,
    LDP_RDF_SOURCE,
};
use crate::rdf::NamespaceManager;
use rustc_hash::FxHashMap;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during store operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Path already exists: {0}")]
    PathAlreadyExists(String),

    #[error("Invalid node name: {0:?}")]
    InvalidName(String),

    #[error("Invalid property name: {0:?}, expected prefix:local or {{namespace}}local")]
    InvalidPropertyName(String),

    #[error("Invalid reference: target node {0} does not exist")]
    InvalidReference(NodeId),

    #[error("Binary description {0} has no content node")]
    MissingBinaryContent(NodeId),

    #[error("The repository root cannot be deleted")]
    CannotDeleteRoot,
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Iterator over the children of a node, in creation order
#[derive(Debug, Clone)]
pub struct Children<'a> {
    inner: std::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Iterator over the properties with a given name that point at a node
#[derive(Debug, Clone)]
pub struct References<'a> {
    inner: std::slice::Iter<'a, PropertyRef>,
    name: &'a str,
}

impl<'a> Iterator for References<'a> {
    type Item = &'a PropertyRef;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.name;
        self.inner.find(|r| r.name == name)
    }
}

/// In-memory content store
///
/// Uses vectors and hash maps for O(1) lookup:
/// - nodes: NodeId -> Node (None once deleted)
/// - children: NodeId -> Vec<NodeId>
/// - paths: path -> NodeId
/// - back_references: target NodeId -> Vec<PropertyRef>
#[derive(Debug)]
pub struct GraphStore {
    /// Node storage (arena, index = NodeId)
    nodes: Vec<Option<Node>>,

    /// Children of each node, in creation order
    children: Vec<Vec<NodeId>>,

    /// Path index
    paths: HashMap<String, NodeId>,

    /// Reverse index of reference-valued properties
    back_references: FxHashMap<NodeId, Vec<PropertyRef>>,

    /// Namespace registry for storage names
    namespaces: NamespaceManager,

    /// Root node
    root: NodeId,
}

impl GraphStore {
    /// Create a store holding only the repository root
    pub fn new() -> Self {
        let root = NodeId::new(0);
        let root_node = Node::new(
            root,
            "/",
            None,
            vec![
                Label::new(FEDORA_RESOURCE),
                Label::new(FEDORA_CONTAINER),
                Label::new(FEDORA_REPOSITORY_ROOT),
                Label::new(LDP_CONTAINER),
                Label::new(LDP_BASIC_CONTAINER),
                Label::new(LDP_RDF_SOURCE),
            ],
        );

        let mut paths = HashMap::new();
        paths.insert("/".to_string(), root);

        GraphStore {
            nodes: vec![Some(root_node)],
            children: vec![Vec::new()],
            paths,
            back_references: FxHashMap::default(),
            namespaces: NamespaceManager::new(),
            root,
        }
    }

    /// The repository root
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Namespace registry
    pub fn namespaces(&self) -> &NamespaceManager {
        &self.namespaces
    }

    /// Mutable namespace registry
    pub fn namespaces_mut(&mut self) -> &mut NamespaceManager {
        &mut self.namespaces
    }

    /// Create a node below `parent`
    pub fn create_node(
        &mut self,
        parent: NodeId,
        name: &str,
        labels: Vec<Label>,
    ) -> GraphResult<NodeId> {
        if name.is_empty() || name.contains('/') {
            return Err(GraphError::InvalidName(name.to_string()));
        }

        let parent_path = &self.node(parent)?.path;
        let path = if parent_path == "/" {
            format!("/{}", name)
        } else {
            format!("{}/{}", parent_path, name)
        };
        if self.paths.contains_key(&path) {
            return Err(GraphError::PathAlreadyExists(path));
        }

        let id = NodeId::new(self.nodes.len() as u64);
        debug!("Creating node {} at {}", id, path);

        self.paths.insert(path.clone(), id);
        self.nodes.push(Some(Node::new(id, path, Some(parent), labels)));
        self.children.push(Vec::new());
        self.children[parent.as_u64() as usize].push(id);

        Ok(id)
    }

    /// Create a basic container below `parent`
    pub fn create_container(&mut self, parent: NodeId, name: &str) -> GraphResult<NodeId> {
        self.create_ldp_container(parent, name, LDP_BASIC_CONTAINER)
    }

    /// Create a container of the given LDP kind below `parent`
    pub fn create_ldp_container(&mut self, parent: NodeId, name: &str, kind: &str) -> GraphResult<NodeId> {
        self.create_node(
            parent,
            name,
            vec![
                Label::new(FEDORA_RESOURCE),
                Label::new(FEDORA_CONTAINER),
                Label::new(LDP_CONTAINER),
                Label::new(kind),
                Label::new(LDP_RDF_SOURCE),
            ],
        )
    }

    /// Create a binary below `parent`
    ///
    /// Returns the description node, which is what appears as the child of
    /// `parent`, and the content node holding the bytes' metadata.
    pub fn create_binary(&mut self, parent: NodeId, name: &str) -> GraphResult<(NodeId, NodeId)> {
        let description = self.create_node(
            parent,
            name,
            vec![
                Label::new(FEDORA_RESOURCE),
                Label::new(FEDORA_NON_RDF_SOURCE_DESCRIPTION),
                Label::new(LDP_RDF_SOURCE),
            ],
        )?;
        let content = self.create_node(
            description,
            JCR_CONTENT,
            vec![
                Label::new(FEDORA_RESOURCE),
                Label::new(FEDORA_BINARY),
                Label::new(LDP_NON_RDF_SOURCE),
            ],
        )?;
        Ok((description, content))
    }

    /// Get a node, None if it does not exist
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.as_u64() as usize).and_then(Option::as_ref)
    }

    /// Get a node, failing if it does not exist
    pub fn node(&self, id: NodeId) -> GraphResult<&Node> {
        self.get_node(id).ok_or(GraphError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut Node> {
        self.nodes
            .get_mut(id.as_u64() as usize)
            .and_then(Option::as_mut)
            .ok_or(GraphError::NodeNotFound(id))
    }

    /// Check if a node exists
    pub fn has_node(&self, id: NodeId) -> bool {
        self.get_node(id).is_some()
    }

    /// Look a node up by absolute path
    pub fn get_node_by_path(&self, path: &str) -> Option<NodeId> {
        self.paths.get(path).copied()
    }

    /// Add a type to a node
    pub fn add_label(&mut self, id: NodeId, label: impl Into<Label>) -> GraphResult<bool> {
        Ok(self.node_mut(id)?.add_label(label))
    }

    /// Set a property, keeping the back-reference index in step
    ///
    /// `key` must be a `prefix:local` or `{namespace}local` name. Every
    /// reference in `value` must point at an existing node.
    pub fn set_property(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<Option<PropertyValue>> {
        let key = key.into();
        let value = value.into();

        if !is_property_name(&key) {
            return Err(GraphError::InvalidPropertyName(key));
        }

        if let Some(missing) = value.references().find(|target| !self.has_node(*target)) {
            return Err(GraphError::InvalidReference(missing));
        }

        let old = self.node_mut(id)?.set_property(key.clone(), value.clone());
        if let Some(old) = &old {
            self.unindex_references(id, &key, old);
        }
        self.index_references(id, &key, &value);

        Ok(old)
    }

    /// Remove a property
    pub fn remove_property(&mut self, id: NodeId, key: &str) -> GraphResult<Option<PropertyValue>> {
        let removed = self.node_mut(id)?.remove_property(key);
        if let Some(old) = &removed {
            self.unindex_references(id, key, old);
        }
        Ok(removed)
    }

    /// Delete a node and everything below it
    ///
    /// References held by surviving nodes that point into the deleted
    /// subtree are left in place and become dangling.
    pub fn delete_node(&mut self, id: NodeId) -> GraphResult<usize> {
        if id == self.root {
            return Err(GraphError::CannotDeleteRoot);
        }
        let parent = self.node(id)?.parent;

        let mut doomed = vec![id];
        let mut i = 0;
        while i < doomed.len() {
            let current = doomed[i];
            doomed.extend(self.children[current.as_u64() as usize].iter().copied());
            i += 1;
        }

        for &victim in &doomed {
            let idx = victim.as_u64() as usize;
            if let Some(node) = self.nodes[idx].take() {
                for (key, value) in &node.properties {
                    self.unindex_references(victim, key, value);
                }
                self.paths.remove(&node.path);
            }
            self.children[idx].clear();
            self.back_references.remove(&victim);
        }

        if let Some(parent) = parent {
            self.children[parent.as_u64() as usize].retain(|c| *c != id);
        }

        debug!("Deleted {} nodes below and including {}", doomed.len(), id);
        Ok(doomed.len())
    }

    /// Children of a node, in creation order
    pub fn children(&self, id: NodeId) -> GraphResult<Children<'_>> {
        self.node(id)?;
        Ok(Children {
            inner: self.children[id.as_u64() as usize].iter(),
        })
    }

    /// Properties named `name` anywhere in the store whose value references
    /// `target`
    pub fn references_to<'a>(&'a self, target: NodeId, name: &'a str) -> GraphResult<References<'a>> {
        self.node(target)?;
        let refs = self
            .back_references
            .get(&target)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(References {
            inner: refs.iter(),
            name,
        })
    }

    /// The externally addressable resource a node stands for
    ///
    /// A binary's description node stands for the binary content below it;
    /// every other node stands for itself.
    pub fn described_resource(&self, id: NodeId) -> GraphResult<NodeId> {
        let node = self.node(id)?;
        if !node.has_type(FEDORA_NON_RDF_SOURCE_DESCRIPTION) {
            return Ok(id);
        }

        let content_path = format!("{}/{}", node.path, JCR_CONTENT);
        self.get_node_by_path(&content_path)
            .ok_or(GraphError::MissingBinaryContent(id))
    }

    /// Get number of live nodes
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    fn index_references(&mut self, owner: NodeId, key: &str, value: &PropertyValue) {
        for target in value.references() {
            let refs = self.back_references.entry(target).or_default();
            if !refs.iter().any(|r| r.owner == owner && r.name == key) {
                refs.push(PropertyRef::new(owner, key));
            }
        }
    }

    fn unindex_references(&mut self, owner: NodeId, key: &str, value: &PropertyValue) {
        for target in value.references() {
            if let Some(refs) = self.back_references.get_mut(&target) {
                refs.retain(|r| !(r.owner == owner && r.name == key));
                if refs.is_empty() {
                    self.back_references.remove(&target);
                }
            }
        }
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

/// `prefix:local` or `{namespace}local`, both parts non-empty
fn is_property_name(key: &str) -> bool {
    if let Some(expanded) = key.strip_prefix('{') {
        return matches!(expanded.split_once('}'), Some((ns, local)) if !ns.is_empty() && !local.is_empty());
    }
    match key.split_once(':') {
        Some((prefix, local)) => {
            !prefix.is_empty()
                && !local.is_empty()
                && prefix
                    .chars()
                    .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LDP_MEMBER_RESOURCE;

    #[test]
    fn test_new_store_has_root() {
        let store = GraphStore::new();
        let root = store.node(store.root()).unwrap();
        assert_eq!(root.path, "/");
        assert!(root.has_type(FEDORA_REPOSITORY_ROOT));
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn test_create_nodes_and_paths() {
        let mut store = GraphStore::new();
        let a = store.create_container(store.root(), "a").unwrap();
        let b = store.create_container(a, "b").unwrap();

        assert_eq!(store.node(a).unwrap().path, "/a");
        assert_eq!(store.node(b).unwrap().path, "/a/b");
        assert_eq!(store.get_node_by_path("/a/b"), Some(b));
        assert_eq!(store.node(b).unwrap().parent, Some(a));
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let mut store = GraphStore::new();
        store.create_container(store.root(), "a").unwrap();
        let err = store.create_container(store.root(), "a").unwrap_err();
        assert_eq!(err, GraphError::PathAlreadyExists("/a".to_string()));
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut store = GraphStore::new();
        let root = store.root();
        assert!(matches!(store.create_container(root, ""), Err(GraphError::InvalidName(_))));
        assert!(matches!(store.create_container(root, "a/b"), Err(GraphError::InvalidName(_))));
    }

    #[test]
    fn test_children_in_creation_order() {
        let mut store = GraphStore::new();
        let parent = store.create_container(store.root(), "p").unwrap();
        let c1 = store.create_container(parent, "z").unwrap();
        let c2 = store.create_container(parent, "a").unwrap();

        let children: Vec<_> = store.children(parent).unwrap().collect();
        assert_eq!(children, vec![c1, c2]);
    }

    #[test]
    fn test_children_of_missing_node() {
        let store = GraphStore::new();
        assert!(matches!(
            store.children(NodeId::new(99)),
            Err(GraphError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_back_references_follow_property_updates() {
        let mut store = GraphStore::new();
        let target1 = store.create_container(store.root(), "t1").unwrap();
        let target2 = store.create_container(store.root(), "t2").unwrap();
        let owner = store.create_container(store.root(), "owner").unwrap();

        store.set_property(owner, LDP_MEMBER_RESOURCE, target1).unwrap();
        let refs: Vec<_> = store.references_to(target1, LDP_MEMBER_RESOURCE).unwrap().collect();
        assert_eq!(refs, vec![&PropertyRef::new(owner, LDP_MEMBER_RESOURCE)]);

        store.set_property(owner, LDP_MEMBER_RESOURCE, target2).unwrap();
        assert_eq!(store.references_to(target1, LDP_MEMBER_RESOURCE).unwrap().count(), 0);
        assert_eq!(store.references_to(target2, LDP_MEMBER_RESOURCE).unwrap().count(), 1);

        store.remove_property(owner, LDP_MEMBER_RESOURCE).unwrap();
        assert_eq!(store.references_to(target2, LDP_MEMBER_RESOURCE).unwrap().count(), 0);
    }

    #[test]
    fn test_references_filtered_by_name() {
        let mut store = GraphStore::new();
        let target = store.create_container(store.root(), "t").unwrap();
        let owner = store.create_container(store.root(), "o").unwrap();

        store.set_property(owner, "pcdm:hasMember_ref", target).unwrap();
        assert_eq!(store.references_to(target, LDP_MEMBER_RESOURCE).unwrap().count(), 0);
        assert_eq!(store.references_to(target, "pcdm:hasMember_ref").unwrap().count(), 1);
    }

    #[test]
    fn test_reference_to_missing_node_rejected() {
        let mut store = GraphStore::new();
        let owner = store.create_container(store.root(), "o").unwrap();
        let err = store.set_property(owner, LDP_MEMBER_RESOURCE, NodeId::new(42)).unwrap_err();
        assert_eq!(err, GraphError::InvalidReference(NodeId::new(42)));
        assert!(!store.node(owner).unwrap().has_property(LDP_MEMBER_RESOURCE));
    }

    #[test]
    fn test_property_name_must_be_qualified() {
        let mut store = GraphStore::new();
        let node = store.create_container(store.root(), "n").unwrap();

        for key in ["title", "", ":title", "dc:", "{}title", "{http://example.org/}"] {
            assert_eq!(
                store.set_property(node, key, "Photos"),
                Err(GraphError::InvalidPropertyName(key.to_string())),
                "{}",
                key
            );
        }
        assert!(store.node(node).unwrap().properties.is_empty());

        store.set_property(node, "dc:title", "Photos").unwrap();
        store.set_property(node, "{http://example.org/vocab#}knows", "Bob").unwrap();
        store.set_property(node, "ex:link_ref", node).unwrap();
        assert_eq!(store.node(node).unwrap().properties.len(), 3);
    }

    #[test]
    fn test_self_reference_allowed() {
        let mut store = GraphStore::new();
        let container = store.create_container(store.root(), "c").unwrap();
        store.set_property(container, LDP_MEMBER_RESOURCE, container).unwrap();
        assert_eq!(store.references_to(container, LDP_MEMBER_RESOURCE).unwrap().count(), 1);
    }

    #[test]
    fn test_binary_described_resource() {
        let mut store = GraphStore::new();
        let (description, content) = store.create_binary(store.root(), "file.txt").unwrap();

        assert_eq!(store.described_resource(description).unwrap(), content);
        assert_eq!(store.described_resource(content).unwrap(), content);
        assert_eq!(store.node(content).unwrap().path, "/file.txt/jcr:content");
    }

    #[test]
    fn test_delete_subtree_leaves_dangling_references() {
        let mut store = GraphStore::new();
        let doomed = store.create_container(store.root(), "doomed").unwrap();
        let inner = store.create_container(doomed, "inner").unwrap();
        let survivor = store.create_container(store.root(), "survivor").unwrap();
        store.set_property(survivor, "ex:link_ref", inner).unwrap();
        store.set_property(inner, LDP_MEMBER_RESOURCE, survivor).unwrap();

        assert_eq!(store.delete_node(doomed).unwrap(), 2);
        assert!(!store.has_node(inner));
        assert_eq!(store.get_node_by_path("/doomed/inner"), None);
        assert_eq!(store.children(store.root()).unwrap().count(), 1);

        // the deleted owner no longer points at the survivor
        assert_eq!(store.references_to(survivor, LDP_MEMBER_RESOURCE).unwrap().count(), 0);
        // the survivor still holds its now dangling reference
        let value = store.node(survivor).unwrap().get_property("ex:link_ref").unwrap();
        assert_eq!(value.as_reference(), Some(inner));
    }

    #[test]
    fn test_cannot_delete_root() {
        let mut store = GraphStore::new();
        let root = store.root();
        assert_eq!(store.delete_node(root), Err(GraphError::CannotDeleteRoot));
    }
}
