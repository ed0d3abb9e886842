//! Node implementation for the content graph
//!
//! A node is one repository resource: a container, a binary, the
//! description of a binary, or the repository root.

use super::property::{PropertyMap, PropertyValue};
use super::types::{Label, NodeId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A node in the content graph
///
/// Nodes have:
/// - A unique ID
/// - A path from the repository root
/// - A parent (None only for the root)
/// - A set of types, kept in insertion order
/// - Properties (key-value pairs)
/// - Creation and update timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Absolute path, "/" for the root
    pub path: String,

    /// Parent node, None for the root
    pub parent: Option<NodeId>,

    /// Types of this node
    pub labels: IndexSet<Label>,

    /// Properties associated with this node
    pub properties: PropertyMap,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl Node {
    /// Create a new node with the given types
    pub fn new(id: NodeId, path: impl Into<String>, parent: Option<NodeId>, labels: Vec<Label>) -> Self {
        let now = chrono::Utc::now().timestamp_millis();

        Node {
            id,
            path: path.into(),
            parent,
            labels: labels.into_iter().collect(),
            properties: PropertyMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Last path segment, empty for the root
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or("")
    }

    /// Add a type to this node
    pub(crate) fn add_label(&mut self, label: impl Into<Label>) -> bool {
        let added = self.labels.insert(label.into());
        if added {
            self.update_timestamp();
        }
        added
    }

    /// Check if node has a specific label
    pub fn has_label(&self, label: &Label) -> bool {
        self.labels.contains(label)
    }

    /// Check if node conforms to a type given by its storage name
    pub fn has_type(&self, type_name: &str) -> bool {
        self.labels.iter().any(|l| l.as_str() == type_name)
    }

    /// Get all labels
    pub fn get_labels(&self) -> Vec<&Label> {
        self.labels.iter().collect()
    }

    /// Set a property value. Reference bookkeeping is done by the store.
    pub(crate) fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Option<PropertyValue> {
        let old = self.properties.insert(key.into(), value.into());
        self.update_timestamp();
        old
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Remove a property
    pub(crate) fn remove_property(&mut self, key: &str) -> Option<PropertyValue> {
        let removed = self.properties.shift_remove(key);
        if removed.is_some() {
            self.update_timestamp();
        }
        removed
    }

    /// Check if property exists
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Update the modification timestamp
    fn update_timestamp(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }

    /// Get number of properties
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Get number of labels
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(id: u64) -> Node {
        Node::new(
            NodeId::new(id),
            "/parent/child",
            Some(NodeId::new(0)),
            vec![Label::new("fedora:Container"), Label::new("ldp:DirectContainer")],
        )
    }

    #[test]
    fn test_create_node() {
        let node = container(1);
        assert_eq!(node.id, NodeId::new(1));
        assert_eq!(node.name(), "child");
        assert_eq!(node.parent, Some(NodeId::new(0)));
        assert_eq!(node.label_count(), 2);
        assert!(node.has_type("ldp:DirectContainer"));
        assert!(!node.has_type("ldp:IndirectContainer"));
    }

    #[test]
    fn test_root_name_is_empty() {
        let root = Node::new(NodeId::new(0), "/", None, vec![]);
        assert_eq!(root.name(), "");
    }

    #[test]
    fn test_labels_keep_insertion_order() {
        let mut node = container(2);
        assert!(node.add_label("ldp:RDFSource"));
        assert!(!node.add_label("ldp:RDFSource"));

        let labels: Vec<_> = node.get_labels().into_iter().map(Label::as_str).collect();
        assert_eq!(labels, vec!["fedora:Container", "ldp:DirectContainer", "ldp:RDFSource"]);
        assert!(node.has_label(&Label::new("ldp:RDFSource")));
    }

    #[test]
    fn test_node_properties() {
        let mut node = container(3);

        node.set_property("dc:title", "Photos");
        node.set_property("premis:hasSize", 30i64);

        assert_eq!(node.get_property("dc:title").unwrap().as_string(), Some("Photos"));
        assert_eq!(node.get_property("premis:hasSize").unwrap().as_integer(), Some(30));
        assert_eq!(node.property_count(), 2);

        let removed = node.remove_property("premis:hasSize");
        assert!(removed.is_some());
        assert!(!node.has_property("premis:hasSize"));
    }

    #[test]
    fn test_node_timestamps() {
        let node = container(4);
        assert!(node.created_at > 0);
        assert_eq!(node.created_at, node.updated_at);

        std::thread::sleep(std::time::Duration::from_millis(10));
        let mut node2 = node.clone();
        node2.set_property("key", "value");

        assert!(node2.updated_at > node.updated_at);
    }

    #[test]
    fn test_node_equality() {
        assert_eq!(container(7), container(7));
        assert_ne!(container(7), container(8));
    }
}
