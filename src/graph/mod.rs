//! Content graph
//!
//! This module implements the repository's property-graph data model:
//! - Nodes with multiple types and properties
//! - A containment hierarchy (parent, ordered children, paths)
//! - Reference-valued properties with a reverse index
//! - In-memory storage with hash-based indices

pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use node::Node;
pub use property::{PropertyMap, PropertyValue, PropertyValues};
pub use store::{Children, GraphError, GraphResult, GraphStore, References};
pub use types::{Label, NodeId, PropertyRef};
