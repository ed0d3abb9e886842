//! Property value types for content nodes
//!
//! A property holds a single value, an ordered list of values (duplicates
//! allowed), or a reference to another node.

use super::types::NodeId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Property value type supporting multiple data types
///
/// Supports:
/// - String
/// - Integer (i64)
/// - Float (f64)
/// - Boolean
/// - DateTime (as i64 timestamp)
/// - Uri (an IRI stored by value)
/// - Reference (another node in the same store)
/// - Array (Vec<PropertyValue>)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(i64), // Unix timestamp in milliseconds
    Uri(String),
    Reference(NodeId),
    Array(Vec<PropertyValue>),
    Null,
}

impl PropertyValue {
    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the target if this is a reference
    pub fn as_reference(&self) -> Option<NodeId> {
        match self {
            PropertyValue::Reference(id) => Some(*id),
            _ => None,
        }
    }

    /// Iterate the values held by this property, in stored order.
    ///
    /// A scalar yields itself once; an array yields each element.
    pub fn values(&self) -> PropertyValues<'_> {
        match self {
            PropertyValue::Array(arr) => PropertyValues::Many(arr.iter()),
            other => PropertyValues::Single(Some(other)),
        }
    }

    /// Every node this property points at (one entry per reference value).
    pub fn references(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.values().filter_map(PropertyValue::as_reference)
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::String(_) => "String",
            PropertyValue::Integer(_) => "Integer",
            PropertyValue::Float(_) => "Float",
            PropertyValue::Boolean(_) => "Boolean",
            PropertyValue::DateTime(_) => "DateTime",
            PropertyValue::Uri(_) => "Uri",
            PropertyValue::Reference(_) => "Reference",
            PropertyValue::Array(_) => "Array",
            PropertyValue::Null => "Null",
        }
    }
}

/// Ordered iterator over the values of one property
#[derive(Debug, Clone)]
pub enum PropertyValues<'a> {
    Single(Option<&'a PropertyValue>),
    Many(std::slice::Iter<'a, PropertyValue>),
}

impl<'a> Iterator for PropertyValues<'a> {
    type Item = &'a PropertyValue;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            PropertyValues::Single(value) => value.take(),
            PropertyValues::Many(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            PropertyValues::Single(value) => {
                let n = usize::from(value.is_some());
                (n, Some(n))
            }
            PropertyValues::Many(iter) => iter.size_hint(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "\"{}\"", s),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::DateTime(dt) => write!(f, "DateTime({})", dt),
            PropertyValue::Uri(u) => write!(f, "<{}>", u),
            PropertyValue::Reference(id) => write!(f, "-> {}", id),
            PropertyValue::Array(arr) => {
                write!(f, "[")?;
                for (i, val) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, "]")
            }
            PropertyValue::Null => write!(f, "null"),
        }
    }
}

// Convenience conversions
impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<NodeId> for PropertyValue {
    fn from(id: NodeId) -> Self {
        PropertyValue::Reference(id)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(arr: Vec<PropertyValue>) -> Self {
        PropertyValue::Array(arr)
    }
}

/// Property map for storing node properties, in insertion order
pub type PropertyMap = IndexMap<String, PropertyValue>;
