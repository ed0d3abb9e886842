//! Errors raised while rendering LDP resources

use super::identifiers::IdentifierError;
use crate::graph::{GraphError, NodeId};
use crate::rdf::{PrefixError, RdfError};
use thiserror::Error;

/// LDP rendering errors
///
/// Absent optional configuration is never an error; it shows up as an
/// empty contribution instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LdpError {
    /// Reading the store failed
    #[error("Storage access failed: {0}")]
    Storage(#[from] GraphError),

    /// A node could not be mapped to or from a URI
    #[error("Identifier error: {0}")]
    Identifier(#[from] IdentifierError),

    /// A container's LDP configuration is present but unusable
    #[error("Malformed {property} on {node}: {reason}")]
    MalformedConfiguration {
        node: NodeId,
        property: String,
        reason: String,
    },

    /// A stored value has no RDF term form
    #[error("Cannot convert {type_name} value to an RDF term: {reason}")]
    UnconvertibleValue {
        type_name: &'static str,
        reason: String,
    },

    /// A storage name uses an unregistered prefix
    #[error("Namespace error: {0}")]
    Namespace(#[from] PrefixError),

    /// An IRI could not be built
    #[error("RDF error: {0}")]
    Rdf(#[from] RdfError),
}

pub type LdpResult<T> = Result<T, LdpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_convert() {
        let err: LdpError = GraphError::NodeNotFound(NodeId::new(3)).into();
        assert_eq!(err.to_string(), "Storage access failed: Node NodeId(3) not found");
    }

    #[test]
    fn test_malformed_configuration_message() {
        let err = LdpError::MalformedConfiguration {
            node: NodeId::new(1),
            property: "ldp:hasMemberRelation".to_string(),
            reason: "expected a single IRI, found Integer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed ldp:hasMemberRelation on NodeId(1): expected a single IRI, found Integer"
        );
    }
}
