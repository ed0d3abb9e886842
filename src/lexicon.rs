//! Repository vocabulary
//!
//! Two kinds of names live here:
//! - storage-level names (`prefix:local`) used as node labels and property
//!   keys inside the [`GraphStore`](crate::graph::GraphStore)
//! - full RDF IRIs used when rendering triples

// Namespaces

/// Linked Data Platform namespace.
pub const LDP_NAMESPACE: &str = "http://www.w3.org/ns/ldp#";
/// Repository (server-managed) namespace.
pub const REPOSITORY_NAMESPACE: &str = "http://fedora.info/definitions/v4/repository#";
pub const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";
pub const PREMIS_NAMESPACE: &str = "http://www.loc.gov/premis/rdf/v1#";
pub const EBUCORE_NAMESPACE: &str = "http://www.ebu.ch/metadata/ontologies/ebucore/ebucore#";
pub const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";
pub const DCTERMS_NAMESPACE: &str = "http://purl.org/dc/terms/";
pub const FOAF_NAMESPACE: &str = "http://xmlns.com/foaf/0.1/";
pub const PCDM_NAMESPACE: &str = "http://pcdm.org/models#";
pub const JCR_NAMESPACE: &str = "http://www.jcp.org/jcr/1.0";
pub const JCR_NT_NAMESPACE: &str = "http://www.jcp.org/jcr/nt/1.0";
pub const JCR_MIX_NAMESPACE: &str = "http://www.jcp.org/jcr/mix/1.0";
pub const MODE_NAMESPACE: &str = "http://www.modeshape.org/1.0";

/// Storage engine namespaces. Anything under these is an implementation
/// detail of the content store.
pub const INTERNAL_NAMESPACE_ROOTS: [&str; 2] = ["http://www.jcp.org/jcr/", "http://www.modeshape.org/"];

/// Storage prefixes that are never rendered.
pub const INTERNAL_PREFIXES: [&str; 4] = ["jcr", "nt", "mix", "mode"];

// Storage-level node types

pub const LDP_CONTAINER: &str = "ldp:Container";
pub const LDP_BASIC_CONTAINER: &str = "ldp:BasicContainer";
pub const LDP_DIRECT_CONTAINER: &str = "ldp:DirectContainer";
pub const LDP_INDIRECT_CONTAINER: &str = "ldp:IndirectContainer";
pub const LDP_RDF_SOURCE: &str = "ldp:RDFSource";
pub const LDP_NON_RDF_SOURCE: &str = "ldp:NonRDFSource";

pub const FEDORA_RESOURCE: &str = "fedora:Resource";
pub const FEDORA_CONTAINER: &str = "fedora:Container";
pub const FEDORA_BINARY: &str = "fedora:Binary";
pub const FEDORA_NON_RDF_SOURCE_DESCRIPTION: &str = "fedora:NonRdfSourceDescription";
pub const FEDORA_REPOSITORY_ROOT: &str = "fedora:RepositoryRoot";

// Storage-level property names

pub const LDP_HAS_MEMBER_RELATION: &str = "ldp:hasMemberRelation";
pub const LDP_INSERTED_CONTENT_RELATION: &str = "ldp:insertedContentRelation";
pub const LDP_MEMBER_RESOURCE: &str = "ldp:membershipResource";

/// Name of the content child below a binary's description node.
pub const JCR_CONTENT: &str = "jcr:content";

/// Suffix of the storage property holding the reference form of a
/// property whose RDF object is another repository resource.
pub const REFERENCE_PROPERTY_SUFFIX: &str = "_ref";

/// Path segment addressing the description of a binary.
pub const FCR_METADATA: &str = "fcr:metadata";

// RDF IRIs

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const LDP_MEMBER: &str = "http://www.w3.org/ns/ldp#member";
pub const LDP_CONTAINS: &str = "http://www.w3.org/ns/ldp#contains";
pub const LDP_MEMBER_SUBJECT: &str = "http://www.w3.org/ns/ldp#MemberSubject";
pub const PREMIS_HAS_SIZE: &str = "http://www.loc.gov/premis/rdf/v1#hasSize";
pub const PREMIS_HAS_MESSAGE_DIGEST: &str = "http://www.loc.gov/premis/rdf/v1#hasMessageDigest";

/// Predicates outside the reserved namespaces that only the server may assert.
pub const MANAGED_PREDICATES: [&str; 3] = [LDP_CONTAINS, PREMIS_HAS_SIZE, PREMIS_HAS_MESSAGE_DIGEST];

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

/// Whether a storage name (`prefix:local`) belongs to the storage engine.
pub fn is_internal_name(name: &str) -> bool {
    match name.split_once(':') {
        Some((prefix, _)) => INTERNAL_PREFIXES.contains(&prefix),
        None => false,
    }
}
