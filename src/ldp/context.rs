//! Full RDF description of one resource
//!
//! A description concatenates, in order:
//! 1. `rdf:type` triples from the node's types
//! 2. one triple per user property value
//! 3. `ldp:contains` for each child
//! 4. membership triples from containers naming the node as their
//!    membership resource
//!
//! For a binary's description node, types and properties of both the
//! description and the content node are included, all about the binary's URI.

use super::error::LdpResult;
use super::identifiers::IdentifierConverter;
use super::membership::MembershipResolver;
use super::properties::PropertyNameResolver;
use super::values::ValueConverter;
use crate::graph::{GraphStore, Node, NodeId, PropertyValue};
use crate::lexicon::{is_internal_name, LDP_CONTAINS, RDF_TYPE};
use crate::rdf::{is_managed_mixin, is_managed_predicate, NamedNode, RdfPredicate, RdfSubject, Triple};
use serde::{Deserialize, Serialize};
use std::iter;
use tracing::debug;

/// Which triple sources a description includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextOptions {
    /// Keep triples and types only the server may assert
    pub include_server_managed: bool,
    /// Emit `ldp:contains` for children
    pub include_containment: bool,
    /// Emit membership triples
    pub include_membership: bool,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            include_server_managed: true,
            include_containment: true,
            include_membership: true,
        }
    }
}

/// Lazy stream of description triples
pub type TripleStream<'a> = Box<dyn Iterator<Item = LdpResult<Triple>> + 'a>;

/// Assembles resource descriptions
#[derive(Debug, Clone, Copy)]
pub struct RdfContext<'a> {
    store: &'a GraphStore,
    identifiers: &'a IdentifierConverter,
    options: ContextOptions,
}

impl<'a> RdfContext<'a> {
    pub fn new(
        store: &'a GraphStore,
        identifiers: &'a IdentifierConverter,
        options: ContextOptions,
    ) -> Self {
        Self {
            store,
            identifiers,
            options,
        }
    }

    pub fn options(&self) -> ContextOptions {
        self.options
    }

    /// Subject of every triple describing `id`
    pub fn subject_for(&self, id: NodeId) -> LdpResult<RdfSubject> {
        let described = self.store.described_resource(id)?;
        Ok(self.identifiers.uri_for(self.store, described)?.into())
    }

    /// Lazily describe a node
    pub fn describe(&self, id: NodeId) -> LdpResult<TripleStream<'a>> {
        let subject = self.subject_for(id)?;
        let described = self.store.described_resource(id)?;

        let mut sources = vec![self.store.node(id)?];
        if described != id {
            sources.push(self.store.node(described)?);
        }

        let mut types = Vec::new();
        for node in &sources {
            types.extend(self.type_triples(node, &subject)?);
        }
        let mut stream: TripleStream<'a> = Box::new(types.into_iter().map(Ok));

        for node in sources {
            stream = Box::new(stream.chain(self.property_triples(node, subject.clone())));
        }

        if self.options.include_containment {
            stream = Box::new(stream.chain(self.containment_triples(id, subject)?));
        }

        if self.options.include_membership {
            let membership = MembershipResolver::new(self.store, self.identifiers).membership_triples(id)?;
            stream = Box::new(stream.chain(membership));
        }

        Ok(stream)
    }

    /// Describe a node into a vector, failing on the first error
    pub fn collect(&self, id: NodeId) -> LdpResult<Vec<Triple>> {
        let triples = self.describe(id)?.collect::<LdpResult<Vec<_>>>()?;
        debug!("Described {} with {} triples", id, triples.len());
        Ok(triples)
    }

    fn type_triples(&self, node: &Node, subject: &RdfSubject) -> LdpResult<Vec<Triple>> {
        let rdf_type = RdfPredicate::new(RDF_TYPE)?;
        let mut triples = Vec::new();

        for label in &node.labels {
            if is_internal_name(label.as_str()) {
                continue;
            }
            let type_iri = NamedNode::new(&self.store.namespaces().expand(label.as_str())?)?;
            if !self.options.include_server_managed && is_managed_mixin(&type_iri) {
                continue;
            }
            triples.push(Triple::new(subject.clone(), rdf_type.clone(), type_iri.into()));
        }
        Ok(triples)
    }

    fn property_triples(&self, node: &'a Node, subject: RdfSubject) -> TripleStream<'a> {
        let context = *self;
        Box::new(
            node.properties
                .iter()
                .filter(|(name, _)| !is_internal_name(name))
                .flat_map(move |(name, value)| context.property_values(subject.clone(), name, value)),
        )
    }

    fn property_values(&self, subject: RdfSubject, name: &str, value: &'a PropertyValue) -> TripleStream<'a> {
        let predicate = match PropertyNameResolver::new(self.store.namespaces()).predicate_for(name) {
            Ok(predicate) => predicate,
            Err(e) => return Box::new(iter::once(Err(e))),
        };
        if !self.options.include_server_managed && is_managed_predicate(&predicate) {
            return Box::new(iter::empty());
        }

        let values = ValueConverter::new(self.store, self.identifiers);
        Box::new(value.values().map(move |v| {
            values
                .convert(v)
                .map(|object| Triple::new(subject.clone(), predicate.clone(), object))
        }))
    }

    fn containment_triples(&self, id: NodeId, subject: RdfSubject) -> LdpResult<TripleStream<'a>> {
        let contains = RdfPredicate::new(LDP_CONTAINS)?;
        if !self.options.include_server_managed && is_managed_predicate(&contains) {
            return Ok(Box::new(iter::empty()));
        }

        let context = *self;
        let children = self.store.children(id)?;
        Ok(Box::new(children.filter_map(move |child| {
            context
                .containment_triple(&subject, &contains, child)
                .transpose()
        })))
    }

    fn containment_triple(
        &self,
        subject: &RdfSubject,
        contains: &RdfPredicate,
        child: NodeId,
    ) -> LdpResult<Option<Triple>> {
        if is_internal_name(self.store.node(child)?.name()) {
            return Ok(None);
        }
        let described = self.store.described_resource(child)?;
        let object = self.identifiers.uri_for(self.store, described)?;
        Ok(Some(Triple::new(subject.clone(), contains.clone(), object.into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{LDP_MEMBER, PREMIS_HAS_SIZE};

    fn ids() -> IdentifierConverter {
        IdentifierConverter::new("http://localhost:8080/rest").unwrap()
    }

    fn predicates(triples: &[Triple]) -> Vec<&str> {
        triples.iter().map(|t| t.predicate.as_str()).collect()
    }

    #[test]
    fn test_container_description() {
        let mut store = GraphStore::new();
        let photos = store.create_container(store.root(), "photos").unwrap();
        store.set_property(photos, "dcterms:title", "Photos").unwrap();
        store.create_container(photos, "a").unwrap();
        let ids = ids();

        let triples = RdfContext::new(&store, &ids, ContextOptions::default())
            .collect(photos)
            .unwrap();

        let types = predicates(&triples).iter().filter(|p| **p == RDF_TYPE).count();
        assert_eq!(types, store.node(photos).unwrap().label_count());
        assert!(predicates(&triples).contains(&"http://purl.org/dc/terms/title"));
        assert_eq!(
            triples.last().unwrap().to_string(),
            "<http://localhost:8080/rest/photos> <http://www.w3.org/ns/ldp#contains> <http://localhost:8080/rest/photos/a> ."
        );
    }

    #[test]
    fn test_server_managed_filtered() {
        let mut store = GraphStore::new();
        let photos = store.create_container(store.root(), "photos").unwrap();
        store.create_container(photos, "a").unwrap();
        let ids = ids();

        let options = ContextOptions {
            include_server_managed: false,
            ..ContextOptions::default()
        };
        let triples = RdfContext::new(&store, &ids, options).collect(photos).unwrap();

        assert!(!predicates(&triples).contains(&LDP_CONTAINS));
        let fedora_types = triples
            .iter()
            .filter_map(|t| t.object.as_named_node())
            .filter(|o| o.as_str().starts_with("http://fedora.info/"))
            .count();
        assert_eq!(fedora_types, 0);
    }

    #[test]
    fn test_binary_description_merges_content() {
        let mut store = GraphStore::new();
        let (description, content) = store.create_binary(store.root(), "cat.jpg").unwrap();
        store.set_property(description, "dc:title", "A cat").unwrap();
        store.set_property(content, "premis:hasSize", 1024i64).unwrap();
        store.set_property(content, "jcr:mimeType", "image/jpeg").unwrap();
        let ids = ids();

        let triples = RdfContext::new(&store, &ids, ContextOptions::default())
            .collect(description)
            .unwrap();

        for triple in &triples {
            assert_eq!(triple.subject.to_string(), "<http://localhost:8080/rest/cat.jpg>");
        }
        let predicates = predicates(&triples);
        assert!(predicates.contains(&"http://purl.org/dc/elements/1.1/title"));
        assert!(predicates.contains(&PREMIS_HAS_SIZE));
        assert!(!predicates.contains(&LDP_CONTAINS));
        assert!(!predicates.iter().any(|p| p.contains("mimeType")));
    }

    #[test]
    fn test_reference_property_rendered_without_suffix() {
        let mut store = GraphStore::new();
        let a = store.create_container(store.root(), "a").unwrap();
        let b = store.create_container(store.root(), "b").unwrap();
        store
            .set_property(a, "pcdm:hasMember_ref", PropertyValue::Reference(b))
            .unwrap();
        let ids = ids();

        let options = ContextOptions {
            include_server_managed: false,
            ..ContextOptions::default()
        };
        let triples = RdfContext::new(&store, &ids, options).collect(a).unwrap();
        let member = triples
            .iter()
            .find(|t| t.predicate.as_str() == "http://pcdm.org/models#hasMember")
            .unwrap();
        assert_eq!(
            member.object.as_named_node().unwrap().as_str(),
            "http://localhost:8080/rest/b"
        );
    }

    #[test]
    fn test_membership_toggle() {
        let mut store = GraphStore::new();
        let target = store.create_container(store.root(), "target").unwrap();
        let direct = store
            .create_ldp_container(store.root(), "members", crate::lexicon::LDP_DIRECT_CONTAINER)
            .unwrap();
        store
            .set_property(direct, crate::lexicon::LDP_MEMBER_RESOURCE, PropertyValue::Reference(target))
            .unwrap();
        store
            .set_property(
                direct,
                crate::lexicon::LDP_HAS_MEMBER_RELATION,
                PropertyValue::Uri(LDP_MEMBER.to_string()),
            )
            .unwrap();
        store.create_container(direct, "m").unwrap();
        let ids = ids();

        let with = RdfContext::new(&store, &ids, ContextOptions::default())
            .collect(target)
            .unwrap();
        assert!(predicates(&with).contains(&LDP_MEMBER));

        let options = ContextOptions {
            include_membership: false,
            ..ContextOptions::default()
        };
        let without = RdfContext::new(&store, &ids, options).collect(target).unwrap();
        assert!(!predicates(&without).contains(&LDP_MEMBER));
    }

    #[test]
    fn test_unconvertible_value_surfaces() {
        let mut store = GraphStore::new();
        let a = store.create_container(store.root(), "a").unwrap();
        store.set_property(a, "dc:subject", PropertyValue::Null).unwrap();
        let ids = ids();

        let result = RdfContext::new(&store, &ids, ContextOptions::default()).collect(a);
        assert!(matches!(
            result,
            Err(crate::ldp::LdpError::UnconvertibleValue { type_name: "Null", .. })
        ));
    }
}
