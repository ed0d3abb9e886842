//! LDP membership triples
//!
//! Membership triples for a resource are not configured on the resource
//! itself. They come from the direct and indirect containers that name it
//! as their `ldp:membershipResource`. Two roles are involved:
//!
//! - the *membership resource*: the node being rendered. Its described
//!   resource URI is the subject of every triple.
//! - a *referencing container*: a container pointing at the membership
//!   resource. It supplies the predicate, where member objects come from,
//!   and the children to walk.
//!
//! Triples are produced lazily. Storage is read as items are drawn and the
//! iterator can be dropped at any point.

use super::error::{LdpError, LdpResult};
use super::identifiers::IdentifierConverter;
use super::properties::{reference_property_name, PropertyNameResolver};
use super::values::ValueConverter;
use crate::graph::{Children, GraphStore, Node, NodeId, PropertyValue, PropertyValues, References};
use crate::lexicon::{
    LDP_BASIC_CONTAINER, LDP_DIRECT_CONTAINER, LDP_HAS_MEMBER_RELATION,
    LDP_INDIRECT_CONTAINER, LDP_INSERTED_CONTENT_RELATION, LDP_MEMBER, LDP_MEMBER_RESOURCE,
    LDP_MEMBER_SUBJECT,
};
use crate::rdf::{NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Where the object of a membership triple comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSource {
    /// Each child's own URI
    MemberSubject,
    /// Every value of this property on each child
    InsertedProperty(NamedNode),
}

/// Membership settings derived from a container's current properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipConfig {
    pub relation: RdfPredicate,
    pub source: MemberSource,
}

/// A direct or indirect container naming a membership resource
#[derive(Debug, Clone, Copy)]
pub struct ReferencingContainer<'a> {
    pub id: NodeId,
    pub node: &'a Node,
}

impl<'a> ReferencingContainer<'a> {
    fn new(id: NodeId, node: &'a Node) -> Option<Self> {
        if node.has_type(LDP_DIRECT_CONTAINER) || node.has_type(LDP_INDIRECT_CONTAINER) {
            Some(Self { id, node })
        } else {
            None
        }
    }
}

/// Computes membership triples against a store
#[derive(Debug, Clone, Copy)]
pub struct MembershipResolver<'a> {
    store: &'a GraphStore,
    identifiers: &'a IdentifierConverter,
}

impl<'a> MembershipResolver<'a> {
    pub fn new(store: &'a GraphStore, identifiers: &'a IdentifierConverter) -> Self {
        Self { store, identifiers }
    }

    /// Direct and indirect containers whose `ldp:membershipResource` is
    /// `membership_resource`
    pub fn referencing_containers(
        &self,
        membership_resource: NodeId,
    ) -> LdpResult<Vec<ReferencingContainer<'a>>> {
        let mut containers = Vec::new();
        for reference in self.store.references_to(membership_resource, LDP_MEMBER_RESOURCE)? {
            if let Some(container) = self.referencing_container(reference.owner)? {
                containers.push(container);
            }
        }
        Ok(containers)
    }

    /// Derive the membership settings of a container
    ///
    /// Returns `None` when the container contributes no triples: it has no
    /// relation and is not basic, or it is indirect without an inserted
    /// content relation.
    pub fn membership_config(&self, container: NodeId) -> LdpResult<Option<MembershipConfig>> {
        let node = self.store.node(container)?;

        let relation = match node.get_property(LDP_HAS_MEMBER_RELATION) {
            Some(value) => RdfPredicate::from(iri_value(container, LDP_HAS_MEMBER_RELATION, value)?),
            None if node.has_type(LDP_BASIC_CONTAINER) => RdfPredicate::new(LDP_MEMBER)?,
            None => {
                debug!(
                    "{} has no {} and is not a basic container, skipping",
                    container, LDP_HAS_MEMBER_RELATION
                );
                return Ok(None);
            }
        };

        let source = if node.has_type(LDP_INDIRECT_CONTAINER) {
            match node.get_property(LDP_INSERTED_CONTENT_RELATION) {
                Some(value) => {
                    let inserted = iri_value(container, LDP_INSERTED_CONTENT_RELATION, value)?;
                    if inserted.as_str() == LDP_MEMBER_SUBJECT {
                        MemberSource::MemberSubject
                    } else {
                        MemberSource::InsertedProperty(inserted)
                    }
                }
                None => {
                    debug!(
                        "Indirect container {} has no {}, skipping",
                        container, LDP_INSERTED_CONTENT_RELATION
                    );
                    return Ok(None);
                }
            }
        } else {
            MemberSource::MemberSubject
        };

        Ok(Some(MembershipConfig { relation, source }))
    }

    /// Lazily compute the membership triples about `membership_resource`
    pub fn membership_triples(&self, membership_resource: NodeId) -> LdpResult<MembershipTriples<'a>> {
        let described = self.store.described_resource(membership_resource)?;
        let subject = RdfSubject::from(self.identifiers.uri_for(self.store, described)?);
        let references = self.store.references_to(membership_resource, LDP_MEMBER_RESOURCE)?;

        Ok(MembershipTriples {
            resolver: *self,
            subject,
            references,
            current: None,
            done: false,
        })
    }

    fn referencing_container(&self, owner: NodeId) -> LdpResult<Option<ReferencingContainer<'a>>> {
        let node = self.store.node(owner)?;
        let container = ReferencingContainer::new(owner, node);
        if container.is_none() {
            trace!("{} references a membership resource but is not direct or indirect", owner);
        }
        Ok(container)
    }

    fn container_members(&self, container: &ReferencingContainer<'a>) -> LdpResult<Option<ContainerMembers<'a>>> {
        let Some(config) = self.membership_config(container.id)? else {
            return Ok(None);
        };

        let source = match config.source {
            MemberSource::MemberSubject => ChildSource::MemberSubject,
            MemberSource::InsertedProperty(predicate) => {
                let name = PropertyNameResolver::new(self.store.namespaces()).property_name(&predicate);
                let reference_name = reference_property_name(&name);
                ChildSource::Inserted { name, reference_name }
            }
        };

        debug!("Walking members of {} for {}", container.id, config.relation);
        Ok(Some(ContainerMembers {
            relation: config.relation,
            source,
            children: self.store.children(container.id)?,
            values: None,
        }))
    }

    fn next_member(&self, members: &mut ContainerMembers<'a>) -> LdpResult<Option<RdfObject>> {
        loop {
            if let Some(values) = members.values.as_mut() {
                if let Some(value) = values.next() {
                    return ValueConverter::new(self.store, self.identifiers)
                        .convert(value)
                        .map(Some);
                }
                members.values = None;
            }

            let Some(child) = members.children.next() else {
                return Ok(None);
            };

            match &members.source {
                ChildSource::MemberSubject => {
                    let described = self.store.described_resource(child)?;
                    return Ok(Some(self.identifiers.uri_for(self.store, described)?.into()));
                }
                ChildSource::Inserted { name, reference_name } => {
                    let node = self.store.node(child)?;
                    match node
                        .get_property(name)
                        .or_else(|| node.get_property(reference_name))
                    {
                        Some(property) => members.values = Some(property.values()),
                        None => trace!("{} has neither {} nor {}", child, name, reference_name),
                    }
                }
            }
        }
    }
}

/// How a child yields member objects
#[derive(Debug)]
enum ChildSource {
    MemberSubject,
    Inserted { name: String, reference_name: String },
}

/// Walk state within one referencing container
#[derive(Debug)]
struct ContainerMembers<'a> {
    relation: RdfPredicate,
    source: ChildSource,
    children: Children<'a>,
    values: Option<PropertyValues<'a>>,
}

/// Lazy sequence of membership triples
///
/// Fused: after an error or the last triple it only returns `None`.
#[derive(Debug)]
pub struct MembershipTriples<'a> {
    resolver: MembershipResolver<'a>,
    subject: RdfSubject,
    references: References<'a>,
    current: Option<ContainerMembers<'a>>,
    done: bool,
}

impl<'a> MembershipTriples<'a> {
    /// Subject shared by every triple
    pub fn subject(&self) -> &RdfSubject {
        &self.subject
    }

    fn advance(&mut self) -> LdpResult<Option<Triple>> {
        loop {
            if let Some(members) = self.current.as_mut() {
                if let Some(object) = self.resolver.next_member(members)? {
                    return Ok(Some(Triple::new(
                        self.subject.clone(),
                        members.relation.clone(),
                        object,
                    )));
                }
                self.current = None;
            }

            let Some(reference) = self.references.next() else {
                return Ok(None);
            };
            if let Some(container) = self.resolver.referencing_container(reference.owner)? {
                self.current = self.resolver.container_members(&container)?;
            }
        }
    }
}

impl<'a> Iterator for MembershipTriples<'a> {
    type Item = LdpResult<Triple>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(triple)) => Some(Ok(triple)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<'a> FusedIterator for MembershipTriples<'a> {}

/// Read a single IRI-valued configuration property
fn iri_value(node: NodeId, property: &str, value: &PropertyValue) -> LdpResult<NamedNode> {
    let malformed = |reason: String| LdpError::MalformedConfiguration {
        node,
        property: property.to_string(),
        reason,
    };

    let text = match value {
        PropertyValue::Uri(iri) | PropertyValue::String(iri) => iri,
        other => {
            return Err(malformed(format!(
                "expected a single IRI, found {}",
                other.type_name()
            )))
        }
    };
    NamedNode::new(text).map_err(|e| malformed(e.to_string()))
}
