use samyama_ldp::graph::{GraphStore, NodeId, PropertyValue};
use samyama_ldp::ldp::{ContextOptions, IdentifierConverter, RdfContext};
use samyama_ldp::lexicon::{
    LDP_CONTAINS, LDP_DIRECT_CONTAINER, LDP_HAS_MEMBER_RELATION, LDP_MEMBER_RESOURCE, RDF_TYPE,
};
use samyama_ldp::rdf::{is_managed_triple, RdfFormat, RdfSerializer, Triple};
use samyama_ldp::LdpConfig;

const DCTERMS_TITLE: &str = "http://purl.org/dc/terms/title";
const HAS_MEMBER: &str = "http://pcdm.org/models#hasMember";

fn repository() -> (GraphStore, NodeId) {
    let mut store = GraphStore::new();
    let root = store.root();

    let album = store.create_container(root, "album").unwrap();
    store.set_property(album, "dcterms:title", "Summer").unwrap();
    store
        .set_property(
            album,
            "dcterms:subject",
            PropertyValue::Array(vec!["sea".into(), "sand".into()]),
        )
        .unwrap();
    store.set_property(album, "mode:created", PropertyValue::DateTime(0)).unwrap();

    let members = store
        .create_ldp_container(album, "members", LDP_DIRECT_CONTAINER)
        .unwrap();
    store
        .set_property(members, LDP_MEMBER_RESOURCE, PropertyValue::Reference(album))
        .unwrap();
    store
        .set_property(members, LDP_HAS_MEMBER_RELATION, PropertyValue::Uri(HAS_MEMBER.to_string()))
        .unwrap();
    store.create_binary(members, "photo.jpg").unwrap();

    (store, album)
}

fn with_predicate<'t>(triples: &'t [Triple], predicate: &str) -> Vec<&'t Triple> {
    triples
        .iter()
        .filter(|t| t.predicate.as_str() == predicate)
        .collect()
}

#[test]
fn test_full_description_order() {
    let (store, album) = repository();
    let ids = IdentifierConverter::new("http://localhost:8080/rest").unwrap();
    let triples = RdfContext::new(&store, &ids, ContextOptions::default())
        .collect(album)
        .unwrap();

    let first_non_type = triples
        .iter()
        .position(|t| t.predicate.as_str() != RDF_TYPE)
        .unwrap();
    assert!(triples[..first_non_type]
        .iter()
        .all(|t| t.predicate.as_str() == RDF_TYPE));

    assert_eq!(with_predicate(&triples, DCTERMS_TITLE).len(), 1);
    let subjects = with_predicate(&triples, "http://purl.org/dc/terms/subject");
    assert_eq!(subjects.len(), 2);
    assert_eq!(subjects[0].object.to_string(), "\"sea\"");
    assert_eq!(subjects[1].object.to_string(), "\"sand\"");

    let contains = with_predicate(&triples, LDP_CONTAINS);
    assert_eq!(contains.len(), 1);
    assert_eq!(
        contains[0].object.to_string(),
        "<http://localhost:8080/rest/album/members>"
    );

    let members = with_predicate(&triples, HAS_MEMBER);
    assert_eq!(members.len(), 1);
    assert_eq!(
        members[0].object.to_string(),
        "<http://localhost:8080/rest/album/members/photo.jpg>"
    );
    assert_eq!(triples.last().unwrap().predicate.as_str(), HAS_MEMBER);

    assert!(!triples
        .iter()
        .any(|t| t.predicate.as_str().contains("modeshape")));
}

#[test]
fn test_user_view_hides_managed_triples() {
    let (store, album) = repository();
    let config = LdpConfig::from_yaml_str(
        "base_uri: http://localhost:8080/rest\ncontext:\n  include_server_managed: false\n",
    )
    .unwrap();
    let ids = config.identifier_converter().unwrap();

    let triples = RdfContext::new(&store, &ids, config.context)
        .collect(album)
        .unwrap();

    assert!(!triples.iter().any(is_managed_triple));
    assert!(with_predicate(&triples, LDP_CONTAINS).is_empty());
    assert_eq!(with_predicate(&triples, HAS_MEMBER).len(), 1);
}

#[test]
fn test_describe_is_lazy_and_restartable() {
    let (store, album) = repository();
    let ids = IdentifierConverter::new("http://localhost:8080/rest").unwrap();
    let context = RdfContext::new(&store, &ids, ContextOptions::default());

    let first_two: Vec<_> = context.describe(album).unwrap().take(2).collect();
    assert_eq!(first_two.len(), 2);

    let all = context.collect(album).unwrap();
    let again = context.collect(album).unwrap();
    assert_eq!(all, again);
}

#[test]
fn test_description_serializes() {
    let (store, album) = repository();
    let ids = IdentifierConverter::new("http://localhost:8080/rest").unwrap();
    let triples = RdfContext::new(&store, &ids, ContextOptions::default())
        .collect(album)
        .unwrap();

    let ntriples = RdfSerializer::serialize(&triples, RdfFormat::NTriples).unwrap();
    assert_eq!(ntriples.lines().count(), triples.len());
    assert!(ntriples.contains("<http://localhost:8080/rest/album> <http://purl.org/dc/terms/title> \"Summer\" ."));

    let turtle = RdfSerializer::serialize(&triples, RdfFormat::Turtle).unwrap();
    assert!(turtle.contains("\"Summer\""));
}
