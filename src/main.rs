use anyhow::Context;
use samyama_ldp::graph::PropertyValue;
use samyama_ldp::lexicon::{
    LDP_DIRECT_CONTAINER, LDP_HAS_MEMBER_RELATION, LDP_INDIRECT_CONTAINER,
    LDP_INSERTED_CONTENT_RELATION, LDP_MEMBER_RESOURCE,
};
use samyama_ldp::{GraphStore, LdpConfig, NodeId, RdfContext, RdfFormat, RdfSerializer};
use tracing::info;
use tracing_subscriber::EnvFilter;

const PCDM_HAS_MEMBER: &str = "http://pcdm.org/models#hasMember";
const ORE_PROXY_FOR: &str = "http://www.openarchives.org/ore/terms/proxyFor";

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => LdpConfig::from_file(&path).with_context(|| format!("loading {}", path))?,
        None => LdpConfig::default(),
    };

    println!("Samyama LDP v{}", samyama_ldp::version());
    println!("==========================================");

    let mut store = GraphStore::new();
    store.namespaces_mut().add_prefix("ore", "http://www.openarchives.org/ore/terms/");
    config.apply_namespaces(store.namespaces_mut());

    let (book, cover) = build_repository(&mut store)?;
    let ids = config.identifier_converter()?;
    let context = RdfContext::new(&store, &ids, config.context);

    for id in [book, cover] {
        let triples = context.collect(id)?;
        info!("{} rendered as {} triples", ids.uri_for(&store, id)?, triples.len());
        println!();
        println!("{}", RdfSerializer::serialize(&triples, RdfFormat::Turtle)?);
    }

    Ok(())
}

/// A book whose pages are gathered by a direct container and whose
/// collection membership is gathered through proxies
fn build_repository(store: &mut GraphStore) -> anyhow::Result<(NodeId, NodeId)> {
    let root = store.root();

    let book = store.create_container(root, "book")?;
    store.set_property(book, "dcterms:title", "A Book of Hours")?;

    let pages = store.create_ldp_container(book, "pages", LDP_DIRECT_CONTAINER)?;
    store.set_property(pages, LDP_MEMBER_RESOURCE, PropertyValue::Reference(book))?;
    store.set_property(pages, LDP_HAS_MEMBER_RELATION, PropertyValue::Uri(PCDM_HAS_MEMBER.to_string()))?;
    for name in ["folio-1r", "folio-1v"] {
        let page = store.create_container(pages, name)?;
        store.set_property(page, "dcterms:title", name)?;
    }

    let (cover, content) = store.create_binary(pages, "cover.tiff")?;
    store.set_property(content, "premis:hasSize", 48_213_004i64)?;
    store.set_property(content, "ebucore:hasMimeType", "image/tiff")?;

    let collection = store.create_container(root, "collection")?;
    let proxies = store.create_ldp_container(book, "proxies", LDP_INDIRECT_CONTAINER)?;
    store.set_property(proxies, LDP_MEMBER_RESOURCE, PropertyValue::Reference(book))?;
    store.set_property(proxies, LDP_HAS_MEMBER_RELATION, PropertyValue::Uri(PCDM_HAS_MEMBER.to_string()))?;
    store.set_property(
        proxies,
        LDP_INSERTED_CONTENT_RELATION,
        PropertyValue::Uri(ORE_PROXY_FOR.to_string()),
    )?;
    let proxy = store.create_container(proxies, "collection-proxy")?;
    store.set_property(proxy, "ore:proxyFor_ref", PropertyValue::Reference(collection))?;

    Ok((book, cover))
}
