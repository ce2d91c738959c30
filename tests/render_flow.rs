//! End-to-end render flows against the bundled in-memory capabilities.

use std::sync::Arc;
use std::time::Duration;

use appcms_placeholders::cache::MokaCache;
use appcms_placeholders::config::SiteConfig;
use appcms_placeholders::context::{RenderContext, RequestInfo};
use appcms_placeholders::store::MemoryStore;
use appcms_placeholders::tags::{NameArg, PlaceholderTags, parse_get_placeholder};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn french_visitor_falls_back_to_english_header() {
    init_tracing();

    let store = Arc::new(MemoryStore::new());
    store.set_content("Header", "en", "<p>Hi</p>").await;

    let config = SiteConfig {
        default_language: "en".to_owned(),
        ..SiteConfig::default()
    };
    let tags = PlaceholderTags::new(store, Arc::new(MokaCache::default()), config);

    let mut ctx = RenderContext::for_request(RequestInfo::new("fr"));
    assert_eq!(ctx.request().unwrap().language(), "fr");

    tags.get_placeholder(&mut ctx, &NameArg::Literal("Header".to_owned()), "header")
        .await
        .unwrap();

    assert_eq!(ctx.bindings().get("header").unwrap().as_str(), "<p>Hi</p>");
    assert_eq!(ctx.request().unwrap().language(), "fr");
}

#[tokio::test]
async fn parsed_tag_body_drives_the_variable_binding() {
    init_tracing();

    let store = Arc::new(MemoryStore::new());
    store.set_content("Footer", "en", "<footer/>").await;

    let tags = PlaceholderTags::new(
        store,
        Arc::new(MokaCache::default()),
        SiteConfig::default(),
    );

    let call = parse_get_placeholder(r#"get_placeholder "Footer" as footer"#).unwrap();
    let mut ctx = RenderContext::for_request(RequestInfo::new("en"));
    tags.get_placeholder(&mut ctx, &call.name, &call.varname)
        .await
        .unwrap();

    assert_eq!(ctx.bindings().get("footer").unwrap().as_str(), "<footer/>");
}

#[tokio::test]
async fn cached_fragment_expires_and_rerenders() {
    init_tracing();

    let store = Arc::new(MemoryStore::new());
    store.set_content("Banner", "en", "first").await;

    let config = SiteConfig {
        cache_ttl_secs: 1,
        ..SiteConfig::default()
    };
    let tags = PlaceholderTags::new(store.clone(), Arc::new(MokaCache::default()), config);

    let ctx = RenderContext::for_request(RequestInfo::new("en"));
    let out = tags.placeholder(&ctx, "Banner", None).await.unwrap();
    assert_eq!(out.as_str(), "first");

    // Within the TTL the cached copy masks the update.
    store.set_content("Banner", "en", "second").await;
    let out = tags.placeholder(&ctx, "Banner", None).await.unwrap();
    assert_eq!(out.as_str(), "first");

    tokio::time::sleep(Duration::from_millis(1300)).await;
    let out = tags.placeholder(&ctx, "Banner", None).await.unwrap();
    assert_eq!(out.as_str(), "second");
}
