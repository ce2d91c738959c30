//! Placeholder persistence — the capability contract the host CMS provides.
//!
//! [`PlaceholderStore`] abstracts the framework's placeholder table and its
//! render engine so the tag logic is testable without a real framework
//! instance. [`MemoryStore`] is the bundled in-process implementation.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::context::RenderContext;

/// Errors surfaced by a placeholder store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage rejected or failed the operation.
    #[error("placeholder storage failure: {0}")]
    Backend(String),
}

/// Boxed future returned by [`PlaceholderStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// A named persistent handle to a framework-managed rich-content region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Unique human-readable name. At most one record exists per name.
    pub name: String,
    /// Identifier binding this record to a named region within a render.
    pub slot: String,
}

/// One row of the placeholder content listing: a region translated into one
/// language.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ContentEntry {
    /// Name of the placeholder record the content belongs to.
    pub placeholder: String,
    /// Language code of this translation.
    pub language: String,
}

/// The persistence capability consumed by the tag engine.
///
/// # Contract
///
/// - [`get_or_create`](Self::get_or_create) is atomic insert-if-absent:
///   concurrent first requests for the same never-before-seen name observe a
///   single record.
/// - [`render`](Self::render) returns the empty string when the region has no
///   content for the requested language; that is not an error.
pub trait PlaceholderStore: Send + Sync {
    /// Returns the record for `name`, creating it if absent.
    fn get_or_create<'a>(&'a self, name: &'a str) -> StoreFuture<'a, Placeholder>;

    /// Renders the region's content for an explicit language and optional
    /// width hint, against the given template context.
    fn render<'a>(
        &'a self,
        placeholder: &'a Placeholder,
        ctx: &'a RenderContext,
        language: &'a str,
        width: Option<u32>,
    ) -> StoreFuture<'a, String>;

    /// Lists one entry per `(placeholder, language)` content row, for the
    /// admin surface.
    fn entries(&self) -> StoreFuture<'_, Vec<ContentEntry>>;
}

#[derive(Default)]
struct Region {
    slot: String,
    /// language code → stored fragment
    content: HashMap<String, String>,
}

/// In-process [`PlaceholderStore`]: a map of regions behind an async
/// read-write lock.
///
/// Content is seeded with [`set_content`](Self::set_content), standing in for
/// the framework's admin editing path. Rendering returns the stored fragment
/// for the requested language verbatim; the width hint is a concern of richer
/// backends and is ignored here.
#[derive(Default)]
pub struct MemoryStore {
    regions: RwLock<HashMap<String, Region>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds content for a `(placeholder, language)` pair, creating the
    /// record if needed.
    pub async fn set_content(&self, name: &str, language: &str, html: &str) {
        let mut regions = self.regions.write().await;
        let region = regions.entry(name.to_owned()).or_insert_with(|| Region {
            slot: name.to_owned(),
            ..Region::default()
        });
        region.content.insert(language.to_owned(), html.to_owned());
    }

    /// Number of placeholder records currently stored.
    pub async fn len(&self) -> usize {
        self.regions.read().await.len()
    }

    /// `true` if no placeholder records exist.
    pub async fn is_empty(&self) -> bool {
        self.regions.read().await.is_empty()
    }
}

impl PlaceholderStore for MemoryStore {
    fn get_or_create<'a>(&'a self, name: &'a str) -> StoreFuture<'a, Placeholder> {
        Box::pin(async move {
            // Insert-if-absent under a single write lock: concurrent first
            // access cannot create duplicate records.
            let mut regions = self.regions.write().await;
            let region = regions.entry(name.to_owned()).or_insert_with(|| Region {
                slot: name.to_owned(),
                ..Region::default()
            });
            Ok(Placeholder {
                name: name.to_owned(),
                slot: region.slot.clone(),
            })
        })
    }

    fn render<'a>(
        &'a self,
        placeholder: &'a Placeholder,
        _ctx: &'a RenderContext,
        language: &'a str,
        _width: Option<u32>,
    ) -> StoreFuture<'a, String> {
        Box::pin(async move {
            let regions = self.regions.read().await;
            Ok(regions
                .get(&placeholder.name)
                .and_then(|region| region.content.get(language))
                .cloned()
                .unwrap_or_default())
        })
    }

    fn entries(&self) -> StoreFuture<'_, Vec<ContentEntry>> {
        Box::pin(async move {
            let regions = self.regions.read().await;
            let mut entries: Vec<ContentEntry> = regions
                .iter()
                .flat_map(|(name, region)| {
                    region.content.keys().map(move |language| ContentEntry {
                        placeholder: name.clone(),
                        language: language.clone(),
                    })
                })
                .collect();
            entries.sort();
            Ok(entries)
        })
    }
}
