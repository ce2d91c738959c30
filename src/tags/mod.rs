//! The template tag surface: inline placeholder rendering and
//! render-to-variable with language fallback.
//!
//! [`PlaceholderTags`] binds the two tags to the injected store and cache
//! capabilities:
//!
//! - `{% appcms_placeholder "<name>" [<width>] %}` —
//!   [`PlaceholderTags::placeholder`]
//! - `{% get_placeholder <name-or-var> [extra...] [<width>] as <varname> %}`
//!   `... {% endplaceholder %}` — [`PlaceholderTags::get_placeholder`]

pub mod args;

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::cache::{FragmentCache, cache_key};
use crate::config::SiteConfig;
use crate::context::RenderContext;
use crate::markup::SafeHtml;
use crate::store::{PlaceholderStore, StoreError};

pub use args::{
    GetPlaceholderTag, NameArg, PlaceholderTag, TagSyntaxError, parse_get_placeholder,
    parse_placeholder,
};

/// Errors surfaced by the tag operations.
///
/// The inline tag degrades to empty output on its soft-failure paths (absent
/// request, empty name); everything here is a real failure.
#[derive(Debug, Error)]
pub enum TagError {
    /// The render-to-variable tag was invoked from a context with no request
    /// attached.
    #[error("no request in render context")]
    NoRequest,

    /// The name argument referenced a template variable with no value.
    #[error("placeholder name `{0}` could not be resolved")]
    UnresolvedName(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The two placeholder template tags, bound to their capabilities.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use appcms_placeholders::cache::MokaCache;
/// use appcms_placeholders::config::SiteConfig;
/// use appcms_placeholders::context::{RenderContext, RequestInfo};
/// use appcms_placeholders::store::MemoryStore;
/// use appcms_placeholders::tags::PlaceholderTags;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = Arc::new(MemoryStore::new());
/// store.set_content("Header", "en", "<h1>Welcome</h1>").await;
///
/// let tags = PlaceholderTags::new(store, Arc::new(MokaCache::default()), SiteConfig::default());
/// let ctx = RenderContext::for_request(RequestInfo::new("en"));
///
/// let fragment = tags.placeholder(&ctx, "Header", None).await.unwrap();
/// assert_eq!(fragment.as_str(), "<h1>Welcome</h1>");
/// # });
/// ```
pub struct PlaceholderTags {
    store: Arc<dyn PlaceholderStore>,
    cache: Arc<dyn FragmentCache>,
    config: SiteConfig,
}

impl PlaceholderTags {
    pub fn new(
        store: Arc<dyn PlaceholderStore>,
        cache: Arc<dyn FragmentCache>,
        config: SiteConfig,
    ) -> Self {
        Self {
            store,
            cache,
            config,
        }
    }

    /// Renders `{% appcms_placeholder "<name>" [<width>] %}`.
    ///
    /// Staff sessions always render live so editors see current content;
    /// other visitors are served from the fragment cache for the configured
    /// TTL, keyed on name and visitor language. An absent request or an empty
    /// name yields empty output.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the persistence capability untouched.
    pub async fn placeholder(
        &self,
        ctx: &RenderContext,
        name: &str,
        width: Option<u32>,
    ) -> Result<SafeHtml, TagError> {
        let Some(request) = ctx.request() else {
            return Ok(SafeHtml::empty());
        };
        if name.is_empty() {
            return Ok(SafeHtml::empty());
        }

        if request.is_staff() {
            debug!(name, "staff session — rendering live");
            return self
                .render_region(ctx, name, request.language(), width)
                .await;
        }

        let key = cache_key(name, request.language());
        if let Some(cached) = self.cache.get(&key).await {
            debug!(name, key = %key, "fragment cache hit");
            return Ok(SafeHtml::from(cached));
        }

        debug!(name, key = %key, "fragment cache miss — rendering");
        let fragment = self
            .render_region(ctx, name, request.language(), width)
            .await?;
        self.cache
            .set(&key, fragment.as_str().to_owned(), self.config.cache_ttl())
            .await;
        Ok(fragment)
    }

    /// Renders `{% get_placeholder ... as <varname> %}`: resolves the
    /// placeholder in the visitor's language, falls back to the site default
    /// language when that yields nothing, and binds the result (marked safe)
    /// to `varname`. The tag itself emits no output, and the request is
    /// never written to.
    ///
    /// # Errors
    ///
    /// - [`TagError::NoRequest`] when the context has no request attached.
    /// - [`TagError::UnresolvedName`] when the name argument is a variable
    ///   with no current binding.
    /// - [`TagError::Store`] for persistence failures.
    pub async fn get_placeholder(
        &self,
        ctx: &mut RenderContext,
        name: &NameArg,
        varname: &str,
    ) -> Result<(), TagError> {
        let language = ctx
            .request()
            .ok_or(TagError::NoRequest)?
            .language()
            .to_owned();
        let name = name
            .resolve(ctx)
            .ok_or_else(|| TagError::UnresolvedName(name.raw().to_owned()))?;

        let mut content = self.render_region(ctx, &name, &language, None).await?;
        if content.is_empty() {
            let fallback = self.config.default_language_short().to_owned();
            debug!(
                name = %name,
                from = %language,
                to = %fallback,
                "empty render — retrying in site default language"
            );
            content = self.render_region(ctx, &name, &fallback, None).await?;
        }

        ctx.bindings_mut().insert(varname, content);
        Ok(())
    }

    async fn render_region(
        &self,
        ctx: &RenderContext,
        name: &str,
        language: &str,
        width: Option<u32>,
    ) -> Result<SafeHtml, TagError> {
        let mut placeholder = self.store.get_or_create(name).await?;
        // The slot identifier always tracks the tag-supplied name.
        placeholder.slot = name.to_owned();
        let fragment = self
            .store
            .render(&placeholder, ctx, language, width)
            .await?;
        Ok(SafeHtml::from(fragment))
    }
}
