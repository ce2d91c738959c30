//! # appcms-placeholders
//!
//! Named content-placeholder regions for CMS templates: editors manage a
//! region's rich content through the host framework's admin, templates render
//! it by name, anonymous visitors are served from a short-lived fragment
//! cache, and multilingual sites fall back to the site default language when
//! a translation is missing.
//!
//! The host framework's placeholder storage and shared cache service are
//! consumed as injected capabilities ([`PlaceholderStore`], [`FragmentCache`]);
//! in-memory implementations ship with the crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use appcms_placeholders::cache::MokaCache;
//! use appcms_placeholders::config::SiteConfig;
//! use appcms_placeholders::context::{RenderContext, RequestInfo};
//! use appcms_placeholders::store::MemoryStore;
//! use appcms_placeholders::tags::PlaceholderTags;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     store.set_content("Header", "en", "<h1>Welcome</h1>").await;
//!
//!     let tags = PlaceholderTags::new(
//!         store,
//!         Arc::new(MokaCache::default()),
//!         SiteConfig::default(),
//!     );
//!
//!     let ctx = RenderContext::for_request(RequestInfo::new("en"));
//!     let fragment = tags.placeholder(&ctx, "Header", None).await?;
//!     assert_eq!(fragment.as_str(), "<h1>Welcome</h1>");
//!     Ok(())
//! }
//! ```

pub mod admin;
pub mod cache;
pub mod config;
pub mod context;
pub mod markup;
pub mod store;
pub mod tags;

// ── Convenience re-exports ────────────────────────────────────────────────────
pub use cache::{FragmentCache, MokaCache};
pub use config::SiteConfig;
pub use context::{RenderContext, RequestInfo};
pub use markup::SafeHtml;
pub use store::{MemoryStore, Placeholder, PlaceholderStore, StoreError};
pub use tags::{PlaceholderTags, TagError};
