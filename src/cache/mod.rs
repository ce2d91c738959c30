//! Rendered-fragment caching — key derivation and backends.
//!
//! Anonymous visitors are served from a short-lived cache keyed on
//! placeholder name and language. [`FragmentCache`] abstracts the shared
//! cache service the host provides; [`MokaCache`] is the bundled in-memory
//! implementation.

use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use moka::Expiry;
use moka::future::Cache;

/// Derives the cache key for a rendered fragment.
///
/// The key shape is `placeholder-<name>-<language>` with control characters
/// stripped, so names differing only in non-printable bytes share one key.
///
/// # Examples
///
/// ```
/// use appcms_placeholders::cache::cache_key;
///
/// assert_eq!(cache_key("Header", "fr"), "placeholder-Header-fr");
/// assert_eq!(cache_key("A\u{0}B", "en"), cache_key("AB", "en"));
/// ```
pub fn cache_key(name: &str, language: &str) -> String {
    format!("placeholder-{name}-{language}")
        .chars()
        .filter(|c| !c.is_control())
        .collect()
}

/// Boxed future returned by [`FragmentCache`] methods.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The shared-cache capability consumed by the tag engine.
///
/// The surface is infallible: a backend that loses an entry or fails a write
/// behaves as a cache miss.
pub trait FragmentCache: Send + Sync {
    /// Returns the cached fragment for `key`, if present and not expired.
    fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<String>>;

    /// Stores `value` under `key` for `ttl`.
    fn set<'a>(&'a self, key: &'a str, value: String, ttl: Duration) -> CacheFuture<'a, ()>;
}

// The cached fragment plus the lifetime it was written with, read back by
// the expiry policy below.
#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory [`FragmentCache`] backed by moka's future-aware cache, with
/// per-entry time-to-live.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use appcms_placeholders::cache::{FragmentCache, MokaCache};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let cache = MokaCache::default();
/// cache.set("key", "fragment".to_owned(), Duration::from_secs(60)).await;
/// assert_eq!(cache.get("key").await.as_deref(), Some("fragment"));
/// # });
/// ```
pub struct MokaCache {
    inner: Cache<String, Entry>,
}

impl MokaCache {
    /// Creates a cache holding up to `capacity` fragments.
    pub fn new(capacity: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(capacity)
            .expire_after(PerEntryTtl)
            .build();
        Self { inner }
    }
}

impl Default for MokaCache {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl FragmentCache for MokaCache {
    fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<String>> {
        Box::pin(async move { self.inner.get(key).await.map(|entry| entry.value) })
    }

    fn set<'a>(&'a self, key: &'a str, value: String, ttl: Duration) -> CacheFuture<'a, ()> {
        Box::pin(async move {
            self.inner.insert(key.to_owned(), Entry { value, ttl }).await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_strips_control_characters() {
        assert_eq!(cache_key("A\u{0}B", "en"), "placeholder-AB-en");
        assert_eq!(cache_key("A\u{1}B", "en"), cache_key("A\u{0}B", "en"));
        assert_eq!(cache_key("A\u{1}B", "en"), cache_key("AB", "en"));
    }

    #[test]
    fn key_includes_name_and_language() {
        assert_eq!(cache_key("Header", "fr"), "placeholder-Header-fr");
        assert_ne!(cache_key("Header", "fr"), cache_key("Header", "en"));
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let cache = MokaCache::default();
        cache
            .set("placeholder-Header-en", "<p>Hi</p>".to_owned(), Duration::from_secs(60))
            .await;
        assert_eq!(
            cache.get("placeholder-Header-en").await.as_deref(),
            Some("<p>Hi</p>")
        );
        assert_eq!(cache.get("placeholder-Footer-en").await, None);
    }

    #[tokio::test]
    async fn entries_expire_after_their_ttl() {
        let cache = MokaCache::default();
        cache
            .set("short-lived", "x".to_owned(), Duration::from_millis(20))
            .await;
        assert!(cache.get("short-lived").await.is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(cache.get("short-lived").await, None);
    }
}
