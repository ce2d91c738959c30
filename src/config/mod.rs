//! Site configuration consumed by the tag engine.

use std::time::Duration;

use serde::Deserialize;

/// Fragment cache lifetime applied when the host does not override it.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Site-level settings the placeholder tags read.
///
/// Hosts deserialize this from their own configuration source; all fields
/// have defaults so a partial document is enough.
///
/// # Examples
///
/// ```
/// use appcms_placeholders::config::SiteConfig;
///
/// let config = SiteConfig::default();
/// assert_eq!(config.default_language, "en");
/// assert_eq!(config.cache_ttl().as_secs(), 60);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// The site's configured default language tag, e.g. `"en-us"`.
    pub default_language: String,

    /// Cached-fragment lifetime for anonymous visitors, in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_owned(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl SiteConfig {
    /// Returns the two-character prefix of the default language tag.
    ///
    /// Fallback rendering uses the bare language code even when the site is
    /// configured with a regional tag like `en-us`.
    pub fn default_language_short(&self) -> &str {
        let end = self
            .default_language
            .char_indices()
            .nth(2)
            .map(|(i, _)| i)
            .unwrap_or(self.default_language.len());
        &self.default_language[..end]
    }

    /// Returns the cache TTL as a [`Duration`].
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.default_language, "en");
        assert_eq!(config.cache_ttl_secs, DEFAULT_CACHE_TTL_SECS);
    }

    #[test]
    fn short_language_truncates_regional_tags() {
        let config = SiteConfig {
            default_language: "en-us".to_owned(),
            ..SiteConfig::default()
        };
        assert_eq!(config.default_language_short(), "en");
    }

    #[test]
    fn short_language_keeps_short_tags_whole() {
        let config = SiteConfig {
            default_language: "e".to_owned(),
            ..SiteConfig::default()
        };
        assert_eq!(config.default_language_short(), "e");
    }

    #[test]
    fn deserializes_partial_documents() {
        let config: SiteConfig = serde_json::from_str(r#"{"default_language": "de-at"}"#).unwrap();
        assert_eq!(config.default_language, "de-at");
        assert_eq!(config.default_language_short(), "de");
        assert_eq!(config.cache_ttl_secs, 60);
    }
}
