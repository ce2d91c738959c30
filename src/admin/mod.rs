//! Admin binding — scopes the placeholder content listing to the admin
//! session's language.
//!
//! The host framework owns the admin UI and model registration; this module
//! supplies the listing policy it plugs in, so editors working in one
//! language are not shown every translation of every region.

use crate::context::RequestInfo;
use crate::store::ContentEntry;

/// Admin-surface policy for placeholder content.
#[derive(Debug, Default)]
pub struct PlaceholderAdmin;

impl PlaceholderAdmin {
    pub fn new() -> Self {
        Self
    }

    /// Filters the content listing to entries in the admin session's
    /// language.
    pub fn visible_entries(
        &self,
        request: &RequestInfo,
        entries: Vec<ContentEntry>,
    ) -> Vec<ContentEntry> {
        entries
            .into_iter()
            .filter(|entry| entry.language == request.language())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(placeholder: &str, language: &str) -> ContentEntry {
        ContentEntry {
            placeholder: placeholder.to_owned(),
            language: language.to_owned(),
        }
    }

    #[test]
    fn listing_is_scoped_to_the_session_language() {
        let admin = PlaceholderAdmin::new();
        let request = RequestInfo::new("fr").staff(true);
        let entries = vec![
            entry("Header", "en"),
            entry("Header", "fr"),
            entry("Footer", "de"),
        ];

        let visible = admin.visible_entries(&request, entries);
        assert_eq!(visible, vec![entry("Header", "fr")]);
    }

    #[test]
    fn empty_listing_stays_empty() {
        let admin = PlaceholderAdmin::new();
        let request = RequestInfo::new("en");
        assert!(admin.visible_entries(&request, Vec::new()).is_empty());
    }
}
