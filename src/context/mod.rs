//! Per-render context — the request view and template variable bindings.

use std::collections::HashMap;

use crate::markup::SafeHtml;

/// The slice of the host framework's request that placeholder rendering
/// reads: the visitor's language and whether this is a staff/editor session.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    language: String,
    staff: bool,
}

impl RequestInfo {
    /// Create a request view for a visitor in the given language.
    pub fn new(language: impl Into<String>) -> Self {
        return Self {
            language: language.into(),
            staff: false,
        };
    }

    /// Mark this request as an authenticated staff/editor session.
    #[must_use]
    pub fn staff(mut self, staff: bool) -> Self {
        self.staff = staff;
        self
    }

    /// The visitor's language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// `true` for sessions permitted to bypass caching and edit content live.
    pub fn is_staff(&self) -> bool {
        self.staff
    }
}

/// Template variables visible to, and written by, the placeholder tags.
#[derive(Default, Debug, Clone)]
pub struct Bindings {
    map: HashMap<String, SafeHtml>,
}

impl Bindings {
    /// Create a new empty bindings table.
    pub fn new() -> Self {
        return Self {
            map: HashMap::new(),
        };
    }

    /// Bind a value to a variable name.
    pub fn insert(&mut self, name: impl Into<String>, value: SafeHtml) {
        self.map.insert(name.into(), value);
    }

    /// Get the current value of a variable.
    pub fn get(&self, name: &str) -> Option<&SafeHtml> {
        self.map.get(name)
    }

    /// Remove a variable, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<SafeHtml> {
        self.map.remove(name)
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// `true` if no variables are bound.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Per-render context: an optional request plus variable bindings.
///
/// A context without a request models rendering outside request handling
/// (e.g. from a management task); the tags treat that case per their own
/// contracts.
pub struct RenderContext {
    request: Option<RequestInfo>,
    bindings: Bindings,
}

impl RenderContext {
    /// Create a context for a request-driven render.
    pub fn for_request(request: RequestInfo) -> Self {
        return Self {
            request: Some(request),
            bindings: Bindings::new(),
        };
    }

    /// Create a context with no request attached.
    pub fn detached() -> Self {
        return Self {
            request: None,
            bindings: Bindings::new(),
        };
    }

    pub fn request(&self) -> Option<&RequestInfo> {
        self.request.as_ref()
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_insert_get_remove() {
        let mut bindings = Bindings::new();
        bindings.insert("header", SafeHtml::from("<h1>Hi</h1>"));
        assert_eq!(bindings.get("header").unwrap().as_str(), "<h1>Hi</h1>");
        assert_eq!(bindings.len(), 1);

        let removed = bindings.remove("header").unwrap();
        assert_eq!(removed.as_str(), "<h1>Hi</h1>");
        assert!(bindings.is_empty());
    }

    #[test]
    fn detached_context_has_no_request() {
        let ctx = RenderContext::detached();
        assert!(ctx.request().is_none());
    }

    #[test]
    fn request_context_exposes_language_and_staff() {
        let ctx = RenderContext::for_request(RequestInfo::new("fr").staff(true));
        let request = ctx.request().unwrap();
        assert_eq!(request.language(), "fr");
        assert!(request.is_staff());
    }
}
