//! Structured upstream request descriptors.

use std::collections::BTreeMap;

/// A GET against the upstream API: an endpoint path plus query parameters.
///
/// Parameters live in a sorted map, so the resolved URL (and therefore the
/// cache key) does not depend on the order they were added in.
///
/// ```rust
/// # use animanga::upstream::UpstreamRequest;
/// let a = UpstreamRequest::new("/top/anime").param("limit", 10).param("filter", "airing");
/// let b = UpstreamRequest::new("/top/anime").param("filter", "airing").param("limit", 10);
/// assert_eq!(a.resolve("https://api.jikan.moe/v4"), b.resolve("https://api.jikan.moe/v4"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpstreamRequest {
    path: String,
    params: BTreeMap<String, String>,
}

impl UpstreamRequest {
    /// Create a request for an endpoint path (e.g. `/top/anime`).
    pub fn new(path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        Self {
            path,
            params: BTreeMap::new(),
        }
    }

    /// Add (or replace) a query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// The endpoint path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Value of a query parameter, if set.
    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// URL-encoded query string with keys in sorted order. Empty when there
    /// are no parameters.
    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.params)
            .finish()
    }

    /// Full URL against `base_url`. This string is the cache identity.
    pub fn resolve(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        let query = self.query_string();
        if query.is_empty() {
            format!("{base}{}", self.path)
        } else {
            format!("{base}{}?{query}", self.path)
        }
    }
}
