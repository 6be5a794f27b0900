//! In-memory cache of page fragments keyed by canonical path.
//!
//! The cache lives as long as the controller that owns it. There is no
//! eviction, no expiry and no persistence: a full reload starts empty.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A page fragment retrieved from the server.
///
/// Once cached, an entry is reused verbatim for every later navigation to
/// the same path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    /// Canonical path, also the cache key.
    pub url: String,
    /// Inner HTML of the fragment's `<title>`.
    pub title: String,
    /// Inner HTML of the fragment's content element, mounted as the live region.
    pub content: String,
}

impl PageEntry {
    pub fn new(url: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { url: url.into(), title: title.into(), content: content.into() }
    }
}

/// Mapping of path to [`PageEntry`].
#[derive(Debug, Default, Clone)]
pub struct PageCache {
    entries: HashMap<String, PageEntry>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fragment for `url` has been cached.
    pub fn has(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Look up the cached fragment for `url`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if nothing is cached for `url`. Callers
    /// check [`PageCache::has`] first or treat the error as a miss.
    pub fn get(&self, url: &str) -> Result<&PageEntry, Error> {
        self.entries.get(url).ok_or_else(|| Error::NotFound(url.to_string()))
    }

    /// Insert an entry under its own `url`, replacing any previous one.
    ///
    /// Returns `true` if the cache changed.
    pub fn put(&mut self, entry: PageEntry) -> bool {
        if self.entries.get(&entry.url) == Some(&entry) {
            return false;
        }

        tracing::info!(url = %entry.url, title = %entry.title, "writing cache entry");
        self.entries.insert(entry.url.clone(), entry);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached paths in sorted order.
    pub fn urls(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        urls.sort_unstable();
        urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn about() -> PageEntry {
        PageEntry::new("/about", "About", "Hi")
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = PageCache::new();
        assert!(cache.is_empty());
        assert!(!cache.has("/about"));
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let cache = PageCache::new();
        let result = cache.get("/about");
        assert!(matches!(result, Err(Error::NotFound(url)) if url == "/about"));
    }

    #[test]
    fn test_put_then_get() {
        let mut cache = PageCache::new();
        assert!(cache.put(about()));

        assert!(cache.has("/about"));
        let entry = cache.get("/about").unwrap();
        assert_eq!(entry.title, "About");
        assert_eq!(entry.content, "Hi");
    }

    #[test]
    fn test_put_identical_is_idempotent() {
        let mut cache = PageCache::new();
        assert!(cache.put(about()));
        assert!(!cache.put(about()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_overwrites() {
        let mut cache = PageCache::new();
        cache.put(about());
        assert!(cache.put(PageEntry::new("/about", "About us", "Hello")));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("/about").unwrap().title, "About us");
    }

    #[test]
    fn test_urls_sorted() {
        let mut cache = PageCache::new();
        cache.put(PageEntry::new("/projects", "Projects", ""));
        cache.put(about());
        cache.put(PageEntry::new("/", "Home", ""));

        assert_eq!(cache.urls(), vec!["/", "/about", "/projects"]);
    }
}
