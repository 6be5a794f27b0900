//! Same-origin URL resolution for consistent cache keys.

use url::Url;

/// Error type for link resolution failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("cross-origin link: {0}")]
    CrossOrigin(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Resolve a link target to the canonical path used as cache key.
///
/// Resolution steps:
/// 1. Trim leading/trailing whitespace
/// 2. Join against `origin` (relative and absolute hrefs both work)
/// 3. Reject non-http(s) schemes and other origins
/// 4. Remove fragment (#...)
/// 5. Return path plus query string, query kept intact
pub fn resolve_path(origin: &Url, href: &str) -> Result<String, UrlError> {
    let trimmed = href.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut joined = origin.join(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match joined.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if joined.origin() != origin.origin() {
        return Err(UrlError::CrossOrigin(joined.to_string()));
    }

    joined.set_fragment(None);

    Ok(match joined.query() {
        Some(query) => format!("{}?{}", joined.path(), query),
        None => joined.path().to_string(),
    })
}

/// Absolute URL the fragment request for `path` is sent to.
pub fn fragment_url(origin: &Url, path: &str) -> Result<Url, UrlError> {
    let resolved = resolve_path(origin, path)?;
    origin.join(&resolved).map_err(|e| UrlError::InvalidUrl(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    #[test]
    fn test_resolve_absolute_path() {
        assert_eq!(resolve_path(&origin(), "/about").unwrap(), "/about");
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = Url::parse("https://example.com/projects/").unwrap();
        assert_eq!(resolve_path(&base, "rust").unwrap(), "/projects/rust");
    }

    #[test]
    fn test_resolve_same_origin_absolute_url() {
        assert_eq!(resolve_path(&origin(), "https://EXAMPLE.com/about").unwrap(), "/about");
    }

    #[test]
    fn test_resolve_remove_fragment() {
        assert_eq!(resolve_path(&origin(), "/about#team").unwrap(), "/about");
    }

    #[test]
    fn test_resolve_preserve_query() {
        assert_eq!(resolve_path(&origin(), "/search?a=1&b=2").unwrap(), "/search?a=1&b=2");
    }

    #[test]
    fn test_resolve_trim_whitespace() {
        assert_eq!(resolve_path(&origin(), "  /about  ").unwrap(), "/about");
    }

    #[test]
    fn test_resolve_cross_origin() {
        let result = resolve_path(&origin(), "https://other.org/about");
        assert!(matches!(result, Err(UrlError::CrossOrigin(_))));
    }

    #[test]
    fn test_resolve_other_scheme_same_host() {
        let result = resolve_path(&origin(), "http://example.com/about");
        assert!(matches!(result, Err(UrlError::CrossOrigin(_))));
    }

    #[test]
    fn test_resolve_unsupported_scheme() {
        let result = resolve_path(&origin(), "mailto:someone@example.com");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(s)) if s == "mailto"));
    }

    #[test]
    fn test_resolve_empty() {
        assert!(matches!(resolve_path(&origin(), ""), Err(UrlError::Empty)));
        assert!(matches!(resolve_path(&origin(), "   "), Err(UrlError::Empty)));
    }

    #[test]
    fn test_fragment_url() {
        let url = fragment_url(&origin(), "/about?x=1").unwrap();
        assert_eq!(url.as_str(), "https://example.com/about?x=1");
    }
}
