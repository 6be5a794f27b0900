//! Fragment parsing for dynamic navigation responses.
//!
//! A fragment response carries a `<title>` element and a `<cachecontent>`
//! element. Their inner HTML becomes a [`PageEntry`]. Anything else in the
//! body is ignored; a body missing either marker is a protocol violation.

pub mod links;

pub use links::{Link, extract_dynamic_links};

use pagenav_core::{Error, PageEntry};
use scraper::{Html, Selector};

/// Tag holding the page title in a fragment response.
pub const TITLE_TAG: &str = "title";

/// Tag wrapping the mountable content in a fragment response.
pub const CONTENT_TAG: &str = "cachecontent";

/// Id of the element marking the site root inside a live region.
pub const INDEX_MARKER_ID: &str = "index";

/// Parse a fragment response body into a cache entry for `url`.
///
/// The title is trimmed; the content is kept byte-for-byte as serialized by
/// the parser so it can be mounted verbatim.
///
/// # Errors
///
/// Returns `Error::MalformedResponse` if the body has no `<title>` or no
/// `<cachecontent>` element.
pub fn parse_fragment(url: &str, body: &str) -> Result<PageEntry, Error> {
    let document = Html::parse_document(body);
    let title_selector = Selector::parse(TITLE_TAG).expect("invalid selector");
    let content_selector = Selector::parse(CONTENT_TAG).expect("invalid selector");

    let title = document
        .select(&title_selector)
        .next()
        .ok_or_else(|| Error::MalformedResponse(format!("{url}: missing <{TITLE_TAG}>")))?
        .inner_html();

    let content = document
        .select(&content_selector)
        .next()
        .ok_or_else(|| Error::MalformedResponse(format!("{url}: missing <{CONTENT_TAG}>")))?
        .inner_html();

    Ok(PageEntry::new(url, title.trim(), content))
}

/// Whether `content`, mounted as the live region, shows the site root.
///
/// True when an element with id `index` is a direct child of the region.
pub fn is_index_content(content: &str) -> bool {
    let wrapped = format!("<div id=\"content\">{content}</div>");
    let fragment = Html::parse_fragment(&wrapped);
    let selector = Selector::parse("#content > #index").expect("invalid selector");
    fragment.select(&selector).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment_basic() {
        let entry = parse_fragment("/about", "<title>About</title><cachecontent>Hi</cachecontent>").unwrap();
        assert_eq!(entry, PageEntry::new("/about", "About", "Hi"));
    }

    #[test]
    fn test_parse_fragment_full_document() {
        let body = r#"
            <!DOCTYPE html>
            <html>
            <head><title> Projects </title></head>
            <body>
                <nav>ignored</nav>
                <cachecontent><h2>Projects</h2><a class="dynamiclink" href="/projects/rust">Rust</a></cachecontent>
            </body>
            </html>
        "#;

        let entry = parse_fragment("/projects", body).unwrap();
        assert_eq!(entry.title, "Projects");
        assert_eq!(entry.content, r#"<h2>Projects</h2><a class="dynamiclink" href="/projects/rust">Rust</a>"#);
    }

    #[test]
    fn test_parse_fragment_nested_markup_kept() {
        let entry = parse_fragment("/", r#"<title>Home</title><cachecontent><div id="index"><p>Welcome</p></div></cachecontent>"#)
            .unwrap();
        assert_eq!(entry.content, r#"<div id="index"><p>Welcome</p></div>"#);
    }

    #[test]
    fn test_parse_fragment_first_marker_wins() {
        let body = "<title>One</title><cachecontent>A</cachecontent><cachecontent>B</cachecontent>";
        let entry = parse_fragment("/x", body).unwrap();
        assert_eq!(entry.content, "A");
    }

    #[test]
    fn test_parse_fragment_missing_title() {
        let result = parse_fragment("/about", "<cachecontent>Hi</cachecontent>");
        assert!(matches!(result, Err(Error::MalformedResponse(msg)) if msg.contains("title")));
    }

    #[test]
    fn test_parse_fragment_missing_content() {
        let result = parse_fragment("/about", "<html><head><title>About</title></head><body>Hi</body></html>");
        assert!(matches!(result, Err(Error::MalformedResponse(msg)) if msg.contains("cachecontent")));
    }

    #[test]
    fn test_parse_fragment_empty_body() {
        assert!(matches!(parse_fragment("/about", ""), Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_is_index_content() {
        assert!(is_index_content(r#"<div id="index">Welcome</div>"#));
        assert!(!is_index_content("<p>About</p>"));
    }

    #[test]
    fn test_is_index_content_requires_direct_child() {
        assert!(!is_index_content(r#"<section><div id="index">nested</div></section>"#));
    }
}
