//! Scanning markup for links the controller intercepts.

use scraper::{Html, Selector};

/// Class marking a link as handled by dynamic navigation.
pub const DYNAMIC_LINK_CLASS: &str = "dynamiclink";

/// An interceptable link with its text and raw href.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Link {
    /// Link text content
    pub text: String,
    /// The `href` attribute as written, resolved only when clicked
    pub href: String,
}

/// Extract every `.dynamiclink` element carrying an `href`, in document order.
///
/// Duplicates are kept: each element gets its own click handler.
pub fn extract_dynamic_links(html: &str) -> Vec<Link> {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse(&format!(".{DYNAMIC_LINK_CLASS}[href]")).expect("invalid selector");

    fragment
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?.to_string();
            let text = element.text().collect::<Vec<_>>().join(" ").trim().to_string();
            let text = if text.is_empty() { "[link]".to_string() } else { text };
            Some(Link { text, href })
        })
        .collect()
}
