//! In-memory [`Document`] used by the headless driver and tests.

use pagenav_client::{Link, extract_dynamic_links, is_index_content};

use super::{Document, HEADLINE_ID, LIVE_REGION_ID, LayoutState, RETIRED_REGION_ID, SHRINKABLE_CLASS};

/// A page shell with a headline, static markup, shrinkable elements and one
/// swappable content region.
#[derive(Debug, Clone, Default)]
pub struct VirtualDocument {
    headline: String,
    shell: String,
    shrinkable: usize,
    live: Option<String>,
    retired: Option<String>,
    layout: Option<LayoutState>,
    animated: bool,
    errors: Vec<String>,
}

impl VirtualDocument {
    /// A document as the server renders it on first load.
    pub fn new(headline: impl Into<String>, content: impl Into<String>) -> Self {
        Self { headline: headline.into(), live: Some(content.into()), ..Default::default() }
    }

    /// Static markup outside the live region, such as the site navigation.
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Number of `.makesmall` elements in the shell.
    pub fn with_shrinkable(mut self, count: usize) -> Self {
        self.shrinkable = count;
        self
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    /// Layout last applied, if any.
    pub fn layout(&self) -> Option<LayoutState> {
        self.layout
    }

    /// Messages passed to [`Document::show_error`], oldest first.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Class list each `.makesmall` element currently carries.
    pub fn shrinkable_classes(&self) -> Vec<&'static str> {
        let mut classes = vec![SHRINKABLE_CLASS];
        if self.layout == Some(LayoutState::Subpage) {
            classes.push("small");
        }
        if self.animated {
            classes.push("ani");
        }
        classes
    }

    /// Serialize the whole document.
    pub fn render(&self) -> String {
        let mut html = String::from("<!DOCTYPE html><html><body>");
        html.push_str(&format!("<h1 id=\"{HEADLINE_ID}\">{}</h1>", self.headline));

        let class = self.shrinkable_classes().join(" ");
        for _ in 0..self.shrinkable {
            html.push_str(&format!("<header class=\"{class}\"></header>"));
        }

        html.push_str(&self.shell);

        if let Some(retired) = &self.retired {
            html.push_str(&format!("<div id=\"{RETIRED_REGION_ID}\" class=\"content\">{retired}</div>"));
        }
        if let Some(live) = &self.live {
            html.push_str(&format!("<div id=\"{LIVE_REGION_ID}\" class=\"content\">{live}</div>"));
        }

        html.push_str("</body></html>");
        html
    }
}

impl Document for VirtualDocument {
    fn set_headline(&mut self, title: &str) {
        self.headline = title.to_string();
    }

    fn retire_live_region(&mut self) {
        self.retired = self.live.take();
    }

    fn mount_live_region(&mut self, content: &str) {
        self.live = Some(content.to_string());
    }

    fn destroy_retired_region(&mut self) {
        self.retired = None;
    }

    fn live_region_html(&self) -> String {
        self.live.clone().unwrap_or_default()
    }

    fn activate(&mut self) -> Vec<Link> {
        let mut links = extract_dynamic_links(&self.shell);
        if let Some(live) = &self.live {
            links.extend(extract_dynamic_links(live));
        }
        links
    }

    fn is_index(&self) -> bool {
        self.live.as_deref().is_some_and(is_index_content)
    }

    fn apply_layout(&mut self, layout: LayoutState, animate: bool) {
        self.layout = Some(layout);
        self.animated = animate;
    }

    fn show_error(&mut self, message: &str) {
        tracing::error!("[ERROR]: {message}");
        self.errors.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn count(html: &str, selector: &str) -> usize {
        let document = Html::parse_document(html);
        let selector = Selector::parse(selector).unwrap();
        document.select(&selector).count()
    }

    #[test]
    fn test_new_document_has_one_live_region() {
        let doc = VirtualDocument::new("Home", "<p>Welcome</p>");
        let html = doc.render();

        assert_eq!(count(&html, "#content"), 1);
        assert_eq!(count(&html, "#content-old"), 0);
        assert_eq!(doc.live_region_html(), "<p>Welcome</p>");
    }

    #[test]
    fn test_swap_leaves_one_live_region() {
        let mut doc = VirtualDocument::new("Home", "<p>Welcome</p>");

        doc.retire_live_region();
        doc.mount_live_region("<p>About</p>");
        assert_eq!(count(&doc.render(), "#content-old"), 1);

        doc.destroy_retired_region();
        let html = doc.render();
        assert_eq!(count(&html, "#content"), 1);
        assert_eq!(count(&html, "#content-old"), 0);
        assert_eq!(doc.live_region_html(), "<p>About</p>");
    }

    #[test]
    fn test_retire_drops_stale_retired_region() {
        let mut doc = VirtualDocument::new("Home", "one");
        doc.retire_live_region();
        doc.mount_live_region("two");
        doc.retire_live_region();
        doc.mount_live_region("three");

        assert_eq!(count(&doc.render(), "#content-old"), 1);
        assert!(doc.render().contains("<div id=\"content-old\" class=\"content\">two</div>"));
    }

    #[test]
    fn test_activate_scans_shell_and_live_region() {
        let mut doc = VirtualDocument::new("Home", r#"<a class="dynamiclink" href="/projects">Projects</a>"#)
            .with_shell(r#"<nav><a class="dynamiclink" href="/">Home</a><a href="https://github.com">GitHub</a></nav>"#);

        let hrefs: Vec<_> = doc.activate().into_iter().map(|l| l.href).collect();
        assert_eq!(hrefs, vec!["/", "/projects"]);
    }

    #[test]
    fn test_is_index() {
        assert!(VirtualDocument::new("Home", r#"<div id="index">Welcome</div>"#).is_index());
        assert!(!VirtualDocument::new("About", "<p>About</p>").is_index());
    }

    #[test]
    fn test_layout_classes() {
        let mut doc = VirtualDocument::new("About", "").with_shrinkable(2);
        assert_eq!(doc.layout(), None);

        doc.apply_layout(LayoutState::Subpage, false);
        assert_eq!(doc.shrinkable_classes(), vec!["makesmall", "small"]);

        doc.apply_layout(LayoutState::Index, true);
        assert_eq!(doc.shrinkable_classes(), vec!["makesmall", "ani"]);
        assert_eq!(count(&doc.render(), ".makesmall.ani"), 2);
    }

    #[test]
    fn test_show_error_keeps_content() {
        let mut doc = VirtualDocument::new("Home", "<p>Welcome</p>");
        doc.show_error("Failed to load resource /about");

        assert_eq!(doc.errors(), ["Failed to load resource /about".to_string()]);
        assert_eq!(doc.live_region_html(), "<p>Welcome</p>");
    }
}
