//! Browser history and its bridge into navigation requests.
//!
//! Clicks become `Click` requests that push a history entry once applied.
//! Pops become `HistoryPop` requests that never push, since the browser has
//! already moved its pointer. Pushing is the only way the controller
//! advances the stack.

use pagenav_client::resolve_path;
use pagenav_core::Error;
use serde::Serialize;

use crate::controller::{Dispatch, NavigationController};
use crate::dom::Document;
use crate::state::NavigationRequest;

/// Label passed with every pushed entry.
pub const HISTORY_LABEL: &str = "PageLoadController::ManagedHistory";

/// The browser's push/pop history primitive.
pub trait History {
    /// Push `(null, label, url)` and make it the current entry.
    fn push_state(&mut self, label: &str, url: &str);

    /// Path of the current entry, as `location.pathname` reports it.
    fn current_path(&self) -> String;
}

/// One entry of a [`SessionHistory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub url: String,
    /// `None` for the entry the page was loaded with.
    pub label: Option<String>,
}

/// In-memory session history with browser back/forward semantics.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl SessionHistory {
    /// History of a freshly loaded page at `initial_path`.
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self { entries: vec![HistoryEntry { url: initial_path.into(), label: None }], index: 0 }
    }

    /// Move one entry back. Returns the new current path, or `None` at the start.
    pub fn back(&mut self) -> Option<String> {
        self.index = self.index.checked_sub(1)?;
        Some(self.entries[self.index].url.clone())
    }

    /// Move one entry forward. Returns the new current path, or `None` at the end.
    pub fn forward(&mut self) -> Option<String> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.entries[self.index].url.clone())
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

impl History for SessionHistory {
    fn push_state(&mut self, label: &str, url: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry { url: url.to_string(), label: Some(label.to_string()) });
        self.index = self.entries.len() - 1;
    }

    fn current_path(&self) -> String {
        self.entries[self.index].url.clone()
    }
}

impl<D: Document, H: History> NavigationController<D, H> {
    /// Handle an intercepted click on a link with the given `href`.
    ///
    /// The caller suppresses the browser's own navigation; the returned
    /// dispatch either already applied the page or carries the fetch to run.
    ///
    /// # Errors
    ///
    /// Relative hrefs resolve against the displayed URL, as the browser does.
    ///
    /// Returns `Error::InvalidUrl` if `href` does not resolve to a path on
    /// this site's origin. Such links should be left to the browser.
    pub fn on_link_click(&mut self, href: &str) -> Result<Dispatch, Error> {
        let base = self.origin().join(self.current_url()).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        let path = resolve_path(&base, href).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        tracing::debug!(href, path = %path, "intercepted link click");
        Ok(self.dispatch(NavigationRequest::click(path)))
    }

    /// Handle a history position change (back/forward).
    pub fn on_pop_state(&mut self) -> Dispatch {
        let path = self.history().current_path();
        tracing::debug!(path = %path, "history pop");
        self.dispatch(NavigationRequest::pop(path))
    }

    /// Whether a click on `href` is handled by the controller.
    pub fn is_intercepted(&self, href: &str) -> bool {
        self.active_links().iter().any(|link| link.href == href)
    }
}
