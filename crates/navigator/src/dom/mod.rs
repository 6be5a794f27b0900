//! The DOM as seen by the navigation controller.
//!
//! The controller never touches markup directly. Everything it needs from
//! the page goes through [`Document`], whose contract mirrors the ids and
//! classes the site's templates use:
//!
//! - `#content`: the live region, exactly one at rest
//! - `#content-old`: the retired region, present only during a swap
//! - `#headline`: the displayed page title
//! - `.dynamiclink`: links the controller intercepts
//! - `.makesmall`: elements toggled between index and subpage layout
//! - `#index`: marks the live region as the site root

mod virtual_doc;

pub use virtual_doc::VirtualDocument;

use pagenav_client::Link;
use serde::Serialize;

pub const LIVE_REGION_ID: &str = "content";
pub const RETIRED_REGION_ID: &str = "content-old";
pub const HEADLINE_ID: &str = "headline";
pub const SHRINKABLE_CLASS: &str = "makesmall";

/// Layout the shell takes for the page in the live region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutState {
    /// Full-size header for the site root.
    Index,
    /// Shrunk header for every other page.
    Subpage,
}

impl LayoutState {
    pub fn from_is_index(is_index: bool) -> Self {
        if is_index { LayoutState::Index } else { LayoutState::Subpage }
    }
}

/// Mutable view of the page the controller swaps content in.
pub trait Document {
    /// Replace the displayed title.
    fn set_headline(&mut self, title: &str);

    /// Rename the live region to the retired id, dropping any region that
    /// was already retired.
    fn retire_live_region(&mut self);

    /// Attach a fresh live region holding `content`.
    fn mount_live_region(&mut self, content: &str);

    /// Remove the retired region from the document.
    fn destroy_retired_region(&mut self);

    /// Inner HTML of the live region, empty if none is mounted.
    fn live_region_html(&self) -> String;

    /// Collect the links to intercept after new content is mounted.
    ///
    /// Covers the live region and the static shell around it.
    fn activate(&mut self) -> Vec<Link>;

    /// Whether the live region shows the site root.
    fn is_index(&self) -> bool;

    /// Toggle the shell's layout classes. `animate` is false only on first load.
    fn apply_layout(&mut self, layout: LayoutState, animate: bool);

    /// Show a user-visible error message. The live region is left alone.
    fn show_error(&mut self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_from_is_index() {
        assert_eq!(LayoutState::from_is_index(true), LayoutState::Index);
        assert_eq!(LayoutState::from_is_index(false), LayoutState::Subpage);
    }
}
