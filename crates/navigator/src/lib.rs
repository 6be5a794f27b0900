//! Client-side navigation for pagenav.
//!
//! A [`NavigationController`] intercepts same-origin link clicks and history
//! pops, serves pages from its [`PageCache`](pagenav_core::PageCache) or
//! fetches their fragments, swaps the live content region, and keeps the
//! history stack in step with what is displayed.
//!
//! The DOM and the browser history are reached through the [`Document`] and
//! [`History`] traits so the controller runs the same against a browser
//! binding or the in-memory [`VirtualDocument`] and [`SessionHistory`].

pub mod controller;
pub mod dom;
pub mod history;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{Applied, Dispatch, FetchOutcome, NavigationController, PendingFetch};
pub use dom::{Document, LayoutState, VirtualDocument};
pub use history::{History, HistoryEntry, SessionHistory};
pub use state::{NavigationRequest, NavigationState, Source};
