//! The navigation state machine.
//!
//! `Idle -> Resolving -> (cache hit | Fetching) -> Applying -> Idle`
//!
//! A cache hit is applied inside [`NavigationController::dispatch`] without
//! suspending. A miss hands back a [`PendingFetch`] that is awaited without
//! borrowing the controller, then fed to [`NavigationController::complete`].
//! Several fetches may be outstanding at once; each completion is applied in
//! the order it arrives, so the last one to complete decides the displayed
//! page. There is no cancellation and no coalescing of duplicate requests.

use std::collections::BTreeMap;
use std::sync::Arc;

use pagenav_client::{FetchResponse, Link, PageFetcher, parse_fragment};
use pagenav_core::{Error, PageCache, PageEntry};
use serde::Serialize;
use url::Url;

use crate::dom::{Document, LayoutState};
use crate::history::{HISTORY_LABEL, History};
use crate::state::{NavigationRequest, NavigationState, Source};

/// Result of handing a request to the state machine.
#[derive(Debug)]
pub enum Dispatch {
    /// Served from cache and already applied.
    Applied(Applied),
    /// Cache miss; the fetch still has to be sent.
    Fetch(PendingFetch),
}

/// Summary of one completed Applying phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Applied {
    pub url: String,
    pub title: String,
    pub source: Source,
    pub from_cache: bool,
    /// Whether a history entry was pushed.
    pub pushed: bool,
    pub layout: LayoutState,
    /// Number of links intercepted after the swap.
    pub links: usize,
}

/// An outbound fragment request that has been decided on but not sent.
pub struct PendingFetch {
    request: NavigationRequest,
    fetcher: Arc<dyn PageFetcher>,
}

impl std::fmt::Debug for PendingFetch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingFetch").field("request", &self.request).finish_non_exhaustive()
    }
}

impl PendingFetch {
    pub fn request(&self) -> &NavigationRequest {
        &self.request
    }

    /// Issue the request. Exactly one outbound call per pending fetch.
    pub async fn send(self) -> FetchOutcome {
        let result = self.fetcher.fetch_fragment(&self.request.url).await;
        FetchOutcome { request: self.request, result }
    }
}

/// A fetch that has completed, successfully or not.
#[derive(Debug)]
pub struct FetchOutcome {
    pub request: NavigationRequest,
    pub result: Result<FetchResponse, Error>,
}

/// Owns the page cache and drives content swaps and history updates.
pub struct NavigationController<D, H> {
    origin: Url,
    fetcher: Arc<dyn PageFetcher>,
    cache: PageCache,
    document: D,
    history: H,
    current_url: String,
    state: NavigationState,
    in_flight: BTreeMap<String, usize>,
    active_links: Vec<Link>,
}

impl<D: Document, H: History> NavigationController<D, H> {
    /// Create a controller for a page the server rendered in full.
    ///
    /// The displayed URL is taken from `history`. Call [`start`](Self::start)
    /// once the document is ready.
    pub fn new(origin: Url, fetcher: Arc<dyn PageFetcher>, document: D, history: H) -> Self {
        let current_url = history.current_path();
        Self {
            origin,
            fetcher,
            cache: PageCache::new(),
            document,
            history,
            current_url,
            state: NavigationState::Idle,
            in_flight: BTreeMap::new(),
            active_links: Vec::new(),
        }
    }

    /// Wire up the initially rendered page: intercept its links and apply
    /// the layout without animation. The initial page is not cached.
    pub fn start(&mut self) {
        self.activate();
        let layout = LayoutState::from_is_index(self.document.is_index());
        self.document.apply_layout(layout, false);
        tracing::info!(url = %self.current_url, ?layout, links = self.active_links.len(), "navigation controller started");
    }

    /// Resolve a request against the cache.
    ///
    /// A hit is applied before returning. A miss returns the fetch to send;
    /// nothing on the page changes until it is completed.
    pub fn dispatch(&mut self, request: NavigationRequest) -> Dispatch {
        debug_assert!(
            !(request.source == Source::HistoryPop && request.push_history),
            "history pops must not push"
        );

        self.transition(NavigationState::Resolving(request.url.clone()));

        match self.cache.get(&request.url) {
            Ok(entry) => {
                let entry = entry.clone();
                Dispatch::Applied(self.apply(&request, &entry, true))
            }
            Err(_) => {
                let count = self.in_flight.entry(request.url.clone()).or_default();
                *count += 1;
                if *count > 1 {
                    tracing::warn!(url = %request.url, in_flight = *count, "fragment already being fetched; sending again");
                }

                self.transition(NavigationState::Fetching(request.url.clone()));
                Dispatch::Fetch(PendingFetch { request, fetcher: Arc::clone(&self.fetcher) })
            }
        }
    }

    /// Finish a fetched navigation.
    ///
    /// On success the fragment is cached and applied. On failure the error is
    /// shown to the user and returned; the cache, the live region, the
    /// current URL and history are left as they were.
    pub fn complete(&mut self, outcome: FetchOutcome) -> Result<Applied, Error> {
        let FetchOutcome { request, result } = outcome;
        self.release(&request.url);

        let parsed = result.and_then(|response| {
            tracing::debug!(url = %request.url, fetch_ms = response.fetch_ms, bytes = response.body.len(), "fragment received");
            parse_fragment(&request.url, &response.text())
        });

        match parsed {
            Ok(entry) => {
                self.cache.put(entry.clone());
                Ok(self.apply(&request, &entry, false))
            }
            Err(err) => {
                tracing::error!(
                    url = %request.url,
                    code = err.code(),
                    fetch_failure = err.is_fetch_failure(),
                    error = %err,
                    "navigation aborted"
                );
                self.document.show_error(&format!("Failed to load resource {}", request.url));
                self.settle();
                Err(err)
            }
        }
    }

    /// Run a dispatch to completion, sending its fetch if there is one.
    pub async fn drive(&mut self, dispatch: Dispatch) -> Result<Applied, Error> {
        match dispatch {
            Dispatch::Applied(applied) => Ok(applied),
            Dispatch::Fetch(pending) => {
                let outcome = pending.send().await;
                self.complete(outcome)
            }
        }
    }

    /// Dispatch `request` and drive it to completion.
    pub async fn navigate(&mut self, request: NavigationRequest) -> Result<Applied, Error> {
        let dispatch = self.dispatch(request);
        self.drive(dispatch).await
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access for the embedder, e.g. to move the history pointer
    /// before reporting a pop.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// URL of the page in the live region.
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Links currently intercepted.
    pub fn active_links(&self) -> &[Link] {
        &self.active_links
    }

    /// Number of fetches sent and not yet completed.
    pub fn in_flight(&self) -> usize {
        self.in_flight.values().sum()
    }

    fn apply(&mut self, request: &NavigationRequest, entry: &PageEntry, from_cache: bool) -> Applied {
        self.transition(NavigationState::Applying(request.url.clone()));
        tracing::info!(url = %entry.url, push = request.push_history, from_cache, "applying page");

        self.document.set_headline(&entry.title);
        self.document.retire_live_region();
        self.document.mount_live_region(&entry.content);
        self.document.destroy_retired_region();

        self.activate();

        let layout = LayoutState::from_is_index(self.document.is_index());
        self.document.apply_layout(layout, true);

        // a fetch completing for the page history already shows must not stack a second entry
        let pushed = request.push_history && (from_cache || self.history.current_path() != request.url);
        if pushed {
            self.history.push_state(HISTORY_LABEL, &request.url);
        }

        self.current_url = request.url.clone();
        self.settle();

        Applied {
            url: entry.url.clone(),
            title: entry.title.clone(),
            source: request.source,
            from_cache,
            pushed,
            layout,
            links: self.active_links.len(),
        }
    }

    fn activate(&mut self) {
        self.active_links = self.document.activate();
    }

    fn release(&mut self, url: &str) {
        if let Some(count) = self.in_flight.get_mut(url) {
            *count -= 1;
            if *count == 0 {
                self.in_flight.remove(url);
            }
        }
    }

    /// Go back to `Idle`, or to `Fetching` while other requests are outstanding.
    fn settle(&mut self) {
        let next = match self.in_flight.keys().next() {
            Some(url) => NavigationState::Fetching(url.clone()),
            None => NavigationState::Idle,
        };
        self.transition(next);
    }

    fn transition(&mut self, next: NavigationState) {
        tracing::trace!(from = ?self.state, to = ?next, "navigation state");
        self.state = next;
    }
}
