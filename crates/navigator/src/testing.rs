//! Test doubles shared by the controller and history tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use pagenav_client::{FetchResponse, PageFetcher};
use pagenav_core::Error;
use url::Url;

use crate::controller::NavigationController;
use crate::dom::VirtualDocument;
use crate::history::SessionHistory;

pub(crate) const HOME_CONTENT: &str = r#"<div id="index">Welcome</div>"#;

pub(crate) const SHELL: &str = r#"<nav><a class="dynamiclink" href="/">Home</a><a class="dynamiclink" href="/about">About</a></nav><footer><a href="https://github.com">GitHub</a></footer>"#;

/// Fetcher answering from a fixed table and recording every request.
#[derive(Clone, Default)]
pub(crate) struct ScriptedFetcher {
    responses: Arc<Mutex<HashMap<String, Result<FetchResponse, Error>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Serve a well-formed fragment for `path`.
    pub(crate) fn page(self, path: &str, title: &str, content: &str) -> Self {
        let body = format!("<title>{title}</title><cachecontent>{content}</cachecontent>");
        self.respond(path, Ok(FetchResponse::ok(path, body)))
    }

    pub(crate) fn respond(self, path: &str, result: Result<FetchResponse, Error>) -> Self {
        self.responses.lock().unwrap().insert(path.to_string(), result);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch_fragment(&self, path: &str) -> Result<FetchResponse, Error> {
        self.calls.lock().unwrap().push(path.to_string());
        self.responses
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(Error::ServerStatus { url: path.to_string(), status: 404 }))
    }
}

/// A started controller on the home page of `https://example.com`.
pub(crate) fn controller_with(fetcher: &ScriptedFetcher) -> NavigationController<VirtualDocument, SessionHistory> {
    let document = VirtualDocument::new("Home", HOME_CONTENT).with_shell(SHELL).with_shrinkable(2);
    let mut controller = NavigationController::new(
        Url::parse("https://example.com").unwrap(),
        Arc::new(fetcher.clone()),
        document,
        SessionHistory::new("/"),
    );
    controller.start();
    controller
}
