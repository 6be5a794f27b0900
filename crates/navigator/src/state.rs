//! Navigation request and state machine states.

use serde::Serialize;

/// What started a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    /// An intercepted click on a `.dynamiclink` element.
    Click,
    /// The browser moved its history pointer (back/forward).
    HistoryPop,
}

/// One navigation attempt. Lives only while it is being handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationRequest {
    /// Canonical path to display.
    pub url: String,
    pub source: Source,
    /// Whether applying this request adds a history entry.
    pub push_history: bool,
}

impl NavigationRequest {
    /// A click navigation; pushes history once applied.
    pub fn click(url: impl Into<String>) -> Self {
        Self { url: url.into(), source: Source::Click, push_history: true }
    }

    /// A history pop; the browser already moved, so nothing is pushed.
    pub fn pop(url: impl Into<String>) -> Self {
        Self { url: url.into(), source: Source::HistoryPop, push_history: false }
    }
}

/// State of the navigation state machine.
///
/// `Idle` is the only resting state. Failures return here without an error
/// state of their own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "url", rename_all = "kebab-case")]
pub enum NavigationState {
    #[default]
    Idle,
    Resolving(String),
    Fetching(String),
    Applying(String),
}

impl NavigationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, NavigationState::Idle)
    }

    /// URL the machine is working on, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            NavigationState::Idle => None,
            NavigationState::Resolving(url) | NavigationState::Fetching(url) | NavigationState::Applying(url) => {
                Some(url)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_request_pushes() {
        let request = NavigationRequest::click("/about");
        assert_eq!(request.source, Source::Click);
        assert!(request.push_history);
    }

    #[test]
    fn test_pop_request_never_pushes() {
        let request = NavigationRequest::pop("/about");
        assert_eq!(request.source, Source::HistoryPop);
        assert!(!request.push_history);
    }

    #[test]
    fn test_state_url() {
        assert_eq!(NavigationState::Idle.url(), None);
        assert_eq!(NavigationState::Fetching("/about".into()).url(), Some("/about"));
        assert!(NavigationState::default().is_idle());
    }
}
