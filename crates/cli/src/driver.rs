//! Line commands for the headless driver and the reports they produce.

use std::str::FromStr;

use pagenav_client::Link;
use pagenav_core::Error;
use pagenav_navigator::{
    Applied, Dispatch, Document, HistoryEntry, NavigationController, NavigationState, SessionHistory,
};
use serde::Serialize;

/// One driver command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Click the link with this href.
    Click(String),
    /// Browser back button.
    Back,
    /// Browser forward button.
    Forward,
    /// Print the controller state.
    State,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("blank line")]
    Blank,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("{0} requires an argument")]
    MissingArgument(&'static str),
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match verb {
            "" => Err(ParseError::Blank),
            "click" if rest.is_empty() => Err(ParseError::MissingArgument("click")),
            "click" => Ok(Command::Click(rest.to_string())),
            "back" => Ok(Command::Back),
            "forward" => Ok(Command::Forward),
            "state" => Ok(Command::State),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

/// What the controller looks like between commands.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub current_url: String,
    pub state: NavigationState,
    pub cached: Vec<String>,
    pub history: Vec<HistoryEntry>,
    pub links: Vec<Link>,
}

/// Outcome of one command, printed as a JSON line.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Report {
    Navigated(Applied),
    Failed { code: &'static str, message: String },
    /// The href is not a dynamic link; a browser would do a full load.
    NotIntercepted { href: String },
    /// Back or forward with nowhere to go.
    HistoryBoundary { direction: &'static str },
    State(Snapshot),
}

impl From<Result<Applied, Error>> for Report {
    fn from(result: Result<Applied, Error>) -> Self {
        match result {
            Ok(applied) => Report::Navigated(applied),
            Err(err) => Report::Failed { code: err.code(), message: err.to_string() },
        }
    }
}

/// Execute `command` against the controller.
pub async fn run<D: Document>(controller: &mut NavigationController<D, SessionHistory>, command: Command) -> Report {
    match command {
        Command::Click(href) => {
            if !controller.is_intercepted(&href) {
                return Report::NotIntercepted { href };
            }
            match controller.on_link_click(&href) {
                Ok(dispatch) => controller.drive(dispatch).await.into(),
                Err(err) => Report::Failed { code: err.code(), message: err.to_string() },
            }
        }
        Command::Back => {
            if controller.history_mut().back().is_none() {
                return Report::HistoryBoundary { direction: "back" };
            }
            pop(controller).await
        }
        Command::Forward => {
            if controller.history_mut().forward().is_none() {
                return Report::HistoryBoundary { direction: "forward" };
            }
            pop(controller).await
        }
        Command::State | Command::Quit => Report::State(snapshot(controller)),
    }
}

async fn pop<D: Document>(controller: &mut NavigationController<D, SessionHistory>) -> Report {
    let dispatch: Dispatch = controller.on_pop_state();
    controller.drive(dispatch).await.into()
}

fn snapshot<D: Document>(controller: &NavigationController<D, SessionHistory>) -> Snapshot {
    Snapshot {
        current_url: controller.current_url().to_string(),
        state: controller.state().clone(),
        cached: controller.cache().urls().into_iter().map(String::from).collect(),
        history: controller.history().entries().to_vec(),
        links: controller.active_links().to_vec(),
    }
}
