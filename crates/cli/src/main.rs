//! pagenav headless driver entry point.
//!
//! Boots a navigation controller against the configured origin and feeds it
//! commands read line by line from stdin (`click <href>`, `back`, `forward`,
//! `state`, `quit`). Each command prints one JSON line to stdout.
//! Logging goes to stderr so stdout stays machine-readable.

use std::sync::Arc;

use anyhow::{Context, Result};
use pagenav_client::{FetchClient, FetchConfig, PageFetcher, parse_fragment};
use pagenav_core::AppConfig;
use pagenav_navigator::{NavigationController, SessionHistory, VirtualDocument};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

mod driver;

use driver::Command;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    let fetch_config = FetchConfig::from_app_config(&config)?;
    let origin = fetch_config.origin.clone();
    let fetcher: Arc<dyn PageFetcher> = Arc::new(FetchClient::new(fetch_config)?);

    tracing::info!(origin = %origin, start = %config.start_path, "loading initial page");

    // Stands in for the server-rendered first load; like a real first load it is not cached.
    let initial = fetcher
        .fetch_fragment(&config.start_path)
        .await
        .and_then(|response| parse_fragment(&config.start_path, &response.text()))
        .with_context(|| format!("loading {}", config.start_path))?;

    let document = VirtualDocument::new(initial.title, initial.content);
    let history = SessionHistory::new(config.start_path.clone());
    let mut controller = NavigationController::new(origin, fetcher, document, history);
    controller.start();

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(driver::ParseError::Blank) => continue,
            Err(err) => {
                tracing::warn!(line = %line, error = %err, "ignoring command");
                continue;
            }
        };

        let report = driver::run(&mut controller, command).await;
        let mut out = serde_json::to_vec(&report)?;
        out.push(b'\n');
        stdout.write_all(&out).await?;
        stdout.flush().await?;
    }

    tracing::info!(cached = controller.cache().len(), "driver finished");

    Ok(())
}
