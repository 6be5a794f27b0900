//! Fragment fetch protocol.
//!
//! ### Request shape
//! - `POST <origin><path>`
//! - `Content-type: application/x-www-form-urlencoded`
//! - Body `dynamiclink=true`, asking the server for a page fragment
//!   (title plus content element) instead of a full document.
//!
//! ### Failure mapping
//! - Connection or read failure: `Error::Transport`
//! - Status outside 2xx: `Error::ServerStatus`
//! - Body over `max_bytes`: `Error::FetchTooLarge`
//!
//! No retries. A request without a configured timeout may stay pending forever.

pub mod url;

use bytes::Bytes;
use reqwest::{Client, header};
use std::time::{Duration, Instant};

pub use reqwest::StatusCode;
pub use self::url::{UrlError, fragment_url, resolve_path};

use pagenav_core::Error;

/// Form body signalling the server to render a fragment.
pub const DYNAMIC_NAVIGATION_BODY: &str = "dynamiclink=true";

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Scheme and host every path is requested from
    pub origin: ::url::Url,

    /// User agent string (default: "pagenav/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: none)
    pub timeout: Option<Duration>,
}

impl FetchConfig {
    /// Default configuration for the given origin.
    pub fn for_origin(origin: ::url::Url) -> Self {
        Self { origin, user_agent: "pagenav/0.1".to_string(), max_bytes: 5 * 1024 * 1024, timeout: None }
    }

    /// Build from the layered application configuration.
    pub fn from_app_config(config: &pagenav_core::AppConfig) -> Result<Self, pagenav_core::ConfigError> {
        Ok(Self {
            origin: config.origin_url()?,
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
        })
    }
}

/// Response to a fragment request.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The path requested
    pub path: String,
    /// HTTP status code
    pub status: StatusCode,
    /// Content-Type header
    pub content_type: Option<String>,
    /// Response body bytes
    pub body: Bytes,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

impl FetchResponse {
    /// Successful response carrying `body`, as a test double or replay would produce.
    pub fn ok(path: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            path: path.into(),
            status: StatusCode::OK,
            content_type: Some("text/html".to_string()),
            body: body.into(),
            fetch_ms: 0,
        }
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Outbound request/response primitive used by the navigator.
///
/// Implementations issue exactly one request per call.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Request the fragment rendering of `path`.
    async fn fetch_fragment(&self, path: &str) -> Result<FetchResponse, Error>;
}

/// HTTP fragment client.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }
}

#[async_trait::async_trait]
impl PageFetcher for FetchClient {
    async fn fetch_fragment(&self, path: &str) -> Result<FetchResponse, Error> {
        let start = Instant::now();
        let url = fragment_url(&self.config.origin, path).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let response = self
            .http
            .post(url.as_str())
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(DYNAMIC_NAVIGATION_BODY)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Transport(format!("timed out: {}", e))
                } else {
                    Error::Transport(format!("network error: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            return Err(Error::ServerStatus { url: path.to_string(), status: status.as_u16() });
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("failed to read response: {}", e)))?;

        if body.len() > self.config.max_bytes {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", body.len(), self.config.max_bytes)));
        }

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!("fetched fragment {} in {}ms ({} bytes)", url, fetch_ms, body.len());

        Ok(FetchResponse { path: path.to_string(), status, content_type, body, fetch_ms })
    }
}
