//! Page Fetcher — GETs a bounded set of pages (home, `/about`) for one company.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Per-request bound on every outbound page fetch.
pub const FETCH_TIMEOUT_SECS: u64 = 10;
/// Bytes of HTML read per page; the rest of the body is dropped.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;
/// Desktop browser identity; many marketing sites reject unknown agents.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out after {} seconds", FETCH_TIMEOUT_SECS)]
    Timeout,

    #[error("HTTP {0} fetching URL")]
    Status(u16),

    #[error("Failed to scrape URL: {0}")]
    Network(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Prefixes `https://` when the input carries no http(s) scheme.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Normalizes and parses a user-supplied company URL.
pub fn parse_target(url: &str) -> Result<Url, FetchError> {
    let normalized = normalize_url(url);
    Url::parse(&normalized).map_err(|e| FetchError::InvalidUrl(format!("{normalized} ({e})")))
}

/// The `/about` page on the same origin as `base`.
pub fn about_url(base: &Url) -> Option<Url> {
    base.join("/about").ok()
}

/// Shared HTTP client for page fetches. Cheap to clone.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
    }

    pub(crate) fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the HTML body of `url`, capped at `MAX_BODY_BYTES`.
    /// Non-2xx responses are errors.
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let mut response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
            if body.len() >= MAX_BODY_BYTES {
                debug!("Body of {url} truncated at {MAX_BODY_BYTES} bytes");
                body.truncate(MAX_BODY_BYTES);
                break;
            }
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Fetches the `/about` page for `base`. Any failure yields `None`.
    pub async fn fetch_about(&self, base: &Url) -> Option<String> {
        let about = about_url(base)?;
        match self.fetch(&about).await {
            Ok(html) => Some(html),
            Err(e) => {
                debug!("About page {about} skipped: {e}");
                None
            }
        }
    }
}
