use chrono::Utc;
use futures::StreamExt;
use reqwest::redirect::Policy;
use std::time::Duration;
use thiserror::Error;

use super::model::Feed;
use super::source::{cache_busted_url, FeedSource};

const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB
const MAX_REDIRECTS: usize = 5;

/// Errors that can occur while loading the feed document.
///
/// Every variant is terminal for that load attempt: there is no retry.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Body was not a valid feed document
    #[error("Parse error: {0}")]
    Parse(String),
    /// Local feed file could not be read
    #[error("Failed to read feed file: {0}")]
    Io(#[from] std::io::Error),
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Response was incomplete (received fewer bytes than Content-Length)
    #[error("Incomplete response: expected {expected} bytes, received {received}")]
    IncompleteResponse { expected: u64, received: usize },
    /// Feed location could not be interpreted
    #[error("Invalid feed source: {0}")]
    InvalidSource(String),
}

/// HTTP client for feed requests: bounded redirects with loop detection.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder()
        .redirect(redirect_policy())
        .user_agent(concat!("tldr-board/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?;
    Ok(client)
}

fn redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error("Too many redirects");
        }
        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev == url) {
            return attempt.error("Redirect loop detected");
        }
        tracing::debug!(to = %url, hop = attempt.previous().len() + 1, "Following redirect");
        attempt.follow()
    })
}

/// Load the feed document from `source`.
///
/// Remote sources are requested with a fresh `v=<unix millis>` parameter so
/// intermediaries never serve a stale copy. Non-2xx statuses fail the load
/// immediately.
pub async fn fetch_feed(
    client: &reqwest::Client,
    source: &FeedSource,
    timeout: Duration,
) -> Result<Feed, FetchError> {
    let bytes = match source {
        FeedSource::Http(base) => {
            let url = cache_busted_url(base, Utc::now().timestamp_millis());
            tracing::debug!(url = %url, "Fetching feed");

            let response = tokio::time::timeout(timeout, client.get(url).send())
                .await
                .map_err(|_| FetchError::Timeout)?
                .map_err(FetchError::Network)?;

            if !response.status().is_success() {
                return Err(FetchError::HttpStatus(response.status().as_u16()));
            }

            tokio::time::timeout(timeout, read_limited_bytes(response, MAX_FEED_SIZE))
                .await
                .map_err(|_| FetchError::Timeout)??
        }
        FeedSource::File(path) => {
            tracing::debug!(path = %path.display(), "Reading feed file");
            let meta = tokio::fs::metadata(path).await?;
            if meta.len() > MAX_FEED_SIZE as u64 {
                return Err(FetchError::ResponseTooLarge);
            }
            tokio::fs::read(path).await?
        }
    };

    let feed = parse_feed(&bytes)?;
    tracing::info!(
        source = %source,
        items = feed.items.len(),
        "Feed loaded"
    );
    Ok(feed)
}

/// Decode a feed document.
pub fn parse_feed(bytes: &[u8]) -> Result<Feed, FetchError> {
    serde_json::from_slice(bytes).map_err(|e| FetchError::Parse(e.to_string()))
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    let expected_length = response.content_length();

    // Fast path: check Content-Length header
    if let Some(len) = expected_length {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    if let Some(expected) = expected_length {
        if (bytes.len() as u64) < expected {
            return Err(FetchError::IncompleteResponse {
                expected,
                received: bytes.len(),
            });
        }
    }

    Ok(bytes)
}
