//! Descriptor document fetching.
//!
//! A descriptor reference is either a filesystem path or an `http(s)` URL;
//! both resolve to the raw document text. Fetches are the only suspension
//! points in a parse; deadlines, if any, are the caller's concern.

use reqwest::StatusCode;
use std::io;

/// Errors raised while resolving a descriptor reference.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

/// Whether a reference is a URL rather than a filesystem path.
pub(crate) fn is_url(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Resolves descriptor references to raw document text.
#[derive(Debug, Clone, Default)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a descriptor reference.
    ///
    /// URLs reject on transport errors and non-2xx statuses, paths on any
    /// filesystem error; every rejection carries the offending reference.
    pub async fn fetch(&self, reference: &str) -> Result<String, FetchError> {
        if is_url(reference) {
            tracing::debug!(url = reference, "fetching descriptor over HTTP");
            let response = self
                .client
                .get(reference)
                .send()
                .await
                .map_err(|source| FetchError::Http {
                    url: reference.to_string(),
                    source,
                })?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: reference.to_string(),
                    status,
                });
            }
            response.text().await.map_err(|source| FetchError::Http {
                url: reference.to_string(),
                source,
            })
        } else {
            tracing::debug!(path = reference, "reading descriptor from disk");
            tokio::fs::read_to_string(reference)
                .await
                .map_err(|source| FetchError::Io {
                    path: reference.to_string(),
                    source,
                })
        }
    }
}
