//! Page fetching.
//!
//! The pipeline never talks to the network directly; it goes through an
//! injected [`Fetcher`]. One scrape performs one synchronous page fetch,
//! plus one sequential fetch per probed image in the article template.
//! Retry policy, if any, belongs to the collaborator supplying the fetcher.

use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// Raw bytes plus transport metadata for one fetched resource.
#[derive(Debug, Clone)]
pub struct FetchedResource {
    pub bytes: Vec<u8>,
    /// Value of the Content-Type header, when the server sent one.
    pub content_type: Option<String>,
}

/// Synchronous fetch collaborator.
pub trait Fetcher {
    /// Fetch a resource, failing on transport errors or non-success status.
    fn fetch(&self, url: &Url) -> Result<FetchedResource>;
}

/// [`Fetcher`] backed by a blocking `reqwest` client.
#[derive(Debug)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Build a fetcher with a default client.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("mailprep/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Fetch {
                url: String::new(),
                reason: format!("cannot build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    /// Build a fetcher around a caller-configured client.
    #[must_use]
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<FetchedResource> {
        debug!(%url, "fetching");

        let fetch_err = |reason: String| Error::Fetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url.as_str())
            .send()
            .map_err(|e| fetch_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_err(format!("status {status}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let bytes = response
            .bytes()
            .map_err(|e| fetch_err(e.to_string()))?
            .to_vec();

        debug!(%url, len = bytes.len(), "fetched");
        Ok(FetchedResource { bytes, content_type })
    }
}
