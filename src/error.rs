//! Error types for mailprep.
//!
//! This module defines the error taxonomy shared by every pipeline stage.
//! The orchestrator wraps these in a stage-tagged error (see `pipeline`),
//! so collaborators always learn both what failed and where.

/// Error type for scrape and extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input URL could not be parsed.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Network or status failure retrieving a page or probed image.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The fetched resource is not HTML.
    #[error("content type of {url} is not HTML: {content_type}")]
    ContentType { url: String, content_type: String },

    /// An article page lacks a parseable date.
    #[error("article does not contain a parseable date")]
    NoDate,

    /// Intrinsic dimensions of a referenced image could not be determined.
    #[error("unable to determine dimensions of image {url}: {reason}")]
    ImageProbe { url: String, reason: String },

    /// The external cascade resolver failed on the given fragment/stylesheet.
    #[error("style resolution failed: {0}")]
    StyleResolution(String),

    /// The expected main-content region was not found for the selected template.
    #[error("no content region found for {0} template")]
    EmptyRegion(&'static str),

    /// A configuration input (roster file, stylesheet list) is unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for scrape and extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
