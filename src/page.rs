//! Fetched page representation.

use url::Url;

use crate::dom::{self, Document, Selection};

/// A parsed document tree plus the URL it came from.
///
/// Owned transiently by the orchestrator for the duration of one scrape;
/// nothing is cached across calls.
pub struct Page {
    url: Url,
    doc: Document,
}

impl Page {
    /// Parse markup fetched from `url`.
    #[must_use]
    pub fn parse(html: &str, url: Url) -> Self {
        Self { url, doc: dom::parse(html) }
    }

    /// The page URL, used as the base for URL resolution.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The parsed document.
    #[must_use]
    pub fn doc(&self) -> &Document {
        &self.doc
    }

    /// The document's `body` region.
    #[must_use]
    pub fn body(&self) -> Selection<'_> {
        self.doc.select("body")
    }
}
