//! Region extraction.
//!
//! Each page template family gets one extractor variant; all variants share
//! the sub-lookups in [`lookups`] and produce the same
//! [`ExtractedArticle`] record. Fields a template does not define stay
//! `None`, never empty markup, so callers can tell "found but empty" from
//! "not applicable to this template".

pub mod article;
pub mod authors;
pub mod lookups;
pub mod newsletter;
pub mod page;

use serde::Serialize;
use url::Url;

use crate::dom::{self, Selection};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::page::Page;

use authors::AuthorRoster;

pub use article::ArticleExtractor;
pub use newsletter::NewsletterExtractor;
pub use page::Level3Extractor;

/// One inline article image.
///
/// Entries are ordered by document position and keyed by the absolute image
/// URL; `sequence` numbers them from the extractor's start index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageEntry {
    /// Absolute image URL.
    pub src: String,
    /// Caption text, normalized; `None` when the figure has no caption.
    pub caption: Option<String>,
    pub width: u32,
    pub height: u32,
    pub sequence: usize,
}

/// The output record of one extraction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractedArticle {
    /// Title markup, when the template defines one and the page has it.
    pub title: Option<String>,
    /// Subhead markup.
    pub subhead: Option<String>,
    /// Byline: canonical staff name or the organizational fallback.
    pub author: Option<String>,
    /// Raw author name when it did not match the roster.
    pub guest_author: Option<String>,
    /// ISO 8601 date (article template only; required there).
    pub date: Option<String>,
    /// Banner image markup.
    pub banner_image: Option<String>,
    /// Campus-message block markup (To/From header of official messages).
    pub campus_message: Option<String>,
    /// Main content markup.
    pub body: String,
    /// Inline images keyed by absolute URL, in document order.
    pub images: Vec<ImageEntry>,
}

/// The main-content subtree located by a template's rules.
pub struct ContentRegion<'a> {
    sel: Selection<'a>,
}

impl<'a> ContentRegion<'a> {
    pub(crate) fn new(sel: Selection<'a>) -> Self {
        Self { sel }
    }

    /// The region's element.
    #[must_use]
    pub fn selection(&self) -> &Selection<'a> {
        &self.sel
    }

    /// The region's children concatenated into a body string.
    #[must_use]
    pub fn body_html(&self) -> String {
        dom::inner_html(&self.sel).to_string()
    }
}

/// Shared context handed to extractors by the orchestrator.
pub struct ExtractContext<'a> {
    /// Page URL, the base for absolutizing image keys.
    pub base_url: &'a Url,
    /// Fetch collaborator for image dimension probes.
    pub fetcher: &'a dyn Fetcher,
    /// Roster for byline classification.
    pub roster: &'a AuthorRoster,
}

/// Template-specific region extraction.
///
/// An extractor is a pure function of (parsed page, page URL) to an
/// [`ExtractedArticle`]; the orchestrator selects which one runs. Optional
/// page sections degrade to `None`; template invariants (the date of an
/// article, the main-content region) raise instead.
pub trait RegionExtractor {
    /// Template name, used in error context and logging.
    fn template(&self) -> &'static str;

    fn extract(&self, page: &Page, ctx: &ExtractContext<'_>) -> Result<ExtractedArticle>;
}
