//! Scrape pipeline orchestration.
//!
//! One call processes one page through a fixed stage order:
//!
//! ```text
//! Fetching -> Extracting -> Rewriting -> Normalizing -> Inlining -> Auditing
//! ```
//!
//! A failure at any stage aborts the call; nothing is retried. The error
//! surfaced to the collaborator carries both the failing stage and the
//! underlying cause. Template detection is injected: the orchestrator has
//! no per-template branching, so new page families plug in without touching
//! this module.

use std::fmt;

use tracing::debug;
use url::Url;

use crate::audit::{self, DefectCategory};
use crate::dom;
use crate::encoding;
use crate::error::Error;
use crate::extract::{ExtractContext, ExtractedArticle, RegionExtractor};
use crate::fetch::Fetcher;
use crate::inline::{self, StyleResolver};
use crate::options::{AuditPoint, ScrapeOptions};
use crate::page::Page;
use crate::rewrite;
use crate::text;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Extracting,
    Rewriting,
    Normalizing,
    Inlining,
    Auditing,
}

impl Stage {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Rewriting => "rewriting",
            Self::Normalizing => "normalizing",
            Self::Inlining => "inlining",
            Self::Auditing => "auditing",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pipeline failure: which stage failed, and why.
#[derive(Debug, thiserror::Error)]
#[error("scrape failed while {stage}: {source}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: Error,
}

/// Result of a successful scrape.
#[derive(Debug)]
pub struct ScrapeOutput {
    /// The extracted article record (body pre-inlining).
    pub article: ExtractedArticle,
    /// The final email-safe fragment: rewritten, normalized, inlined.
    pub fragment: String,
    /// Populated defect categories, in check order.
    pub defects: Vec<DefectCategory>,
}

/// The scrape pipeline: an injected fetcher and cascade resolver plus
/// configuration. One instance serves many calls; each call owns its whole
/// page tree exclusively, so no state is shared between scrapes.
pub struct Pipeline {
    fetcher: Box<dyn Fetcher>,
    resolver: Box<dyn StyleResolver>,
    options: ScrapeOptions,
}

impl Pipeline {
    #[must_use]
    pub fn new(
        fetcher: Box<dyn Fetcher>,
        resolver: Box<dyn StyleResolver>,
        options: ScrapeOptions,
    ) -> Self {
        Self { fetcher, resolver, options }
    }

    /// Fetch `url` and run the full pipeline with the given extractor.
    pub fn scrape(
        &self,
        url: &str,
        extractor: &dyn RegionExtractor,
    ) -> Result<ScrapeOutput, StageError> {
        let (html, parsed_url) = self.fetch_html(url)?;
        self.process(&html, parsed_url, extractor)
    }

    /// Fetch `url`, let the collaborator's detection rule pick the
    /// extractor from the parsed page, then run the remaining stages.
    ///
    /// The rule returning `None` means no template matched; that surfaces
    /// as an extracting-stage `EmptyRegion` with template `"unmatched"`.
    pub fn scrape_with<'a, S>(&self, url: &str, select: S) -> Result<ScrapeOutput, StageError>
    where
        S: FnOnce(&Url, &Page) -> Option<&'a dyn RegionExtractor>,
    {
        let (html, parsed_url) = self.fetch_html(url)?;
        let page = Page::parse(&html, parsed_url.clone());

        let Some(extractor) = select(&parsed_url, &page) else {
            return Err(StageError {
                stage: Stage::Extracting,
                source: Error::EmptyRegion("unmatched"),
            });
        };

        self.process(&html, parsed_url, extractor)
    }

    /// Run the pipeline on markup the caller already fetched.
    ///
    /// Skips the Fetching stage apart from URL validation; everything else
    /// behaves exactly like [`scrape`](Self::scrape).
    pub fn scrape_html(
        &self,
        html: &str,
        url: &str,
        extractor: &dyn RegionExtractor,
    ) -> Result<ScrapeOutput, StageError> {
        let parsed_url = parse_url(url)?;
        self.process(html, parsed_url, extractor)
    }

    /// Fetching: one synchronous fetch, content-type gate, charset decode.
    fn fetch_html(&self, url: &str) -> Result<(String, Url), StageError> {
        let parsed_url = parse_url(url)?;
        debug!(url, "stage: fetching");

        let resource = self
            .fetcher
            .fetch(&parsed_url)
            .map_err(|e| fail(Stage::Fetching, e))?;

        let content_type = resource.content_type.clone().unwrap_or_default();
        if !encoding::is_html(&content_type) {
            return Err(fail(
                Stage::Fetching,
                Error::ContentType { url: url.to_string(), content_type },
            ));
        }

        let html = encoding::decode(&resource.bytes, resource.content_type.as_deref());
        Ok((html, parsed_url))
    }

    /// Extracting through Auditing.
    fn process(
        &self,
        html: &str,
        url: Url,
        extractor: &dyn RegionExtractor,
    ) -> Result<ScrapeOutput, StageError> {
        // Extracting
        debug!(%url, template = extractor.template(), "stage: extracting");
        let page = Page::parse(html, url);
        let ctx = ExtractContext {
            base_url: page.url(),
            fetcher: self.fetcher.as_ref(),
            roster: &self.options.roster,
        };
        let mut article = extractor
            .extract(&page, &ctx)
            .map_err(|e| fail(Stage::Extracting, e))?;

        // "As authored" defect evidence is captured before any rewriting.
        let pre_rewrite_defects = match self.options.audit_point {
            AuditPoint::PreRewrite => Some(audit_fragment(&article.body)),
            AuditPoint::PostInline => None,
        };

        // Rewriting
        debug!("stage: rewriting");
        for field in [
            &mut article.title,
            &mut article.subhead,
            &mut article.banner_image,
            &mut article.campus_message,
        ]
        .into_iter()
        .flatten()
        {
            *field = rewrite_fragment(field, page.url());
        }
        article.body = rewrite_fragment(&article.body, page.url());

        // Normalizing
        debug!("stage: normalizing");
        for field in [
            &mut article.title,
            &mut article.subhead,
            &mut article.author,
            &mut article.guest_author,
            &mut article.banner_image,
            &mut article.campus_message,
        ]
        .into_iter()
        .flatten()
        {
            *field = text::normalize(field);
        }
        article.body = text::normalize(&article.body);

        // Inlining
        debug!("stage: inlining");
        let fragment = inline::inline_fragment(
            &article.body,
            &self.options.stylesheets,
            self.resolver.as_ref(),
        )
        .map_err(|e| fail(Stage::Inlining, e))?;

        // Auditing
        debug!("stage: auditing");
        let defects = match pre_rewrite_defects {
            Some(report) => report,
            None => audit_fragment(&fragment),
        };

        debug!(defect_categories = defects.len(), "scrape done");
        Ok(ScrapeOutput { article, fragment, defects })
    }
}

fn parse_url(url: &str) -> Result<Url, StageError> {
    Url::parse(url).map_err(|e| {
        fail(
            Stage::Fetching,
            Error::InvalidUrl { url: url.to_string(), reason: e.to_string() },
        )
    })
}

fn fail(stage: Stage, source: Error) -> StageError {
    StageError { stage, source }
}

/// Parse a fragment string, rewrite its URLs, and serialize it back.
fn rewrite_fragment(fragment: &str, base: &Url) -> String {
    let doc = dom::parse(fragment);
    rewrite::rewrite_urls(&doc.select("html"), base);
    dom::body_inner_html(&doc)
}

/// Audit a fragment string as its own subtree.
fn audit_fragment(fragment: &str) -> Vec<DefectCategory> {
    let doc = dom::parse(fragment);
    audit::audit(&doc.select("body"))
}
