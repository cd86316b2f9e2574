//! Long-form news article extractor.
//!
//! Articles are the strictest template: a parseable date is a hard
//! requirement (downstream filename generation depends on it), and every
//! inline figure must yield usable dimensions, probing the image bytes when
//! the markup does not carry width/height attributes.

use tracing::{debug, warn};
use url::Url;

use crate::dom::{self, Selection};
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::page::Page;
use crate::rewrite;
use crate::selector::{self, ARTICLE_BODY_RULES};
use crate::text;

use super::authors::AuthorCredit;
use super::{lookups, ExtractContext, ExtractedArticle, ImageEntry, RegionExtractor};

/// Extractor for long-form news articles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleExtractor {
    /// First sequence number assigned to extracted images.
    pub start_index: usize,
}

impl ArticleExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number image sequence ids from `start_index` instead of zero.
    #[must_use]
    pub fn with_start_index(start_index: usize) -> Self {
        Self { start_index }
    }
}

impl RegionExtractor for ArticleExtractor {
    fn template(&self) -> &'static str {
        "article"
    }

    fn extract(&self, page: &Page, ctx: &ExtractContext<'_>) -> Result<ExtractedArticle> {
        let body = page.body();

        // The date is the one lookup that is fatal when absent.
        let date = lookups::date_iso(&body).ok_or(Error::NoDate)?;

        let region = lookups::main_content(&body, ARTICLE_BODY_RULES)
            .ok_or(Error::EmptyRegion("article"))?;

        let (author, guest_author) = match lookups::author_text(&body) {
            Some(raw) => match ctx.roster.classify(&raw) {
                AuthorCredit::Staff { byline } => (Some(byline), None),
                AuthorCredit::Guest { byline, guest } => {
                    debug!(url = %page.url(), guest = %guest, "author not on roster");
                    (Some(byline), Some(guest))
                }
            },
            None => (None, None),
        };

        let images = collect_images(&body, ctx, self.start_index)?;

        Ok(ExtractedArticle {
            title: lookups::title(&body),
            subhead: lookups::subhead(&body),
            author,
            guest_author,
            date: Some(date),
            banner_image: lookups::banner_image(&body),
            campus_message: lookups::campus_message(&body),
            body: region.body_html(),
            images,
        })
    }
}

/// Collect every article figure into an ordered image entry.
///
/// Entries are keyed by absolute URL, so a repeated image keeps only its
/// first occurrence and is probed at most once. Dimensions come from the
/// element's own attributes when both are present; otherwise the image
/// bytes are fetched and decoded. Probe failure aborts the whole
/// extraction.
fn collect_images(
    body: &Selection,
    ctx: &ExtractContext<'_>,
    start_index: usize,
) -> Result<Vec<ImageEntry>> {
    let mut entries: Vec<ImageEntry> = Vec::new();

    for figure in selector::query_all(body, selector::is_article_figure) {
        let img = figure.select("img");
        if img.is_empty() {
            continue;
        }

        let Some(src) = dom::get_attribute(&img, "src") else {
            warn!("article figure image has no src; skipping");
            continue;
        };

        let src = rewrite::resolve(&src, ctx.base_url);
        if entries.iter().any(|e| e.src == src) {
            continue;
        }

        let (width, height) = match declared_dimensions(&img) {
            Some(dims) => dims,
            None => probe_dimensions(ctx.fetcher, &src)?,
        };

        let caption = figure
            .select("figcaption")
            .nodes()
            .first()
            .map(|node| {
                let cap = Selection::from(*node);
                text::normalize(dom::text_content(&cap).trim())
            })
            .filter(|c| !c.is_empty());

        let sequence = start_index + entries.len();
        entries.push(ImageEntry { src, caption, width, height, sequence });
    }

    Ok(entries)
}

/// Width/height from the image element's own attributes, when both parse.
///
/// Trailing `px` units are tolerated.
fn declared_dimensions(img: &Selection) -> Option<(u32, u32)> {
    let parse = |name: &str| -> Option<u32> {
        dom::get_attribute(img, name)?
            .trim()
            .trim_end_matches("px")
            .parse()
            .ok()
    };
    Some((parse("width")?, parse("height")?))
}

/// Fetch the image and read its intrinsic dimensions.
fn probe_dimensions(fetcher: &dyn Fetcher, src: &str) -> Result<(u32, u32)> {
    let probe_err = |reason: String| Error::ImageProbe {
        url: src.to_string(),
        reason,
    };

    let url = Url::parse(src).map_err(|e| probe_err(e.to_string()))?;
    let resource = fetcher.fetch(&url).map_err(|e| probe_err(e.to_string()))?;

    let decoded = image::load_from_memory(&resource.bytes).map_err(|e| probe_err(e.to_string()))?;

    use image::GenericImageView;
    Ok(decoded.dimensions())
}
