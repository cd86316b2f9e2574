//! Generic "level-3" page extractor.
//!
//! These are ordinary campus content pages: a title heading, an optional
//! banner image, and a content box. No byline, no date, no inline-image
//! handling.

use tracing::debug;

use crate::error::{Error, Result};
use crate::page::Page;
use crate::selector::LEVEL3_CONTENT_RULES;

use super::{lookups, ExtractContext, ExtractedArticle, RegionExtractor};

/// Extractor for generic level-3 content pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Level3Extractor;

impl RegionExtractor for Level3Extractor {
    fn template(&self) -> &'static str {
        "level-3"
    }

    fn extract(&self, page: &Page, _ctx: &ExtractContext<'_>) -> Result<ExtractedArticle> {
        let body = page.body();

        let region = lookups::main_content(&body, LEVEL3_CONTENT_RULES)
            .ok_or(Error::EmptyRegion("level-3"))?;

        let title = lookups::title(&body);
        let banner_image = lookups::banner_image(&body);
        if banner_image.is_none() {
            debug!(url = %page.url(), "level-3 page has no banner image");
        }

        Ok(ExtractedArticle {
            title,
            banner_image,
            body: region.body_html(),
            ..ExtractedArticle::default()
        })
    }
}
