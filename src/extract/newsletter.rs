//! Pre-rendered newsletter/messaging page extractor.
//!
//! These pages are already laid out for email; the whole `body` subtree is
//! the content region. Elements marked with the `ignore` class are editorial
//! chrome (web-only navigation, preview banners) and are dropped. Comment
//! nodes survive serialization: some email clients key conditional rendering
//! off them.

use crate::dom;
use crate::error::{Error, Result};
use crate::page::Page;

use super::{ExtractContext, ExtractedArticle, RegionExtractor};

/// Extractor for pre-rendered messaging/newsletter pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewsletterExtractor;

impl RegionExtractor for NewsletterExtractor {
    fn template(&self) -> &'static str {
        "newsletter"
    }

    fn extract(&self, page: &Page, _ctx: &ExtractContext<'_>) -> Result<ExtractedArticle> {
        let body = page.body();
        if body.is_empty() {
            return Err(Error::EmptyRegion("newsletter"));
        }

        // Work on a detached copy so dropping ignored elements never
        // touches the caller's page tree.
        let region = dom::parse(&dom::inner_html(&body));
        region.select(".ignore").remove();

        let content = dom::body_inner_html(&region);
        if content.trim().is_empty() {
            return Err(Error::EmptyRegion("newsletter"));
        }

        Ok(ExtractedArticle {
            body: content,
            ..ExtractedArticle::default()
        })
    }
}
