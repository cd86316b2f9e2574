//! Sub-lookups shared by the region extractors.
//!
//! Every lookup returns `None` when its section is missing; deciding
//! whether that is fatal belongs to the calling template. Lookups that
//! return markup return the full serialized element, matching what the
//! original pages hand to the email templates downstream.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::dom::{self, Selection};
use crate::selector::{self, Rule};

use super::ContentRegion;

/// Matches "Month D, YYYY" in free text.
#[allow(clippy::expect_used)]
static DATE_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]+)\s+(\d{1,2}),\s*(\d{4})").expect("valid regex")
});

/// Title markup: the first h1 with a known identifying attribute.
#[must_use]
pub fn title(root: &Selection) -> Option<String> {
    selector::query(root, selector::is_page_title).map(|sel| dom::outer_html(&sel).to_string())
}

/// Banner image markup: the first image inside a known banner container.
///
/// Absent when the container is missing or contains no image.
#[must_use]
pub fn banner_image(root: &Selection) -> Option<String> {
    let container = selector::query(root, selector::is_banner_container)?;
    let img = container.select("img");
    if img.is_empty() {
        return None;
    }
    Some(dom::outer_html(&img).to_string())
}

/// Subhead markup.
#[must_use]
pub fn subhead(root: &Selection) -> Option<String> {
    selector::query(root, selector::is_subhead).map(|sel| dom::outer_html(&sel).to_string())
}

/// Author free text from the vcard block.
///
/// Prefers the nested name span; otherwise takes the block's text with a
/// leading "By" stripped.
#[must_use]
pub fn author_text(root: &Selection) -> Option<String> {
    let vcard = selector::query(root, selector::is_author_vcard)?;

    let name_span = vcard.select(".name");
    let text = if name_span.is_empty() {
        let raw = dom::text_content(&vcard).trim().to_string();
        raw.strip_prefix("By ").unwrap_or(&raw).trim().to_string()
    } else {
        dom::text_content(&name_span).trim().to_string()
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Campus-message block: the inner To/From markup of official messages.
#[must_use]
pub fn campus_message(root: &Selection) -> Option<String> {
    selector::query(root, selector::is_campus_message)
        .map(|sel| dom::inner_html(&sel).trim().to_string())
}

/// Publication date parsed from the date paragraph, as an ISO 8601 string.
///
/// `None` covers both a missing paragraph and text that does not contain a
/// "Month D, YYYY" date; the article template turns that into its fatal
/// `NoDate` error.
#[must_use]
pub fn date_iso(root: &Selection) -> Option<String> {
    let paragraph = selector::query(root, selector::is_date_paragraph)?;
    let text = dom::text_content(&paragraph);
    parse_date_text(&text)
}

/// Parse "Month D, YYYY" free text into an ISO 8601 date string.
#[must_use]
pub fn parse_date_text(text: &str) -> Option<String> {
    let caps = DATE_TEXT_RE.captures(text)?;
    let canonical = format!("{} {} {}", &caps[1], &caps[2], &caps[3]);
    let date = NaiveDate::parse_from_str(&canonical, "%B %d %Y").ok()?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// Main content region via an ordered rule list; first rule with a match
/// wins.
#[must_use]
pub fn main_content<'a>(root: &Selection<'a>, rules: &[Rule]) -> Option<ContentRegion<'a>> {
    selector::query_first_rule(root, rules).map(ContentRegion::new)
}
