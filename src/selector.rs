//! Selector rules for region extraction.
//!
//! Rules are plain predicate functions over a `Selection`, collected into
//! ordered lists per page template. Extraction tries each rule in priority
//! order; the first rule with at least one match wins. Keeping the rules as
//! functions rather than CSS strings makes compound conditions (tag plus
//! several class words) explicit and testable.

use crate::dom::{self, Selection};

/// A selector rule testing whether an element matches certain criteria.
pub type Rule = fn(&Selection) -> bool;

/// First descendant of `root`, in document order, matching the rule.
#[must_use]
pub fn query<'a>(root: &Selection<'a>, rule: Rule) -> Option<Selection<'a>> {
    for node in root.select("*").nodes() {
        let sel = Selection::from(*node);
        if rule(&sel) {
            return Some(sel);
        }
    }
    None
}

/// All descendants of `root`, in document order, matching the rule.
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    let mut matches = Vec::new();
    for node in root.select("*").nodes() {
        let sel = Selection::from(*node);
        if rule(&sel) {
            matches.push(sel);
        }
    }
    matches
}

/// First match for an ordered rule list: rules are tried in order and the
/// first rule that matches anything supplies the result.
#[must_use]
pub fn query_first_rule<'a>(root: &Selection<'a>, rules: &[Rule]) -> Option<Selection<'a>> {
    rules.iter().find_map(|rule| query(root, *rule))
}

// === Attribute helpers ===

/// Element class attribute, empty string when missing.
#[inline]
#[must_use]
pub fn class(sel: &Selection) -> String {
    dom::get_attribute(sel, "class").unwrap_or_default()
}

/// Element id attribute, empty string when missing.
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> String {
    dom::get_attribute(sel, "id").unwrap_or_default()
}

/// Whether the element's class attribute contains `word` as a whole
/// whitespace-separated token.
#[must_use]
pub fn has_class_word(sel: &Selection, word: &str) -> bool {
    class(sel).split_whitespace().any(|w| w == word)
}

/// Whether the element has the given tag name.
#[inline]
#[must_use]
pub fn is_tag(sel: &Selection, expected: &str) -> bool {
    dom::tag_name(sel).is_some_and(|t| t == expected)
}

// === Title / banner rules (shared by page and article templates) ===

/// A page title is the first h1 carrying a known identifying attribute.
#[must_use]
pub fn is_page_title(sel: &Selection) -> bool {
    is_tag(sel, "h1") && (id(sel) == "title" || has_class_word(sel, "page-title"))
}

/// Known banner containers; the banner image lives inside one of these.
#[must_use]
pub fn is_banner_container(sel: &Selection) -> bool {
    id(sel) == "bannerBox"
        || has_class_word(sel, "bannerBox")
        || has_class_word(sel, "banner-box")
}

// === Level-3 page content rules, in priority order ===

/// Main-content rules for generic level-3 pages. First match wins.
pub static LEVEL3_CONTENT_RULES: &[Rule] = &[
    level3_content_and_content_box,
    level3_content_box_hyphenated,
    level3_content_box,
];

fn level3_content_and_content_box(sel: &Selection) -> bool {
    is_tag(sel, "div") && has_class_word(sel, "content") && has_class_word(sel, "contentBox")
}

fn level3_content_box_hyphenated(sel: &Selection) -> bool {
    is_tag(sel, "div") && has_class_word(sel, "contentBox") && has_class_word(sel, "content-box")
}

fn level3_content_box(sel: &Selection) -> bool {
    is_tag(sel, "div") && has_class_word(sel, "contentBox")
}

// === Article rules ===

/// Main-content rules for long-form articles.
pub static ARTICLE_BODY_RULES: &[Rule] = &[article_body];

fn article_body(sel: &Selection) -> bool {
    is_tag(sel, "div") && has_class_word(sel, "article-body")
}

/// Subhead paragraph.
#[must_use]
pub fn is_subhead(sel: &Selection) -> bool {
    is_tag(sel, "p") && has_class_word(sel, "subhead")
}

/// Author vcard paragraph.
#[must_use]
pub fn is_author_vcard(sel: &Selection) -> bool {
    is_tag(sel, "p") && has_class_word(sel, "vcard")
}

/// Date paragraph.
#[must_use]
pub fn is_date_paragraph(sel: &Selection) -> bool {
    is_tag(sel, "p") && has_class_word(sel, "date")
}

/// Campus-message block.
#[must_use]
pub fn is_campus_message(sel: &Selection) -> bool {
    is_tag(sel, "div") && has_class_word(sel, "campus-message")
}

/// Article figure carrying an inline image.
#[must_use]
pub fn is_article_figure(sel: &Selection) -> bool {
    is_tag(sel, "figure") && has_class_word(sel, "article-image")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_returns_first_in_document_order() {
        let doc = dom::parse(
            r#"<div><section><p class="target">deep</p></section><p class="target">shallow</p></div>"#,
        );
        let root = doc.select("div");

        fn is_target(sel: &Selection) -> bool {
            has_class_word(sel, "target")
        }

        let found = query(&root, is_target).unwrap();
        assert_eq!(dom::text_content(&found), "deep".into());
    }

    #[test]
    fn query_all_preserves_order() {
        let doc = dom::parse(r#"<div><p class="t">1</p><span><p class="t">2</p></span><p class="t">3</p></div>"#);
        let root = doc.select("div");

        fn is_t(sel: &Selection) -> bool {
            has_class_word(sel, "t")
        }

        let found = query_all(&root, is_t);
        let texts: Vec<String> =
            found.iter().map(|s| dom::text_content(s).to_string()).collect();
        assert_eq!(texts, ["1", "2", "3"]);
    }

    #[test]
    fn first_rule_with_a_match_wins() {
        // Rule one has no match; rule three would also match the same div
        // as rule two, but rule two is tried first.
        let doc = dom::parse(
            r#"<div class="contentBox content-box">hyphenated</div>
               <div class="contentBox">plain</div>"#,
        );
        let root = doc.select("html");

        let found = query_first_rule(&root, LEVEL3_CONTENT_RULES).unwrap();
        assert_eq!(dom::text_content(&found), "hyphenated".into());
    }

    #[test]
    fn class_word_matching_is_whole_token() {
        let doc = dom::parse(r#"<div class="contentBoxed">x</div>"#);
        let div = doc.select("div");
        assert!(!has_class_word(&div, "contentBox"));
    }

    #[test]
    fn page_title_requires_h1_and_identifier() {
        let doc = dom::parse(
            r#"<h2 id="title">not h1</h2><h1 class="other">no id</h1><h1 id="title">yes</h1>"#,
        );
        let root = doc.select("body");

        let found = query(&root, is_page_title).unwrap();
        assert_eq!(dom::text_content(&found), "yes".into());
    }

    #[test]
    fn banner_container_matches_id_or_class() {
        let doc = dom::parse(r#"<div id="bannerBox">a</div>"#);
        assert!(is_banner_container(&doc.select("div")));

        let doc = dom::parse(r#"<div class="banner-box wide">a</div>"#);
        assert!(is_banner_container(&doc.select("div")));

        let doc = dom::parse(r#"<div class="banner">a</div>"#);
        assert!(!is_banner_container(&doc.select("div")));
    }
}
