//! URL rewriting for portable fragments.
//!
//! Email fragments leave the page they came from, so every resource and
//! link reference must survive on its own. [`rewrite_urls`] walks a subtree
//! and resolves each `src`/`href` against the page URL in place. It never
//! fabricates a missing attribute; flagging those is the defect auditor's
//! job, not the rewriter's.

use url::Url;

use crate::dom::{self, Selection};

/// Element/attribute pairs subject to rewriting.
const REWRITE_TARGETS: &[(&str, &str)] = &[
    ("img", "src"),
    ("iframe", "src"),
    ("a", "href"),
    ("link", "href"),
];

/// Resolve every relative `src`/`href` in the subtree against `base`.
///
/// Resolution follows RFC 3986 section 5: relative paths, protocol-relative
/// references, and fragment-only references all join correctly. Attributes
/// that are absent, blank, already absolute, or carry a non-hierarchical
/// scheme (`mailto:`, `data:`, ...) are left untouched. No elements are
/// added or removed.
pub fn rewrite_urls(root: &Selection, base: &Url) {
    for (tag, attr) in REWRITE_TARGETS {
        for node in root.select(tag).nodes() {
            let sel = Selection::from(*node);
            let Some(value) = dom::get_attribute(&sel, attr) else {
                continue;
            };

            let resolved = resolve(&value, base);
            if resolved != value {
                dom::set_attribute(&sel, attr, &resolved);
            }
        }
    }
}

/// Resolve a single reference against a base URL.
///
/// Returns the input unchanged when it is blank, already absolute, carries
/// a non-hierarchical scheme, or fails to join.
#[must_use]
pub fn resolve(reference: &str, base: &Url) -> String {
    let trimmed = reference.trim();

    if trimmed.is_empty() {
        return reference.to_string();
    }

    // Opaque schemes have no business being joined against a page URL.
    if trimmed.starts_with("data:")
        || trimmed.starts_with("javascript:")
        || trimmed.starts_with("mailto:")
        || trimmed.starts_with("tel:")
    {
        return reference.to_string();
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return reference.to_string();
    }

    match base.join(trimmed) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => reference.to_string(),
    }
}
