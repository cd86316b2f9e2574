//! DOM operations adapter.
//!
//! Thin wrappers over the `dom_query` crate providing the handful of
//! operations the pipeline needs: parsing, fragment round-trips, attribute
//! access, and text/HTML serialization. Keeping them behind one module
//! gives the rest of the crate a stable, minimal surface.

pub use dom_query::{Document, Selection};
pub use tendril::StrTendril;

/// Parse an HTML string into a document.
///
/// Bare fragments are accepted; the parser supplies the `html`/`head`/`body`
/// scaffolding, and [`body_inner_html`] recovers the fragment afterwards.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Serialize the children of the document's `body`, i.e. the fragment a
/// bare-fragment [`parse`] call wrapped.
#[must_use]
pub fn body_inner_html(doc: &Document) -> String {
    doc.select("body").inner_html().to_string()
}

/// Get an attribute value.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Set an attribute value on every node in the selection.
#[inline]
pub fn set_attribute(sel: &Selection, name: &str, value: &str) {
    sel.set_attr(name, value);
}

/// Check if an attribute exists.
#[inline]
#[must_use]
pub fn has_attribute(sel: &Selection, name: &str) -> bool {
    sel.has_attr(name)
}

/// Get the element's tag name (lowercase).
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

/// Combined text content of the node and its descendants, tags stripped.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Inner HTML of the selection's first node.
#[inline]
#[must_use]
pub fn inner_html(sel: &Selection) -> StrTendril {
    sel.inner_html()
}

/// Outer HTML (open tag, attributes, children, close tag).
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

/// Visit every descendant element of `root` in document order.
///
/// The selection passed to the visitor wraps exactly one node.
pub fn for_each_element<F: FnMut(&Selection)>(root: &Selection, mut visit: F) {
    for node in root.select("*").nodes() {
        let sel = Selection::from(*node);
        visit(&sel);
    }
}
