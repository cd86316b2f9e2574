//! Per-element style inlining for email delivery.
//!
//! Email clients ignore `<style>` blocks, so the cascade has to be computed
//! ahead of time and written into each element's `style` attribute. The
//! cascade computation itself is delegated to an external resolver (HTML +
//! CSS in, HTML with inlined styles out); this module's own job is loading
//! the configured stylesheets, giving the resolver the full-document context
//! it needs, and recovering the target fragment afterwards.

use std::fs;
use std::path::PathBuf;

use crate::dom;
use crate::error::{Error, Result};

/// Marker id used to find the fragment again inside the resolver's output.
const WRAPPER_ID: &str = "inline-scope";

/// A configured stylesheet input.
///
/// Stylesheets are a configuration concern, never discovered dynamically
/// from the fetched page.
#[derive(Debug, Clone)]
pub enum StylesheetSource {
    /// Read the stylesheet from a file path.
    File(PathBuf),
    /// Use the string as CSS directly.
    Inline(String),
}

impl StylesheetSource {
    /// Load the CSS text for this source.
    pub fn load(&self) -> Result<String> {
        match self {
            Self::File(path) => fs::read_to_string(path).map_err(|e| {
                Error::StyleResolution(format!("cannot read stylesheet {}: {e}", path.display()))
            }),
            Self::Inline(css) => Ok(css.clone()),
        }
    }
}

/// The external cascade resolver.
///
/// Implementations take a complete HTML document plus stylesheet text and
/// return the document with computed declarations written into each
/// element's `style` attribute. Pre-existing inline styles must win the
/// cascade. Partial output is not allowed: any parse failure is an error.
pub trait StyleResolver {
    fn resolve(&self, html: &str, css: &str) -> Result<String>;
}

/// Resolver backed by the `css-inline` crate.
///
/// Remote stylesheet loading is disabled; all CSS arrives through the
/// configured [`StylesheetSource`] list.
#[derive(Debug, Default)]
pub struct CascadeInliner;

impl StyleResolver for CascadeInliner {
    fn resolve(&self, html: &str, css: &str) -> Result<String> {
        let options = css_inline::InlineOptions {
            load_remote_stylesheets: false,
            extra_css: Some(css.into()),
            ..css_inline::InlineOptions::default()
        };
        css_inline::CSSInliner::new(options)
            .inline(html)
            .map_err(|e| Error::StyleResolution(e.to_string()))
    }
}

/// Inline the configured stylesheets into an HTML fragment.
///
/// The fragment is wrapped in a complete document before resolution because
/// class/id selectors may depend on ancestor context the bare fragment lacks,
/// and the wrapper's children are re-extracted from the transformed output.
/// Returns the fragment unchanged when no stylesheet sources are configured.
pub fn inline_fragment(
    fragment: &str,
    sources: &[StylesheetSource],
    resolver: &dyn StyleResolver,
) -> Result<String> {
    if sources.is_empty() {
        return Ok(fragment.to_string());
    }

    let mut css = String::new();
    for source in sources {
        css.push_str(&source.load()?);
        css.push('\n');
    }

    let document =
        format!("<html><head></head><body><div id=\"{WRAPPER_ID}\">{fragment}</div></body></html>");
    let resolved = resolver.resolve(&document, &css)?;

    let doc = dom::parse(&resolved);
    let scope = doc.select(&format!("#{WRAPPER_ID}"));
    if scope.is_empty() {
        return Err(Error::StyleResolution(
            "resolver output lost the fragment wrapper".to_string(),
        ));
    }

    Ok(dom::inner_html(&scope).to_string())
}
