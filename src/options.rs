//! Configuration options for the scrape pipeline.

use crate::extract::authors::AuthorRoster;
use crate::inline::StylesheetSource;

/// When the defect auditor runs relative to the rewriting/inlining stages.
///
/// The choice affects the captured snippets, not which defects are found;
/// the checks look at structure, not at URL form or styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuditPoint {
    /// Audit the extracted region before URL rewriting, so captured
    /// snippets show the markup exactly as authored.
    PreRewrite,
    /// Audit the final inlined fragment, so captured snippets show what
    /// the email will actually contain. The default.
    #[default]
    PostInline,
}

/// Configuration for one [`Pipeline`](crate::Pipeline).
///
/// # Example
///
/// ```rust
/// use mailprep::{ScrapeOptions, StylesheetSource};
///
/// let options = ScrapeOptions {
///     stylesheets: vec![StylesheetSource::Inline("p { margin: 0 0 2em; }".into())],
///     ..ScrapeOptions::default()
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScrapeOptions {
    /// Stylesheets applied by the style inliner, in order. Empty means the
    /// inlining stage is a passthrough.
    pub stylesheets: Vec<StylesheetSource>,

    /// Where in the pipeline the defect auditor runs.
    ///
    /// Default: [`AuditPoint::PostInline`]
    pub audit_point: AuditPoint,

    /// Author roster for byline classification in the article template.
    ///
    /// Default: empty roster with a generic fallback byline.
    pub roster: AuthorRoster,
}
