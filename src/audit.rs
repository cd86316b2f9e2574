//! Structural and accessibility defect auditing.
//!
//! Three independent checks walk a subtree and capture offending elements
//! as serialized HTML snippets: images missing a source or alt text, anchors
//! missing an href or visible text, and content-bearing tags with nothing
//! inside them. Snippets are owned strings, so a report stays valid after
//! the audited tree is mutated or discarded.
//!
//! The taxonomy is a fixed enumerated set rather than string-keyed maps, so
//! a collaborator matching on categories gets compiler help. A category or
//! type with zero captured snippets is never emitted.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::dom::{self, Selection};

/// Tag names considered content-bearing for the empty-tag check.
const CONTENT_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p", "li"];

/// Defect category identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    ImageCheck,
    LinkCheck,
    TagCheck,
}

impl CategoryKind {
    /// Human-readable category name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ImageCheck => "Image Check",
            Self::LinkCheck => "Link Check",
            Self::TagCheck => "Tag Check",
        }
    }

    /// Stable external key: the name lowercased with spaces as hyphens.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::ImageCheck => "image-check",
            Self::LinkCheck => "link-check",
            Self::TagCheck => "tag-check",
        }
    }
}

/// Defect type identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefectKind {
    MissingSource,
    MissingAltText,
    EmptyLink,
    MissingHref,
    EmptyTag,
}

impl DefectKind {
    /// Human-readable defect name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::MissingSource => "Missing source",
            Self::MissingAltText => "Missing alt text",
            Self::EmptyLink => "Empty link",
            Self::MissingHref => "Missing href",
            Self::EmptyTag => "Empty tag",
        }
    }

    /// Stable external key: the name lowercased with spaces as hyphens.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::MissingSource => "missing-source",
            Self::MissingAltText => "missing-alt-text",
            Self::EmptyLink => "empty-link",
            Self::MissingHref => "missing-href",
            Self::EmptyTag => "empty-tag",
        }
    }
}

/// One defect classification with the snippets it captured.
///
/// Snippets are appended in document order and never deduplicated; two
/// identical offending images yield two identical entries.
#[derive(Debug, Clone)]
pub struct DefectType {
    pub kind: DefectKind,
    pub snippets: Vec<String>,
}

impl DefectType {
    fn new(kind: DefectKind) -> Self {
        Self { kind, snippets: Vec::new() }
    }

    fn capture(&mut self, sel: &Selection) {
        self.snippets.push(dom::outer_html(sel).to_string());
    }
}

impl Serialize for DefectType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("DefectType", 3)?;
        s.serialize_field("name", self.kind.name())?;
        s.serialize_field("slug", self.kind.slug())?;
        s.serialize_field("snippets", &self.snippets)?;
        s.end()
    }
}

/// A named group of populated defect types.
#[derive(Debug, Clone)]
pub struct DefectCategory {
    pub kind: CategoryKind,
    pub types: Vec<DefectType>,
}

impl DefectCategory {
    /// Look up a defect type within this category.
    #[must_use]
    pub fn get(&self, kind: DefectKind) -> Option<&DefectType> {
        self.types.iter().find(|t| t.kind == kind)
    }

    /// Build a category from candidate types, keeping only populated ones.
    /// Returns `None` when nothing was flagged.
    fn from_types(kind: CategoryKind, candidates: Vec<DefectType>) -> Option<Self> {
        let types: Vec<DefectType> =
            candidates.into_iter().filter(|t| !t.snippets.is_empty()).collect();
        if types.is_empty() {
            None
        } else {
            Some(Self { kind, types })
        }
    }
}

impl Serialize for DefectCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("DefectCategory", 3)?;
        s.serialize_field("name", self.kind.name())?;
        s.serialize_field("slug", self.kind.slug())?;
        s.serialize_field("types", &self.types)?;
        s.end()
    }
}

/// Run every check against the subtree, in the fixed order image, link, tag.
///
/// Only populated categories appear in the report, so a subtree without
/// images, anchors, or content tags produces an empty list. Auditing is
/// read-only and idempotent: re-running it on an unchanged tree yields an
/// identical report.
#[must_use]
pub fn audit(root: &Selection) -> Vec<DefectCategory> {
    [image_check(root), link_check(root), tag_check(root)]
        .into_iter()
        .flatten()
        .collect()
}

/// Flag images with a missing/blank `src` or missing/blank `alt`.
///
/// The two flags are independent: one image can appear under both types.
/// "Blank" means the trimmed value is empty, so a lone space or newline
/// counts as blank.
#[must_use]
pub fn image_check(root: &Selection) -> Option<DefectCategory> {
    let mut missing_src = DefectType::new(DefectKind::MissingSource);
    let mut missing_alt = DefectType::new(DefectKind::MissingAltText);

    for node in root.select("img").nodes() {
        let img = Selection::from(*node);

        if attr_blank(&img, "src") {
            missing_src.capture(&img);
        }
        if attr_blank(&img, "alt") {
            missing_alt.capture(&img);
        }
    }

    DefectCategory::from_types(CategoryKind::ImageCheck, vec![missing_src, missing_alt])
}

/// Flag anchors with no visible text or a missing/blank `href`.
///
/// A link is empty when its combined descendant text, tags stripped, trims
/// to nothing; an anchor wrapping only an image is therefore flagged.
#[must_use]
pub fn link_check(root: &Selection) -> Option<DefectCategory> {
    let mut empty_link = DefectType::new(DefectKind::EmptyLink);
    let mut missing_href = DefectType::new(DefectKind::MissingHref);

    for node in root.select("a").nodes() {
        let link = Selection::from(*node);

        if dom::text_content(&link).trim().is_empty() {
            empty_link.capture(&link);
        }
        if attr_blank(&link, "href") {
            missing_href.capture(&link);
        }
    }

    DefectCategory::from_types(CategoryKind::LinkCheck, vec![empty_link, missing_href])
}

/// Flag content-bearing tags (h1-h6, p, li) whose descendant text trims to
/// nothing.
#[must_use]
pub fn tag_check(root: &Selection) -> Option<DefectCategory> {
    let mut empty_tag = DefectType::new(DefectKind::EmptyTag);

    dom::for_each_element(root, |sel| {
        let is_content_tag =
            dom::tag_name(sel).is_some_and(|t| CONTENT_TAGS.contains(&t.as_str()));
        if is_content_tag && dom::text_content(sel).trim().is_empty() {
            empty_tag.capture(sel);
        }
    });

    DefectCategory::from_types(CategoryKind::TagCheck, vec![empty_tag])
}

/// True when the attribute is absent or trims to the empty string.
fn attr_blank(sel: &Selection, name: &str) -> bool {
    match dom::get_attribute(sel, name) {
        Some(value) => value.trim().is_empty(),
        None => true,
    }
}
