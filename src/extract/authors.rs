//! Author roster and byline classification.
//!
//! Articles carry free-text author names. Known staff names map to their
//! canonical display form; anything else is kept as a distinct guest-author
//! credit while the byline falls back to a fixed organizational name.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Classification of a raw author name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorCredit {
    /// The name matched the roster; `byline` is the canonical form.
    Staff { byline: String },
    /// Unrecognized name: the byline is the roster's fallback and the raw
    /// name is preserved separately.
    Guest { byline: String, guest: String },
}

/// Case-insensitive mapping from known author names to canonical display
/// forms, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AuthorRoster {
    // Keys are stored lowercased.
    canonical: HashMap<String, String>,
    fallback_byline: String,
}

/// On-disk roster format.
#[derive(Debug, Deserialize)]
struct RosterFile {
    fallback_byline: String,
    #[serde(default)]
    authors: HashMap<String, String>,
}

impl Default for AuthorRoster {
    fn default() -> Self {
        Self::new("Staff")
    }
}

impl AuthorRoster {
    /// Empty roster with the given fallback byline for unmatched names.
    #[must_use]
    pub fn new(fallback_byline: impl Into<String>) -> Self {
        Self {
            canonical: HashMap::new(),
            fallback_byline: fallback_byline.into(),
        }
    }

    /// Register a name and its canonical display form.
    pub fn insert(&mut self, name: &str, canonical: &str) {
        self.canonical
            .insert(name.trim().to_lowercase(), canonical.to_string());
    }

    /// Load a roster from a JSON file:
    ///
    /// ```json
    /// { "fallback_byline": "Newsroom", "authors": { "j. public": "Jane Q. Public" } }
    /// ```
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read roster {}: {e}", path.display()))
        })?;
        let file: RosterFile = serde_json::from_str(&raw).map_err(|e| {
            Error::Config(format!("cannot parse roster {}: {e}", path.display()))
        })?;

        let mut roster = Self::new(file.fallback_byline);
        for (name, canonical) in &file.authors {
            roster.insert(name, canonical);
        }
        Ok(roster)
    }

    /// Classify a raw author name against the roster.
    #[must_use]
    pub fn classify(&self, raw: &str) -> AuthorCredit {
        let trimmed = raw.trim();
        match self.canonical.get(&trimmed.to_lowercase()) {
            Some(canonical) => AuthorCredit::Staff {
                byline: canonical.clone(),
            },
            None => AuthorCredit::Guest {
                byline: self.fallback_byline.clone(),
                guest: trimmed.to_string(),
            },
        }
    }
}
