//! Heading and TOC entry models.

use serde::{Deserialize, Serialize};

/// A heading found in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading text, after break normalization
    pub title: String,

    /// Physical page (1-based)
    pub page: u32,

    /// Heading level (0 = top-level chapter)
    pub level: usize,
}

impl Heading {
    /// Create a new heading.
    pub fn new(title: impl Into<String>, page: u32, level: usize) -> Self {
        Self {
            title: title.into(),
            page,
            level,
        }
    }
}

/// A fully resolved TOC line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Chapter number (when numbering is enabled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Heading text
    pub title: String,

    /// Page number as shown, formatted for the page's section
    pub display_page: String,

    /// Heading level
    pub level: usize,
}

impl TocEntry {
    /// The line as written into the TOC frame.
    pub fn line(&self) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{}\t{}\t{}", prefix, self.title, self.display_page),
            None => format!("{}\t{}", self.title, self.display_page),
        }
    }

    /// Character offset of the title within [`line`](Self::line).
    pub fn title_offset(&self) -> usize {
        self.prefix
            .as_ref()
            .map(|prefix| prefix.chars().count() + 1)
            .unwrap_or(0)
    }
}
