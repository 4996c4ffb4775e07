//! Rendered TOC output.

use serde::{Deserialize, Serialize};

use super::TocEntry;

/// A paragraph style applied to a range of the TOC text.
///
/// Offsets count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRange {
    /// First character of the range
    pub start: usize,

    /// Number of characters
    pub length: usize,

    /// Paragraph style name
    pub style: String,
}

impl StyleRange {
    /// Create a new style range.
    pub fn new(start: usize, length: usize, style: impl Into<String>) -> Self {
        Self {
            start,
            length,
            style: style.into(),
        }
    }

    /// One past the last character of the range.
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// The TOC text with its style directives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocOutput {
    /// Complete TOC text, one line per entry
    pub text: String,

    /// Style ranges, in text order
    pub style_ranges: Vec<StyleRange>,

    /// The entries the text was built from
    pub entries: Vec<TocEntry>,
}

impl TocOutput {
    /// Check if the TOC has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The text covered by a style range.
    pub fn range_text(&self, range: &StyleRange) -> String {
        self.text
            .chars()
            .take(range.end())
            .skip(range.start)
            .collect()
    }
}
