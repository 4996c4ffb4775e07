//! The document host seam.
//!
//! TOC generation never touches a document directly. Everything it reads
//! (pages, frames, paragraphs, attributes) and everything it writes (styles,
//! frame text) goes through [`DocumentHost`], implemented by the layout
//! program embedding this crate or by [`MemoryDocument`](crate::MemoryDocument).

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Kind of a page object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Frame holding flowed text
    #[default]
    TextFrame,
    /// Frame holding a placed image
    ImageFrame,
    /// Vector shape or polygon
    Shape,
    /// Straight line
    Line,
    /// Table of cells
    Table,
    /// Group of other objects
    Group,
}

impl ObjectKind {
    /// Check if the object holds flowing text.
    pub fn is_text_frame(&self) -> bool {
        matches!(self, ObjectKind::TextFrame)
    }

    /// Returns a human-readable name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::TextFrame => "text frame",
            ObjectKind::ImageFrame => "image frame",
            ObjectKind::Shape => "shape",
            ObjectKind::Line => "line",
            ObjectKind::Table => "table",
            ObjectKind::Group => "group",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A text frame on a page, with its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameInfo {
    /// Frame identifier
    pub id: String,
    /// Horizontal position of the frame's top-left corner
    pub x: f64,
    /// Vertical position of the frame's top-left corner
    pub y: f64,
}

impl FrameInfo {
    /// Create a new frame description.
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
        }
    }
}

/// A paragraph as read from a text frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceParagraph {
    /// Paragraph text, without the paragraph separator
    pub text: String,
    /// Paragraph style, if one is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl SourceParagraph {
    /// Create a paragraph with a style.
    pub fn styled(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Some(style.into()),
        }
    }

    /// Create a paragraph without a style.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }
}

/// Access to the document being processed.
///
/// Offsets and lengths count characters.
pub trait DocumentHost {
    /// Check if a document is open.
    fn has_document(&self) -> bool;

    /// The currently selected object, if any.
    fn selected_object(&self) -> Option<String>;

    /// Kind of an object, or `None` if it does not exist.
    fn object_kind(&self, id: &str) -> Option<ObjectKind>;

    /// Physical pages of the document, in order (1-based).
    fn pages(&self) -> Vec<u32>;

    /// Text frames placed on a page.
    fn text_frames_on_page(&self, page: u32) -> Vec<FrameInfo>;

    /// Paragraphs of a text frame, in order.
    fn paragraphs(&self, frame: &str) -> Result<Vec<SourceParagraph>>;

    /// Physical page showing the character at `offset` in a frame's text.
    fn page_number_for_position(&self, frame: &str, offset: usize) -> Result<u32>;

    /// Name/value attributes attached to an object.
    fn attributes(&self, id: &str) -> Vec<(String, String)>;

    /// Names of the paragraph styles defined in the document.
    fn paragraph_styles(&self) -> Vec<String>;

    /// Define a new, empty paragraph style.
    fn create_paragraph_style(&mut self, name: &str) -> Result<()>;

    /// Remove all text from a frame.
    fn clear_text(&mut self, frame: &str) -> Result<()>;

    /// Append text to a frame.
    fn write_text(&mut self, frame: &str, text: &str) -> Result<()>;

    /// Apply a paragraph style to a character range of a frame.
    fn apply_style(&mut self, frame: &str, start: usize, length: usize, style: &str)
        -> Result<()>;

    /// Called before the document scan; hosts may suspend redrawing.
    fn begin_batch(&mut self) {}

    /// Called after the document scan, also when it failed.
    fn end_batch(&mut self) {}
}
