//! In-memory document host.
//!
//! [`MemoryDocument`] is a plain snapshot of pages, text frames and
//! paragraph styles. It can be built in code or loaded from JSON, and
//! implements [`DocumentHost`] so a TOC can be generated without a layout
//! program.
//!
//! ```
//! use pagetoc::{generate_toc, MemoryDocument, MemoryFrame, TocConfig};
//!
//! let mut doc = MemoryDocument::new(3);
//! doc.add_frame(MemoryFrame::text_frame("toc", 1, 0.0, 0.0));
//! doc.add_frame(MemoryFrame::text_frame("body", 1, 0.0, 100.0).with_paragraph("Intro", Some("h1")));
//!
//! let toc = generate_toc(&mut doc, Some("toc"), &TocConfig::default())?;
//! assert_eq!(toc.text, "Intro\t1");
//! # Ok::<(), pagetoc::Error>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::host::{DocumentHost, FrameInfo, ObjectKind, SourceParagraph};
use crate::model::StyleRange;

/// A paragraph of a [`MemoryFrame`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryParagraph {
    /// Paragraph text
    pub text: String,

    /// Paragraph style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    /// Page the paragraph is shown on, when it differs from the frame's
    /// page (text continued in a linked frame)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// A page object of a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryFrame {
    /// Object identifier
    pub id: String,

    /// Object kind
    #[serde(default)]
    pub kind: ObjectKind,

    /// Page the object is placed on
    pub page: u32,

    /// Horizontal position
    #[serde(default)]
    pub x: f64,

    /// Vertical position
    #[serde(default)]
    pub y: f64,

    /// Text content
    #[serde(default)]
    pub paragraphs: Vec<MemoryParagraph>,

    /// Object attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Style ranges applied since the text was last cleared
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub style_ranges: Vec<StyleRange>,
}

impl MemoryFrame {
    /// Create an empty text frame.
    pub fn text_frame(id: impl Into<String>, page: u32, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            kind: ObjectKind::TextFrame,
            page,
            x,
            y,
            ..Default::default()
        }
    }

    /// Create a non-text object.
    pub fn object(id: impl Into<String>, kind: ObjectKind, page: u32) -> Self {
        Self {
            id: id.into(),
            kind,
            page,
            ..Default::default()
        }
    }

    /// Add a paragraph.
    pub fn with_paragraph(mut self, text: impl Into<String>, style: Option<&str>) -> Self {
        self.paragraphs.push(MemoryParagraph {
            text: text.into(),
            style: style.map(str::to_string),
            page: None,
        });
        self
    }

    /// Add a paragraph shown on another page than the frame's.
    pub fn with_paragraph_on_page(
        mut self,
        text: impl Into<String>,
        style: Option<&str>,
        page: u32,
    ) -> Self {
        self.paragraphs.push(MemoryParagraph {
            text: text.into(),
            style: style.map(str::to_string),
            page: Some(page),
        });
        self
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Frame text, paragraphs separated by `\n`.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Character ranges of the paragraphs, separators excluded.
    fn paragraph_spans(&self) -> Vec<(usize, usize)> {
        let mut spans = Vec::with_capacity(self.paragraphs.len());
        let mut offset = 0;
        for para in &self.paragraphs {
            let len = para.text.chars().count();
            spans.push((offset, offset + len));
            offset += len + 1;
        }
        spans
    }
}

/// An in-memory document snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryDocument {
    /// Set when the document has been closed
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub closed: bool,

    /// Number of pages
    pub page_count: u32,

    /// Page objects
    #[serde(default)]
    pub frames: Vec<MemoryFrame>,

    /// Defined paragraph styles
    #[serde(default)]
    pub styles: Vec<String>,

    /// Selected object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,

    #[serde(skip)]
    batching: bool,
}

impl MemoryDocument {
    /// Create an empty document with the given number of pages.
    pub fn new(page_count: u32) -> Self {
        Self {
            page_count,
            ..Default::default()
        }
    }

    /// Load a document snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert to a pretty-printed JSON snapshot.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add a page object.
    pub fn add_frame(&mut self, frame: MemoryFrame) {
        self.frames.push(frame);
    }

    /// Define a paragraph style.
    pub fn add_style(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.styles.contains(&name) {
            self.styles.push(name);
        }
    }

    /// Select an object.
    pub fn select(&mut self, id: impl Into<String>) {
        self.selection = Some(id.into());
    }

    /// Get a page object by ID.
    pub fn frame(&self, id: &str) -> Option<&MemoryFrame> {
        self.frames.iter().find(|f| f.id == id)
    }

    /// Check if a scan batch is in progress.
    pub fn is_batching(&self) -> bool {
        self.batching
    }

    fn text_frame(&self, id: &str) -> Result<&MemoryFrame> {
        match self.frame(id) {
            Some(frame) if frame.kind.is_text_frame() => Ok(frame),
            Some(frame) => Err(Error::Host(format!("'{}' is a {}", id, frame.kind))),
            None => Err(Error::Host(format!("no object '{}'", id))),
        }
    }

    fn text_frame_mut(&mut self, id: &str) -> Result<&mut MemoryFrame> {
        match self.frames.iter_mut().find(|f| f.id == id) {
            Some(frame) if frame.kind.is_text_frame() => Ok(frame),
            Some(frame) => Err(Error::Host(format!("'{}' is a {}", id, frame.kind))),
            None => Err(Error::Host(format!("no object '{}'", id))),
        }
    }
}

impl DocumentHost for MemoryDocument {
    fn has_document(&self) -> bool {
        !self.closed
    }

    fn selected_object(&self) -> Option<String> {
        self.selection.clone()
    }

    fn object_kind(&self, id: &str) -> Option<ObjectKind> {
        self.frame(id).map(|f| f.kind)
    }

    fn pages(&self) -> Vec<u32> {
        (1..=self.page_count).collect()
    }

    fn text_frames_on_page(&self, page: u32) -> Vec<FrameInfo> {
        self.frames
            .iter()
            .filter(|f| f.page == page && f.kind.is_text_frame())
            .map(|f| FrameInfo::new(f.id.clone(), f.x, f.y))
            .collect()
    }

    fn paragraphs(&self, frame: &str) -> Result<Vec<SourceParagraph>> {
        Ok(self
            .text_frame(frame)?
            .paragraphs
            .iter()
            .map(|p| SourceParagraph {
                text: p.text.clone(),
                style: p.style.clone(),
            })
            .collect())
    }

    fn page_number_for_position(&self, frame: &str, offset: usize) -> Result<u32> {
        let frame = self.text_frame(frame)?;
        let page = frame
            .paragraph_spans()
            .iter()
            .zip(&frame.paragraphs)
            .find(|((_, end), _)| offset <= *end)
            .and_then(|(_, para)| para.page)
            .unwrap_or(frame.page);
        Ok(page)
    }

    fn attributes(&self, id: &str) -> Vec<(String, String)> {
        self.frame(id)
            .map(|f| {
                f.attributes
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn paragraph_styles(&self) -> Vec<String> {
        self.styles.clone()
    }

    fn create_paragraph_style(&mut self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::Host("style name is empty".to_string()));
        }
        self.add_style(name);
        Ok(())
    }

    fn clear_text(&mut self, frame: &str) -> Result<()> {
        let frame = self.text_frame_mut(frame)?;
        frame.paragraphs.clear();
        frame.style_ranges.clear();
        Ok(())
    }

    fn write_text(&mut self, frame: &str, text: &str) -> Result<()> {
        let frame = self.text_frame_mut(frame)?;
        let mut parts = text.split('\n');
        let first = parts.next().unwrap_or_default();

        match frame.paragraphs.last_mut() {
            Some(last) => last.text.push_str(first),
            None => frame.paragraphs.push(MemoryParagraph {
                text: first.to_string(),
                ..Default::default()
            }),
        }
        for part in parts {
            frame.paragraphs.push(MemoryParagraph {
                text: part.to_string(),
                ..Default::default()
            });
        }
        Ok(())
    }

    fn apply_style(&mut self, frame: &str, start: usize, length: usize, style: &str) -> Result<()> {
        if !self.styles.iter().any(|s| s == style) {
            return Err(Error::Host(format!("unknown paragraph style '{}'", style)));
        }

        let frame = self.text_frame_mut(frame)?;
        let end = start + length;
        let spans = frame.paragraph_spans();
        for (para, (para_start, para_end)) in frame.paragraphs.iter_mut().zip(spans) {
            if start <= para_end && end >= para_start {
                para.style = Some(style.to_string());
            }
        }
        frame.style_ranges.push(StyleRange::new(start, length, style));
        Ok(())
    }

    fn begin_batch(&mut self) {
        self.batching = true;
    }

    fn end_batch(&mut self) {
        self.batching = false;
    }
}
