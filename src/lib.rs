//! # pagetoc
//!
//! Table of contents generation for paginated, style-driven documents.
//!
//! Headings are found by paragraph style across every page of a document,
//! numbered per page section (arabic, roman or alphabetic) and, optionally,
//! with hierarchical chapter numbers. The result is written into a text
//! frame, with a TOC style applied to each entry.
//!
//! The document itself is reached through the [`DocumentHost`] trait, so
//! the same engine runs inside a layout program or over an in-memory
//! [`MemoryDocument`].
//!
//! ## Quick Start
//!
//! ```
//! use pagetoc::{generate_toc, MemoryDocument, MemoryFrame, TocConfig};
//!
//! let mut doc = MemoryDocument::new(3);
//! doc.add_frame(MemoryFrame::text_frame("toc", 1, 20.0, 20.0));
//! doc.add_frame(MemoryFrame::text_frame("intro", 1, 20.0, 300.0).with_paragraph("A", Some("h1")));
//! doc.add_frame(MemoryFrame::text_frame("body", 3, 20.0, 20.0).with_paragraph("B", Some("h1")));
//!
//! let toc = generate_toc(&mut doc, Some("toc"), &TocConfig::default())?;
//! assert_eq!(toc.text, "A\t1\nB\t3");
//! # Ok::<(), pagetoc::Error>(())
//! ```
//!
//! ## Chapter Numbers and Sections
//!
//! ```
//! use pagetoc::{render::render_toc, Heading, PageFormat, Section, SectionTable, TocConfig};
//!
//! let sections = SectionTable::new(vec![
//!     Section::new(2, PageFormat::RomanLower, 1),
//!     Section::new(0, PageFormat::Arabic, 1),
//! ])?;
//! let config = TocConfig::default()
//!     .with_chapter_numbering(true)
//!     .with_sections(sections);
//!
//! let headings = vec![Heading::new("Preface", 2, 0), Heading::new("Scope", 3, 1)];
//! let toc = render_toc(&headings, &config)?;
//! assert_eq!(toc.text, "1\tPreface\tii\n1.1\tScope\t1");
//! # Ok::<(), pagetoc::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod generate;
pub mod host;
pub mod memory;
pub mod model;
pub mod numbering;
pub mod render;

// Re-exports
pub use config::{LineBreakPolicy, StyleMap, TocConfig};
pub use error::{Error, Result};
pub use extract::HeadingExtractor;
pub use generate::{ensure_styles, generate_toc};
pub use host::{DocumentHost, FrameInfo, ObjectKind, SourceParagraph};
pub use memory::{MemoryDocument, MemoryFrame, MemoryParagraph};
pub use model::{Heading, StyleRange, TocEntry, TocOutput};
pub use numbering::{ChapterCounters, PageFormat, Section, SectionTable};
pub use render::TocRenderer;

/// Generate a TOC for a JSON document snapshot.
///
/// Returns the TOC and the updated snapshot.
///
/// # Example
///
/// ```
/// use pagetoc::{generate_from_json, TocConfig};
///
/// let snapshot = r#"{
///     "page_count": 2,
///     "selection": "toc",
///     "frames": [
///         {"id": "toc", "page": 1},
///         {"id": "body", "page": 2, "paragraphs": [{"text": "Results", "style": "h1"}]}
///     ]
/// }"#;
///
/// let (toc, _) = generate_from_json(snapshot, &TocConfig::default())?;
/// assert_eq!(toc.text, "Results\t2");
/// # Ok::<(), pagetoc::Error>(())
/// ```
pub fn generate_from_json(snapshot: &str, config: &TocConfig) -> Result<(TocOutput, String)> {
    let mut doc = MemoryDocument::from_json(snapshot)?;
    let toc = generate_toc(&mut doc, None, config)?;
    Ok((toc, doc.to_json()?))
}
