//! TOC text renderer.

use crate::config::{StyleMap, TocConfig};
use crate::error::{Error, Result};
use crate::model::{Heading, StyleRange, TocEntry, TocOutput};
use crate::numbering::{ChapterCounters, SectionTable};

/// Renders headings into TOC text and per-entry style ranges.
///
/// Each entry becomes one line, `title<TAB>page`, or
/// `number<TAB>title<TAB>page` with chapter numbering. The title of every
/// line is styled with the TOC style of the heading's level.
#[derive(Debug, Clone)]
pub struct TocRenderer<'a> {
    sections: &'a SectionTable,
    styles: &'a StyleMap,
    chapter_numbering: bool,
}

impl<'a> TocRenderer<'a> {
    /// Create a renderer.
    pub fn new(sections: &'a SectionTable, styles: &'a StyleMap, chapter_numbering: bool) -> Self {
        Self {
            sections,
            styles,
            chapter_numbering,
        }
    }

    /// Create a renderer from a run configuration.
    pub fn from_config(config: &'a TocConfig) -> Self {
        Self::new(&config.sections, &config.styles, config.chapter_numbering)
    }

    /// Resolve page numbers and chapter numbers for each heading.
    pub fn entries(&self, headings: &[Heading]) -> Result<Vec<TocEntry>> {
        let mut counters = ChapterCounters::new(self.styles.levels());
        let mut entries = Vec::with_capacity(headings.len());

        for heading in headings {
            let prefix = if self.chapter_numbering {
                counters = counters.advance(heading.level)?;
                Some(counters.render())
            } else {
                None
            };

            entries.push(TocEntry {
                prefix,
                title: heading.title.clone(),
                display_page: self.sections.format_page(heading.page)?,
                level: heading.level,
            });
        }

        Ok(entries)
    }

    /// Render headings into the final TOC text.
    pub fn render(&self, headings: &[Heading]) -> Result<TocOutput> {
        let entries = self.entries(headings)?;

        let mut text = String::new();
        let mut style_ranges = Vec::with_capacity(entries.len());
        let mut position = 0;

        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                text.push('\n');
                position += 1;
            }

            let style = self
                .styles
                .toc_style(entry.level)
                .ok_or(Error::InvalidHeadingLevel {
                    level: entry.level,
                    levels: self.styles.toc_styles.len(),
                })?;
            style_ranges.push(StyleRange::new(
                position + entry.title_offset(),
                entry.title.chars().count(),
                style,
            ));

            let line = entry.line();
            position += line.chars().count();
            text.push_str(&line);
        }

        Ok(TocOutput {
            text,
            style_ranges,
            entries,
        })
    }
}

/// Render headings with the sections, styles and numbering of a configuration.
pub fn render_toc(headings: &[Heading], config: &TocConfig) -> Result<TocOutput> {
    TocRenderer::from_config(config).render(headings)
}
