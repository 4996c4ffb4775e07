//! Heading discovery.
//!
//! Paragraphs are classified by their paragraph style: a paragraph styled
//! with the i-th heading style becomes a heading at level i. Frames on a
//! page are visited top to bottom, then left to right, so the headings come
//! out in reading order.

use crate::config::{LineBreakPolicy, StyleMap};
use crate::error::Result;
use crate::host::{DocumentHost, FrameInfo, SourceParagraph};
use crate::model::Heading;

/// Frame break control character.
pub const FRAME_BREAK: char = '\u{1a}';

/// Column break control character.
pub const COLUMN_BREAK: char = '\u{1b}';

/// Soft line break (line separator) inside a paragraph.
pub const LINE_BREAK: char = '\u{2028}';

/// Normalize heading text.
///
/// Frame and column breaks are removed; `None` means nothing else was left.
pub fn normalize_title(text: &str, policy: LineBreakPolicy) -> Option<String> {
    let text: String = text
        .chars()
        .filter(|&c| c != FRAME_BREAK && c != COLUMN_BREAK)
        .collect();
    if text.is_empty() {
        return None;
    }

    Some(match policy {
        LineBreakPolicy::None => text,
        LineBreakPolicy::Strip => text.split(LINE_BREAK).collect::<Vec<_>>().join(" "),
        LineBreakPolicy::Truncate => text
            .split(LINE_BREAK)
            .next()
            .unwrap_or_default()
            .to_string(),
    })
}

/// Sort frames into reading order: by vertical, then horizontal position.
pub fn order_frames(frames: &mut [FrameInfo]) {
    frames.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
}

/// Extracts headings from paragraphs by paragraph style.
#[derive(Debug, Clone)]
pub struct HeadingExtractor<'a> {
    styles: &'a StyleMap,
    line_breaks: LineBreakPolicy,
}

impl<'a> HeadingExtractor<'a> {
    /// Create an extractor for the given heading styles.
    pub fn new(styles: &'a StyleMap, line_breaks: LineBreakPolicy) -> Self {
        Self {
            styles,
            line_breaks,
        }
    }

    /// Extract the headings of one frame's paragraphs.
    ///
    /// `page_for_offset` receives the character offset of a heading
    /// paragraph within the frame text and returns its physical page.
    pub fn extract<F>(
        &self,
        paragraphs: &[SourceParagraph],
        mut page_for_offset: F,
    ) -> Result<Vec<Heading>>
    where
        F: FnMut(usize) -> Result<u32>,
    {
        let mut headings = Vec::new();
        let mut offset = 0;

        for para in paragraphs {
            let start = offset;
            offset += para.text.chars().count() + 1;

            let Some(ref style) = para.style else {
                continue;
            };
            let Some(level) = self.styles.level_of(style) else {
                continue;
            };
            let Some(title) = normalize_title(&para.text, self.line_breaks) else {
                log::trace!("skipping break-only paragraph styled '{}'", style);
                continue;
            };

            let page = page_for_offset(start)?;
            log::trace!("heading level {} on page {}: {:?}", level, page, title);
            headings.push(Heading { title, page, level });
        }

        Ok(headings)
    }

    /// Extract all headings of a document, in reading order.
    ///
    /// The frame named by `skip` (the TOC frame itself) is not scanned.
    pub fn scan<H>(&self, host: &H, skip: Option<&str>) -> Result<Vec<Heading>>
    where
        H: DocumentHost + ?Sized,
    {
        let mut headings = Vec::new();

        for page in host.pages() {
            let mut frames = host.text_frames_on_page(page);
            order_frames(&mut frames);

            for frame in frames {
                if skip == Some(frame.id.as_str()) {
                    continue;
                }
                let paragraphs = host.paragraphs(&frame.id)?;
                let found = self.extract(&paragraphs, |offset| {
                    host.page_number_for_position(&frame.id, offset)
                })?;
                log::debug!(
                    "page {}: {} headings in frame '{}'",
                    page,
                    found.len(),
                    frame.id
                );
                headings.extend(found);
            }
        }

        Ok(headings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn styles() -> StyleMap {
        StyleMap::default()
    }

    #[test]
    fn test_extract_by_style() {
        let styles = styles();
        let extractor = HeadingExtractor::new(&styles, LineBreakPolicy::None);
        let paragraphs = vec![
            SourceParagraph::styled("Intro", "h1"),
            SourceParagraph::plain("body text"),
            SourceParagraph::styled("Details", "h2"),
        ];

        let headings = extractor.extract(&paragraphs, |_| Ok(1)).unwrap();

        assert_eq!(
            headings,
            vec![Heading::new("Intro", 1, 0), Heading::new("Details", 1, 1)]
        );
    }

    #[test]
    fn test_unknown_style_ignored() {
        let styles = styles();
        let extractor = HeadingExtractor::new(&styles, LineBreakPolicy::None);
        let paragraphs = vec![
            SourceParagraph::styled("Body", "body"),
            SourceParagraph::styled("Caption", "h4"),
        ];

        assert!(extractor.extract(&paragraphs, |_| Ok(1)).unwrap().is_empty());
    }

    #[test]
    fn test_page_lookup_offsets() {
        let styles = styles();
        let extractor = HeadingExtractor::new(&styles, LineBreakPolicy::None);
        let paragraphs = vec![
            SourceParagraph::styled("One", "h1"),
            SourceParagraph::plain("some body"),
            SourceParagraph::styled("Two", "h2"),
        ];

        let mut offsets = Vec::new();
        extractor
            .extract(&paragraphs, |offset| {
                offsets.push(offset);
                Ok(1)
            })
            .unwrap();

        // "One" + separator, "some body" + separator
        assert_eq!(offsets, vec![0, 14]);
    }

    #[test]
    fn test_offsets_count_characters() {
        let styles = styles();
        let extractor = HeadingExtractor::new(&styles, LineBreakPolicy::None);
        let paragraphs = vec![
            SourceParagraph::plain("Überblick"),
            SourceParagraph::styled("Kapitel", "h1"),
        ];

        let headings = extractor
            .extract(&paragraphs, |offset| Ok(offset as u32))
            .unwrap();
        assert_eq!(headings[0].page, 10);
    }

    #[test]
    fn test_break_only_heading_skipped() {
        let styles = styles();
        let extractor = HeadingExtractor::new(&styles, LineBreakPolicy::None);
        let paragraphs = vec![
            SourceParagraph::styled("\u{1a}", "h1"),
            SourceParagraph::styled("\u{1b}\u{1a}", "h2"),
            SourceParagraph::styled("", "h2"),
            SourceParagraph::styled("Real\u{1a}", "h1"),
        ];

        let headings = extractor.extract(&paragraphs, |_| Ok(2)).unwrap();
        assert_eq!(headings, vec![Heading::new("Real", 2, 0)]);
    }

    #[test]
    fn test_line_break_policies() {
        let text = "First line\u{2028}second line";

        assert_eq!(normalize_title(text, LineBreakPolicy::None).unwrap(), text);
        assert_eq!(
            normalize_title(text, LineBreakPolicy::Strip).unwrap(),
            "First line second line"
        );
        assert_eq!(
            normalize_title(text, LineBreakPolicy::Truncate).unwrap(),
            "First line"
        );
        assert_eq!(normalize_title("\u{1a}", LineBreakPolicy::Strip), None);
    }

    #[test]
    fn test_page_lookup_error_propagates() {
        let styles = styles();
        let extractor = HeadingExtractor::new(&styles, LineBreakPolicy::None);
        let paragraphs = vec![SourceParagraph::styled("Intro", "h1")];

        let err = extractor
            .extract(&paragraphs, |_| Err(Error::Host("frame vanished".to_string())))
            .unwrap_err();
        assert!(matches!(err, Error::Host(_)));
    }

    #[test]
    fn test_order_frames() {
        let mut frames = vec![
            FrameInfo::new("bottom", 10.0, 500.0),
            FrameInfo::new("top-right", 300.0, 40.0),
            FrameInfo::new("top-left", 20.0, 40.0),
        ];
        order_frames(&mut frames);

        let ids: Vec<_> = frames.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["top-left", "top-right", "bottom"]);
    }
}
