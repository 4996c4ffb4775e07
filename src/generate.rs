//! TOC generation entry point.

use crate::config::{StyleMap, TocConfig};
use crate::error::{Error, Result};
use crate::extract::HeadingExtractor;
use crate::host::DocumentHost;
use crate::model::TocOutput;
use crate::render::render_toc;

/// Generate a table of contents into a text frame.
///
/// `output` names the TOC frame; `None` uses the host's selection. The
/// frame's attributes may override the configured styles and line break
/// policy. Missing styles are created.
///
/// Nothing is written to the TOC frame unless every heading was found and
/// rendered, so a failed run leaves the previous TOC in place.
pub fn generate_toc<H>(host: &mut H, output: Option<&str>, config: &TocConfig) -> Result<TocOutput>
where
    H: DocumentHost + ?Sized,
{
    if !host.has_document() {
        return Err(Error::NoActiveDocument);
    }

    let target = match output {
        Some(id) => id.to_string(),
        None => host.selected_object().ok_or(Error::NoOutputTargetSelected)?,
    };
    match host.object_kind(&target) {
        None => return Err(Error::NoOutputTargetSelected),
        Some(kind) if !kind.is_text_frame() => {
            return Err(Error::InvalidOutputTargetType(kind.to_string()))
        }
        Some(_) => {}
    }

    let attributes = host.attributes(&target);
    let config = config
        .with_attributes(attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
    config.validate()?;
    log::info!(
        "generating TOC into frame '{}' ({} levels, chapter numbering {})",
        target,
        config.styles.levels(),
        if config.chapter_numbering { "on" } else { "off" }
    );

    ensure_styles(host, &config.styles)?;

    host.begin_batch();
    let scanned =
        HeadingExtractor::new(&config.styles, config.line_breaks).scan(&*host, Some(&target));
    host.end_batch();
    let headings = scanned?;
    log::debug!("found {} headings", headings.len());

    let toc = render_toc(&headings, &config)?;
    write_toc(host, &target, &toc)?;

    log::info!("wrote {} TOC entries to '{}'", toc.len(), target);
    Ok(toc)
}

/// Create every heading and TOC style the document does not define yet.
pub fn ensure_styles<H>(host: &mut H, styles: &StyleMap) -> Result<()>
where
    H: DocumentHost + ?Sized,
{
    let existing = host.paragraph_styles();
    for style in styles.all_styles() {
        if existing.iter().any(|s| s == style) {
            continue;
        }
        log::debug!("creating paragraph style '{}'", style);
        host.create_paragraph_style(style).map_err(|e| {
            log::warn!("cannot create paragraph style '{}': {}", style, e);
            Error::UnresolvableStyle(style.to_string())
        })?;
    }
    Ok(())
}

/// Replace the frame's text with the TOC and style each entry.
fn write_toc<H>(host: &mut H, target: &str, toc: &TocOutput) -> Result<()>
where
    H: DocumentHost + ?Sized,
{
    host.clear_text(target)?;
    host.write_text(target, &toc.text)?;
    for range in &toc.style_ranges {
        host.apply_style(target, range.start, range.length, &range.style)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ObjectKind;
    use crate::memory::{MemoryDocument, MemoryFrame};

    fn document() -> MemoryDocument {
        let mut doc = MemoryDocument::new(3);
        doc.add_frame(MemoryFrame::text_frame("toc", 1, 0.0, 0.0).with_paragraph("old toc", None));
        doc.add_frame(
            MemoryFrame::text_frame("ch1", 1, 0.0, 100.0)
                .with_paragraph("A", Some("h1"))
                .with_paragraph("text", None),
        );
        doc.add_frame(MemoryFrame::text_frame("ch2", 3, 0.0, 100.0).with_paragraph("B", Some("h1")));
        doc.add_frame(MemoryFrame::object("photo", ObjectKind::ImageFrame, 2));
        doc
    }

    #[test]
    fn test_generate_into_frame() {
        let mut doc = document();
        let toc = generate_toc(&mut doc, Some("toc"), &TocConfig::default()).unwrap();

        assert_eq!(toc.text, "A\t1\nB\t3");
        assert_eq!(doc.frame("toc").unwrap().text(), "A\t1\nB\t3");
        assert!(!doc.is_batching());
    }

    #[test]
    fn test_generate_uses_selection() {
        let mut doc = document();
        doc.select("toc");
        let toc = generate_toc(&mut doc, None, &TocConfig::default()).unwrap();
        assert_eq!(toc.len(), 2);
    }

    #[test]
    fn test_styles_created() {
        let mut doc = document();
        generate_toc(&mut doc, Some("toc"), &TocConfig::default()).unwrap();
        for style in ["h1", "h2", "h3", "toc1", "toc2", "toc3"] {
            assert!(doc.styles.iter().any(|s| s == style), "missing {}", style);
        }
    }

    #[test]
    fn test_precondition_errors() {
        let mut doc = document();
        doc.closed = true;
        assert!(matches!(
            generate_toc(&mut doc, Some("toc"), &TocConfig::default()),
            Err(Error::NoActiveDocument)
        ));

        let mut doc = document();
        assert!(matches!(
            generate_toc(&mut doc, None, &TocConfig::default()),
            Err(Error::NoOutputTargetSelected)
        ));
        assert!(matches!(
            generate_toc(&mut doc, Some("nowhere"), &TocConfig::default()),
            Err(Error::NoOutputTargetSelected)
        ));
        assert!(matches!(
            generate_toc(&mut doc, Some("photo"), &TocConfig::default()),
            Err(Error::InvalidOutputTargetType(_))
        ));

        // Nothing was touched
        assert_eq!(doc.frame("toc").unwrap().text(), "old toc");
        assert!(doc.styles.is_empty());
    }

    #[test]
    fn test_render_failure_keeps_previous_toc() {
        use crate::numbering::{PageFormat, Section, SectionTable};

        let mut doc = document();
        let config = TocConfig::default()
            .with_sections(SectionTable::single(Section::new(0, PageFormat::RomanUpper, -5)));

        let err = generate_toc(&mut doc, Some("toc"), &config).unwrap_err();
        assert!(matches!(err, Error::InvalidPageNumber { .. }));
        assert_eq!(doc.frame("toc").unwrap().text(), "old toc");
        assert!(!doc.is_batching());
    }

    #[test]
    fn test_empty_style_name_rejected() {
        let mut doc = document();
        let toc = doc.frames.iter_mut().find(|f| f.id == "toc").unwrap();
        toc.attributes
            .insert("toc_styles".to_string(), "toc1, ,toc3".to_string());

        let err = generate_toc(&mut doc, Some("toc"), &TocConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
