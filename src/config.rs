//! TOC generation configuration.
//!
//! A [`TocConfig`] is built once per run, either from the presets, from
//! JSON, or with the builder methods. The output frame's attributes can
//! then override the style lists and the line break policy.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::numbering::{SectionTable, MAX_LEVELS};

/// Frame attribute holding comma-separated heading style names.
pub const HEADING_STYLES_ATTRIBUTE: &str = "heading_styles";

/// Frame attribute holding comma-separated TOC style names.
pub const TOC_STYLES_ATTRIBUTE: &str = "toc_styles";

/// Frame attribute holding the line break policy.
pub const NEW_LINES_ATTRIBUTE: &str = "toc_new_lines";

/// How soft line breaks inside a heading are carried into the TOC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineBreakPolicy {
    /// Keep the heading text as it is
    #[default]
    None,
    /// Replace each soft line break with a single space
    Strip,
    /// Keep only the text before the first soft line break
    Truncate,
}

impl FromStr for LineBreakPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(LineBreakPolicy::None),
            "strip" => Ok(LineBreakPolicy::Strip),
            "truncate" => Ok(LineBreakPolicy::Truncate),
            other => Err(Error::InvalidConfig(format!(
                "unknown line break policy '{}'",
                other
            ))),
        }
    }
}

/// Heading styles and the TOC styles used for each level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleMap {
    /// Paragraph styles marking headings, level 0 first
    pub heading_styles: Vec<String>,

    /// Paragraph styles applied to TOC entries, level 0 first
    pub toc_styles: Vec<String>,
}

impl Default for StyleMap {
    fn default() -> Self {
        Self::with_levels(3)
    }
}

impl StyleMap {
    /// Create a style map from explicit style names.
    pub fn new(heading_styles: Vec<String>, toc_styles: Vec<String>) -> Self {
        Self {
            heading_styles,
            toc_styles,
        }
    }

    /// Default `h1..hN` / `toc1..tocN` styles for `levels` levels.
    pub fn with_levels(levels: usize) -> Self {
        let levels = levels.clamp(1, MAX_LEVELS);
        Self {
            heading_styles: (1..=levels).map(|i| format!("h{}", i)).collect(),
            toc_styles: (1..=levels).map(|i| format!("toc{}", i)).collect(),
        }
    }

    /// Prefix every style name (e.g. `h1` → `_h1`).
    pub fn prefixed(&self, prefix: &str) -> Self {
        Self {
            heading_styles: self
                .heading_styles
                .iter()
                .map(|s| format!("{}{}", prefix, s))
                .collect(),
            toc_styles: self
                .toc_styles
                .iter()
                .map(|s| format!("{}{}", prefix, s))
                .collect(),
        }
    }

    /// Number of heading levels.
    pub fn levels(&self) -> usize {
        self.heading_styles.len()
    }

    /// Heading level of a paragraph style, if it is a heading style.
    pub fn level_of(&self, style: &str) -> Option<usize> {
        self.heading_styles.iter().position(|s| s == style)
    }

    /// TOC style for a heading level.
    pub fn toc_style(&self, level: usize) -> Option<&str> {
        self.toc_styles.get(level).map(String::as_str)
    }

    /// All style names, heading styles first, without duplicates.
    pub fn all_styles(&self) -> Vec<&str> {
        let mut styles: Vec<&str> = Vec::new();
        for style in self.heading_styles.iter().chain(&self.toc_styles) {
            if !styles.contains(&style.as_str()) {
                styles.push(style);
            }
        }
        styles
    }

    /// Check that every heading level has a TOC style.
    pub fn validate(&self) -> Result<()> {
        let levels = self.levels();
        if levels == 0 || levels > MAX_LEVELS {
            return Err(Error::InvalidConfig(format!(
                "{} heading styles configured, expected 1 to {}",
                levels, MAX_LEVELS
            )));
        }
        if self.toc_styles.len() < levels {
            return Err(Error::InvalidConfig(format!(
                "{} heading styles but only {} TOC styles",
                levels,
                self.toc_styles.len()
            )));
        }
        if let Some(empty) = self
            .heading_styles
            .iter()
            .chain(&self.toc_styles)
            .position(|s| s.is_empty())
        {
            return Err(Error::InvalidConfig(format!(
                "style name {} is empty",
                empty + 1
            )));
        }
        Ok(())
    }
}

/// Configuration for a TOC run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// Heading and TOC style names
    #[serde(flatten)]
    pub styles: StyleMap,

    /// Prefix entries with hierarchical chapter numbers
    pub chapter_numbering: bool,

    /// Soft line break handling in heading text
    pub line_breaks: LineBreakPolicy,

    /// Page numbering sections
    pub sections: SectionTable,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            styles: StyleMap::default(),
            chapter_numbering: false,
            line_breaks: LineBreakPolicy::None,
            sections: SectionTable::default(),
        }
    }
}

impl TocConfig {
    /// Create the default configuration: three levels, no chapter numbers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ten heading levels with chapter numbering.
    pub fn extended() -> Self {
        Self {
            styles: StyleMap::with_levels(MAX_LEVELS),
            chapter_numbering: true,
            ..Default::default()
        }
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the style map.
    pub fn with_styles(mut self, styles: StyleMap) -> Self {
        self.styles = styles;
        self
    }

    /// Prefix every configured style name.
    pub fn with_style_prefix(mut self, prefix: &str) -> Self {
        self.styles = self.styles.prefixed(prefix);
        self
    }

    /// Enable or disable chapter numbering.
    pub fn with_chapter_numbering(mut self, enabled: bool) -> Self {
        self.chapter_numbering = enabled;
        self
    }

    /// Set the line break policy.
    pub fn with_line_breaks(mut self, policy: LineBreakPolicy) -> Self {
        self.line_breaks = policy;
        self
    }

    /// Set the page numbering sections.
    pub fn with_sections(mut self, sections: SectionTable) -> Self {
        self.sections = sections;
        self
    }

    /// Apply overrides from the output frame's attributes.
    ///
    /// Unknown attributes are ignored. An unknown line break policy falls
    /// back to [`LineBreakPolicy::None`].
    pub fn with_attributes<'a, I>(&self, attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = self.clone();
        for (name, value) in attributes {
            match name {
                HEADING_STYLES_ATTRIBUTE => {
                    config.styles.heading_styles = split_style_list(value);
                    log::debug!(
                        "heading styles from frame attribute: {:?}",
                        config.styles.heading_styles
                    );
                }
                TOC_STYLES_ATTRIBUTE => {
                    config.styles.toc_styles = split_style_list(value);
                    log::debug!(
                        "TOC styles from frame attribute: {:?}",
                        config.styles.toc_styles
                    );
                }
                NEW_LINES_ATTRIBUTE => {
                    config.line_breaks = value.parse().unwrap_or_else(|e| {
                        log::warn!("{}, keeping heading text as is", e);
                        LineBreakPolicy::None
                    });
                    log::debug!(
                        "line break policy from frame attribute: {:?}",
                        config.line_breaks
                    );
                }
                _ => {}
            }
        }
        Ok(config)
    }

    /// Check the configuration before a run.
    pub fn validate(&self) -> Result<()> {
        self.styles.validate()
    }
}

fn split_style_list(value: &str) -> Vec<String> {
    value.split(',').map(|s| s.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbering::{PageFormat, Section};

    #[test]
    fn test_default_config() {
        let config = TocConfig::default();
        assert_eq!(config.styles.heading_styles, vec!["h1", "h2", "h3"]);
        assert_eq!(config.styles.toc_styles, vec!["toc1", "toc2", "toc3"]);
        assert!(!config.chapter_numbering);
        assert_eq!(config.line_breaks, LineBreakPolicy::None);
        assert_eq!(config.sections.sections().len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_extended_config() {
        let config = TocConfig::extended();
        assert_eq!(config.styles.levels(), 10);
        assert_eq!(config.styles.heading_styles[9], "h10");
        assert_eq!(config.styles.toc_styles[9], "toc10");
        assert!(config.chapter_numbering);
    }

    #[test]
    fn test_builder_pattern() {
        let config = TocConfig::new()
            .with_chapter_numbering(true)
            .with_line_breaks(LineBreakPolicy::Truncate)
            .with_style_prefix("_");

        assert!(config.chapter_numbering);
        assert_eq!(config.line_breaks, LineBreakPolicy::Truncate);
        assert_eq!(config.styles.heading_styles[0], "_h1");
        assert_eq!(config.styles.toc_styles[2], "_toc3");
    }

    #[test]
    fn test_style_lookup() {
        let styles = StyleMap::default();
        assert_eq!(styles.level_of("h1"), Some(0));
        assert_eq!(styles.level_of("h3"), Some(2));
        assert_eq!(styles.level_of("body"), None);
        assert_eq!(styles.toc_style(1), Some("toc2"));
        assert_eq!(styles.toc_style(3), None);
    }

    #[test]
    fn test_all_styles_deduplicated() {
        let styles = StyleMap::new(
            vec!["h1".to_string(), "shared".to_string()],
            vec!["shared".to_string(), "toc2".to_string()],
        );
        assert_eq!(styles.all_styles(), vec!["h1", "shared", "toc2"]);
    }

    #[test]
    fn test_validate_rejects_missing_toc_styles() {
        let styles = StyleMap::new(
            vec!["h1".to_string(), "h2".to_string()],
            vec!["toc1".to_string()],
        );
        assert!(matches!(styles.validate(), Err(Error::InvalidConfig(_))));

        let styles = StyleMap::new(vec![], vec![]);
        assert!(styles.validate().is_err());

        let styles = StyleMap::with_levels(11);
        assert_eq!(styles.levels(), 10);
    }

    #[test]
    fn test_attribute_overrides() {
        let config = TocConfig::default()
            .with_attributes([
                ("heading_styles", "Chapter, Section"),
                ("toc_styles", "TOC Chapter,TOC Section "),
                ("toc_new_lines", "strip"),
                ("unrelated", "value"),
            ])
            .unwrap();

        assert_eq!(config.styles.heading_styles, vec!["Chapter", "Section"]);
        assert_eq!(config.styles.toc_styles, vec!["TOC Chapter", "TOC Section"]);
        assert_eq!(config.line_breaks, LineBreakPolicy::Strip);
    }

    #[test]
    fn test_attribute_unknown_policy() {
        let config = TocConfig::default()
            .with_line_breaks(LineBreakPolicy::Strip)
            .with_attributes([("toc_new_lines", "wrap")])
            .unwrap();
        assert_eq!(config.line_breaks, LineBreakPolicy::None);

        assert!(matches!(
            "wrap".parse::<LineBreakPolicy>(),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_line_break_policy_parse() {
        assert_eq!("".parse::<LineBreakPolicy>().unwrap(), LineBreakPolicy::None);
        assert_eq!(" Truncate ".parse::<LineBreakPolicy>().unwrap(), LineBreakPolicy::Truncate);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "heading_styles": ["Title", "Subtitle"],
            "toc_styles": ["TOC 1", "TOC 2"],
            "chapter_numbering": true,
            "line_breaks": "truncate",
            "sections": [{"end": 3, "format": "i"}, {"end": 0, "format": "1"}]
        }"#;

        let config = TocConfig::from_json(json).unwrap();
        assert_eq!(config.styles.heading_styles, vec!["Title", "Subtitle"]);
        assert!(config.chapter_numbering);
        assert_eq!(config.line_breaks, LineBreakPolicy::Truncate);
        assert_eq!(
            config.sections.sections()[0],
            Section::new(3, PageFormat::RomanLower, 1)
        );
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = TocConfig::from_json(r#"{"chapter_numbering": true}"#).unwrap();
        assert_eq!(config.styles, StyleMap::default());
        assert!(config.chapter_numbering);
    }
}
