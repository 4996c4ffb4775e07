//! Page number formatting per document section.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Roman numeral values, largest first, including the subtractive pairs.
const ROMAN_DIVISORS: [(u64, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Page numbering format of a section.
///
/// Serialized with the single-character codes used by layout programs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageFormat {
    /// 1, 2, 3
    #[default]
    #[serde(rename = "1")]
    Arabic,
    /// i, ii, iii
    #[serde(rename = "i")]
    RomanLower,
    /// I, II, III
    #[serde(rename = "I")]
    RomanUpper,
    /// a, b, c
    #[serde(rename = "a")]
    AlphaLower,
    /// A, B, C
    #[serde(rename = "A")]
    AlphaUpper,
}

impl PageFormat {
    /// The single-character code for this format.
    pub fn code(&self) -> &'static str {
        match self {
            PageFormat::Arabic => "1",
            PageFormat::RomanLower => "i",
            PageFormat::RomanUpper => "I",
            PageFormat::AlphaLower => "a",
            PageFormat::AlphaUpper => "A",
        }
    }

    /// Parse a format from its single-character code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(PageFormat::Arabic),
            "i" => Some(PageFormat::RomanLower),
            "I" => Some(PageFormat::RomanUpper),
            "a" => Some(PageFormat::AlphaLower),
            "A" => Some(PageFormat::AlphaUpper),
            _ => None,
        }
    }
}

impl std::fmt::Display for PageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

fn default_start_number() -> i32 {
    1
}

/// A page range with its own numbering format and start offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Last physical page of the section (0 = to the end of the document)
    #[serde(default, rename = "end")]
    pub end_page: u32,

    /// Numbering format
    #[serde(default)]
    pub format: PageFormat,

    /// Number shown on the first page of the section
    #[serde(default = "default_start_number")]
    pub start_number: i32,
}

impl Default for Section {
    fn default() -> Self {
        Self {
            end_page: 0,
            format: PageFormat::Arabic,
            start_number: 1,
        }
    }
}

impl Section {
    /// Create a new section.
    pub fn new(end_page: u32, format: PageFormat, start_number: i32) -> Self {
        Self {
            end_page,
            format,
            start_number,
        }
    }

    /// Check if the section runs to the end of the document.
    pub fn is_open_ended(&self) -> bool {
        self.end_page == 0
    }
}

/// Convert a number to uppercase Roman numerals.
///
/// Zero yields an empty string.
pub fn int_to_roman(mut number: u64) -> String {
    let mut roman = String::new();
    for (divisor, symbol) in ROMAN_DIVISORS {
        let quotient = number / divisor;
        for _ in 0..quotient {
            roman.push_str(symbol);
        }
        number -= divisor * quotient;
        if number < 1 {
            break;
        }
    }
    roman
}

/// Convert a number to a bijective base-26 letter sequence.
///
/// 1 → "a", 26 → "z", 27 → "aa". Zero yields an empty string.
pub fn int_to_alpha(mut number: u64) -> String {
    let mut letters = Vec::new();
    while number > 0 {
        let rem = (number - 1) % 26;
        letters.push((b'a' + rem as u8) as char);
        number = (number - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Parse Roman numerals in either case.
///
/// Only the canonical form produced by [`int_to_roman`] is accepted, so
/// "IIII" and "IC" yield `None`.
pub fn roman_to_int(roman: &str) -> Option<u64> {
    let upper = roman.to_ascii_uppercase();
    let mut rest = upper.as_str();
    let mut number = 0;
    for (value, symbol) in ROMAN_DIVISORS {
        while let Some(tail) = rest.strip_prefix(symbol) {
            number += value;
            rest = tail;
        }
    }
    if !rest.is_empty() || number == 0 || int_to_roman(number) != upper {
        return None;
    }
    Some(number)
}

/// Parse a bijective base-26 letter sequence in either case.
pub fn alpha_to_int(alpha: &str) -> Option<u64> {
    if alpha.is_empty() {
        return None;
    }
    alpha.chars().try_fold(0u64, |number, c| {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = u64::from(c.to_ascii_lowercase() as u8 - b'a' + 1);
        number.checked_mul(26)?.checked_add(digit)
    })
}

/// Format a physical page for display within a section.
///
/// `section_start` is the first physical page of the section.
pub fn format_page_number(page: u32, section: &Section, section_start: u32) -> Result<String> {
    let n = i64::from(section.start_number) + i64::from(page) - i64::from(section_start);

    if section.format == PageFormat::Arabic {
        return Ok(n.to_string());
    }

    if n < 1 {
        return Err(Error::InvalidPageNumber {
            value: n,
            format: section.format,
        });
    }
    let n = n as u64;

    Ok(match section.format {
        PageFormat::Arabic => n.to_string(),
        PageFormat::RomanUpper => int_to_roman(n),
        PageFormat::RomanLower => int_to_roman(n).to_lowercase(),
        PageFormat::AlphaLower => int_to_alpha(n),
        PageFormat::AlphaUpper => int_to_alpha(n).to_uppercase(),
    })
}

/// Ordered, validated list of document sections.
///
/// A page belongs to the first section whose end page is 0 or not before
/// the page; pages past every closed section fall into the last one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Section>", into = "Vec<Section>")]
pub struct SectionTable {
    sections: Vec<Section>,
}

impl Default for SectionTable {
    fn default() -> Self {
        Self {
            sections: vec![Section::default()],
        }
    }
}

impl SectionTable {
    /// Create a section table, validating the order of the sections.
    pub fn new(sections: Vec<Section>) -> Result<Self> {
        if sections.is_empty() {
            return Err(Error::InvalidSections(
                "at least one section is required".to_string(),
            ));
        }

        let last = sections.len() - 1;
        let mut previous_end = 0;
        for (i, section) in sections.iter().enumerate() {
            if section.is_open_ended() {
                if i != last {
                    return Err(Error::InvalidSections(format!(
                        "section {} runs to the end of the document but is not the last section",
                        i + 1
                    )));
                }
                continue;
            }
            if section.end_page <= previous_end {
                return Err(Error::InvalidSections(format!(
                    "section {} ends on page {}, not after page {}",
                    i + 1,
                    section.end_page,
                    previous_end
                )));
            }
            previous_end = section.end_page;
        }

        Ok(Self { sections })
    }

    /// A table holding a single section that covers the whole document.
    pub fn single(section: Section) -> Self {
        Self {
            sections: vec![Section {
                end_page: 0,
                ..section
            }],
        }
    }

    /// The sections, in page order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Find the section a physical page belongs to, with the section's
    /// first physical page.
    pub fn section_for_page(&self, page: u32) -> (&Section, u32) {
        let mut start = 1;
        let mut last_start = 1;
        for section in &self.sections {
            last_start = start;
            if section.is_open_ended() || section.end_page >= page {
                return (section, start);
            }
            start = section.end_page + 1;
        }
        (self.last(), last_start)
    }

    /// Format a physical page with the numbering of its section.
    pub fn format_page(&self, page: u32) -> Result<String> {
        let (section, start) = self.section_for_page(page);
        format_page_number(page, section, start)
    }

    fn last(&self) -> &Section {
        // Non-empty by construction.
        &self.sections[self.sections.len() - 1]
    }
}

impl TryFrom<Vec<Section>> for SectionTable {
    type Error = Error;

    fn try_from(sections: Vec<Section>) -> Result<Self> {
        Self::new(sections)
    }
}

impl From<SectionTable> for Vec<Section> {
    fn from(table: SectionTable) -> Self {
        table.sections
    }
}
