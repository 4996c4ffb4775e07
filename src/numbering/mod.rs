//! Page and chapter numbering.
//!
//! Page numbers are resolved per document section (arabic, roman or
//! alphabetic, with a start offset). Chapter numbers are produced by a
//! counter stack threaded through the headings in document order.

mod chapter;
mod page;

pub use chapter::{ChapterCounters, MAX_LEVELS};
pub use page::{
    alpha_to_int, format_page_number, int_to_alpha, int_to_roman, roman_to_int, PageFormat, Section,
    SectionTable,
};
