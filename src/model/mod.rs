//! Data model for TOC generation.
//!
//! Headings are collected from the document, resolved into TOC entries,
//! and rendered into a [`TocOutput`] that the host writes back.

mod heading;
mod output;

pub use heading::*;
pub use output::*;
