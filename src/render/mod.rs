//! TOC rendering.
//!
//! Turns the collected headings into the text written to the TOC frame,
//! plus the style ranges applied to each entry's title.
//!
//! # Example
//!
//! ```
//! use pagetoc::{render::render_toc, Heading, TocConfig};
//!
//! let headings = vec![Heading::new("A", 1, 0), Heading::new("B", 3, 0)];
//! let toc = render_toc(&headings, &TocConfig::default())?;
//! assert_eq!(toc.text, "A\t1\nB\t3");
//! # Ok::<(), pagetoc::Error>(())
//! ```

mod toc;

pub use toc::{render_toc, TocRenderer};
