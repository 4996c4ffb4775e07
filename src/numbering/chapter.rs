//! Hierarchical chapter numbering.
//!
//! Counters are advanced once per heading, in document order. A heading
//! whose ancestors never appeared gets "virtual" ancestors numbered 1, so a
//! lone third-level heading is numbered `1.1.1` rather than `0.0.1`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum number of heading levels that can be numbered.
pub const MAX_LEVELS: usize = 10;

/// Chapter counters, one per heading level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterCounters {
    counts: Vec<u32>,
}

impl ChapterCounters {
    /// Create counters for `levels` heading levels, all at zero.
    ///
    /// The number of levels is capped at [`MAX_LEVELS`].
    pub fn new(levels: usize) -> Self {
        Self {
            counts: vec![0; levels.clamp(1, MAX_LEVELS)],
        }
    }

    /// Build counters from explicit values.
    pub fn from_counts(counts: Vec<u32>) -> Self {
        Self { counts }
    }

    /// Number of levels tracked.
    pub fn levels(&self) -> usize {
        self.counts.len()
    }

    /// Current counter values, shallowest level first.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// The counters after a heading at `level`.
    pub fn advance(&self, level: usize) -> Result<Self> {
        if level >= self.counts.len() {
            return Err(Error::InvalidHeadingLevel {
                level,
                levels: self.counts.len(),
            });
        }

        let mut counts = self.counts.clone();
        for count in counts.iter_mut().take(level) {
            if *count == 0 {
                *count = 1;
            }
        }
        counts[level] += 1;
        for count in counts.iter_mut().skip(level + 1) {
            *count = 0;
        }

        Ok(Self { counts })
    }

    /// Dotted chapter number, e.g. `1.2.1`.
    ///
    /// Zero levels are dropped from the text wherever they occur, so
    /// `[1, 1, 0, 1]` renders as `1.1.1`.
    pub fn render(&self) -> String {
        let mut dotted = String::new();
        for count in &self.counts {
            dotted.push_str(&count.to_string());
            dotted.push('.');
        }

        let collapsed = dotted.replace(".0", "");
        collapsed
            .strip_suffix('.')
            .unwrap_or(&collapsed)
            .to_string()
    }
}

impl Default for ChapterCounters {
    fn default() -> Self {
        Self::new(MAX_LEVELS)
    }
}
