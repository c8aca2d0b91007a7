use std::ops::Range;

use serde::Serialize;

/// Byte-offset span into source text. Start is inclusive, end is exclusive.
///
/// Tokens carry both a span and a precomputed 1-based line/column. The span
/// is what diagnostic rendering labels; line/column is what gets reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a new span from byte offsets.
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start ({start}) must be <= end ({end})");
        Self { start, end }
    }

    /// Zero-length span at `offset`.
    pub fn empty(offset: u32) -> Self {
        Self::new(offset, offset)
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the span is empty (zero-length).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The span as a `usize` range, for slicing and report labels.
    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}
