//! Contiguous slices of a candidate list and their winners.

use std::ops::Range;

use crate::alignment::BatchHit;

/// Chunk `[start, end)` of one reduction level with its best match.
///
/// `winner == None` is the "no match" sentinel; it never wins a reduction.
#[derive(Debug, Clone)]
pub struct BatchPartition {
    pub chunk: usize,
    pub start: usize,
    pub end: usize,
    pub winner: Option<BatchHit>,
}

impl BatchPartition {
    /// Number of candidates covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Split `total` entries into consecutive ranges of at most `chunk_size`.
    pub fn plan(total: usize, chunk_size: usize) -> Vec<Range<usize>> {
        let chunk_size = chunk_size.max(1);
        (0..total)
            .step_by(chunk_size)
            .map(|start| start..(start + chunk_size).min(total))
            .collect()
    }
}
