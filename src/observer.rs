//! Observers for alignment progress.
//!
//! The engine carries its observer explicitly; there is no global logging
//! switch. [`NoopObserver`] is the default and compiles away entirely.
//! With the `tracing` feature, [`TracingObserver`] turns every hook into a
//! `tracing` event.

use crate::traits::AlignObserver;

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoopObserver;

impl AlignObserver for NoopObserver {}

/// Observer that forwards events to the `tracing` ecosystem.
#[cfg(feature = "tracing")]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TracingObserver;

#[cfg(feature = "tracing")]
impl AlignObserver for TracingObserver {
    fn table_filled(&self, mode: crate::AlignMode, rows: usize, cols: usize, score: i32) {
        tracing::trace!(mode = mode.as_str(), rows, cols, score, "dp table filled");
    }

    fn split_chosen(&self, depth: usize, mid: usize, split: usize) {
        tracing::trace!(depth, mid, split, "hirschberg split");
    }

    fn seed_window(&self, index: usize, window: &crate::SeedWindow) {
        tracing::debug!(
            index,
            template_start = window.template.start,
            template_end = window.template.end,
            candidate_start = window.candidate.start,
            candidate_end = window.candidate.end,
            seeded = window.diagonal.is_some(),
            "seed window"
        );
    }

    fn chunk_reduced(&self, level: usize, chunk: usize, winner: Option<&crate::BatchHit>) {
        match winner {
            Some(hit) => tracing::debug!(
                level,
                chunk,
                index = hit.index,
                score = hit.score(),
                "chunk winner"
            ),
            None => tracing::debug!(level, chunk, "chunk without match"),
        }
    }
}
