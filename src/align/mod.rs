//! Alignment kernels.
//!
//! - [`dp`]: full-table Needleman–Wunsch / Smith–Waterman with traceback.
//! - [`hirschberg`]: linear-space global alignment by divide and conquer.
//! - [`seed`]: k-mer seeding and diagonal scoring used to narrow a search window.
//!
//! All DP kernels share one cell recurrence ([`Kernel::relax`]) so the full
//! table and the linear-space window sweeps can never drift apart.

pub mod dp;
pub mod hirschberg;
pub mod seed;

use crate::alignment::AlignMode;
use crate::error::Result;
use crate::traits::{AlignObserver, ScoringModel};

/// Move that produced a DP cell; also the traceback direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Substitution of `seq1[i-1]` by `seq2[j-1]`.
    Diagonal,
    /// `seq1[i-1]` against a gap (gap in sequence 2, horizontal move).
    GapInSeq2,
    /// `seq2[j-1]` against a gap (gap in sequence 1, vertical move).
    GapInSeq1,
    /// Origin, or a local-mode cell clamped to zero.
    Stop,
}

/// One DP cell: cumulative score plus the gap runs open on its best path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub score: i32,
    /// Length of the trailing run of gaps in sequence 1.
    pub gaps1: usize,
    /// Length of the trailing run of gaps in sequence 2.
    pub gaps2: usize,
    pub step: Step,
}

impl Cell {
    pub const ORIGIN: Cell = Cell {
        score: 0,
        gaps1: 0,
        gaps2: 0,
        step: Step::Stop,
    };
}

/// Borrowed view of an engine handed to the kernels.
pub(crate) struct Kernel<'a, M: ?Sized, O: ?Sized> {
    pub model: &'a M,
    pub observer: &'a O,
    pub gap_symbol: u8,
}

impl<M: ?Sized, O: ?Sized> Clone for Kernel<'_, M, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized, O: ?Sized> Copy for Kernel<'_, M, O> {}

impl<'a, M, O> Kernel<'a, M, O>
where
    M: ScoringModel + ?Sized,
    O: AlignObserver + ?Sized,
{
    pub fn new(model: &'a M, observer: &'a O, gap_symbol: u8) -> Self {
        Self {
            model,
            observer,
            gap_symbol,
        }
    }

    /// Consume one more symbol of sequence 1 against a gap.
    #[inline]
    pub(crate) fn extend_gap_in_seq2(&self, from: Cell) -> Cell {
        Cell {
            score: from.score.saturating_add(self.model.gap_cost(from.gaps2)),
            gaps1: 0,
            gaps2: from.gaps2 + 1,
            step: Step::GapInSeq2,
        }
    }

    /// Consume one more symbol of sequence 2 against a gap.
    #[inline]
    pub(crate) fn extend_gap_in_seq1(&self, from: Cell) -> Cell {
        Cell {
            score: from.score.saturating_add(self.model.gap_cost(from.gaps1)),
            gaps1: from.gaps1 + 1,
            gaps2: 0,
            step: Step::GapInSeq1,
        }
    }

    /// Cell `(i, j)` from its three predecessors.
    ///
    /// `diag = (i-1, j-1)`, `up = (i-1, j)`, `left = (i, j-1)`, `a = seq1[i-1]`,
    /// `b = seq2[j-1]`. Precedence on equal scores: diagonal, then gap in
    /// sequence 2, then gap in sequence 1. Local mode clamps negatives to zero.
    /// Scores saturate at the `i32` bounds.
    #[inline]
    pub(crate) fn relax(
        &self,
        a: u8,
        b: u8,
        diag: Cell,
        up: Cell,
        left: Cell,
        mode: AlignMode,
    ) -> Result<Cell> {
        let mut best = Cell {
            score: diag.score.saturating_add(self.model.substitution_score(a, b)?),
            gaps1: 0,
            gaps2: 0,
            step: Step::Diagonal,
        };
        let horizontal = self.extend_gap_in_seq2(up);
        if horizontal.score > best.score {
            best = horizontal;
        }
        let vertical = self.extend_gap_in_seq1(left);
        if vertical.score > best.score {
            best = vertical;
        }
        if mode == AlignMode::Local && best.score < 0 {
            best = Cell::ORIGIN;
        }
        Ok(best)
    }
}
