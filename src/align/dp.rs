//! Full-table dynamic programming: Needleman–Wunsch (global) and
//! Smith–Waterman (local).
//!
//! The table is `(len(seq1) + 1) × (len(seq2) + 1)`; row `i` covers the prefix
//! `seq1[..i]`, column `j` the prefix `seq2[..j]`. Each cell remembers the step
//! that produced it, so the traceback replays the fill's own decisions and the
//! reported path always scores exactly the table value.

use super::{Cell, Kernel, Step};
use crate::alignment::{AlignMode, Alignment};
use crate::error::{AlignError, Result};
use crate::traits::{AlignObserver, ScoringModel};

/// Dense row-major DP table.
#[derive(Clone, Debug)]
pub(crate) struct DpTable {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl DpTable {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::ORIGIN; rows * cols],
        }
    }

    #[inline]
    pub fn at(&self, i: usize, j: usize) -> Cell {
        self.cells[i * self.cols + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, cell: Cell) {
        self.cells[i * self.cols + j] = cell;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

impl<M, O> Kernel<'_, M, O>
where
    M: ScoringModel + ?Sized,
    O: AlignObserver + ?Sized,
{
    /// Fill the table and return it with the traceback start cell.
    ///
    /// Global mode starts from the bottom-right cell. Local mode starts from the
    /// first maximal cell in fill order (rows outer, columns inner).
    pub(crate) fn fill(
        &self,
        seq1: &[u8],
        seq2: &[u8],
        mode: AlignMode,
    ) -> Result<(DpTable, (usize, usize))> {
        let rows = seq1.len() + 1;
        let cols = seq2.len() + 1;
        let mut table = DpTable::new(rows, cols);

        if mode == AlignMode::Global {
            for i in 1..rows {
                let cell = self.extend_gap_in_seq2(table.at(i - 1, 0));
                table.set(i, 0, cell);
            }
            for j in 1..cols {
                let cell = self.extend_gap_in_seq1(table.at(0, j - 1));
                table.set(0, j, cell);
            }
        }

        let mut best = (0usize, 0usize);
        let mut best_score = 0;
        for i in 1..rows {
            let a = seq1[i - 1];
            for j in 1..cols {
                let cell = self.relax(
                    a,
                    seq2[j - 1],
                    table.at(i - 1, j - 1),
                    table.at(i - 1, j),
                    table.at(i, j - 1),
                    mode,
                )?;
                if mode == AlignMode::Local && cell.score > best_score {
                    best_score = cell.score;
                    best = (i, j);
                }
                table.set(i, j, cell);
            }
        }

        let start = match mode {
            AlignMode::Global => (rows - 1, cols - 1),
            AlignMode::Local => best,
        };
        Ok((table, start))
    }

    /// Walk back from `start` following the recorded steps.
    ///
    /// Local mode halts as soon as a zero cell is reached.
    pub(crate) fn traceback(
        &self,
        table: &DpTable,
        seq1: &[u8],
        seq2: &[u8],
        start: (usize, usize),
        mode: AlignMode,
    ) -> Result<Alignment> {
        if table.rows() != seq1.len() + 1 {
            return Err(AlignError::DimensionMismatch {
                expected: seq1.len() + 1,
                found: table.rows(),
            });
        }
        if table.cols() != seq2.len() + 1 {
            return Err(AlignError::DimensionMismatch {
                expected: seq2.len() + 1,
                found: table.cols(),
            });
        }

        let (mut i, mut j) = start;
        let score = table.at(i, j).score;
        let mut row1 = Vec::with_capacity(i + j);
        let mut row2 = Vec::with_capacity(i + j);

        loop {
            let cell = table.at(i, j);
            if mode == AlignMode::Local && cell.score == 0 {
                break;
            }
            match cell.step {
                Step::Diagonal => {
                    row1.push(seq1[i - 1]);
                    row2.push(seq2[j - 1]);
                    i -= 1;
                    j -= 1;
                }
                Step::GapInSeq2 => {
                    row1.push(seq1[i - 1]);
                    row2.push(self.gap_symbol);
                    i -= 1;
                }
                Step::GapInSeq1 => {
                    row1.push(self.gap_symbol);
                    row2.push(seq2[j - 1]);
                    j -= 1;
                }
                Step::Stop => break,
            }
        }

        row1.reverse();
        row2.reverse();
        Ok(Alignment {
            aligned1: row1,
            aligned2: row2,
            score,
        })
    }

    /// Align two non-empty sequences in `mode`.
    pub(crate) fn align(&self, seq1: &[u8], seq2: &[u8], mode: AlignMode) -> Result<Alignment> {
        if seq1.is_empty() {
            return Err(AlignError::EmptyInput("sequence 1"));
        }
        if seq2.is_empty() {
            return Err(AlignError::EmptyInput("sequence 2"));
        }

        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!(
            "dp_align",
            mode = mode.as_str(),
            len1 = seq1.len(),
            len2 = seq2.len()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let (table, start) = self.fill(seq1, seq2, mode)?;
        let alignment = self.traceback(&table, seq1, seq2, start, mode)?;
        self.observer
            .table_filled(mode, table.rows(), table.cols(), alignment.score);
        Ok(alignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;
    use crate::scoring::{ConstantGap, MatchMismatch, Scheme};

    fn run(seq1: &[u8], seq2: &[u8], m: i32, x: i32, g: i32, mode: AlignMode) -> Alignment {
        let model = Scheme::new(MatchMismatch::new(m, x), ConstantGap(g));
        Kernel::new(&model, &NoopObserver, b'-')
            .align(seq1, seq2, mode)
            .unwrap()
    }

    #[test]
    fn table_dimensions_follow_inputs() {
        let model = Scheme::new(MatchMismatch::default(), ConstantGap(-1));
        let kernel = Kernel::new(&model, &NoopObserver, b'-');
        let (table, start) = kernel.fill(b"ACG", b"AC", AlignMode::Global).unwrap();
        assert_eq!((table.rows(), table.cols()), (4, 3));
        assert_eq!(start, (3, 2));
        assert_eq!(table.at(3, 0).score, -3);
        assert_eq!(table.at(0, 2).score, -2);
    }

    #[test]
    fn local_boundaries_are_zero() {
        let model = Scheme::new(MatchMismatch::default(), ConstantGap(-1));
        let kernel = Kernel::new(&model, &NoopObserver, b'-');
        let (table, _) = kernel.fill(b"ACG", b"TT", AlignMode::Local).unwrap();
        for i in 0..table.rows() {
            assert_eq!(table.at(i, 0).score, 0);
        }
        for j in 0..table.cols() {
            assert_eq!(table.at(0, j).score, 0);
        }
    }

    #[test]
    fn global_worked_examples() {
        let a = run(b"TAGA", b"TCGA", 1, -1, -2, AlignMode::Global);
        assert_eq!((a.aligned1.as_slice(), a.aligned2.as_slice()), (&b"TAGA"[..], &b"TCGA"[..]));
        assert_eq!(a.score, 2);

        let a = run(b"ATA", b"AA", 1, -1, -1, AlignMode::Global);
        assert_eq!((a.aligned1.as_slice(), a.aligned2.as_slice()), (&b"ATA"[..], &b"A-A"[..]));
        assert_eq!(a.score, 1);
    }

    #[test]
    fn local_without_positive_cell_is_empty() {
        let a = run(b"AAAA", b"TTTT", 1, -1, -1, AlignMode::Local);
        assert!(a.is_empty());
        assert_eq!(a.score, 0);
    }

    #[test]
    fn local_traceback_stops_at_zero() {
        let a = run(b"CTCTGAG", b"TGTCAGT", 2, -2, -1, AlignMode::Local);
        assert_eq!(a.aligned1, b"TCTGAG".to_vec());
        assert_eq!(a.aligned2, b"TC--AG".to_vec());
        assert_eq!(a.score, 6);
    }

    #[test]
    fn traceback_rejects_foreign_table() {
        let model = Scheme::new(MatchMismatch::default(), ConstantGap(-1));
        let kernel = Kernel::new(&model, &NoopObserver, b'-');
        let (table, start) = kernel.fill(b"ACG", b"AC", AlignMode::Global).unwrap();
        let err = kernel
            .traceback(&table, b"AC", b"AC", start, AlignMode::Global)
            .unwrap_err();
        assert_eq!(
            err,
            AlignError::DimensionMismatch {
                expected: 3,
                found: 4
            }
        );
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let model = Scheme::new(MatchMismatch::default(), ConstantGap(-1));
        let kernel = Kernel::new(&model, &NoopObserver, b'-');
        assert_eq!(
            kernel.align(b"", b"A", AlignMode::Global),
            Err(AlignError::EmptyInput("sequence 1"))
        );
        assert_eq!(
            kernel.align(b"A", b"", AlignMode::Local),
            Err(AlignError::EmptyInput("sequence 2"))
        );
    }
}
