//! Linear-space global alignment (Hirschberg).
//!
//! The global table is never materialised. A sub-problem is a [`Window`]:
//! rows `top..=bottom` and columns `lo..=hi` of the full table, given by its
//! first row and the column just left of it. Sweeping the window row by row
//! reproduces the full table's cells exactly, run counters and recorded steps
//! included, because a cell only depends on cells above and to its left.
//!
//! Each sweep also records, per cell of the lower half, the column at which
//! its traceback path leaves row `mid`. Reading that column from the window's
//! end cell splits the path into two smaller windows that are solved
//! recursively. The reported alignment is therefore the one the full table
//! reports, for every gap scheme. Only a few rows are live per recursion level,
//! so auxiliary space is `O(len(seq2))` per level, recursion depth is
//! `O(log len(seq1))` and total time stays `O(len(seq1) · len(seq2))`.

use super::{Cell, Kernel, Step};
use crate::alignment::{AlignMode, Alignment};
use crate::error::{AlignError, Result};
use crate::traits::{AlignObserver, ScoringModel};

/// Rows `top..=bottom`, columns `lo..=hi` of the global table.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Window<'w> {
    pub top: usize,
    pub bottom: usize,
    pub lo: usize,
    pub hi: usize,
    /// Row `top`, columns `lo..=hi`.
    pub first_row: &'w [Cell],
    /// Column `lo - 1`, rows `top..=bottom`; empty when `lo == 0`.
    pub left: &'w [Cell],
}

impl<'w> Window<'w> {
    fn width(&self) -> usize {
        self.hi - self.lo + 1
    }

    /// Left boundary restricted to rows `top..=row`.
    fn left_until(&self, row: usize) -> &'w [Cell] {
        if self.left.is_empty() {
            self.left
        } else {
            &self.left[..=row - self.top]
        }
    }

    /// Left boundary restricted to rows `row..=bottom`.
    fn left_from(&self, row: usize) -> &'w [Cell] {
        if self.left.is_empty() {
            self.left
        } else {
            &self.left[row - self.top..]
        }
    }
}

impl<M, O> Kernel<'_, M, O>
where
    M: ScoringModel + ?Sized,
    O: AlignObserver + ?Sized,
{
    /// Row 0 of the global table for `seq2`.
    pub(crate) fn first_row(&self, seq2: &[u8]) -> Vec<Cell> {
        let mut row = Vec::with_capacity(seq2.len() + 1);
        row.push(Cell::ORIGIN);
        for j in 0..seq2.len() {
            let cell = self.extend_gap_in_seq1(row[j]);
            row.push(cell);
        }
        row
    }

    /// Compute rows `top + 1..=bottom` of `window`, handing each finished row
    /// to `visit`. Returns row `bottom`.
    pub(crate) fn sweep<F>(
        &self,
        seq1: &[u8],
        seq2: &[u8],
        window: &Window<'_>,
        mut visit: F,
    ) -> Result<Vec<Cell>>
    where
        F: FnMut(usize, &[Cell]),
    {
        let mut prev = window.first_row.to_vec();
        let mut curr = Vec::with_capacity(prev.len());
        for i in window.top + 1..=window.bottom {
            let a = seq1[i - 1];
            curr.clear();
            for j in window.lo..=window.hi {
                let k = j - window.lo;
                let cell = if j == 0 {
                    self.extend_gap_in_seq2(prev[0])
                } else if k == 0 {
                    let row = i - window.top;
                    self.relax(
                        a,
                        seq2[j - 1],
                        window.left[row - 1],
                        prev[0],
                        window.left[row],
                        AlignMode::Global,
                    )?
                } else {
                    self.relax(a, seq2[j - 1], prev[k - 1], prev[k], curr[k - 1], AlignMode::Global)?
                };
                curr.push(cell);
            }
            visit(i, &curr);
            std::mem::swap(&mut prev, &mut curr);
        }
        Ok(prev)
    }

    /// Global alignment of `seq1` and `seq2` in linear space.
    ///
    /// Returns exactly the alignment and score of the full table.
    pub(crate) fn linear_space(&self, seq1: &[u8], seq2: &[u8]) -> Result<Alignment> {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("hirschberg", len1 = seq1.len(), len2 = seq2.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let first_row = self.first_row(seq2);
        if seq1.is_empty() {
            return Ok(Alignment {
                aligned1: vec![self.gap_symbol; seq2.len()],
                aligned2: seq2.to_vec(),
                score: first_row[seq2.len()].score,
            });
        }

        let capacity = seq1.len() + seq2.len();
        let mut out = Columns {
            row1: Vec::with_capacity(capacity),
            row2: Vec::with_capacity(capacity),
        };
        let window = Window {
            top: 0,
            bottom: seq1.len(),
            lo: 0,
            hi: seq2.len(),
            first_row: &first_row,
            left: &[],
        };
        let (_, score) = self.replay(seq1, seq2, window, 0, &mut out)?;
        Ok(Alignment {
            aligned1: out.row1,
            aligned2: out.row2,
            score,
        })
    }

    /// Emit the path columns of rows `top + 1..=bottom` ending at `(bottom, hi)`.
    ///
    /// Returns the column where the path leaves row `top` and the score of the
    /// end cell.
    fn replay(
        &self,
        seq1: &[u8],
        seq2: &[u8],
        window: Window<'_>,
        depth: usize,
        out: &mut Columns,
    ) -> Result<(usize, i32)> {
        if window.bottom - window.top == 1 {
            return self.replay_row(seq1, seq2, window, out);
        }

        let mid = (window.top + window.bottom) / 2;
        let width = window.width();
        let mut mid_row = Vec::new();
        let mut exits = vec![window.lo; width];
        let mut next_exits = vec![window.lo; width];
        let last = self.sweep(seq1, seq2, &window, |i, row| {
            if i == mid {
                mid_row = row.to_vec();
            } else if i > mid {
                for (k, cell) in row.iter().enumerate() {
                    let j = window.lo + k;
                    next_exits[k] = match cell.step {
                        Step::Diagonal if i == mid + 1 => j - 1,
                        Step::Diagonal if k > 0 => exits[k - 1],
                        Step::GapInSeq2 if i == mid + 1 => j,
                        Step::GapInSeq2 => exits[k],
                        Step::GapInSeq1 if k > 0 => next_exits[k - 1],
                        _ => window.lo,
                    };
                }
                std::mem::swap(&mut exits, &mut next_exits);
            }
        })?;

        let end = width - 1;
        let score = last[end].score;
        let split = exits[end];
        if split < window.lo || split > window.hi {
            return Err(AlignError::DimensionMismatch {
                expected: window.hi,
                found: split,
            });
        }
        self.observer.split_chosen(depth, mid, split);

        // Column `split - 1` over rows `mid..=bottom` bounds the lower window.
        let lower_left = if split == window.lo {
            window.left_from(mid).to_vec()
        } else {
            let mut column = Vec::with_capacity(window.bottom - mid + 1);
            column.push(mid_row[split - 1 - window.lo]);
            let strip = Window {
                top: mid,
                bottom: window.bottom,
                lo: window.lo,
                hi: split - 1,
                first_row: &mid_row[..split - window.lo],
                left: window.left_from(mid),
            };
            self.sweep(seq1, seq2, &strip, |_, row| {
                if let Some(&cell) = row.last() {
                    column.push(cell);
                }
            })?;
            column
        };

        let upper = Window {
            top: window.top,
            bottom: mid,
            lo: window.lo,
            hi: split,
            first_row: &window.first_row[..=split - window.lo],
            left: window.left_until(mid),
        };
        let (exit, _) = self.replay(seq1, seq2, upper, depth + 1, out)?;

        let lower = Window {
            top: mid,
            bottom: window.bottom,
            lo: split,
            hi: window.hi,
            first_row: &mid_row[split - window.lo..],
            left: &lower_left,
        };
        self.replay(seq1, seq2, lower, depth + 1, out)?;
        Ok((exit, score))
    }

    /// Single-row window: trace row `bottom` back to where the path enters it.
    fn replay_row(
        &self,
        seq1: &[u8],
        seq2: &[u8],
        window: Window<'_>,
        out: &mut Columns,
    ) -> Result<(usize, i32)> {
        let row = self.sweep(seq1, seq2, &window, |_, _| {})?;
        let a = seq1[window.bottom - 1];
        let mut k = window.width() - 1;
        let mut tail = Vec::new();
        let exit = loop {
            let j = window.lo + k;
            match row[k].step {
                Step::GapInSeq1 if k > 0 => {
                    tail.push((self.gap_symbol, seq2[j - 1]));
                    k -= 1;
                }
                Step::Diagonal => {
                    tail.push((a, seq2[j - 1]));
                    break j - 1;
                }
                Step::GapInSeq2 => {
                    tail.push((a, self.gap_symbol));
                    break j;
                }
                _ => {
                    return Err(AlignError::DimensionMismatch {
                        expected: window.lo,
                        found: j,
                    })
                }
            }
        };

        if window.top == 0 {
            for &b in &seq2[..exit] {
                out.push(self.gap_symbol, b);
            }
        }
        for &(x, y) in tail.iter().rev() {
            out.push(x, y);
        }
        Ok((exit, row[window.width() - 1].score))
    }
}

/// Aligned rows under construction.
struct Columns {
    row1: Vec<u8>,
    row2: Vec<u8>,
}

impl Columns {
    #[inline]
    fn push(&mut self, a: u8, b: u8) {
        self.row1.push(a);
        self.row2.push(b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;
    use crate::scoring::{AffineGap, ConstantGap, MatchMismatch, Scheme};

    #[test]
    fn window_sweep_matches_table_cells() {
        let model = Scheme::new(MatchMismatch::new(2, -1), AffineGap { open: -3, extend: -1 });
        let kernel = Kernel::new(&model, &NoopObserver, b'-');
        let (s, t) = (b"AGTACGCA", b"TATGCC");
        let (table, _) = kernel.fill(s, t, AlignMode::Global).unwrap();

        // rows 3..=7, columns 2..=5
        let first_row: Vec<Cell> = (2..=5).map(|j| table.at(3, j)).collect();
        let left: Vec<Cell> = (3..=7).map(|i| table.at(i, 1)).collect();
        let window = Window {
            top: 3,
            bottom: 7,
            lo: 2,
            hi: 5,
            first_row: &first_row,
            left: &left,
        };
        let mut seen = Vec::new();
        let last = kernel
            .sweep(s, t, &window, |i, row| seen.push((i, row.to_vec())))
            .unwrap();
        for (i, row) in seen {
            let expected: Vec<Cell> = (2..=5).map(|j| table.at(i, j)).collect();
            assert_eq!(row, expected, "row {i}");
        }
        assert_eq!(last[3], table.at(7, 5));
    }

    #[test]
    fn empty_sides_become_all_gap_rows() {
        let model = Scheme::new(MatchMismatch::default(), ConstantGap(-1));
        let kernel = Kernel::new(&model, &NoopObserver, b'-');
        let a = kernel.linear_space(b"", b"ACG").unwrap();
        assert_eq!((a.aligned1, a.aligned2, a.score), (b"---".to_vec(), b"ACG".to_vec(), -3));
        let a = kernel.linear_space(b"AC", b"").unwrap();
        assert_eq!((a.aligned1, a.aligned2, a.score), (b"AC".to_vec(), b"--".to_vec(), -2));
        let a = kernel.linear_space(b"", b"").unwrap();
        assert!(a.is_empty());
        assert_eq!(a.score, 0);
    }

    #[test]
    fn matches_full_table_on_reference_pair() {
        let model = Scheme::new(MatchMismatch::new(2, -1), ConstantGap(-2));
        let kernel = Kernel::new(&model, &NoopObserver, b'-');
        let full = kernel
            .align(b"AGTACGCA", b"TATGC", AlignMode::Global)
            .unwrap();
        let linear = kernel.linear_space(b"AGTACGCA", b"TATGC").unwrap();
        assert_eq!(linear, full);
        assert_eq!(linear.aligned2, b"--TATGC-".to_vec());
    }

    #[test]
    fn gap_run_crossing_the_split_keeps_its_length() {
        let model = Scheme::new(MatchMismatch::new(1, -1), |run: usize| -2 - 2 * run as i32);
        let kernel = Kernel::new(&model, &NoopObserver, b'-');
        let linear = kernel.linear_space(b"AAAA", b"AAAAAAAAAAAA").unwrap();
        assert_eq!(linear.aligned1, b"-A-A-A-A----".to_vec());
        assert_eq!(linear.score, -24);

        let linear = kernel.linear_space(b"AAAAAAAAAAAA", b"AAAA").unwrap();
        let full = kernel
            .align(b"AAAAAAAAAAAA", b"AAAA", AlignMode::Global)
            .unwrap();
        assert_eq!(linear, full);
    }
}
