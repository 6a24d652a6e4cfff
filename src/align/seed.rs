//! Seed/diagonal matcher.
//!
//! Narrows a template × candidate comparison to the region with the densest
//! run of shared k-mers before the exact local aligner runs.
//!
//! Conceptually a 0/1 match matrix has one row per candidate k-mer and one
//! column per template k-mer. Its diagonals are numbered
//! `d = i - j + (h - 1)` (template position `i`, candidate position `j`,
//! `h` candidate k-mers), so `d = 0` starts at the bottom-left cell. Instead
//! of materialising the matrix, hits are accumulated straight from the
//! candidate's k-mer index.

use std::ops::Range;

use rustc_hash::FxHashMap;

use crate::error::{AlignError, Result};

/// Positions of every k-mer of one sequence.
#[derive(Clone, Debug)]
pub struct SeedIndex<'a> {
    k: usize,
    positions: FxHashMap<&'a [u8], Vec<usize>>,
}

impl<'a> SeedIndex<'a> {
    /// Index all overlapping k-mers of `seq`, positions ascending.
    pub fn build(seq: &'a [u8], k: usize) -> Self {
        let mut positions: FxHashMap<&'a [u8], Vec<usize>> = FxHashMap::default();
        if k > 0 {
            for (pos, kmer) in seq.windows(k).enumerate() {
                positions.entry(kmer).or_default().push(pos);
            }
        }
        Self { k, positions }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Start positions of `kmer`, ascending; empty if absent.
    pub fn positions(&self, kmer: &[u8]) -> &[usize] {
        self.positions.get(kmer).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct k-mers.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// A cell of the match matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coordinate {
    /// Template k-mer position.
    pub template: usize,
    /// Candidate k-mer position.
    pub candidate: usize,
}

/// Hit count of one diagonal with its first and last hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagonalScore {
    pub diagonal: usize,
    pub matches: usize,
    pub first: Coordinate,
    pub last: Coordinate,
}

/// Sub-ranges of template and candidate handed to the exact aligner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedWindow {
    pub template: Range<usize>,
    pub candidate: Range<usize>,
    /// The winning diagonal; `None` when no k-mer is shared and the window
    /// spans both sequences entirely.
    pub diagonal: Option<DiagonalScore>,
}

/// Densest diagonal of the template × candidate match matrix.
///
/// Ties go to the lowest diagonal index. `None` if no k-mer is shared or a
/// sequence is shorter than `k`.
pub fn best_diagonal(template: &[u8], candidate: &[u8], k: usize) -> Option<DiagonalScore> {
    if k == 0 || template.len() < k || candidate.len() < k {
        return None;
    }
    let index = SeedIndex::build(candidate, k);
    let height = candidate.len() - k + 1;
    let width = template.len() - k + 1;

    let mut diagonals: Vec<Option<DiagonalScore>> = vec![None; height + width - 1];
    for (i, kmer) in template.windows(k).enumerate() {
        for &j in index.positions(kmer) {
            let d = i + height - 1 - j;
            let hit = Coordinate {
                template: i,
                candidate: j,
            };
            if let Some(score) = &mut diagonals[d] {
                score.matches += 1;
                score.last = hit;
            } else {
                diagonals[d] = Some(DiagonalScore {
                    diagonal: d,
                    matches: 1,
                    first: hit,
                    last: hit,
                });
            }
        }
    }

    let mut best: Option<DiagonalScore> = None;
    for score in diagonals.into_iter().flatten() {
        if best.map_or(true, |b| score.matches > b.matches) {
            best = Some(score);
        }
    }
    best
}

/// Window around the densest diagonal, widened by `padding` on both ends.
///
/// # Errors
/// [`AlignError::EmptyInput`] if either sequence is empty.
pub fn seed_window(
    template: &[u8],
    candidate: &[u8],
    k: usize,
    padding: usize,
) -> Result<SeedWindow> {
    if template.is_empty() {
        return Err(AlignError::EmptyInput("template"));
    }
    if candidate.is_empty() {
        return Err(AlignError::EmptyInput("candidate sequence"));
    }

    let window = match best_diagonal(template, candidate, k) {
        Some(diag) => SeedWindow {
            template: widen(diag.first.template, diag.last.template + k, padding, template.len()),
            candidate: widen(
                diag.first.candidate,
                diag.last.candidate + k,
                padding,
                candidate.len(),
            ),
            diagonal: Some(diag),
        },
        None => SeedWindow {
            template: 0..template.len(),
            candidate: 0..candidate.len(),
            diagonal: None,
        },
    };
    Ok(window)
}

#[inline]
fn widen(start: usize, end: usize, padding: usize, len: usize) -> Range<usize> {
    start.saturating_sub(padding)..end.saturating_add(padding).min(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_lists_positions_in_order() {
        let index = SeedIndex::build(b"ACACGA", 2);
        assert_eq!(index.positions(b"AC"), &[0, 2]);
        assert_eq!(index.positions(b"CA"), &[1]);
        assert!(index.positions(b"TT").is_empty());
        assert_eq!(index.len(), 4);
        assert!(SeedIndex::build(b"A", 2).is_empty());
    }

    #[test]
    fn densest_diagonal_spans_shared_run() {
        let best = best_diagonal(b"ACGTTGCA", b"TTACGTTGCAGG", 2).unwrap();
        assert_eq!(best.diagonal, 8);
        assert_eq!(best.matches, 7);
        assert_eq!(
            best.first,
            Coordinate {
                template: 0,
                candidate: 2
            }
        );
        assert_eq!(
            best.last,
            Coordinate {
                template: 6,
                candidate: 8
            }
        );
    }

    #[test]
    fn ties_take_lowest_diagonal() {
        // "GG" occurs once in the template and twice in the candidate.
        let best = best_diagonal(b"AAGGCT", b"GGG", 2).unwrap();
        assert_eq!(best.matches, 1);
        assert_eq!(
            best.first,
            Coordinate {
                template: 2,
                candidate: 1
            }
        );
    }

    #[test]
    fn no_shared_kmer() {
        assert!(best_diagonal(b"AAAA", b"CCCC", 2).is_none());
        assert!(best_diagonal(b"A", b"AC", 2).is_none());
    }

    #[test]
    fn window_is_padded_and_clamped() {
        let w = seed_window(b"ACGTTGCA", b"TTACGTTGCAGG", 2, 3).unwrap();
        assert_eq!(w.template, 0..8);
        assert_eq!(w.candidate, 0..12);

        let w = seed_window(b"ACGTTGCA", b"TTACGTTGCAGG", 2, 0).unwrap();
        assert_eq!(w.template, 0..8);
        assert_eq!(w.candidate, 2..10);
    }

    #[test]
    fn window_without_seeds_covers_everything() {
        let w = seed_window(b"AAAA", b"CCC", 2, 3).unwrap();
        assert_eq!(w.template, 0..4);
        assert_eq!(w.candidate, 0..3);
        assert!(w.diagonal.is_none());
    }

    #[test]
    fn window_rejects_empty_inputs() {
        assert_eq!(
            seed_window(b"", b"AC", 2, 0),
            Err(AlignError::EmptyInput("template"))
        );
        assert_eq!(
            seed_window(b"AC", b"", 2, 0),
            Err(AlignError::EmptyInput("candidate sequence"))
        );
    }
}
