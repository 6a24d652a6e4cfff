//! Concrete scoring models.
//!
//! - [`MatchMismatch`]: one score for identical symbols, one for everything else.
//! - [`SubstitutionTable`]: an alphabet-restricted lookup table; pairs outside the
//!   alphabet are rejected with [`AlignError::InvalidSymbolPair`].
//! - [`ConstantGap`] and [`AffineGap`]: common gap schemes. Any
//!   `Fn(usize) -> i32` closure is also a [`GapScheme`].
//! - [`Scheme`]: glues one substitution model and one gap scheme into a
//!   [`ScoringModel`].

use crate::error::{AlignError, Result};
use crate::traits::{GapScheme, ScoringModel, Substitution};

/// A substitution model paired with a gap scheme.
#[derive(Clone, Debug)]
pub struct Scheme<S, G> {
    substitution: S,
    gap: G,
}

impl<S: Substitution, G: GapScheme> Scheme<S, G> {
    pub fn new(substitution: S, gap: G) -> Self {
        Self { substitution, gap }
    }

    pub fn substitution(&self) -> &S {
        &self.substitution
    }

    pub fn gap(&self) -> &G {
        &self.gap
    }
}

impl<S: Substitution, G: GapScheme> ScoringModel for Scheme<S, G> {
    #[inline]
    fn substitution_score(&self, a: u8, b: u8) -> Result<i32> {
        self.substitution.score(a, b)
    }

    #[inline]
    fn gap_cost(&self, run_len: usize) -> i32 {
        self.gap.gap_cost(run_len)
    }
}

/// Match/mismatch scoring defined for every byte pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchMismatch {
    pub match_score: i32,
    pub mismatch_score: i32,
}

impl MatchMismatch {
    pub fn new(match_score: i32, mismatch_score: i32) -> Self {
        Self {
            match_score,
            mismatch_score,
        }
    }
}

impl Default for MatchMismatch {
    /// +1 for identical symbols, -1 otherwise.
    fn default() -> Self {
        Self::new(1, -1)
    }
}

impl Substitution for MatchMismatch {
    #[inline]
    fn score(&self, a: u8, b: u8) -> Result<i32> {
        Ok(if a == b {
            self.match_score
        } else {
            self.mismatch_score
        })
    }
}

/// Dense 256×256 lookup restricted to an alphabet.
///
/// Named matrices (BLOSUM62, DNAfull, ...) are built by the caller with
/// [`SubstitutionTable::from_rows`].
#[derive(Clone, Debug)]
pub struct SubstitutionTable {
    alphabet: Vec<u8>,
    scores: Vec<Option<i32>>,
}

impl SubstitutionTable {
    const SIDE: usize = 256;

    #[inline]
    fn slot(a: u8, b: u8) -> usize {
        a as usize * Self::SIDE + b as usize
    }

    /// Build a table by evaluating `f` on every pair of alphabet symbols.
    pub fn from_fn<F>(alphabet: &[u8], f: F) -> Self
    where
        F: Fn(u8, u8) -> i32,
    {
        let mut scores = vec![None; Self::SIDE * Self::SIDE];
        for &a in alphabet {
            for &b in alphabet {
                scores[Self::slot(a, b)] = Some(f(a, b));
            }
        }
        Self {
            alphabet: alphabet.to_vec(),
            scores,
        }
    }

    /// Build a table from square rows ordered like `alphabet`.
    ///
    /// # Errors
    /// [`AlignError::DimensionMismatch`] if the row count or any row length
    /// differs from the alphabet size.
    pub fn from_rows<R: AsRef<[i32]>>(alphabet: &[u8], rows: &[R]) -> Result<Self> {
        if rows.len() != alphabet.len() {
            return Err(AlignError::DimensionMismatch {
                expected: alphabet.len(),
                found: rows.len(),
            });
        }
        let mut scores = vec![None; Self::SIDE * Self::SIDE];
        for (&a, row) in alphabet.iter().zip(rows) {
            let row = row.as_ref();
            if row.len() != alphabet.len() {
                return Err(AlignError::DimensionMismatch {
                    expected: alphabet.len(),
                    found: row.len(),
                });
            }
            for (&b, &score) in alphabet.iter().zip(row) {
                scores[Self::slot(a, b)] = Some(score);
            }
        }
        Ok(Self {
            alphabet: alphabet.to_vec(),
            scores,
        })
    }

    /// Match/mismatch scores restricted to `alphabet`.
    pub fn identity(alphabet: &[u8], match_score: i32, mismatch_score: i32) -> Self {
        Self::from_fn(alphabet, |a, b| {
            if a == b {
                match_score
            } else {
                mismatch_score
            }
        })
    }

    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }
}

impl Substitution for SubstitutionTable {
    #[inline]
    fn score(&self, a: u8, b: u8) -> Result<i32> {
        self.scores[Self::slot(a, b)].ok_or(AlignError::InvalidSymbolPair { a, b })
    }
}

/// The same cost for every gap symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstantGap(pub i32);

impl GapScheme for ConstantGap {
    #[inline]
    fn gap_cost(&self, _run_len: usize) -> i32 {
        self.0
    }
}

/// `open` for the first symbol of a run, `extend` for each further symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AffineGap {
    pub open: i32,
    pub extend: i32,
}

impl GapScheme for AffineGap {
    #[inline]
    fn gap_cost(&self, run_len: usize) -> i32 {
        if run_len == 0 {
            self.open
        } else {
            self.extend
        }
    }
}
