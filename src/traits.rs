//! Core trait definitions for pluggable scoring and observation.
//!
//! An alignment engine is parameterised by two strategy objects:
//! - a [`ScoringModel`], which answers substitution and gap-cost queries, and
//! - an [`AlignObserver`], which receives progress events and defaults to a no-op.
//!
//! Both are shared read-only across every alignment call, including the
//! concurrent chunks of a batch, hence the `Send + Sync` bounds.
//!
//! Gap costs are queried with the length of the gap run *so far*. The caller
//! (the DP kernels) tracks one run counter for "gap in sequence 1" and one for
//! "gap in sequence 2" per cell, and resets both on a substitution step. The
//! strategy itself never holds mutable counters.

use crate::alignment::{AlignMode, BatchHit};
use crate::align::seed::SeedWindow;
use crate::error::Result;

/// Scoring capability consumed by every aligner.
pub trait ScoringModel: Send + Sync {
    /// Score for aligning symbol `a` (sequence 1) against symbol `b` (sequence 2).
    ///
    /// Fails with [`AlignError::InvalidSymbolPair`](crate::AlignError::InvalidSymbolPair)
    /// when either symbol has no entry.
    fn substitution_score(&self, a: u8, b: u8) -> Result<i32>;

    /// Cost of extending a gap run that currently has `run_len` symbols.
    ///
    /// A run of length `L` therefore costs `gap_cost(0) + ... + gap_cost(L - 1)`.
    fn gap_cost(&self, run_len: usize) -> i32;
}

/// Substitution half of a scoring model.
pub trait Substitution: Send + Sync {
    fn score(&self, a: u8, b: u8) -> Result<i32>;
}

/// Gap half of a scoring model.
pub trait GapScheme: Send + Sync {
    fn gap_cost(&self, run_len: usize) -> i32;
}

impl<F> Substitution for F
where
    F: Fn(u8, u8) -> Result<i32> + Send + Sync,
{
    fn score(&self, a: u8, b: u8) -> Result<i32> {
        self(a, b)
    }
}

impl<F> GapScheme for F
where
    F: Fn(usize) -> i32 + Send + Sync,
{
    fn gap_cost(&self, run_len: usize) -> i32 {
        self(run_len)
    }
}

/// Receives progress events from the aligners.
///
/// Every hook has an empty default body, so implementors only override what
/// they care about. Observers must not influence results.
pub trait AlignObserver: Send + Sync {
    /// A full DP table of `rows × cols` cells was filled.
    fn table_filled(&self, _mode: AlignMode, _rows: usize, _cols: usize, _score: i32) {}

    /// The linear-space aligner split sequence 1 at `mid` and sequence 2 at `split`.
    fn split_chosen(&self, _depth: usize, _mid: usize, _split: usize) {}

    /// The seed matcher narrowed candidate `index` to `window`.
    fn seed_window(&self, _index: usize, _window: &SeedWindow) {}

    /// A batch chunk at reduction `level` produced its winner.
    fn chunk_reduced(&self, _level: usize, _chunk: usize, _winner: Option<&BatchHit>) {}
}
