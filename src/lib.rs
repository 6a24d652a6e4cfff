//! Pairwise sequence alignment
//!
//! This crate aligns byte sequences (nucleotides, amino acids, any
//! single-byte alphabet) under a pluggable scoring model.
//!
//! ## Core idea
//! 1. Pick a substitution model and a gap scheme, or implement
//!    [`ScoringModel`] directly. Gap costs receive the length of the gap run
//!    so far, so affine and other run-length dependent schemes fit the same
//!    interface.
//! 2. Build an [`AlignEngine`] (directly or through [`EngineBuilder`]).
//! 3. Run one of its operations:
//!    - [`AlignEngine::align_global`]: Needleman–Wunsch with full traceback.
//!    - [`AlignEngine::align_local`]: Smith–Waterman.
//!    - [`AlignEngine::align_linear_space`]: Hirschberg global alignment in
//!      O(m) auxiliary space per recursion level, identical to `align_global`.
//!    - [`AlignEngine::multi_candidate_align`]: best local match of a template
//!      among many candidates, seeded by k-mer diagonals and reduced in
//!      parallel chunks.
//!
//! Equal-scoring moves are resolved diagonal first, then a gap in sequence 2,
//! then a gap in sequence 1, so reported alignments are deterministic.
//!
//! ## Quick start
//! ```
//! use seq_align::{AlignEngine, ConstantGap, MatchMismatch};
//!
//! let engine = AlignEngine::new(MatchMismatch::new(1, -1), ConstantGap(-2));
//! let global = engine.align_global(b"TAGA", b"TCGA").unwrap();
//! assert_eq!(global.aligned1, b"TAGA");
//! assert_eq!(global.aligned2, b"TCGA");
//! assert_eq!(global.score, 2);
//!
//! let best = engine
//!     .multi_candidate_align(b"ACGTTGCA", &["GGGG", "TTACGTTGCAGG", "ACG"])
//!     .unwrap();
//! assert_eq!(best.index, 1);
//! assert_eq!(best.score(), 8);
//! ```
//!
//! ## Features
//! - `parallel` (default): batch chunks run on the `rayon` thread pool.
//! - `tracing`: spans around the top-level operations and
//!   [`observer::TracingObserver`].
//! - `heavy`: long-running stress tests.

pub mod align;
pub mod alignment;
mod batch;
pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;
pub mod partition;
pub mod scoring;
pub mod traits;
pub mod utils;

pub use crate::align::seed::{best_diagonal, Coordinate, DiagonalScore, SeedIndex, SeedWindow};
pub use crate::alignment::{AlignMode, Alignment, BatchHit, GAP_SYMBOL};
pub use crate::builder::{EngineBuilder, EngineConfig};
pub use crate::engine::AlignEngine;
pub use crate::error::{AlignError, Result};
pub use crate::observer::NoopObserver;
#[cfg(feature = "tracing")]
pub use crate::observer::TracingObserver;
pub use crate::scoring::{AffineGap, ConstantGap, MatchMismatch, Scheme, SubstitutionTable};
pub use crate::traits::{AlignObserver, GapScheme, ScoringModel, Substitution};
