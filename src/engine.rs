//! Pairwise alignment engine.
//!
//! [`AlignEngine`] owns a [`ScoringModel`], an [`AlignObserver`] and an
//! [`EngineConfig`]. Every operation borrows them read-only, so one engine
//! can serve any number of concurrent callers.

use crate::align::seed::{self, SeedWindow};
use crate::align::Kernel;
use crate::alignment::{AlignMode, Alignment, BatchHit};
use crate::batch::Coordinator;
use crate::builder::{EngineBuilder, EngineConfig};
use crate::error::{AlignError, Result};
use crate::observer::NoopObserver;
use crate::scoring::Scheme;
use crate::traits::{AlignObserver, GapScheme, ScoringModel, Substitution};

/// Global, local, linear-space and batch alignment over one scoring model.
///
/// Typical usage:
/// ```
/// use seq_align::{AlignEngine, ConstantGap, MatchMismatch};
///
/// let engine = AlignEngine::new(MatchMismatch::new(1, -1), ConstantGap(-1));
/// let global = engine.align_global(b"ATA", b"AA").unwrap();
/// assert_eq!(global.aligned1, b"ATA");
/// assert_eq!(global.aligned2, b"A-A");
/// assert_eq!(global.score, 1);
///
/// let linear = engine.align_linear_space(b"ATA", b"AA").unwrap();
/// assert_eq!(linear.score, global.score);
/// ```
pub struct AlignEngine<M, O = NoopObserver> {
    model: M,
    observer: O,
    config: EngineConfig,
}

impl<S: Substitution, G: GapScheme> AlignEngine<Scheme<S, G>> {
    /// Engine over `substitution` and `gap` with the default configuration.
    pub fn new(substitution: S, gap: G) -> Self {
        Self::with_model(Scheme::new(substitution, gap))
    }
}

impl<M: ScoringModel> AlignEngine<M> {
    /// Engine over a pre-composed scoring model.
    pub fn with_model(model: M) -> Self {
        EngineBuilder::new(model).build()
    }

    pub fn builder(model: M) -> EngineBuilder<M> {
        EngineBuilder::new(model)
    }
}

impl<M: ScoringModel, O: AlignObserver> AlignEngine<M, O> {
    pub(crate) fn from_parts(model: M, observer: O, config: EngineConfig) -> Self {
        Self {
            model,
            observer,
            config,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn kernel(&self) -> Kernel<'_, M, O> {
        Kernel::new(&self.model, &self.observer, self.config.gap_symbol)
    }

    /// Full-table alignment in `mode`.
    ///
    /// # Errors
    /// [`AlignError::EmptyInput`] if either sequence is empty, or the scoring
    /// model's error for an undefined symbol pair.
    pub fn align(&self, seq1: &[u8], seq2: &[u8], mode: AlignMode) -> Result<Alignment> {
        self.kernel().align(seq1, seq2, mode)
    }

    /// Needleman–Wunsch.
    pub fn align_global(&self, seq1: &[u8], seq2: &[u8]) -> Result<Alignment> {
        self.align(seq1, seq2, AlignMode::Global)
    }

    /// Smith–Waterman. The result is empty with score 0 when no pair of
    /// symbols scores positively.
    pub fn align_local(&self, seq1: &[u8], seq2: &[u8]) -> Result<Alignment> {
        self.align(seq1, seq2, AlignMode::Local)
    }

    /// Global alignment in space linear in `seq2`.
    ///
    /// Same alignment and score as [`align_global`] for every scoring model.
    ///
    /// [`align_global`]: Self::align_global
    pub fn align_linear_space(&self, seq1: &[u8], seq2: &[u8]) -> Result<Alignment> {
        if seq1.is_empty() {
            return Err(AlignError::EmptyInput("sequence 1"));
        }
        if seq2.is_empty() {
            return Err(AlignError::EmptyInput("sequence 2"));
        }
        self.kernel().linear_space(seq1, seq2)
    }

    /// Best local match of `template` among `candidates`.
    ///
    /// Each candidate is first narrowed with the seed matcher, then aligned
    /// locally inside its window. Equal scores resolve to the lowest index.
    ///
    /// # Errors
    /// [`AlignError::EmptyInput`] for an empty template, candidate list or
    /// candidate. A failing candidate aborts the whole batch; inside a
    /// concurrent chunk the failure is wrapped in
    /// [`AlignError::BatchTaskFailure`].
    pub fn multi_candidate_align<C>(&self, template: &[u8], candidates: &[C]) -> Result<BatchHit>
    where
        C: AsRef<[u8]> + Sync,
    {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "multi_candidate_align",
            template = template.len(),
            candidates = candidates.len()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        Coordinator::new(self.kernel(), &self.config).run(template, candidates)
    }

    /// Seed window the batch coordinator would use for `candidate`.
    pub fn seed_window(&self, template: &[u8], candidate: &[u8]) -> Result<SeedWindow> {
        seed::seed_window(
            template,
            candidate,
            self.config.seed_len,
            self.config.seed_padding,
        )
    }

    /// Score of two aligned rows under this engine's model.
    ///
    /// Gap runs are counted per row and restart after any other column,
    /// exactly as during alignment. Columns with a gap in both rows are ignored.
    /// Every occurrence of the gap symbol counts as a gap, so rows built from
    /// inputs that contain the gap symbol do not rescore to their alignment score.
    ///
    /// # Errors
    /// [`AlignError::DimensionMismatch`] if the rows differ in length.
    pub fn score_alignment(&self, aligned1: &[u8], aligned2: &[u8]) -> Result<i32> {
        if aligned1.len() != aligned2.len() {
            return Err(AlignError::DimensionMismatch {
                expected: aligned1.len(),
                found: aligned2.len(),
            });
        }
        let gap = self.config.gap_symbol;
        let (mut gaps1, mut gaps2) = (0usize, 0usize);
        let mut score = 0i32;
        for (&a, &b) in aligned1.iter().zip(aligned2) {
            match (a == gap, b == gap) {
                (true, true) => {}
                (true, false) => {
                    score = score.saturating_add(self.model.gap_cost(gaps1));
                    gaps1 += 1;
                    gaps2 = 0;
                }
                (false, true) => {
                    score = score.saturating_add(self.model.gap_cost(gaps2));
                    gaps2 += 1;
                    gaps1 = 0;
                }
                (false, false) => {
                    score = score.saturating_add(self.model.substitution_score(a, b)?);
                    gaps1 = 0;
                    gaps2 = 0;
                }
            }
        }
        Ok(score)
    }
}
