//! Engine configuration and builder.

use crate::alignment::GAP_SYMBOL;
use crate::engine::AlignEngine;
use crate::observer::NoopObserver;
use crate::traits::{AlignObserver, ScoringModel};

/// Candidates per concurrent batch chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 1_000;
/// Candidate lists shorter than this are processed sequentially.
pub const DEFAULT_SEQUENTIAL_THRESHOLD: usize = 1_000;
/// k-mer length used by the seed matcher.
pub const DEFAULT_SEED_LEN: usize = 2;
/// Symbols added on each side of a seeded window.
pub const DEFAULT_SEED_PADDING: usize = 3;

/// Tunables shared by every operation of an [`AlignEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub gap_symbol: u8,
    /// Always at least 2 so every reduction level shrinks the candidate list.
    pub chunk_size: usize,
    pub sequential_threshold: usize,
    /// Always at least 1.
    pub seed_len: usize,
    pub seed_padding: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gap_symbol: GAP_SYMBOL,
            chunk_size: DEFAULT_CHUNK_SIZE,
            sequential_threshold: DEFAULT_SEQUENTIAL_THRESHOLD,
            seed_len: DEFAULT_SEED_LEN,
            seed_padding: DEFAULT_SEED_PADDING,
        }
    }
}

impl EngineConfig {
    fn normalized(mut self) -> Self {
        self.chunk_size = self.chunk_size.max(2);
        self.seed_len = self.seed_len.max(1);
        self
    }
}

pub struct EngineBuilder<M, O = NoopObserver> {
    model: M,
    observer: O,
    config: EngineConfig,
}

impl<M: ScoringModel> EngineBuilder<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            observer: NoopObserver,
            config: EngineConfig::default(),
        }
    }
}

impl<M: ScoringModel, O: AlignObserver> EngineBuilder<M, O> {
    pub fn with_gap_symbol(mut self, gap_symbol: u8) -> Self {
        self.config.gap_symbol = gap_symbol;
        self
    }
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }
    pub fn with_sequential_threshold(mut self, threshold: usize) -> Self {
        self.config.sequential_threshold = threshold;
        self
    }
    pub fn with_seed_len(mut self, seed_len: usize) -> Self {
        self.config.seed_len = seed_len;
        self
    }
    pub fn with_seed_padding(mut self, padding: usize) -> Self {
        self.config.seed_padding = padding;
        self
    }
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
    pub fn with_observer<P: AlignObserver>(self, observer: P) -> EngineBuilder<M, P> {
        EngineBuilder {
            model: self.model,
            observer,
            config: self.config,
        }
    }
    pub fn build(self) -> AlignEngine<M, O> {
        AlignEngine::from_parts(self.model, self.observer, self.config.normalized())
    }
}
