//! Batch coordinator: best local match of a template among many candidates.
//!
//! Each level either scans its entries sequentially or splits them into
//! [`BatchPartition`]s that are reduced independently (in parallel with the
//! `parallel` feature). Partition winners form the next level until one
//! entry remains. Entries always carry their original candidate index and
//! levels keep ascending index order, so the winner does not depend on the
//! chunk size or on task completion order.

use std::ops::Range;

use crate::align::seed::seed_window;
use crate::align::Kernel;
use crate::alignment::{AlignMode, BatchHit};
use crate::builder::EngineConfig;
use crate::error::{AlignError, Result};
use crate::partition::BatchPartition;
use crate::traits::{AlignObserver, ScoringModel};

pub(crate) struct Coordinator<'a, M: ?Sized, O: ?Sized> {
    kernel: Kernel<'a, M, O>,
    config: &'a EngineConfig,
}

impl<'a, M, O> Coordinator<'a, M, O>
where
    M: ScoringModel + ?Sized,
    O: AlignObserver + ?Sized,
{
    pub fn new(kernel: Kernel<'a, M, O>, config: &'a EngineConfig) -> Self {
        Self { kernel, config }
    }

    pub fn run<C>(&self, template: &[u8], candidates: &[C]) -> Result<BatchHit>
    where
        C: AsRef<[u8]> + Sync,
    {
        if template.is_empty() {
            return Err(AlignError::EmptyInput("template"));
        }
        if candidates.is_empty() {
            return Err(AlignError::EmptyInput("candidate list"));
        }
        if candidates.iter().any(|c| c.as_ref().is_empty()) {
            return Err(AlignError::EmptyInput("candidate sequence"));
        }

        let entries: Vec<usize> = (0..candidates.len()).collect();
        self.reduce(template, candidates, entries, 0)?
            .ok_or(AlignError::EmptyInput("candidate list"))
    }

    fn reduce<C>(
        &self,
        template: &[u8],
        candidates: &[C],
        entries: Vec<usize>,
        level: usize,
    ) -> Result<Option<BatchHit>>
    where
        C: AsRef<[u8]> + Sync,
    {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("batch_level", level, entries = entries.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        if entries.len() < self.config.sequential_threshold
            || entries.len() <= self.config.chunk_size
        {
            return self.best_of(template, candidates, &entries);
        }

        let plan = BatchPartition::plan(entries.len(), self.config.chunk_size);
        let partitions = self.reduce_partitions(template, candidates, &entries, plan, level)?;
        let winners: Vec<usize> = partitions
            .iter()
            .filter_map(|p| p.winner.as_ref().map(|hit| hit.index))
            .collect();
        self.reduce(template, candidates, winners, level + 1)
    }

    #[cfg(feature = "parallel")]
    fn reduce_partitions<C>(
        &self,
        template: &[u8],
        candidates: &[C],
        entries: &[usize],
        plan: Vec<Range<usize>>,
        level: usize,
    ) -> Result<Vec<BatchPartition>>
    where
        C: AsRef<[u8]> + Sync,
    {
        use rayon::prelude::*;

        #[cfg(feature = "tracing")]
        let parent = tracing::Span::current();

        // Every chunk runs to completion so the lowest failing chunk is reported.
        let outcomes: Vec<Result<BatchPartition>> = plan
            .into_par_iter()
            .enumerate()
            .map(|(chunk, range)| {
                #[cfg(feature = "tracing")]
                let _guard = parent.enter();
                self.reduce_partition(template, candidates, entries, chunk, range, level)
            })
            .collect();
        outcomes.into_iter().collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn reduce_partitions<C>(
        &self,
        template: &[u8],
        candidates: &[C],
        entries: &[usize],
        plan: Vec<Range<usize>>,
        level: usize,
    ) -> Result<Vec<BatchPartition>>
    where
        C: AsRef<[u8]> + Sync,
    {
        plan.into_iter()
            .enumerate()
            .map(|(chunk, range)| {
                self.reduce_partition(template, candidates, entries, chunk, range, level)
            })
            .collect()
    }

    fn reduce_partition<C>(
        &self,
        template: &[u8],
        candidates: &[C],
        entries: &[usize],
        chunk: usize,
        range: Range<usize>,
        level: usize,
    ) -> Result<BatchPartition>
    where
        C: AsRef<[u8]> + Sync,
    {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("batch_chunk", level, chunk, len = range.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let winner = self
            .best_of(template, candidates, &entries[range.clone()])
            .map_err(|source| AlignError::BatchTaskFailure {
                chunk,
                source: Box::new(source),
            })?;
        self.kernel.observer.chunk_reduced(level, chunk, winner.as_ref());
        Ok(BatchPartition {
            chunk,
            start: range.start,
            end: range.end,
            winner,
        })
    }

    /// Sequential scan; `None` for an empty slice.
    fn best_of<C>(
        &self,
        template: &[u8],
        candidates: &[C],
        entries: &[usize],
    ) -> Result<Option<BatchHit>>
    where
        C: AsRef<[u8]>,
    {
        let mut best: Option<BatchHit> = None;
        for &index in entries {
            let hit = self.align_candidate(template, candidates[index].as_ref(), index)?;
            if best.as_ref().map_or(true, |current| hit.beats(current)) {
                best = Some(hit);
            }
        }
        Ok(best)
    }

    fn align_candidate(&self, template: &[u8], candidate: &[u8], index: usize) -> Result<BatchHit> {
        let window = seed_window(
            template,
            candidate,
            self.config.seed_len,
            self.config.seed_padding,
        )?;
        self.kernel.observer.seed_window(index, &window);
        let alignment = self.kernel.align(
            &template[window.template.clone()],
            &candidate[window.candidate.clone()],
            AlignMode::Local,
        )?;
        Ok(BatchHit { alignment, index })
    }
}
