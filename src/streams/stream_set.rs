// src/streams/stream_set.rs
use super::TechniqueKind;
use crate::engine::{BaseEngine, Engine};
use crate::error::{validation::validate_below, EngineResult};
use rayon::prelude::*;
use std::ops::{Index, IndexMut};

/// What the refresher needs besides the streams themselves
#[derive(Debug)]
pub(crate) enum Continuation {
    SkipAhead,
    /// Untouched clone of the engine that was split
    Leapfrog { origin: Engine },
    /// The cloned family the streams were taken from
    Family { family: Engine },
}

impl Continuation {
    pub(crate) fn kind(&self) -> TechniqueKind {
        match self {
            Continuation::SkipAhead => TechniqueKind::SkipAhead,
            Continuation::Leapfrog { .. } => TechniqueKind::Leapfrog,
            Continuation::Family { .. } => TechniqueKind::Family,
        }
    }
}

/// The N engines produced by one split
///
/// The set owns every stream. Consumers borrow them one at a time through
/// `iter_mut` / `par_iter_mut`, which hand out disjoint `&mut` references, so
/// two workers can never drive the same stream. The references are to the
/// engine itself, not its box: a stream can be drawn from but not swapped for
/// another engine. Refreshing consumes the set.
#[derive(Debug)]
pub struct StreamSet {
    pub(crate) streams: Vec<Engine>,
    pub(crate) continuation: Continuation,
}

impl StreamSet {
    pub(crate) fn new(streams: Vec<Engine>, continuation: Continuation) -> Self {
        Self {
            streams,
            continuation,
        }
    }

    pub fn technique(&self) -> TechniqueKind {
        self.continuation.kind()
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn BaseEngine> {
        self.streams.get(index).map(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn BaseEngine + 'static)> {
        self.streams.get_mut(index).map(|s| s.as_mut())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (dyn BaseEngine + 'static)> + '_ {
        self.streams.iter_mut().map(|s| s.as_mut())
    }

    pub fn par_iter_mut(
        &mut self,
    ) -> impl IndexedParallelIterator<Item = &mut (dyn BaseEngine + 'static)> + '_ {
        self.streams.par_iter_mut().map(|s| s.as_mut())
    }
}

impl Index<usize> for StreamSet {
    type Output = dyn BaseEngine;

    fn index(&self, index: usize) -> &Self::Output {
        self.streams[index].as_ref()
    }
}

impl IndexMut<usize> for StreamSet {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.streams[index].as_mut()
    }
}

/// Number of draws each stream consumed during a round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumptionReport {
    num_elems: Vec<u64>,
}

impl ConsumptionReport {
    /// Report for `streams` streams, all counts zero
    pub fn new(streams: usize) -> Self {
        Self {
            num_elems: vec![0; streams],
        }
    }

    pub fn from_counts(num_elems: Vec<u64>) -> Self {
        Self { num_elems }
    }

    /// Add `count` draws to stream `index`
    pub fn record(&mut self, index: usize, count: u64) -> EngineResult<()> {
        validate_below("index", index, self.num_elems.len())?;
        self.num_elems[index] = self.num_elems[index].saturating_add(count);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.num_elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_elems.is_empty()
    }

    pub fn counts(&self) -> &[u64] {
        &self.num_elems
    }

    pub fn max_consumed(&self) -> u64 {
        self.num_elems.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.num_elems.iter().fold(0u64, |acc, &n| acc.saturating_add(n))
    }
}

impl FromIterator<u64> for ConsumptionReport {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self::from_counts(iter.into_iter().collect())
    }
}
