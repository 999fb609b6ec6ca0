// src/round.rs
//! Parallel Rounds
//!
//! A round hands every stream of a `StreamSet` to its own rayon task. Each
//! worker gets exclusive `&mut` access to exactly one engine and reports how
//! many draws it took; the reports are collected in stream order. The round
//! returns only once every worker has finished, which is the barrier the
//! refresh step requires.

use crate::config::StreamConfig;
use crate::engine::{BaseEngine, Engine};
use crate::error::{EngineError, EngineResult};
use crate::streams::{split, ConsumptionReport, StreamSet, TechniqueKind};
use log::{debug, info};
use rayon::prelude::*;

/// Run `worker(index, stream)` on every stream in parallel
///
/// The worker returns the number of draws it consumed from its stream.
pub fn run_parallel<F>(set: &mut StreamSet, worker: F) -> ConsumptionReport
where
    F: Fn(usize, &mut dyn BaseEngine) -> u64 + Sync + Send,
{
    set.par_iter_mut()
        .enumerate()
        .map(|(i, stream)| worker(i, stream))
        .collect::<Vec<u64>>()
        .into_iter()
        .collect()
}

/// Repeated split / consume / refresh over one continuing engine
#[derive(Debug)]
pub struct StreamDriver {
    engine: Engine,
    config: StreamConfig,
    rounds: usize,
}

impl StreamDriver {
    pub fn new(engine: Engine, config: StreamConfig) -> EngineResult<Self> {
        config.validate()?;
        if config.technique == TechniqueKind::Leapfrog
            && !engine.has_support(TechniqueKind::SkipAhead)
        {
            return Err(EngineError::not_supported(
                engine.name(),
                TechniqueKind::Leapfrog,
                "leapfrog rounds are refreshed by skipping ahead",
            ));
        }
        info!(
            "Stream driver on '{}': {} {} streams",
            engine.name(),
            config.streams,
            config.technique
        );
        Ok(Self {
            engine,
            config,
            rounds: 0,
        })
    }

    /// Engine the next round will split from
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn into_engine(self) -> Engine {
        self.engine
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Completed rounds
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Split, run `worker` on every stream in parallel, then refresh
    ///
    /// On error the driver keeps the engine it had before the round. A failed
    /// refresh happens after the workers ran, so retrying the round replays
    /// the same draws. `new` rejects the one such case the capabilities can
    /// predict: leapfrog on an engine that cannot skip ahead.
    pub fn round<F>(&mut self, worker: F) -> EngineResult<ConsumptionReport>
    where
        F: Fn(usize, &mut dyn BaseEngine) -> u64 + Sync + Send,
    {
        let mut set = split(self.engine.as_ref(), self.config.technique()?)?;
        let report = run_parallel(&mut set, worker);
        self.engine = set.refresh(&report)?;
        self.rounds += 1;
        debug!(
            "Round {} done: {} draws, max per stream {}",
            self.rounds,
            report.total(),
            report.max_consumed()
        );
        Ok(report)
    }
}
