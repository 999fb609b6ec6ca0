// src/engine/mod.rs
//! Engine Capability Contracts
//!
//! An engine is a stateful pseudo-random generator that can be repositioned
//! without generating the values it passes over. Engines are driven through
//! [`rand::RngCore`], so any `rand` / `rand_distr` distribution can sample
//! from them directly.
//!
//! # Capabilities
//!
//! | technique  | primitive                  | trait           |
//! |------------|----------------------------|-----------------|
//! | skip-ahead | `skip_ahead(n)`            | [`BaseEngine`]  |
//! | leapfrog   | `leapfrog(rank, total)`    | [`BaseEngine`]  |
//! | family     | `add_streams`, `stream(i)` | [`FamilyEngine`]|
//!
//! Family support is discovered through [`BaseEngine::as_family`] rather than
//! by inspecting the concrete type.
//!
//! # Draw Accounting
//!
//! One draw is one call to `next_u32` or `next_u64`. `fill_bytes` consumes one
//! draw per started 8-byte chunk.

pub mod counter;
pub mod mcg59;
pub mod xoshiro;

pub use counter::CounterEngine;
pub use mcg59::Mcg59;
pub use xoshiro::{Xoshiro256Family, Xoshiro256StarStar};

use crate::error::{EngineError, EngineResult};
use crate::streams::TechniqueKind;
use bitflags::bitflags;
use rand::RngCore;
use std::fmt;

bitflags! {
    /// Techniques an engine can take part in
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u32 {
        const NONE       = 0;
        const SKIP_AHEAD = 1 << 0;
        const LEAPFROG   = 1 << 1;
        const FAMILY     = 1 << 2;
    }
}

impl Capabilities {
    pub fn supports(self, technique: TechniqueKind) -> bool {
        self.contains(technique.capability())
    }
}

/// Owned, type-erased engine handle
pub type Engine = Box<dyn BaseEngine>;

/// A cloneable PRNG with primitive stream-repositioning operations
pub trait BaseEngine: RngCore + Send + fmt::Debug {
    /// Short identifier used in errors and logs
    fn name(&self) -> &'static str;

    /// Independent deep copy whose future output equals this engine's
    fn clone_engine(&self) -> Engine;

    fn capabilities(&self) -> Capabilities;

    fn has_support(&self, technique: TechniqueKind) -> bool {
        self.capabilities().supports(technique)
    }

    /// Advance the engine by `nskip` draws without generating them
    fn skip_ahead(&mut self, nskip: u64) -> EngineResult<()> {
        let _ = nskip;
        Err(EngineError::not_supported(
            self.name(),
            TechniqueKind::SkipAhead,
            "engine cannot skip ahead",
        ))
    }

    /// Decimate the sequence so successive draws hit positions
    /// `rank, rank + total, rank + 2 * total, ...`
    fn leapfrog(&mut self, rank: usize, total: usize) -> EngineResult<()> {
        let _ = (rank, total);
        Err(EngineError::not_supported(
            self.name(),
            TechniqueKind::Leapfrog,
            "engine cannot leapfrog",
        ))
    }

    fn as_family(&self) -> Option<&dyn FamilyEngine> {
        None
    }

    fn as_family_mut(&mut self) -> Option<&mut dyn FamilyEngine> {
        None
    }
}

impl Clone for Engine {
    fn clone(&self) -> Self {
        (**self).clone_engine()
    }
}

/// A PRNG that natively manages a bounded family of independent sub-streams
pub trait FamilyEngine: BaseEngine {
    /// Number of sub-streams materialized so far
    fn num_streams(&self) -> usize;

    /// Hard upper bound on the number of sub-streams
    fn max_streams(&self) -> usize;

    /// Materialize `count` additional sub-streams; existing ones are untouched
    fn add_streams(&mut self, count: usize) -> EngineResult<()>;

    /// Copy of sub-stream `index` in its current state
    fn stream(&self, index: usize) -> EngineResult<Engine>;

    /// Store a (consumed) copy of sub-stream `index` back into the family
    fn replace_stream(&mut self, index: usize, stream: Engine) -> EngineResult<()>;
}

/// Fill `dest` from successive `next_u64` draws, little-endian
pub(crate) fn fill_bytes_via_u64<R: RngCore + ?Sized>(rng: &mut R, dest: &mut [u8]) {
    for chunk in dest.chunks_mut(8) {
        let bytes = rng.next_u64().to_le_bytes();
        chunk.copy_from_slice(&bytes[..chunk.len()]);
    }
}
