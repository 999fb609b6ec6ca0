// src/engine/counter.rs
//! Counter-Based Engine
//!
//! Output at absolute position `p` is a pure function of `(seed, p)`:
//! ```text
//! z = base_seed + p + 1
//! z = (z ⊕ (z >> 30)) * 0xbf58476d1ce4e5b9
//! z = (z ⊕ (z >> 27)) * 0x94d049bb133111eb
//! output = z ⊕ (z >> 31)
//! ```
//! Repositioning is therefore plain counter arithmetic: skip-ahead adds to the
//! counter and leapfrog scales the stride, both in O(1).

use super::{fill_bytes_via_u64, BaseEngine, Capabilities, Engine};
use crate::error::{validation::validate_leapfrog, EngineResult};
use rand::RngCore;

/// Counter-based splitmix64 engine
///
/// All arithmetic on `counter` and `stride` wraps modulo 2^64, so skip-ahead
/// and leapfrog compose in any order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterEngine {
    base_seed: u64,
    counter: u64,
    stride: u64,
}

impl CounterEngine {
    /// Engine positioned at absolute position `counter` of the `base_seed` sequence
    pub fn new(base_seed: u64, counter: u64) -> Self {
        Self {
            base_seed,
            counter,
            stride: 1,
        }
    }

    /// Absolute position of the next draw
    pub fn position(&self) -> u64 {
        self.counter
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    #[inline]
    fn mix(mut z: u64) -> u64 {
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9u64);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111ebu64);
        z ^ (z >> 31)
    }

    /// Value at absolute position `p`, independent of the engine's state
    pub fn value_at(base_seed: u64, p: u64) -> u64 {
        Self::mix(base_seed.wrapping_add(p).wrapping_add(1))
    }
}

impl RngCore for CounterEngine {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = Self::value_at(self.base_seed, self.counter);
        self.counter = self.counter.wrapping_add(self.stride);
        value
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_bytes_via_u64(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl BaseEngine for CounterEngine {
    fn name(&self) -> &'static str {
        "counter"
    }

    fn clone_engine(&self) -> Engine {
        Box::new(self.clone())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::SKIP_AHEAD | Capabilities::LEAPFROG
    }

    fn skip_ahead(&mut self, nskip: u64) -> EngineResult<()> {
        self.counter = self.counter.wrapping_add(nskip.wrapping_mul(self.stride));
        Ok(())
    }

    fn leapfrog(&mut self, rank: usize, total: usize) -> EngineResult<()> {
        validate_leapfrog(rank, total)?;
        self.counter = self
            .counter
            .wrapping_add((rank as u64).wrapping_mul(self.stride));
        self.stride = self.stride.wrapping_mul(total as u64);
        Ok(())
    }
}
