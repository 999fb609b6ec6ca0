// src/engine/xoshiro.rs
//! Xoshiro256** and a Jump-Spaced Family of Sub-Streams
//!
//! The jump polynomial advances a xoshiro256** state by exactly 2^128 draws in
//! 256 state steps. A family hands out sub-streams whose starting states are
//! consecutive jumps apart, so no two sub-streams overlap unless one of them
//! draws more than 2^128 values.
//!
//! ```text
//! origin ──jump──▶ stream 1 ──jump──▶ stream 2 ──jump──▶ ...
//! (stream 0)
//! ```

use super::{fill_bytes_via_u64, BaseEngine, Capabilities, Engine, FamilyEngine};
use crate::error::{validation::validate_below, EngineError, EngineResult};
use crate::streams::TechniqueKind;
use rand::RngCore;

/// Upper bound on sub-streams when none is given
pub const DEFAULT_MAX_STREAMS: usize = 1 << 16;

const JUMP: [u64; 4] = [
    0x180ec6d33cfd0aba,
    0xd5a61266f0c9392c,
    0xa9582618e03fc9aa,
    0x39abdc4529b1661c,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xoshiro256StarStar {
    s: [u64; 4],
}

impl Xoshiro256StarStar {
    /// Expand a 64-bit seed into the 256-bit state with splitmix64
    pub fn from_seed_u64(seed: u64) -> Self {
        let mut state = seed;
        let mut next = || {
            state = state.wrapping_add(0x9E3779B97F4A7C15);
            let mut z = state;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
            z ^ (z >> 31)
        };
        Self {
            s: [next(), next(), next(), next()],
        }
    }

    /// Advance by 2^128 draws
    pub fn jump(&mut self) {
        let mut acc = [0u64; 4];
        for word in JUMP {
            for b in 0..64 {
                if word & (1u64 << b) != 0 {
                    for (a, s) in acc.iter_mut().zip(self.s.iter()) {
                        *a ^= *s;
                    }
                }
                self.next_u64();
            }
        }
        self.s = acc;
    }
}

impl RngCore for Xoshiro256StarStar {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let result = self.s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_bytes_via_u64(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl BaseEngine for Xoshiro256StarStar {
    fn name(&self) -> &'static str {
        "xoshiro256**"
    }

    fn clone_engine(&self) -> Engine {
        Box::new(self.clone())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }
}

/// Bounded family of jump-spaced xoshiro256** sub-streams
///
/// The family's own draws come from sub-stream 0, which is always present.
#[derive(Debug, Clone)]
pub struct Xoshiro256Family {
    streams: Vec<Engine>,
    /// Starting state of the most recently materialized sub-stream
    frontier: Xoshiro256StarStar,
    max_streams: usize,
}

impl Xoshiro256Family {
    pub fn new(seed: u64) -> Self {
        Self::with_max_streams(seed, DEFAULT_MAX_STREAMS)
    }

    /// `max_streams` is clamped to at least 1.
    pub fn with_max_streams(seed: u64, max_streams: usize) -> Self {
        let origin = Xoshiro256StarStar::from_seed_u64(seed);
        Self {
            streams: vec![Box::new(origin.clone())],
            frontier: origin,
            max_streams: max_streams.max(1),
        }
    }
}

impl RngCore for Xoshiro256Family {
    fn next_u32(&mut self) -> u32 {
        self.streams[0].next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.streams[0].next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.streams[0].fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.streams[0].try_fill_bytes(dest)
    }
}

impl BaseEngine for Xoshiro256Family {
    fn name(&self) -> &'static str {
        "xoshiro256-family"
    }

    fn clone_engine(&self) -> Engine {
        Box::new(self.clone())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::FAMILY
    }

    fn as_family(&self) -> Option<&dyn FamilyEngine> {
        Some(self)
    }

    fn as_family_mut(&mut self) -> Option<&mut dyn FamilyEngine> {
        Some(self)
    }
}

impl FamilyEngine for Xoshiro256Family {
    fn num_streams(&self) -> usize {
        self.streams.len()
    }

    fn max_streams(&self) -> usize {
        self.max_streams
    }

    fn add_streams(&mut self, count: usize) -> EngineResult<()> {
        let requested = self.streams.len().saturating_add(count);
        if requested > self.max_streams {
            return Err(EngineError::not_supported(
                self.name(),
                TechniqueKind::Family,
                format!(
                    "{} sub-streams requested, family holds at most {}",
                    requested, self.max_streams
                ),
            ));
        }
        self.streams.reserve(count);
        for _ in 0..count {
            self.frontier.jump();
            self.streams.push(Box::new(self.frontier.clone()));
        }
        Ok(())
    }

    fn stream(&self, index: usize) -> EngineResult<Engine> {
        validate_below("index", index, self.streams.len())?;
        Ok(self.streams[index].clone())
    }

    fn replace_stream(&mut self, index: usize, stream: Engine) -> EngineResult<()> {
        validate_below("index", index, self.streams.len())?;
        self.streams[index] = stream;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeding_is_deterministic() {
        let mut a = Xoshiro256StarStar::from_seed_u64(2024);
        let mut b = Xoshiro256StarStar::from_seed_u64(2024);
        for _ in 0..64 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_jump_moves_away_from_origin() {
        let origin = Xoshiro256StarStar::from_seed_u64(1);
        let mut jumped = origin.clone();
        jumped.jump();
        assert_ne!(origin, jumped);

        let mut twice = origin.clone();
        twice.jump();
        twice.jump();
        assert_ne!(twice, jumped);
    }

    #[test]
    fn test_family_starts_with_one_stream() {
        let family = Xoshiro256Family::new(3);
        assert_eq!(family.num_streams(), 1);
        assert_eq!(family.max_streams(), DEFAULT_MAX_STREAMS);
        assert!(family.has_support(TechniqueKind::Family));
        assert!(!family.has_support(TechniqueKind::SkipAhead));
    }

    #[test]
    fn test_add_streams_spaces_by_jump() {
        let mut family = Xoshiro256Family::new(11);
        family.add_streams(2).unwrap();
        assert_eq!(family.num_streams(), 3);

        let mut expected = Xoshiro256StarStar::from_seed_u64(11);
        expected.jump();
        expected.jump();
        let mut second = family.stream(2).unwrap();
        assert_eq!(second.next_u64(), expected.next_u64());
    }

    #[test]
    fn test_add_streams_respects_capacity() {
        let mut family = Xoshiro256Family::with_max_streams(11, 4);
        assert!(family.add_streams(3).is_ok());
        let err = family.add_streams(1).unwrap_err();
        assert!(err.is_not_supported());
        assert_eq!(family.num_streams(), 4);
    }

    #[test]
    fn test_family_draws_follow_stream_zero() {
        let mut family = Xoshiro256Family::new(5);
        let mut zero = family.stream(0).unwrap();
        assert_eq!(family.next_u64(), zero.next_u64());
    }

    #[test]
    fn test_stream_index_out_of_range() {
        let family = Xoshiro256Family::new(5);
        assert!(family.stream(1).is_err());
    }

    #[test]
    fn test_replace_stream_keeps_consumed_state() {
        let mut family = Xoshiro256Family::new(8);
        let mut stream = family.stream(0).unwrap();
        stream.next_u64();
        let mut expected = stream.clone();

        family.replace_stream(0, stream).unwrap();
        assert_eq!(family.next_u64(), expected.next_u64());
    }
}
