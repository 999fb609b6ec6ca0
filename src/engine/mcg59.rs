// src/engine/mcg59.rs
//! 59-bit Multiplicative Congruential Generator
//!
//! ```text
//! x_{k+1} = a · x_k  mod 2^59,   a = 13^13
//! ```
//! Because the modulus is a power of two, `mod 2^59` is a mask over wrapping
//! 64-bit multiplication. Skipping `n` draws multiplies the state by `a^n`
//! (square-and-multiply, O(log n)); leapfrog with stride `total` replaces the
//! multiplier by `a^total`.

use super::{fill_bytes_via_u64, BaseEngine, Capabilities, Engine};
use crate::error::{validation::validate_leapfrog, EngineResult};
use rand::RngCore;

const MULTIPLIER: u64 = 302_875_106_592_253; // 13^13
const MASK: u64 = (1u64 << 59) - 1;

#[inline]
fn mul_mod(a: u64, b: u64) -> u64 {
    a.wrapping_mul(b) & MASK
}

fn pow_mod(mut base: u64, mut exp: u64) -> u64 {
    let mut result = 1u64;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base);
        }
        base = mul_mod(base, base);
        exp >>= 1;
    }
    result
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mcg59 {
    state: u64,
    multiplier: u64,
}

impl Mcg59 {
    /// A zero seed (mod 2^59) is replaced by 1.
    pub fn new(seed: u64) -> Self {
        let x0 = match seed & MASK {
            0 => 1,
            x => x,
        };
        Self {
            state: mul_mod(x0, MULTIPLIER),
            multiplier: MULTIPLIER,
        }
    }

    #[inline]
    fn step(&mut self) -> u64 {
        let x = self.state;
        self.state = mul_mod(self.state, self.multiplier);
        x
    }

    /// Next value in [0, 1)
    pub fn uniform(&mut self) -> f64 {
        self.step() as f64 / (1u64 << 59) as f64
    }
}

impl RngCore for Mcg59 {
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 27) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.step() << 5
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_bytes_via_u64(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl BaseEngine for Mcg59 {
    fn name(&self) -> &'static str {
        "mcg59"
    }

    fn clone_engine(&self) -> Engine {
        Box::new(self.clone())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::SKIP_AHEAD | Capabilities::LEAPFROG
    }

    fn skip_ahead(&mut self, nskip: u64) -> EngineResult<()> {
        self.state = mul_mod(self.state, pow_mod(self.multiplier, nskip));
        Ok(())
    }

    fn leapfrog(&mut self, rank: usize, total: usize) -> EngineResult<()> {
        validate_leapfrog(rank, total)?;
        self.state = mul_mod(self.state, pow_mod(self.multiplier, rank as u64));
        self.multiplier = pow_mod(self.multiplier, total as u64);
        Ok(())
    }
}
