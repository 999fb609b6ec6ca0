// src/math_utils.rs
use crate::error::{validation::validate_positive, EngineError, EngineResult};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// P-value of a chi-square goodness-of-fit test of `samples` against U(0, 1)
///
/// Samples are binned into `bins` equal-width cells; values outside [0, 1)
/// are clamped into the first or last cell.
pub fn chi_square_uniformity(samples: &[f64], bins: usize) -> EngineResult<f64> {
    validate_positive("samples", samples.len())?;
    if bins < 2 {
        return Err(EngineError::InvalidParameters {
            parameter: "bins".to_string(),
            value: bins as u64,
            constraint: "must be at least 2".to_string(),
        });
    }

    let mut observed = vec![0u64; bins];
    for &u in samples {
        let cell = ((u * bins as f64) as isize).clamp(0, bins as isize - 1) as usize;
        observed[cell] += 1;
    }

    let expected = samples.len() as f64 / bins as f64;
    let statistic: f64 = observed
        .iter()
        .map(|&o| {
            let d = o as f64 - expected;
            d * d / expected
        })
        .sum();

    let dist = ChiSquared::new((bins - 1) as f64).map_err(|e| EngineError::InvalidParameters {
        parameter: "bins".to_string(),
        value: bins as u64,
        constraint: e.to_string(),
    })?;
    Ok(1.0 - dist.cdf(statistic))
}

/// Wall-clock stopwatch for timing split, round and refresh phases
///
/// `start` resets the reference point; `elapsed_ms` does not.
pub struct Timer {
    start_time: std::time::Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
