// src/config.rs
use crate::error::{validation::*, EngineError, EngineResult};
use crate::streams::{Technique, TechniqueKind};

/// Default gap between consecutive skip-ahead streams
pub const DEFAULT_SKIP_STRIDE: u64 = 1 << 32;

/// How a driver splits its engine each round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    pub streams: usize,
    pub technique: TechniqueKind,
    /// Skip-ahead only: stream `i` starts `i * skip_stride` draws ahead
    pub skip_stride: u64,
}

impl StreamConfig {
    /// Validate the stream configuration
    pub fn validate(&self) -> EngineResult<()> {
        validate_positive("streams", self.streams)?;

        if self.technique == TechniqueKind::SkipAhead {
            if self.skip_stride == 0 {
                return Err(EngineError::InvalidConfiguration {
                    field: "skip_stride".to_string(),
                    reason: "must be greater than 0 for skip-ahead".to_string(),
                });
            }
            self.last_skip()?;
        }

        Ok(())
    }

    fn last_skip(&self) -> EngineResult<u64> {
        let last = self.streams.saturating_sub(1) as u64;
        last.checked_mul(self.skip_stride)
            .ok_or_else(|| EngineError::InvalidConfiguration {
                field: "skip_stride".to_string(),
                reason: format!(
                    "{} streams spaced {} apart overflow the 64-bit position",
                    self.streams, self.skip_stride
                ),
            })
    }

    /// Build the technique this configuration describes
    pub fn technique(&self) -> EngineResult<Technique> {
        self.validate()?;
        Ok(match self.technique {
            TechniqueKind::SkipAhead => Technique::SkipAhead {
                skip_counts: (0..self.streams as u64)
                    .map(|i| i * self.skip_stride)
                    .collect(),
            },
            TechniqueKind::Leapfrog => Technique::Leapfrog {
                streams: self.streams,
            },
            TechniqueKind::Family => Technique::Family {
                streams: self.streams,
            },
        })
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            streams: num_cpus::get(),
            technique: TechniqueKind::SkipAhead,
            skip_stride: DEFAULT_SKIP_STRIDE,
        }
    }
}
