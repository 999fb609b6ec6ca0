// src/streams/technique.rs
use crate::engine::Capabilities;
use crate::error::{validation::validate_positive, EngineResult};
use std::fmt;

/// Which splitting technique, without its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechniqueKind {
    SkipAhead,
    Leapfrog,
    Family,
}

impl TechniqueKind {
    pub const ALL: [TechniqueKind; 3] = [
        TechniqueKind::SkipAhead,
        TechniqueKind::Leapfrog,
        TechniqueKind::Family,
    ];

    /// Capability an engine must advertise to take part in this technique
    pub fn capability(self) -> Capabilities {
        match self {
            TechniqueKind::SkipAhead => Capabilities::SKIP_AHEAD,
            TechniqueKind::Leapfrog => Capabilities::LEAPFROG,
            TechniqueKind::Family => Capabilities::FAMILY,
        }
    }
}

impl fmt::Display for TechniqueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TechniqueKind::SkipAhead => "skip-ahead",
            TechniqueKind::Leapfrog => "leapfrog",
            TechniqueKind::Family => "family",
        };
        f.write_str(name)
    }
}

/// A splitting technique together with the parameters it needs
///
/// - `SkipAhead`: stream `i` starts at absolute position `skip_counts[i]`.
///   Callers keep `skip_counts` non-decreasing so the last stream is the one
///   positioned furthest ahead; non-overlap of the ranges actually consumed
///   depends on choosing the gaps large enough.
/// - `Leapfrog`: stream `i` draws positions `i, i + N, i + 2N, ...`.
/// - `Family`: stream `i` is sub-stream `i` of a family engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Technique {
    SkipAhead { skip_counts: Vec<u64> },
    Leapfrog { streams: usize },
    Family { streams: usize },
}

impl Technique {
    pub fn kind(&self) -> TechniqueKind {
        match self {
            Technique::SkipAhead { .. } => TechniqueKind::SkipAhead,
            Technique::Leapfrog { .. } => TechniqueKind::Leapfrog,
            Technique::Family { .. } => TechniqueKind::Family,
        }
    }

    /// Number of streams N this technique produces
    pub fn num_streams(&self) -> usize {
        match self {
            Technique::SkipAhead { skip_counts } => skip_counts.len(),
            Technique::Leapfrog { streams } | Technique::Family { streams } => *streams,
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        validate_positive("streams", self.num_streams())
    }
}
