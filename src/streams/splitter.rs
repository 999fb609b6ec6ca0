// src/streams/splitter.rs
//! Stream Splitting
//!
//! Turns one engine into N engines that can be driven by N independent
//! workers. The input engine is never mutated: every stream starts from a
//! clone. The split is all-or-nothing, either every stream is built or the
//! first error is returned and the partially built streams are dropped.
//!
//! # Techniques
//!
//! ```text
//! SkipAhead  [0, 5, 10]    stream i = clone.skip_ahead(skip_counts[i])
//!            base: 0 1 2 3 4 5 6 7 8 9 10 11 ...
//!            s0:   ^
//!            s1:             ^
//!            s2:                       ^
//!
//! Leapfrog   N = 3         stream i = clone.leapfrog(i, N)
//!            base: 0 1 2 3 4 5 6 7 8 ...
//!            s0:   ^     ^     ^
//!            s1:     ^     ^     ^
//!            s2:       ^     ^     ^
//!
//! Family     N             stream i = family.stream(i), growing the family
//!                          when it holds fewer than N sub-streams
//! ```

use super::stream_set::{Continuation, StreamSet};
use super::{Technique, TechniqueKind};
use crate::engine::{BaseEngine, Engine};
use crate::error::{EngineError, EngineResult};
use log::{debug, trace, warn};

/// Split `engine` into the streams described by `technique`
///
/// # Errors
///
/// - `InvalidParameters` when the technique asks for zero streams
/// - `NotSupported` when the engine lacks the technique's capability, when a
///   clone fails to reposition (whatever error the engine raised), or when a
///   family is too small for N
pub fn split(engine: &dyn BaseEngine, technique: Technique) -> EngineResult<StreamSet> {
    technique.validate()?;
    let kind = technique.kind();
    check_support(engine, kind)?;

    debug!(
        "Splitting '{}' into {} {} streams",
        engine.name(),
        technique.num_streams(),
        kind
    );

    match technique {
        Technique::SkipAhead { skip_counts } => split_skip_ahead(engine, &skip_counts),
        Technique::Leapfrog { streams } => split_leapfrog(engine, streams),
        Technique::Family { streams } => split_family(engine, streams),
    }
}

fn check_support(engine: &dyn BaseEngine, kind: TechniqueKind) -> EngineResult<()> {
    if kind == TechniqueKind::Family && engine.as_family().is_none() {
        return Err(EngineError::not_supported(
            engine.name(),
            kind,
            "engine is not a family engine",
        ));
    }
    if !engine.has_support(kind) {
        return Err(EngineError::not_supported(
            engine.name(),
            kind,
            "capability not advertised by the engine",
        ));
    }
    Ok(())
}

/// Any failure to reposition a clone aborts the split as `NotSupported`
fn reposition_failed(
    engine: &dyn BaseEngine,
    kind: TechniqueKind,
    err: EngineError,
) -> EngineError {
    if err.is_not_supported() {
        err
    } else {
        warn!("'{}' failed to reposition a clone: {}", engine.name(), err);
        EngineError::not_supported(engine.name(), kind, err.to_string())
    }
}

fn split_skip_ahead(engine: &dyn BaseEngine, skip_counts: &[u64]) -> EngineResult<StreamSet> {
    let streams = skip_counts
        .iter()
        .enumerate()
        .map(|(i, &nskip)| -> EngineResult<Engine> {
            let mut stream = engine.clone_engine();
            stream
                .skip_ahead(nskip)
                .map_err(|e| reposition_failed(engine, TechniqueKind::SkipAhead, e))?;
            trace!("Stream {} skipped ahead by {}", i, nskip);
            Ok(stream)
        })
        .collect::<EngineResult<Vec<Engine>>>()?;

    Ok(StreamSet::new(streams, Continuation::SkipAhead))
}

fn split_leapfrog(engine: &dyn BaseEngine, total: usize) -> EngineResult<StreamSet> {
    let streams = (0..total)
        .map(|rank| -> EngineResult<Engine> {
            let mut stream = engine.clone_engine();
            stream
                .leapfrog(rank, total)
                .map_err(|e| reposition_failed(engine, TechniqueKind::Leapfrog, e))?;
            trace!("Stream {} leapfrogs with stride {}", rank, total);
            Ok(stream)
        })
        .collect::<EngineResult<Vec<Engine>>>()?;

    let origin = engine.clone_engine();
    Ok(StreamSet::new(streams, Continuation::Leapfrog { origin }))
}

fn split_family(engine: &dyn BaseEngine, n: usize) -> EngineResult<StreamSet> {
    let mut family = engine.clone_engine();
    let name = family.name();
    let members = family.as_family_mut().ok_or_else(|| {
        EngineError::not_supported(name, TechniqueKind::Family, "clone is not a family engine")
    })?;

    if members.max_streams() < n {
        return Err(EngineError::not_supported(
            name,
            TechniqueKind::Family,
            format!(
                "{} streams requested, family holds at most {}",
                n,
                members.max_streams()
            ),
        ));
    }

    let present = members.num_streams();
    if present < n {
        warn!(
            "Growing family '{}' from {} to {} sub-streams",
            name, present, n
        );
        members.add_streams(n - present)?;
    }

    let streams = (0..n)
        .map(|i| members.stream(i))
        .collect::<EngineResult<Vec<Engine>>>()?;

    Ok(StreamSet::new(streams, Continuation::Family { family }))
}
