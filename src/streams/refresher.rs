// src/streams/refresher.rs
//! Stream Refreshing
//!
//! Called once per round, after every worker has finished with its stream.
//! Consumes the `StreamSet` and returns the single engine the next round
//! splits from:
//!
//! | technique  | continuation                                            |
//! |------------|---------------------------------------------------------|
//! | skip-ahead | the last stream (largest configured skip), as consumed  |
//! | leapfrog   | pre-split engine advanced by `max(num_elems)` draws     |
//! | family     | the retained family, with consumed sub-streams restored |

use super::stream_set::{Continuation, ConsumptionReport, StreamSet};
use super::TechniqueKind;
use crate::engine::Engine;
use crate::error::{validation::validate_len, EngineError, EngineResult};
use log::debug;

/// Engine that continues the sequence after the round `streams` took part in
///
/// `consumption` is only consulted for leapfrog, where its length must equal
/// the number of streams.
pub fn refresh(set: StreamSet, consumption: &ConsumptionReport) -> EngineResult<Engine> {
    let StreamSet {
        streams,
        continuation,
    } = set;
    let n = streams.len();

    match continuation {
        Continuation::SkipAhead => {
            debug!(
                "Refreshing {} skip-ahead streams from stream {}",
                n,
                n.saturating_sub(1)
            );
            let mut streams = streams;
            match streams.pop() {
                Some(last) => Ok(last),
                None => Err(EngineError::InvalidParameters {
                    parameter: "streams".to_string(),
                    value: 0,
                    constraint: "must be positive (> 0)".to_string(),
                }),
            }
        }
        Continuation::Leapfrog { mut origin } => {
            validate_len("num_elems", consumption.len(), n)?;
            let max_consumed = consumption.max_consumed();
            debug!(
                "Refreshing {} leapfrog streams, advancing '{}' by {}",
                n,
                origin.name(),
                max_consumed
            );
            origin.skip_ahead(max_consumed)?;
            Ok(origin)
        }
        Continuation::Family { mut family } => {
            let name = family.name();
            let members = family.as_family_mut().ok_or_else(|| {
                EngineError::not_supported(
                    name,
                    TechniqueKind::Family,
                    "retained engine is not a family",
                )
            })?;
            for (i, stream) in streams.into_iter().enumerate() {
                members.replace_stream(i, stream)?;
            }
            debug!("Refreshing {} family streams of '{}'", n, name);
            Ok(family)
        }
    }
}

impl StreamSet {
    /// See [`refresh`]
    pub fn refresh(self, consumption: &ConsumptionReport) -> EngineResult<Engine> {
        refresh(self, consumption)
    }
}
