//! # par-streams: Reproducible Parallel Random Streams
//!
//! Turns one deterministic pseudo-random engine into N engines that N workers
//! (threads, SIMD lanes or distributed ranks) can drive without coordination,
//! then folds the round back into a single engine that continues the
//! sequence without repeating consumed values.
//!
//! ## Techniques
//!
//! - **Skip-ahead**: stream `i` is a clone advanced by `skip_counts[i]` draws
//! - **Leapfrog**: stream `i` draws positions `i, i + N, i + 2N, ...`
//! - **Family**: stream `i` is sub-stream `i` of a family engine
//!
//! ## Quick Start
//!
//! ```rust
//! use par_streams::engine::Mcg59;
//! use par_streams::round::run_parallel;
//! use par_streams::streams::{split, Technique};
//! use rand::Rng;
//!
//! let engine = Mcg59::new(777);
//! let mut set = split(&engine, Technique::Leapfrog { streams: 4 }).expect("mcg59 leapfrogs");
//!
//! let report = run_parallel(&mut set, |_, stream| {
//!     let _u: f64 = stream.gen();
//!     1
//! });
//!
//! // One engine that continues where the round left off
//! let next = set.refresh(&report).expect("valid report");
//! println!("next round splits from '{}'", next.name());
//! ```

// Module declarations
pub mod config;
pub mod engine;
pub mod error;
pub mod math_utils;
pub mod output;
pub mod round;
pub mod streams;

// Re-export commonly used types for convenience
pub use config::StreamConfig;
pub use engine::{BaseEngine, Capabilities, Engine, FamilyEngine};
pub use error::{EngineError, EngineResult};
pub use streams::{refresh, split, ConsumptionReport, StreamSet, Technique, TechniqueKind};
