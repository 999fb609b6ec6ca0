// src/streams/mod.rs
//! Parallel Stream Derivation
//!
//! One split/refresh cycle:
//! ```text
//! engine ──split──▶ StreamSet (N engines) ──workers──▶ ConsumptionReport
//!    ▲                                                        │
//!    └──────────────────────refresh◀──────────────────────────┘
//! ```
//! Nothing is retained across cycles except what the returned engine carries.

pub mod refresher;
pub mod splitter;
pub mod stream_set;
pub mod technique;

pub use refresher::refresh;
pub use splitter::split;
pub use stream_set::{ConsumptionReport, StreamSet};
pub use technique::{Technique, TechniqueKind};
