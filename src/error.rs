// src/error.rs
use crate::streams::TechniqueKind;
use thiserror::Error;

/// Errors raised while splitting or refreshing random streams
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine cannot take part in the requested technique
    #[error("Engine '{engine}' does not support {technique}: {reason}")]
    NotSupported {
        engine: &'static str,
        technique: TechniqueKind,
        reason: String,
    },

    /// Invalid parameter values
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: u64,
        constraint: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },
}

impl EngineError {
    pub fn not_supported(
        engine: &'static str,
        technique: TechniqueKind,
        reason: impl Into<String>,
    ) -> Self {
        EngineError::NotSupported {
            engine,
            technique,
            reason: reason.into(),
        }
    }

    pub fn is_not_supported(&self) -> bool {
        matches!(self, EngineError::NotSupported { .. })
    }
}

/// Result type alias for stream operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Validation utilities
pub mod validation {
    use super::{EngineError, EngineResult};

    /// Validate that a count is positive
    pub fn validate_positive(name: &str, value: usize) -> EngineResult<()> {
        if value == 0 {
            Err(EngineError::InvalidParameters {
                parameter: name.to_string(),
                value: 0,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that `value` lies in `[0, bound)`
    pub fn validate_below(name: &str, value: usize, bound: usize) -> EngineResult<()> {
        if value >= bound {
            Err(EngineError::InvalidParameters {
                parameter: name.to_string(),
                value: value as u64,
                constraint: format!("must be in range [0, {})", bound),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a sequence has exactly `expected` entries
    pub fn validate_len(name: &str, len: usize, expected: usize) -> EngineResult<()> {
        if len != expected {
            Err(EngineError::InvalidParameters {
                parameter: name.to_string(),
                value: len as u64,
                constraint: format!("length must equal the number of streams ({})", expected),
            })
        } else {
            Ok(())
        }
    }

    /// Validate leapfrog coordinates: `total > 0` and `rank < total`
    pub fn validate_leapfrog(rank: usize, total: usize) -> EngineResult<()> {
        validate_positive("total", total)?;
        validate_below("rank", rank, total)
    }
}
