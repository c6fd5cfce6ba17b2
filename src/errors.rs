//! Error types for query construction and evaluation.
//!
//! Every failure is surfaced to the caller of the failing operation or
//! pipeline construction. Nothing is retried and nothing is swallowed: a
//! stage that fails stops the run and its error becomes the run's error.
//!
//! # Example
//!
//! ```rust
//! use seqpipe::errors::QueryError;
//! use seqpipe::ops::avg;
//! use seqpipe::Stage;
//!
//! let err = avg::<i32>().execute(vec![]).unwrap_err();
//! assert_eq!(err, QueryError::empty_sequence("avg"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for seqpipe operations.
///
/// # Categories
///
/// - `EmptySequence`: a reduction that is undefined on empty input
/// - `TypeMismatch`: adjacent stages (or a requested result) disagree on a type
/// - `NonTerminalReduction`: a stage was placed after a reduction
/// - `EmptyPipeline`: a dynamically assembled pipeline has no stages
/// - `Configuration`: malformed operation parameters or query files
/// - `Io`: a query file could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// `avg`, `max` and `min` have no value for an empty sequence.
    #[error("{operation}: empty sequence")]
    EmptySequence { operation: &'static str },

    /// The type produced at one position does not match the type consumed next.
    #[error(
        "type mismatch at stage {position} ({stage}): expected input {expected}, found {found}"
    )]
    TypeMismatch {
        position: usize,
        stage: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Only the last stage of a pipeline may reduce a sequence to a scalar.
    #[error("stage {position} ({stage}) follows a reduction; only the last stage may reduce")]
    NonTerminalReduction { position: usize, stage: String },

    /// A pipeline needs at least one stage.
    #[error("pipeline has no stages")]
    EmptyPipeline,

    /// Invalid operation parameters or query definitions.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Query file could not be read.
    #[error("failed to read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
}

impl QueryError {
    /// Create an empty-sequence error for the named operation.
    pub fn empty_sequence(operation: &'static str) -> Self {
        Self::EmptySequence { operation }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: error.to_string(),
        }
    }

    /// True for errors raised while a pipeline is being assembled.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch { .. }
                | Self::NonTerminalReduction { .. }
                | Self::EmptyPipeline
                | Self::Configuration(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, QueryError>;
