//! Composable sequence queries.
//!
//! Sequence operations (filters, transforms, reductions, set operations and
//! conversions) are small [`Stage`] values. A [`Pipeline`] chains them into
//! one callable whose intermediate types are checked by the compiler:
//!
//! ```rust
//! use seqpipe::ops::{filter, sum};
//! use seqpipe::pipeline;
//!
//! let even_sum = pipeline![filter(|n: &i32| n % 2 == 0), sum()];
//! assert_eq!(even_sum.run((1..=10).collect()).unwrap(), 30);
//! ```
//!
//! When the stages are only known at runtime, [`DynPipelineBuilder`]
//! performs the same checks while the pipeline is assembled, and the
//! [`config`] module builds such pipelines from TOML query files.

// Export modules for library usage
pub mod cli;
pub mod config;
pub mod errors;
pub mod generators;
pub mod numeric;
pub mod ops;
pub mod pipeline;

// Re-export commonly used types
pub use crate::errors::{QueryError, Result};
pub use crate::pipeline::{DynPipeline, DynPipelineBuilder, Kind, Pipeline, Stage};
