//! Query files.
//!
//! A query file names an input sequence of `i64` values and the stages to
//! run over it. Stages are assembled through
//! [`DynPipelineBuilder`](crate::pipeline::DynPipelineBuilder), so a query
//! whose stages do not fit together is rejected when it is loaded.
//!
//! ```rust
//! use seqpipe::config::{parse_query, run_query, QueryOutput};
//!
//! let query = parse_query(r#"
//!     [input]
//!     range = { start = 1, end = 11 }
//!
//!     [[stages]]
//!     op = "filter"
//!     predicate = "even"
//!
//!     [[stages]]
//!     op = "sum"
//! "#)?;
//! assert_eq!(run_query(&query)?, QueryOutput::Integer(30));
//! # Ok::<(), seqpipe::QueryError>(())
//! ```

mod loader;
mod output;
mod query;

pub use loader::{load_query, parse_query};
pub use output::{run_pipeline, run_pipeline_timed, run_query, QueryOutput};
pub use query::{BinaryOp, InputSpec, MapperSpec, PredicateSpec, QueryConfig, StageSpec};
