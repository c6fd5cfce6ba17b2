//! Results of running a query, in a shape that can be printed or serialized.

use std::any::Any;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use serde::Serialize;

use super::query::QueryConfig;
use crate::errors::{QueryError, Result};
use crate::pipeline::{DynPipeline, StageTiming};

/// The value a query produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutput {
    Sequence(Vec<i64>),
    Pairs(Vec<(i64, i64)>),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Count(usize),
    Map(BTreeMap<i64, i64>),
}

/// Try each downcast in turn, returning on the first match.
macro_rules! downcast_into {
    ($value:ident; $($ty:ty => $make:expr),+ $(,)?) => {
        $(
            let $value = match $value.downcast::<$ty>() {
                Ok(v) => return Ok($make(*v)),
                Err(other) => other,
            };
        )+
    };
}

impl QueryOutput {
    /// Recover a typed output from the erased result of a [`DynPipeline`].
    pub fn from_erased(value: Box<dyn Any + Send>, type_name: &'static str) -> Result<Self> {
        downcast_into!(value;
            Vec<i64> => QueryOutput::Sequence,
            Vec<(i64, i64)> => QueryOutput::Pairs,
            i64 => QueryOutput::Integer,
            f64 => QueryOutput::Float,
            bool => QueryOutput::Bool,
            usize => QueryOutput::Count,
            BTreeMap<i64, i64> => QueryOutput::Map,
            VecDeque<i64> => |list: VecDeque<i64>| QueryOutput::Sequence(list.into()),
            VecDeque<(i64, i64)> => |list: VecDeque<(i64, i64)>| QueryOutput::Pairs(list.into()),
        );
        drop(value);
        Err(QueryError::config(format!(
            "query result of type {} cannot be reported",
            type_name
        )))
    }

    /// Short label for the kind of value.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryOutput::Sequence(_) => "sequence",
            QueryOutput::Pairs(_) => "pairs",
            QueryOutput::Integer(_) => "integer",
            QueryOutput::Float(_) => "float",
            QueryOutput::Bool(_) => "boolean",
            QueryOutput::Count(_) => "count",
            QueryOutput::Map(_) => "map",
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: impl Iterator<Item = String>) -> fmt::Result {
    write!(f, "[{}]", items.collect::<Vec<_>>().join(", "))
}

impl fmt::Display for QueryOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOutput::Sequence(values) => write_list(f, values.iter().map(|v| v.to_string())),
            QueryOutput::Pairs(pairs) => write_list(f, pairs.iter().map(|(a, b)| format!("({a}, {b})"))),
            QueryOutput::Integer(v) => write!(f, "{v}"),
            QueryOutput::Float(v) => write!(f, "{v}"),
            QueryOutput::Bool(v) => write!(f, "{v}"),
            QueryOutput::Count(v) => write!(f, "{v}"),
            QueryOutput::Map(map) => {
                let rendered: Vec<String> =
                    map.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
        }
    }
}

/// Run a pipeline over `input` and convert the result.
pub fn run_pipeline(pipeline: &DynPipeline<Vec<i64>>, input: Vec<i64>) -> Result<QueryOutput> {
    let value = pipeline.execute(input)?;
    QueryOutput::from_erased(value, pipeline.output_type_name())
}

/// Like [`run_pipeline`], also reporting how long each stage took.
pub fn run_pipeline_timed(
    pipeline: &DynPipeline<Vec<i64>>,
    input: Vec<i64>,
) -> Result<(QueryOutput, Vec<StageTiming>)> {
    let (value, timings) = pipeline.execute_with_timing(input)?;
    let output = QueryOutput::from_erased(value, pipeline.output_type_name())?;
    Ok((output, timings))
}

/// Build and run a query over its own input.
pub fn run_query(config: &QueryConfig) -> Result<QueryOutput> {
    let pipeline = config.build()?;
    log::debug!(
        "Running '{}' ({} stages)",
        config.display_name(),
        pipeline.stage_count()
    );
    run_pipeline(&pipeline, config.input.generate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::query::{InputSpec, PredicateSpec, StageSpec};

    fn query(input: Vec<i64>, stages: Vec<StageSpec>) -> QueryConfig {
        QueryConfig {
            name: None,
            input: InputSpec::Values(input),
            stages,
        }
    }

    #[test]
    fn test_run_query_even_sum() {
        let config = QueryConfig {
            name: Some("even sum".to_string()),
            input: InputSpec::Range {
                start: 1,
                end: 11,
                step: 1,
            },
            stages: vec![
                StageSpec::Filter {
                    predicate: PredicateSpec::Even,
                },
                StageSpec::Sum,
            ],
        };
        assert_eq!(run_query(&config).unwrap(), QueryOutput::Integer(30));
    }

    #[test]
    fn test_output_shapes() {
        let cases = vec![
            (vec![StageSpec::Reverse], QueryOutput::Sequence(vec![2, 1])),
            (vec![StageSpec::Avg], QueryOutput::Float(1.5)),
            (vec![StageSpec::Size], QueryOutput::Count(2)),
            (vec![StageSpec::Contains { value: 2 }], QueryOutput::Bool(true)),
            (vec![StageSpec::ToList], QueryOutput::Sequence(vec![1, 2])),
            (
                vec![StageSpec::Zip { with: vec![5, 6] }],
                QueryOutput::Pairs(vec![(1, 5), (2, 6)]),
            ),
        ];
        for (stages, expected) in cases {
            assert_eq!(run_query(&query(vec![1, 2], stages)).unwrap(), expected);
        }
    }

    #[test]
    fn test_to_map_output() {
        let config = query(
            vec![1, 2, 1],
            vec![StageSpec::Zip { with: vec![10, 20, 30] }, StageSpec::ToMap],
        );
        let output = run_query(&config).unwrap();
        assert_eq!(output, QueryOutput::Map(BTreeMap::from([(1, 10), (2, 20)])));
        assert_eq!(output.to_string(), "{1: 10, 2: 20}");
    }

    #[test]
    fn test_empty_sequence_error_surfaces() {
        let config = query(vec![], vec![StageSpec::Max]);
        assert_eq!(
            run_query(&config).unwrap_err(),
            QueryError::empty_sequence("max")
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(QueryOutput::Sequence(vec![1, 2]).to_string(), "[1, 2]");
        assert_eq!(QueryOutput::Pairs(vec![(1, 2)]).to_string(), "[(1, 2)]");
        assert_eq!(QueryOutput::Sequence(vec![]).to_string(), "[]");
        assert_eq!(QueryOutput::Bool(false).to_string(), "false");
    }

    #[test]
    fn test_json_serialization() {
        let json = serde_json::to_string(&QueryOutput::Pairs(vec![(1, 2)])).unwrap();
        assert_eq!(json, "[[1,2]]");
        let json = serde_json::to_string(&QueryOutput::Integer(30)).unwrap();
        assert_eq!(json, "30");
    }
}
