//! Query definitions: an input sequence plus a list of stages over `i64`.
//!
//! Query files are TOML. Each stage is a table tagged by `op`; predicates
//! and mappers are either a bare name (`"even"`) or a one-key table
//! (`{ lt = 5 }`).

use serde::{Deserialize, Serialize};

use crate::errors::{QueryError, Result};
use crate::generators::{range_step, repeat};
use crate::ops;
use crate::pipeline::{DynPipeline, DynPipelineBuilder, FnStage, Reducing};

type Pair = (i64, i64);

/// A complete query: where the values come from and what to do with them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QueryConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub input: InputSpec,
    #[serde(default)]
    pub stages: Vec<StageSpec>,
}

/// Source of the input sequence.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSpec {
    Range {
        start: i64,
        end: i64,
        #[serde(default = "default_step")]
        step: u64,
    },
    Values(Vec<i64>),
    Repeat { value: i64, count: usize },
}

fn default_step() -> u64 {
    1
}

impl InputSpec {
    /// Materialize the input sequence.
    pub fn generate(&self) -> Vec<i64> {
        match self {
            InputSpec::Range { start, end, step } => range_step(*start, *end, *step),
            InputSpec::Values(values) => values.clone(),
            InputSpec::Repeat { value, count } => repeat(*value, *count),
        }
    }
}

/// Element test used by `filter`, `take_while`, `drop_while`, `all` and `any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateSpec {
    Even,
    Odd,
    Positive,
    Negative,
    Lt(i64),
    Le(i64),
    Gt(i64),
    Ge(i64),
    Eq(i64),
    Ne(i64),
}

impl PredicateSpec {
    pub fn matches(self, x: i64) -> bool {
        match self {
            PredicateSpec::Even => x % 2 == 0,
            PredicateSpec::Odd => x % 2 != 0,
            PredicateSpec::Positive => x > 0,
            PredicateSpec::Negative => x < 0,
            PredicateSpec::Lt(v) => x < v,
            PredicateSpec::Le(v) => x <= v,
            PredicateSpec::Gt(v) => x > v,
            PredicateSpec::Ge(v) => x >= v,
            PredicateSpec::Eq(v) => x == v,
            PredicateSpec::Ne(v) => x != v,
        }
    }
}

/// Element-wise function used by `map`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapperSpec {
    Square,
    Negate,
    Abs,
    Add(i64),
    Mul(i64),
    Div(i64),
    Rem(i64),
}

impl MapperSpec {
    /// Apply the mapper. Arithmetic wraps on overflow.
    pub fn apply(self, x: i64) -> i64 {
        match self {
            MapperSpec::Square => x.wrapping_mul(x),
            MapperSpec::Negate => x.wrapping_neg(),
            MapperSpec::Abs => x.wrapping_abs(),
            MapperSpec::Add(v) => x.wrapping_add(v),
            MapperSpec::Mul(v) => x.wrapping_mul(v),
            MapperSpec::Div(v) => x.wrapping_div(v),
            MapperSpec::Rem(v) => x.wrapping_rem(v),
        }
    }

    fn divisor(self) -> Option<i64> {
        match self {
            MapperSpec::Div(v) | MapperSpec::Rem(v) => Some(v),
            _ => None,
        }
    }
}

/// Two-argument function used by folds and `map_pairs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Max,
    Min,
}

impl BinaryOp {
    pub fn apply(self, a: i64, b: i64) -> i64 {
        match self {
            BinaryOp::Add => a.wrapping_add(b),
            BinaryOp::Sub => a.wrapping_sub(b),
            BinaryOp::Mul => a.wrapping_mul(b),
            BinaryOp::Max => a.max(b),
            BinaryOp::Min => a.min(b),
        }
    }
}

/// One stage of a query, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StageSpec {
    Take {
        n: usize,
    },
    Drop {
        n: usize,
    },
    TakeWhile {
        predicate: PredicateSpec,
    },
    DropWhile {
        predicate: PredicateSpec,
    },
    #[serde(alias = "where")]
    Filter {
        predicate: PredicateSpec,
    },
    Map {
        mapper: MapperSpec,
    },
    Sort {
        #[serde(default)]
        descending: bool,
    },
    Reverse,
    Unique,
    Zip {
        with: Vec<i64>,
    },
    MapPairs {
        combine: BinaryOp,
    },
    Difference {
        with: Vec<i64>,
    },
    Intersect {
        with: Vec<i64>,
    },
    Join {
        with: Vec<i64>,
    },
    ToVector,
    /// Wraps on overflow, like `map` and `fold`.
    Sum,
    Avg,
    Max,
    Min,
    Count {
        value: i64,
    },
    Size,
    #[serde(alias = "fold")]
    FoldLeft {
        combine: BinaryOp,
        init: i64,
    },
    FoldRight {
        combine: BinaryOp,
        init: i64,
    },
    All {
        predicate: PredicateSpec,
    },
    Any {
        predicate: PredicateSpec,
    },
    Contains {
        value: i64,
    },
    Equal {
        other: Vec<i64>,
    },
    ToList,
    ToMap,
}

impl StageSpec {
    /// The operation name as written in query files.
    pub fn op_name(&self) -> &'static str {
        match self {
            StageSpec::Take { .. } => "take",
            StageSpec::Drop { .. } => "drop",
            StageSpec::TakeWhile { .. } => "take_while",
            StageSpec::DropWhile { .. } => "drop_while",
            StageSpec::Filter { .. } => "filter",
            StageSpec::Map { .. } => "map",
            StageSpec::Sort { .. } => "sort",
            StageSpec::Reverse => "reverse",
            StageSpec::Unique => "unique",
            StageSpec::Zip { .. } => "zip",
            StageSpec::MapPairs { .. } => "map_pairs",
            StageSpec::Difference { .. } => "difference",
            StageSpec::Intersect { .. } => "intersect",
            StageSpec::Join { .. } => "join",
            StageSpec::ToVector => "to_vector",
            StageSpec::Sum => "sum",
            StageSpec::Avg => "avg",
            StageSpec::Max => "max",
            StageSpec::Min => "min",
            StageSpec::Count { .. } => "count",
            StageSpec::Size => "size",
            StageSpec::FoldLeft { .. } => "fold_left",
            StageSpec::FoldRight { .. } => "fold_right",
            StageSpec::All { .. } => "all",
            StageSpec::Any { .. } => "any",
            StageSpec::Contains { .. } => "contains",
            StageSpec::Equal { .. } => "equal",
            StageSpec::ToList => "to_list",
            StageSpec::ToMap => "to_map",
        }
    }

    /// Append this stage to `builder`.
    ///
    /// Operations defined for any element type are instantiated for the
    /// builder's current sequence type. The rest are only defined over
    /// `i64` (or over pairs, for `map_pairs` and `to_map`) and the builder
    /// rejects them with a type mismatch when the sequence has another
    /// element type.
    fn append(
        &self,
        builder: DynPipelineBuilder<Vec<i64>>,
    ) -> Result<DynPipelineBuilder<Vec<i64>>> {
        let pairs = builder.produces::<Vec<Pair>>();

        match self.clone() {
            StageSpec::Take { n } if pairs => builder.stage(ops::take::<Pair>(n)),
            StageSpec::Take { n } => builder.stage(ops::take::<i64>(n)),
            StageSpec::Drop { n } if pairs => builder.stage(ops::drop::<Pair>(n)),
            StageSpec::Drop { n } => builder.stage(ops::drop::<i64>(n)),
            StageSpec::TakeWhile { predicate } => {
                builder.stage(ops::take_while(move |x: &i64| predicate.matches(*x)))
            }
            StageSpec::DropWhile { predicate } => {
                builder.stage(ops::drop_while(move |x: &i64| predicate.matches(*x)))
            }
            StageSpec::Filter { predicate } => {
                builder.stage(ops::filter(move |x: &i64| predicate.matches(*x)))
            }
            StageSpec::Map { mapper } => builder.stage(ops::map(move |x: i64| mapper.apply(x))),
            StageSpec::Sort { descending: false } if pairs => builder.stage(ops::sort::<Pair>()),
            StageSpec::Sort { descending: false } => builder.stage(ops::sort::<i64>()),
            StageSpec::Sort { descending: true } if pairs => {
                builder.stage(ops::sort_with(|a: &Pair, b: &Pair| b.cmp(a)))
            }
            StageSpec::Sort { descending: true } => {
                builder.stage(ops::sort_with(|a: &i64, b: &i64| b.cmp(a)))
            }
            StageSpec::Reverse if pairs => builder.stage(ops::reverse::<Pair>()),
            StageSpec::Reverse => builder.stage(ops::reverse::<i64>()),
            StageSpec::Unique if pairs => builder.stage(ops::unique::<Pair>()),
            StageSpec::Unique => builder.stage(ops::unique::<i64>()),
            StageSpec::Zip { with } => builder.stage(ops::zip::<i64, i64>(with)),
            StageSpec::MapPairs { combine } => {
                builder.stage(ops::map(move |(a, b): Pair| combine.apply(a, b)))
            }
            StageSpec::Difference { with } => builder.stage(ops::difference(with)),
            StageSpec::Intersect { with } => builder.stage(ops::intersect(with)),
            StageSpec::Join { with } => builder.stage(ops::join(with)),
            StageSpec::ToVector if pairs => builder.stage(ops::to_vector::<Pair>()),
            StageSpec::ToVector => builder.stage(ops::to_vector::<i64>()),
            StageSpec::Sum => builder.stage(FnStage::<_, _, _, Reducing>::new(
                "sum",
                |values: Vec<i64>| values.into_iter().fold(0, i64::wrapping_add),
            )),
            StageSpec::Avg => builder.stage(ops::avg::<i64>()),
            StageSpec::Max => builder.stage(ops::max::<i64>()),
            StageSpec::Min => builder.stage(ops::min::<i64>()),
            StageSpec::Count { value } => builder.stage(ops::count(value)),
            StageSpec::Size if pairs => builder.stage(ops::size::<Pair>()),
            StageSpec::Size => builder.stage(ops::size::<i64>()),
            StageSpec::FoldLeft { combine, init } => builder.stage(ops::fold_left(
                move |acc: i64, x: i64| combine.apply(acc, x),
                init,
            )),
            StageSpec::FoldRight { combine, init } => builder.stage(ops::fold_right(
                move |x: i64, acc: i64| combine.apply(x, acc),
                init,
            )),
            StageSpec::All { predicate } => {
                builder.stage(ops::all(move |x: &i64| predicate.matches(*x)))
            }
            StageSpec::Any { predicate } => {
                builder.stage(ops::any(move |x: &i64| predicate.matches(*x)))
            }
            StageSpec::Contains { value } => builder.stage(ops::contains(value)),
            StageSpec::Equal { other } => builder.stage(ops::equal(other)),
            StageSpec::ToList if pairs => builder.stage(ops::to_list::<Pair>()),
            StageSpec::ToList => builder.stage(ops::to_list::<i64>()),
            StageSpec::ToMap => builder.stage(ops::to_map::<i64, i64>()),
        }
    }
}

impl QueryConfig {
    /// Check parameters that are well-formed TOML but cannot run.
    pub fn validate(&self) -> Result<()> {
        for (i, stage) in self.stages.iter().enumerate() {
            if let StageSpec::Map { mapper } = stage {
                if mapper.divisor() == Some(0) {
                    return Err(QueryError::config(format!(
                        "stage {} ({}): divisor must not be zero",
                        i + 1,
                        stage.op_name()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Display name of the query.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("query")
    }

    /// Assemble the stages into a runnable pipeline.
    pub fn build(&self) -> Result<DynPipeline<Vec<i64>>> {
        self.validate()?;
        self.stages
            .iter()
            .try_fold(DynPipelineBuilder::new(), |builder, stage| {
                stage.append(builder)
            })?
            .build()
    }
}
