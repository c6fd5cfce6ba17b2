//! Statically typed pipeline composition.
//!
//! A [`Pipeline`] wraps a chain of stages whose types are checked by the
//! compiler while the pipeline is being built. `then` (or `>>`) is only
//! available while the last stage is a transform, and only accepts a stage
//! whose input type equals the current output type:
//!
//! ```rust,compile_fail
//! use seqpipe::pipeline;
//! use seqpipe::ops::{sum, take};
//!
//! // A reduction may only be the last stage.
//! let p = pipeline![sum::<i32>(), take(1)];
//! ```
//!
//! ```rust,compile_fail
//! use seqpipe::pipeline;
//! use seqpipe::ops::{contains, take};
//!
//! // Vec<i32> cannot feed a stage that consumes Vec<String>.
//! let p = pipeline![take::<i32>(2), contains("x".to_string())];
//! ```
//!
//! ```rust,compile_fail
//! use seqpipe::pipeline;
//! use seqpipe::ops::{avg, max, sort};
//!
//! let p = pipeline![sort::<i32>(), avg(), max()];
//! ```
//!
//! A stage that turns a sequence into a scalar is a reduction whatever it
//! claims to be, so it cannot sit in the middle of a pipeline:
//!
//! ```rust,compile_fail
//! use seqpipe::pipeline;
//! use seqpipe::ops::take;
//! use seqpipe::pipeline::{FnStage, Reducing, Transforming};
//!
//! let p = pipeline![
//!     take::<i32>(3),
//!     FnStage::<_, _, _, Transforming>::new("len", |v: Vec<i32>| v.len()),
//!     FnStage::<_, _, _, Reducing>::new("double", |n: usize| n * 2),
//! ];
//! ```

use std::borrow::Cow;

use super::stage::{Kind, Sequence, Stage, StageKind, Transforming};
use crate::errors::Result;

/// Two stages run back to back.
///
/// The first stage must be a transform producing a [`Sequence`]; the kind
/// of the chain is the kind of its second stage.
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B>
where
    A: Stage<Kind = Transforming>,
    A::Output: Sequence,
    B: Stage<Input = A::Output>,
{
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> Stage for Chain<A, B>
where
    A: Stage<Kind = Transforming>,
    A::Output: Sequence,
    B: Stage<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;
    type Kind = B::Kind;

    fn execute(&self, input: Self::Input) -> Result<Self::Output> {
        let intermediate = self.first.execute(input)?;
        self.second.execute(intermediate)
    }

    fn name(&self) -> &str {
        "chain"
    }

    fn stage_count(&self) -> usize {
        self.first.stage_count() + self.second.stage_count()
    }

    fn stage_names(&self) -> Vec<&str> {
        let mut names = self.first.stage_names();
        names.extend(self.second.stage_names());
        names
    }
}

/// A validated, immutable composition of stages exposed as one callable.
///
/// The pipeline owns every stage (and every parameter the stages
/// captured). Running it never mutates it, so the same value can be run
/// any number of times, from several threads when its stages are `Sync`.
///
/// # Example
///
/// ```rust
/// use seqpipe::ops::{filter, sum};
/// use seqpipe::Pipeline;
///
/// let even_sum = Pipeline::new(filter(|i: &i32| i % 2 == 0)).then(sum());
/// assert_eq!(even_sum.run((1..=10).collect()).unwrap(), 30);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline<S> {
    stage: S,
    name: Cow<'static, str>,
}

impl<S: Stage> Pipeline<S> {
    /// Wrap a single stage.
    pub fn new(stage: S) -> Self {
        Self {
            stage,
            name: Cow::Borrowed("pipeline"),
        }
    }

    /// Give the pipeline a name, used when it is nested inside another one.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Thread `input` through every stage and return the last stage's result.
    ///
    /// The first failing stage aborts the run; later stages never execute.
    pub fn run(&self, input: S::Input) -> Result<S::Output> {
        self.stage.execute(input)
    }

    /// Collect `items` into a sequence and run the pipeline on it.
    pub fn run_iter<T, I>(&self, items: I) -> Result<S::Output>
    where
        S: Stage<Input = Vec<T>>,
        I: IntoIterator<Item = T>,
    {
        self.run(items.into_iter().collect())
    }

    /// Kind of the final stage.
    pub fn kind(&self) -> Kind {
        <S::Kind as StageKind>::KIND
    }

    pub fn stage_count(&self) -> usize {
        self.stage.stage_count()
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stage.stage_names()
    }

    /// Unwrap the composed stage.
    pub fn into_inner(self) -> S {
        self.stage
    }
}

impl<S> Pipeline<S>
where
    S: Stage<Kind = Transforming>,
    S::Output: Sequence,
{
    /// Append a stage.
    ///
    /// The stage's input type must match the current output type, and the
    /// current last stage must be a transform.
    pub fn then<N>(self, next: N) -> Pipeline<Chain<S, N>>
    where
        N: Stage<Input = S::Output>,
    {
        Pipeline {
            stage: Chain::new(self.stage, next),
            name: self.name,
        }
    }
}

impl<S: Stage> Stage for Pipeline<S> {
    type Input = S::Input;
    type Output = S::Output;
    type Kind = S::Kind;

    fn execute(&self, input: Self::Input) -> Result<Self::Output> {
        self.stage.execute(input)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn stage_count(&self) -> usize {
        self.stage.stage_count()
    }

    fn stage_names(&self) -> Vec<&str> {
        self.stage.stage_names()
    }
}

/// `pipeline >> stage` is `pipeline.then(stage)`.
impl<S, N> std::ops::Shr<N> for Pipeline<S>
where
    S: Stage<Kind = Transforming>,
    S::Output: Sequence,
    N: Stage<Input = S::Output>,
{
    type Output = Pipeline<Chain<S, N>>;

    fn shr(self, next: N) -> Self::Output {
        self.then(next)
    }
}

/// Build a [`Pipeline`] from a literal list of stages.
///
/// `pipeline![a, b, c]` expands to `Pipeline::new(a).then(b).then(c)`, so
/// every adjacent pair is type-checked at compile time.
///
/// ```rust
/// use seqpipe::pipeline;
/// use seqpipe::ops::{sum, take};
///
/// let p = pipeline![take(8), take(2), take(1), sum()];
/// assert_eq!(p.run((1..=10).collect::<Vec<i32>>()).unwrap(), 1);
/// ```
#[macro_export]
macro_rules! pipeline {
    ($first:expr $(, $rest:expr)* $(,)?) => {
        $crate::pipeline::Pipeline::new($first)$(.then($rest))*
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::QueryError;
    use crate::ops::{avg, filter, map, reverse, size, sort, sum, take, to_vector};
    use crate::pipeline::{FnStage, Reducing};

    #[test]
    fn test_single_stage_behaves_like_the_stage() {
        let p = Pipeline::new(sum::<i32>());
        assert_eq!(p.run(vec![1, 2, 3]).unwrap(), sum().execute(vec![1, 2, 3]).unwrap());
        assert_eq!(p.stage_count(), 1);
        assert_eq!(p.kind(), Kind::Reduction);
    }

    #[test]
    fn test_then_threads_types() {
        let p = Pipeline::new(filter(|i: &i32| *i > 2))
            .then(map(|i: i32| i.to_string()))
            .then(to_vector());
        assert_eq!(
            p.run(vec![1, 2, 3, 4]).unwrap(),
            vec!["3".to_string(), "4".to_string()]
        );
        assert_eq!(p.kind(), Kind::Transform);
    }

    #[test]
    fn test_shr_operator() {
        let p = Pipeline::new(sort::<i32>()) >> reverse() >> take(2);
        assert_eq!(p.run(vec![3, 1, 4, 1, 5]).unwrap(), vec![5, 4]);
    }

    #[test]
    fn test_macro_matches_fluent_form() {
        let from_macro = pipeline![take(3), sum()];
        let fluent = Pipeline::new(take(3)).then(sum());
        let input: Vec<i64> = vec![5, 6, 7, 8];
        assert_eq!(from_macro.run(input.clone()).unwrap(), fluent.run(input).unwrap());
        assert_eq!(from_macro.stage_names(), vec!["take", "sum"]);
    }

    #[test]
    fn test_nested_pipeline_is_flat() {
        let nested = pipeline![pipeline![sort::<i32>(), take(2)], size()];
        let flat = pipeline![sort::<i32>(), take(2), size()];
        assert_eq!(nested.stage_count(), flat.stage_count());
        assert_eq!(nested.stage_names(), flat.stage_names());
        assert_eq!(
            nested.run(vec![9, 3, 7]).unwrap(),
            flat.run(vec![9, 3, 7]).unwrap()
        );
    }

    #[test]
    fn test_failure_stops_later_stages() {
        use std::cell::Cell;

        let calls = Cell::new(0);
        let counting = FnStage::<_, _, _, Reducing>::new("count_calls", |v: Vec<f64>| {
            calls.set(calls.get() + 1);
            v.len()
        });
        let avg_then_count = Pipeline::new(take::<i32>(0))
            .then(crate::pipeline::FallibleStage::<_, _, _, Transforming>::new(
                "avg_as_seq",
                |v: Vec<i32>| avg().execute(v).map(|a| vec![a]),
            ))
            .then(counting);
        let err = avg_then_count.run(vec![1, 2, 3]).unwrap_err();
        assert_eq!(err, QueryError::empty_sequence("avg"));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_pipeline_is_reusable() {
        let p = pipeline![filter(|i: &i32| i % 2 == 1), sum()];
        assert_eq!(p.run(vec![1, 2, 3]).unwrap(), 4);
        assert_eq!(p.run(vec![5, 7]).unwrap(), 12);
        assert_eq!(p.run_iter(1..=5).unwrap(), 9);
    }

    #[test]
    fn test_named_pipeline() {
        let p = pipeline![take::<u8>(1)].named("head");
        assert_eq!(Stage::name(&p), "head");
    }
}
