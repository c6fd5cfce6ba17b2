//! Stage abstractions for composable sequence queries.
//!
//! This module defines the core `Stage` trait that enables type-safe
//! composition of operations. A stage is either a *transform* (its output is
//! again a sequence and may feed another stage) or a *reduction* (its output
//! is terminal and may only appear last).

use crate::errors::Result;
use std::marker::PhantomData;

/// Whether a stage keeps producing a sequence or ends the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Produces a sequence that may feed another stage.
    Transform,
    /// Produces a terminal value; only valid as the last stage.
    Reduction,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Transform => write!(f, "transform"),
            Kind::Reduction => write!(f, "reduction"),
        }
    }
}

/// Type-level marker for the kind of a stage.
pub trait StageKind {
    const KIND: Kind;
}

/// Marker for stages whose output is a sequence.
#[derive(Debug, Clone, Copy)]
pub enum Transforming {}

/// Marker for stages whose output is terminal.
#[derive(Debug, Clone, Copy)]
pub enum Reducing {}

impl StageKind for Transforming {
    const KIND: Kind = Kind::Transform;
}

impl StageKind for Reducing {
    const KIND: Kind = Kind::Reduction;
}

mod sealed {
    pub trait Sealed {}

    impl<T> Sealed for Vec<T> {}

    pub trait Admits<O> {}

    impl<O: super::Sequence> Admits<O> for super::Transforming {}

    impl<O> Admits<O> for super::Reducing {}
}

/// Output types a transform may produce.
///
/// Only `Vec<T>` is a sequence. The trait is sealed.
pub trait Sequence: sealed::Sealed {}

impl<T> Sequence for Vec<T> {}

/// A stage kind that can produce values of type `O`.
///
/// `Transforming` produces only [`Sequence`]s; `Reducing` produces
/// anything. Sealed, so a scalar can never be labelled a transform:
///
/// ```rust,compile_fail
/// use seqpipe::pipeline::{FnStage, Transforming};
///
/// let len = FnStage::<_, _, _, Transforming>::new("len", |v: Vec<i32>| v.len());
/// ```
///
/// ```rust,compile_fail
/// use seqpipe::pipeline::Transforming;
/// use seqpipe::{Result, Stage};
///
/// struct Len;
///
/// impl Stage for Len {
///     type Input = Vec<i32>;
///     type Output = usize;
///     type Kind = Transforming;
///
///     fn execute(&self, input: Vec<i32>) -> Result<usize> {
///         Ok(input.len())
///     }
///
///     fn name(&self) -> &str {
///         "len"
///     }
/// }
/// ```
pub trait Produces<O>: StageKind + sealed::Admits<O> {}

impl<K, O> Produces<O> for K where K: StageKind + sealed::Admits<O> {}

/// A pipeline stage that consumes one value and produces another.
///
/// Every stage takes its input by value and returns a new owned output, so
/// no stage can hold on to an intermediate sequence after handing it on.
///
/// # Type Safety
///
/// Stages can only be composed when their types align:
/// ```rust,ignore
/// Pipeline::new(take(5))   // Vec<i32> -> Vec<i32>
///     .then(sum())         // Vec<i32> -> i32    - OK!
///     .then(take(1))       // after a reduction  - Compile error!
/// ```
pub trait Stage {
    type Input;
    type Output;
    type Kind: Produces<Self::Output>;

    /// Execute this stage with the given input.
    fn execute(&self, input: Self::Input) -> Result<Self::Output>;

    /// Get the stage name for logging and introspection.
    fn name(&self) -> &str;

    /// Number of primitive stages this stage is made of.
    fn stage_count(&self) -> usize {
        1
    }

    /// Names of the primitive stages, in execution order.
    fn stage_names(&self) -> Vec<&str> {
        vec![self.name()]
    }
}

/// Stage whose output is a sequence.
pub trait Transform: Stage<Kind = Transforming> {}

impl<S: Stage<Kind = Transforming>> Transform for S {}

/// Stage whose output ends the pipeline.
pub trait Reduction: Stage<Kind = Reducing> {}

impl<S: Stage<Kind = Reducing>> Reduction for S {}

/// A named stage built from an infallible closure.
///
/// # Example
///
/// ```rust
/// use seqpipe::pipeline::{FnStage, Transforming};
/// use seqpipe::Stage;
///
/// let stage = FnStage::<_, _, _, Transforming>::new("double", |v: Vec<i32>| {
///     v.into_iter().map(|x| x * 2).collect::<Vec<_>>()
/// });
/// assert_eq!(stage.execute(vec![1, 2]).unwrap(), vec![2, 4]);
/// ```
pub struct FnStage<F, I, O, K> {
    name: String,
    func: F,
    _phantom: PhantomData<fn(I) -> (O, K)>,
}

impl<F, I, O, K> FnStage<F, I, O, K>
where
    F: Fn(I) -> O,
    K: Produces<O>,
{
    /// Create a new stage with a name and function.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
            _phantom: PhantomData,
        }
    }
}

impl<F, I, O, K> Stage for FnStage<F, I, O, K>
where
    F: Fn(I) -> O,
    K: Produces<O>,
{
    type Input = I;
    type Output = O;
    type Kind = K;

    fn execute(&self, input: Self::Input) -> Result<Self::Output> {
        Ok((self.func)(input))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A named stage built from a closure that can fail.
pub struct FallibleStage<F, I, O, K> {
    name: String,
    func: F,
    _phantom: PhantomData<fn(I) -> (O, K)>,
}

impl<F, I, O, K> FallibleStage<F, I, O, K>
where
    F: Fn(I) -> Result<O>,
    K: Produces<O>,
{
    /// Create a new fallible stage with a name and function.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
            _phantom: PhantomData,
        }
    }
}

impl<F, I, O, K> Stage for FallibleStage<F, I, O, K>
where
    F: Fn(I) -> Result<O>,
    K: Produces<O>,
{
    type Input = I;
    type Output = O;
    type Kind = K;

    fn execute(&self, input: Self::Input) -> Result<Self::Output> {
        (self.func)(input)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
