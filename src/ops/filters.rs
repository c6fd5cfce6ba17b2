//! Transforms that keep or discard elements without reordering them.
//!
//! Out-of-range counts are clamped to the sequence length, never rejected.

use std::marker::PhantomData;

use crate::errors::Result;
use crate::pipeline::{Stage, Transforming};

/// Keep the first `n` elements.
#[derive(Debug, Clone)]
pub struct Take<T> {
    n: usize,
    _marker: PhantomData<fn() -> T>,
}

/// The first `n` elements, or all of them when `n` exceeds the length.
pub fn take<T>(n: usize) -> Take<T> {
    Take {
        n,
        _marker: PhantomData,
    }
}

impl<T> Stage for Take<T> {
    type Input = Vec<T>;
    type Output = Vec<T>;
    type Kind = Transforming;

    fn execute(&self, mut input: Vec<T>) -> Result<Vec<T>> {
        input.truncate(self.n);
        Ok(input)
    }

    fn name(&self) -> &str {
        "take"
    }
}

/// Discard the first `n` elements.
#[derive(Debug, Clone)]
pub struct Drop<T> {
    n: usize,
    _marker: PhantomData<fn() -> T>,
}

/// Everything after the first `n` elements.
pub fn drop<T>(n: usize) -> Drop<T> {
    Drop {
        n,
        _marker: PhantomData,
    }
}

impl<T> Stage for Drop<T> {
    type Input = Vec<T>;
    type Output = Vec<T>;
    type Kind = Transforming;

    fn execute(&self, mut input: Vec<T>) -> Result<Vec<T>> {
        let n = self.n.min(input.len());
        input.drain(..n);
        Ok(input)
    }

    fn name(&self) -> &str {
        "drop"
    }
}

/// Length of the prefix whose elements all satisfy `pred`.
fn leading_run<T>(input: &[T], pred: impl Fn(&T) -> bool) -> usize {
    input.iter().position(|x| !pred(x)).unwrap_or(input.len())
}

/// Keep elements from the front while `pred` holds.
///
/// Scanning stops at the first element that fails `pred`; later elements
/// are discarded even if they would satisfy it again.
pub struct TakeWhile<T, F> {
    pred: F,
    _marker: PhantomData<fn() -> T>,
}

/// The longest prefix whose elements all satisfy `pred`.
pub fn take_while<T, F>(pred: F) -> TakeWhile<T, F>
where
    F: Fn(&T) -> bool,
{
    TakeWhile {
        pred,
        _marker: PhantomData,
    }
}

impl<T, F> Stage for TakeWhile<T, F>
where
    F: Fn(&T) -> bool,
{
    type Input = Vec<T>;
    type Output = Vec<T>;
    type Kind = Transforming;

    fn execute(&self, mut input: Vec<T>) -> Result<Vec<T>> {
        let n = leading_run(&input, &self.pred);
        input.truncate(n);
        Ok(input)
    }

    fn name(&self) -> &str {
        "take_while"
    }
}

/// Discard elements from the front while `pred` holds.
pub struct DropWhile<T, F> {
    pred: F,
    _marker: PhantomData<fn() -> T>,
}

/// Everything from the first element that fails `pred`.
pub fn drop_while<T, F>(pred: F) -> DropWhile<T, F>
where
    F: Fn(&T) -> bool,
{
    DropWhile {
        pred,
        _marker: PhantomData,
    }
}

impl<T, F> Stage for DropWhile<T, F>
where
    F: Fn(&T) -> bool,
{
    type Input = Vec<T>;
    type Output = Vec<T>;
    type Kind = Transforming;

    fn execute(&self, mut input: Vec<T>) -> Result<Vec<T>> {
        let n = leading_run(&input, &self.pred);
        input.drain(..n);
        Ok(input)
    }

    fn name(&self) -> &str {
        "drop_while"
    }
}

/// Keep every element that satisfies `pred`, preserving relative order.
pub struct Filter<T, F> {
    pred: F,
    _marker: PhantomData<fn() -> T>,
}

/// The elements that satisfy `pred`, in order.
#[doc(alias = "where")]
pub fn filter<T, F>(pred: F) -> Filter<T, F>
where
    F: Fn(&T) -> bool,
{
    Filter {
        pred,
        _marker: PhantomData,
    }
}

impl<T, F> Stage for Filter<T, F>
where
    F: Fn(&T) -> bool,
{
    type Input = Vec<T>;
    type Output = Vec<T>;
    type Kind = Transforming;

    fn execute(&self, mut input: Vec<T>) -> Result<Vec<T>> {
        input.retain(|x| (self.pred)(x));
        Ok(input)
    }

    fn name(&self) -> &str {
        "filter"
    }
}
