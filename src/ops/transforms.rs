//! Element-wise transforms: mapping, pairing and de-duplication.

use std::marker::PhantomData;

use crate::errors::Result;
use crate::pipeline::{Stage, Transforming};

/// Apply `f` to every element.
pub struct Map<F, T, U> {
    f: F,
    _marker: PhantomData<fn(T) -> U>,
}

/// Applies `f` to each element.
pub fn map<F, T, U>(f: F) -> Map<F, T, U>
where
    F: Fn(T) -> U,
{
    Map {
        f,
        _marker: PhantomData,
    }
}

impl<F, T, U> Stage for Map<F, T, U>
where
    F: Fn(T) -> U,
{
    type Input = Vec<T>;
    type Output = Vec<U>;
    type Kind = Transforming;

    fn execute(&self, input: Vec<T>) -> Result<Vec<U>> {
        Ok(input.into_iter().map(&self.f).collect())
    }

    fn name(&self) -> &str {
        "map"
    }
}

/// Pair each element with the element of a fixed sequence at the same index.
///
/// The result is as long as the shorter of the two sequences.
#[derive(Debug, Clone)]
pub struct Zip<T, U> {
    fixed: Vec<U>,
    _marker: PhantomData<fn() -> T>,
}

/// Pairs each element with the element of `fixed` at the same index, up to the shorter length.
pub fn zip<T, U: Clone>(fixed: Vec<U>) -> Zip<T, U> {
    Zip {
        fixed,
        _marker: PhantomData,
    }
}

impl<T, U: Clone> Stage for Zip<T, U> {
    type Input = Vec<T>;
    type Output = Vec<(T, U)>;
    type Kind = Transforming;

    fn execute(&self, input: Vec<T>) -> Result<Vec<(T, U)>> {
        Ok(input.into_iter().zip(self.fixed.iter().cloned()).collect())
    }

    fn name(&self) -> &str {
        "zip"
    }
}

/// Keep the first occurrence of every distinct value, in order.
///
/// Uses only `PartialEq`, so it is quadratic in the sequence length.
#[derive(Debug, Clone)]
pub struct Unique<T> {
    _marker: PhantomData<fn() -> T>,
}

/// First occurrence of each distinct element, in order.
pub fn unique<T: PartialEq>() -> Unique<T> {
    Unique {
        _marker: PhantomData,
    }
}

impl<T: PartialEq> Stage for Unique<T> {
    type Input = Vec<T>;
    type Output = Vec<T>;
    type Kind = Transforming;

    fn execute(&self, input: Vec<T>) -> Result<Vec<T>> {
        let mut seen: Vec<T> = Vec::with_capacity(input.len());
        for item in input {
            if !seen.contains(&item) {
                seen.push(item);
            }
        }
        Ok(seen)
    }

    fn name(&self) -> &str {
        "unique"
    }
}
