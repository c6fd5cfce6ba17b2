//! Reordering transforms.

use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::errors::Result;
use crate::pipeline::{Stage, Transforming};

/// Sort ascending by `Ord`. The sort is stable.
#[derive(Debug, Clone)]
pub struct Sort<T> {
    _marker: PhantomData<fn() -> T>,
}

/// Stable ascending sort.
pub fn sort<T: Ord>() -> Sort<T> {
    Sort {
        _marker: PhantomData,
    }
}

impl<T: Ord> Stage for Sort<T> {
    type Input = Vec<T>;
    type Output = Vec<T>;
    type Kind = Transforming;

    fn execute(&self, mut input: Vec<T>) -> Result<Vec<T>> {
        input.sort();
        Ok(input)
    }

    fn name(&self) -> &str {
        "sort"
    }
}

/// Sort with a caller-supplied comparator. The sort is stable.
pub struct SortWith<T, F> {
    cmp: F,
    _marker: PhantomData<fn() -> T>,
}

/// Stable sort by the comparator `cmp`.
pub fn sort_with<T, F>(cmp: F) -> SortWith<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    SortWith {
        cmp,
        _marker: PhantomData,
    }
}

impl<T, F> Stage for SortWith<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    type Input = Vec<T>;
    type Output = Vec<T>;
    type Kind = Transforming;

    fn execute(&self, mut input: Vec<T>) -> Result<Vec<T>> {
        input.sort_by(&self.cmp);
        Ok(input)
    }

    fn name(&self) -> &str {
        "sort_with"
    }
}

#[derive(Debug, Clone)]
pub struct Reverse<T> {
    _marker: PhantomData<fn() -> T>,
}

/// The sequence back to front.
pub fn reverse<T>() -> Reverse<T> {
    Reverse {
        _marker: PhantomData,
    }
}

impl<T> Stage for Reverse<T> {
    type Input = Vec<T>;
    type Output = Vec<T>;
    type Kind = Transforming;

    fn execute(&self, mut input: Vec<T>) -> Result<Vec<T>> {
        input.reverse();
        Ok(input)
    }

    fn name(&self) -> &str {
        "reverse"
    }
}
