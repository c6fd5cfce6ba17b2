//! Combining the input with a fixed sequence captured at construction.
//!
//! `difference` and `intersect` compare POSITIONALLY: element `i` of the
//! input is only ever compared with element `i` of the fixed sequence. They
//! are not membership tests.

use crate::errors::Result;
use crate::pipeline::{Stage, Transforming};

/// Keep input elements that differ from the fixed element at the same index.
///
/// Input elements past the end of the fixed sequence are always kept.
///
/// ```rust
/// use seqpipe::ops::difference;
/// use seqpipe::Stage;
///
/// // 3 is kept even though it appears in the fixed sequence: position 0 holds 1.
/// let stage = difference(vec![1, 3]);
/// assert_eq!(stage.execute(vec![3, 3, 4]).unwrap(), vec![3, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct Difference<T> {
    fixed: Vec<T>,
}

/// Input elements that differ from `fixed` at the same position.
pub fn difference<T: PartialEq>(fixed: Vec<T>) -> Difference<T> {
    Difference { fixed }
}

impl<T: PartialEq> Stage for Difference<T> {
    type Input = Vec<T>;
    type Output = Vec<T>;
    type Kind = Transforming;

    fn execute(&self, input: Vec<T>) -> Result<Vec<T>> {
        Ok(input
            .into_iter()
            .enumerate()
            .filter(|(i, item)| self.fixed.get(*i) != Some(item))
            .map(|(_, item)| item)
            .collect())
    }

    fn name(&self) -> &str {
        "difference"
    }
}

/// Keep input elements equal to the fixed element at the same index.
#[derive(Debug, Clone)]
pub struct Intersect<T> {
    fixed: Vec<T>,
}

/// Input elements that equal `fixed` at the same position.
pub fn intersect<T: PartialEq>(fixed: Vec<T>) -> Intersect<T> {
    Intersect { fixed }
}

impl<T: PartialEq> Stage for Intersect<T> {
    type Input = Vec<T>;
    type Output = Vec<T>;
    type Kind = Transforming;

    fn execute(&self, input: Vec<T>) -> Result<Vec<T>> {
        Ok(input
            .into_iter()
            .zip(&self.fixed)
            .filter(|(item, fixed)| item == *fixed)
            .map(|(item, _)| item)
            .collect())
    }

    fn name(&self) -> &str {
        "intersect"
    }
}

/// Append the fixed sequence after the input.
#[derive(Debug, Clone)]
pub struct Join<T> {
    fixed: Vec<T>,
}

/// The input followed by `fixed`.
pub fn join<T: Clone>(fixed: Vec<T>) -> Join<T> {
    Join { fixed }
}

impl<T: Clone> Stage for Join<T> {
    type Input = Vec<T>;
    type Output = Vec<T>;
    type Kind = Transforming;

    fn execute(&self, mut input: Vec<T>) -> Result<Vec<T>> {
        input.extend_from_slice(&self.fixed);
        Ok(input)
    }

    fn name(&self) -> &str {
        "join"
    }
}
