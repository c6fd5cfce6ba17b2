//! Reductions: stages that turn a sequence into a terminal value.
//!
//! Only `avg`, `max` and `min` can fail, and only on an empty sequence.
//! Everything else has a well-defined result for empty input: the identity
//! element for `sum`, zero for `count` and `size`, vacuous truth for `all`.

use std::marker::PhantomData;

use crate::errors::{QueryError, Result};
use crate::numeric::{Accumulate, AsF64};
use crate::pipeline::{Reducing, Stage};

/// Declares a parameterless reduction struct with its constructor.
macro_rules! unit_reduction {
    ($(#[$doc:meta])* $name:ident, $ctor:ident, $($bound:tt)+) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name<T> {
            _marker: PhantomData<fn() -> T>,
        }

        $(#[$doc])*
        pub fn $ctor<T: $($bound)+>() -> $name<T> {
            $name {
                _marker: PhantomData,
            }
        }
    };
}

unit_reduction!(
    /// Left fold with `+`, starting from the element type's identity.
    Sum, sum, Accumulate
);
unit_reduction!(
    /// Arithmetic mean as `f64`.
    Avg, avg, Accumulate + AsF64
);
unit_reduction!(
    /// First greatest element.
    Max, max, PartialOrd
);
unit_reduction!(
    /// First smallest element.
    Min, min, PartialOrd
);
unit_reduction!(
    /// Number of elements.
    Size, size, Sized
);

impl<T: Accumulate> Stage for Sum<T> {
    type Input = Vec<T>;
    type Output = T;
    type Kind = Reducing;

    fn execute(&self, input: Vec<T>) -> Result<T> {
        Ok(input.into_iter().fold(T::identity(), T::combine))
    }

    fn name(&self) -> &str {
        "sum"
    }
}

impl<T: Accumulate + AsF64> Stage for Avg<T> {
    type Input = Vec<T>;
    type Output = f64;
    type Kind = Reducing;

    fn execute(&self, input: Vec<T>) -> Result<f64> {
        if input.is_empty() {
            return Err(QueryError::empty_sequence("avg"));
        }
        let total: f64 = input.iter().map(AsF64::as_f64).sum();
        Ok(total / input.len() as f64)
    }

    fn name(&self) -> &str {
        "avg"
    }
}

impl<T: PartialOrd> Stage for Max<T> {
    type Input = Vec<T>;
    type Output = T;
    type Kind = Reducing;

    fn execute(&self, input: Vec<T>) -> Result<T> {
        input
            .into_iter()
            .reduce(|best, x| if best < x { x } else { best })
            .ok_or(QueryError::empty_sequence("max"))
    }

    fn name(&self) -> &str {
        "max"
    }
}

impl<T: PartialOrd> Stage for Min<T> {
    type Input = Vec<T>;
    type Output = T;
    type Kind = Reducing;

    fn execute(&self, input: Vec<T>) -> Result<T> {
        input
            .into_iter()
            .reduce(|best, x| if x < best { x } else { best })
            .ok_or(QueryError::empty_sequence("min"))
    }

    fn name(&self) -> &str {
        "min"
    }
}

impl<T> Stage for Size<T> {
    type Input = Vec<T>;
    type Output = usize;
    type Kind = Reducing;

    fn execute(&self, input: Vec<T>) -> Result<usize> {
        Ok(input.len())
    }

    fn name(&self) -> &str {
        "size"
    }
}

/// Number of elements equal to a value.
///
/// This searches for the value; for the sequence length use [`size`].
#[derive(Debug, Clone)]
pub struct Count<T> {
    value: T,
}

/// Number of elements equal to `value`.
pub fn count<T: PartialEq>(value: T) -> Count<T> {
    Count { value }
}

impl<T: PartialEq> Stage for Count<T> {
    type Input = Vec<T>;
    type Output = usize;
    type Kind = Reducing;

    fn execute(&self, input: Vec<T>) -> Result<usize> {
        Ok(input.iter().filter(|x| **x == self.value).count())
    }

    fn name(&self) -> &str {
        "count"
    }
}

/// `op(op(op(init, e0), e1), e2)...`
#[derive(Clone)]
pub struct FoldLeft<T, A, F> {
    op: F,
    init: A,
    _marker: PhantomData<fn() -> T>,
}

/// Folds from the front: `op(op(init, e0), e1)` and so on.
pub fn fold_left<T, A, F>(op: F, init: A) -> FoldLeft<T, A, F>
where
    A: Clone,
    F: Fn(A, T) -> A,
{
    FoldLeft {
        op,
        init,
        _marker: PhantomData,
    }
}

/// Alias for [`fold_left`].
pub fn fold<T, A, F>(op: F, init: A) -> FoldLeft<T, A, F>
where
    A: Clone,
    F: Fn(A, T) -> A,
{
    fold_left(op, init)
}

impl<T, A, F> Stage for FoldLeft<T, A, F>
where
    A: Clone,
    F: Fn(A, T) -> A,
{
    type Input = Vec<T>;
    type Output = A;
    type Kind = Reducing;

    fn execute(&self, input: Vec<T>) -> Result<A> {
        Ok(input.into_iter().fold(self.init.clone(), &self.op))
    }

    fn name(&self) -> &str {
        "fold_left"
    }
}

/// `op(e0, op(e1, ... op(e_last, init)))`
///
/// The running value is the *second* argument of `op`, as in a classical
/// right fold, so `fold_right(|a, b| a - b, 5)` over `1..=10` is `0` while
/// the corresponding left fold is `-50`.
#[derive(Clone)]
pub struct FoldRight<T, A, F> {
    op: F,
    init: A,
    _marker: PhantomData<fn() -> T>,
}

/// Folds from the back: `op(e0, op(e1, ... op(e_last, init)))`.
pub fn fold_right<T, A, F>(op: F, init: A) -> FoldRight<T, A, F>
where
    A: Clone,
    F: Fn(T, A) -> A,
{
    FoldRight {
        op,
        init,
        _marker: PhantomData,
    }
}

impl<T, A, F> Stage for FoldRight<T, A, F>
where
    A: Clone,
    F: Fn(T, A) -> A,
{
    type Input = Vec<T>;
    type Output = A;
    type Kind = Reducing;

    fn execute(&self, input: Vec<T>) -> Result<A> {
        Ok(input
            .into_iter()
            .rev()
            .fold(self.init.clone(), |acc, item| (self.op)(item, acc)))
    }

    fn name(&self) -> &str {
        "fold_right"
    }
}

/// True when every element satisfies the predicate (vacuously true when empty).
pub struct All<T, F> {
    pred: F,
    _marker: PhantomData<fn() -> T>,
}

/// Whether every element satisfies `pred`; `true` when empty.
pub fn all<T, F: Fn(&T) -> bool>(pred: F) -> All<T, F> {
    All {
        pred,
        _marker: PhantomData,
    }
}

impl<T, F: Fn(&T) -> bool> Stage for All<T, F> {
    type Input = Vec<T>;
    type Output = bool;
    type Kind = Reducing;

    fn execute(&self, input: Vec<T>) -> Result<bool> {
        Ok(input.iter().all(&self.pred))
    }

    fn name(&self) -> &str {
        "all"
    }
}

/// True when some element satisfies the predicate.
pub struct Any<T, F> {
    pred: F,
    _marker: PhantomData<fn() -> T>,
}

/// Whether some element satisfies `pred`; `false` when empty.
pub fn any<T, F: Fn(&T) -> bool>(pred: F) -> Any<T, F> {
    Any {
        pred,
        _marker: PhantomData,
    }
}

impl<T, F: Fn(&T) -> bool> Stage for Any<T, F> {
    type Input = Vec<T>;
    type Output = bool;
    type Kind = Reducing;

    fn execute(&self, input: Vec<T>) -> Result<bool> {
        Ok(input.iter().any(&self.pred))
    }

    fn name(&self) -> &str {
        "any"
    }
}

#[derive(Debug, Clone)]
pub struct Contains<T> {
    value: T,
}

/// Whether `value` occurs in the sequence.
pub fn contains<T: PartialEq>(value: T) -> Contains<T> {
    Contains { value }
}

impl<T: PartialEq> Stage for Contains<T> {
    type Input = Vec<T>;
    type Output = bool;
    type Kind = Reducing;

    fn execute(&self, input: Vec<T>) -> Result<bool> {
        Ok(input.contains(&self.value))
    }

    fn name(&self) -> &str {
        "contains"
    }
}

/// Same length and pairwise equal, in order.
#[derive(Debug, Clone)]
pub struct Equal<T> {
    other: Vec<T>,
}

/// Whether the sequence equals `other` element by element.
pub fn equal<T: PartialEq>(other: Vec<T>) -> Equal<T> {
    Equal { other }
}

impl<T: PartialEq> Stage for Equal<T> {
    type Input = Vec<T>;
    type Output = bool;
    type Kind = Reducing;

    fn execute(&self, input: Vec<T>) -> Result<bool> {
        Ok(input == self.other)
    }

    fn name(&self) -> &str {
        "equal"
    }
}
