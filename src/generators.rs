//! Sequence generators.

use crate::numeric::RangeValue;

/// Values from `start` toward `end` (exclusive) in steps of one.
///
/// The direction follows the endpoints: `range(5, 1)` counts down.
///
/// ```rust
/// use seqpipe::generators::range;
///
/// assert_eq!(range(1, 5), vec![1, 2, 3, 4]);
/// assert_eq!(range(5, 1), vec![5, 4, 3, 2]);
/// assert_eq!(range(1, 0), vec![1]);
/// assert!(range(3, 3).is_empty());
/// ```
pub fn range<T: RangeValue>(start: T, end: T) -> Vec<T> {
    range_step(start, end, T::unit_step())
}

/// Values from `start` toward `end` (exclusive), `step` apart.
///
/// Empty when `step` is zero or larger than the distance between the
/// endpoints; in particular `start == end` always yields an empty
/// sequence. Stops early once a float step is too small to move past the
/// current value.
pub fn range_step<T: RangeValue>(start: T, end: T, step: T::Step) -> Vec<T> {
    if !T::is_valid_step(step) || start.distance(end) < step {
        return Vec::new();
    }

    let mut values = Vec::new();
    let mut current = Some(start);

    if start < end {
        while let Some(value) = current.filter(|v| *v < end) {
            values.push(value);
            current = value.step_up(step).filter(|next| *next > value);
        }
    } else {
        while let Some(value) = current.filter(|v| *v > end) {
            values.push(value);
            current = value.step_down(step).filter(|next| *next < value);
        }
    }

    values
}

/// `n` copies of `value`.
pub fn repeat<T: Clone>(value: T, n: usize) -> Vec<T> {
    vec![value; n]
}
