//! Conversions from a sequence into other container shapes.

use std::collections::{BTreeMap, VecDeque};
use std::marker::PhantomData;

use crate::errors::Result;
use crate::pipeline::{Reducing, Stage, Transforming};

/// Identity conversion; the result is still a sequence and may feed later stages.
#[derive(Debug, Clone)]
pub struct ToVector<T> {
    _marker: PhantomData<fn() -> T>,
}

/// Copies the sequence unchanged.
pub fn to_vector<T>() -> ToVector<T> {
    ToVector {
        _marker: PhantomData,
    }
}

impl<T> Stage for ToVector<T> {
    type Input = Vec<T>;
    type Output = Vec<T>;
    type Kind = Transforming;

    fn execute(&self, input: Vec<T>) -> Result<Vec<T>> {
        Ok(input)
    }

    fn name(&self) -> &str {
        "to_vector"
    }
}

/// Same elements, same order, in a double-ended queue.
#[derive(Debug, Clone)]
pub struct ToList<T> {
    _marker: PhantomData<fn() -> T>,
}

/// Collects the sequence into a `VecDeque`, keeping order.
pub fn to_list<T>() -> ToList<T> {
    ToList {
        _marker: PhantomData,
    }
}

impl<T> Stage for ToList<T> {
    type Input = Vec<T>;
    type Output = VecDeque<T>;
    type Kind = Reducing;

    fn execute(&self, input: Vec<T>) -> Result<VecDeque<T>> {
        Ok(VecDeque::from(input))
    }

    fn name(&self) -> &str {
        "to_list"
    }
}

/// Build an ordered map from a sequence of key/value pairs.
///
/// The first occurrence of a key wins; later pairs with the same key are
/// ignored.
///
/// ```rust
/// use seqpipe::ops::to_map;
/// use seqpipe::Stage;
///
/// let map = to_map().execute(vec![(1, 'a'), (2, 'b'), (1, 'c')]).unwrap();
/// assert_eq!(map[&1], 'a');
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ToMap<K, V> {
    _marker: PhantomData<fn() -> (K, V)>,
}

/// Collects `(key, value)` pairs into an ordered map; the first value for a key wins.
pub fn to_map<K: Ord, V>() -> ToMap<K, V> {
    ToMap {
        _marker: PhantomData,
    }
}

impl<K: Ord, V> Stage for ToMap<K, V> {
    type Input = Vec<(K, V)>;
    type Output = BTreeMap<K, V>;
    type Kind = Reducing;

    fn execute(&self, input: Vec<(K, V)>) -> Result<BTreeMap<K, V>> {
        let mut map = BTreeMap::new();
        for (key, value) in input {
            map.entry(key).or_insert(value);
        }
        Ok(map)
    }

    fn name(&self) -> &str {
        "to_map"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_vector_is_identity() {
        let words = vec!["s1".to_string(), "s2".to_string()];
        assert_eq!(to_vector().execute(words.clone()).unwrap(), words);
    }

    #[test]
    fn test_to_list_keeps_order() {
        let list = to_list().execute(vec![3, 1, 2]).unwrap();
        assert_eq!(list, VecDeque::from(vec![3, 1, 2]));
    }

    #[test]
    fn test_to_map_first_key_wins() {
        let map = to_map()
            .execute(vec![("a", 1), ("b", 2), ("a", 3), ("b", 4)])
            .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], 1);
        assert_eq!(map["b"], 2);
    }

    #[test]
    fn test_to_map_empty() {
        assert!(to_map::<i32, i32>().execute(vec![]).unwrap().is_empty());
    }
}
