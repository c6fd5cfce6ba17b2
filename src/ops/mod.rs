//! The operation set: every stage a pipeline can be built from.
//!
//! Each operation is a small struct implementing [`Stage`](crate::pipeline::Stage)
//! plus a lowercase constructor function. Transforms map a `Vec` to a new
//! `Vec`; reductions consume the sequence into a single value and may only
//! appear last in a pipeline.

pub mod convert;
pub mod filters;
pub mod order;
pub mod reductions;
pub mod set;
pub mod transforms;

pub use convert::{to_list, to_map, to_vector, ToList, ToMap, ToVector};
pub use filters::{drop, drop_while, filter, take, take_while, Drop, DropWhile, Filter, Take, TakeWhile};
pub use order::{reverse, sort, sort_with, Reverse, Sort, SortWith};
pub use reductions::{
    all, any, avg, contains, count, equal, fold, fold_left, fold_right, max, min, size, sum, All,
    Any, Avg, Contains, Count, Equal, FoldLeft, FoldRight, Max, Min, Size, Sum,
};
pub use set::{difference, intersect, join, Difference, Intersect, Join};
pub use transforms::{map, unique, zip, Map, Unique, Zip};
