//! Slice algorithms
//!
//! The binary heap engine with heap-sort, an insertion-sort baseline, and the
//! comparator predicates both are usually driven with.

pub mod compare;
pub mod heap;
pub mod sort;

pub use compare::{
    equal_to, equal_to_i32, greater_than, greater_than_i32, less_than, less_than_i32,
};
pub use heap::{build_heap, heap_sort, is_heap, pop_heap, push_heap, sift_down, sift_up};
pub use sort::insertion_sort;
