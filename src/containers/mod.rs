//! Container types
//!
//! - **`GrowableHeap<T, C>`** - Binary heap with amortized doubling growth and
//!   a pluggable comparator

mod growable_heap;

pub use growable_heap::GrowableHeap;
