//! GrowableHeap: self-expanding binary heap over the heap engine
//!
//! The heap owns a contiguous buffer with a logical capacity that doubles
//! whenever a push finds it full. Growth reserves the new space before any
//! element is touched, so a failed push leaves the heap exactly as it was.

use crate::algorithms::heap::{build_heap, heap_sort, pop_heap, push_heap};
use crate::error::{OpenHashError, Result};
use crate::memory::{try_grow_to, try_vec_with_capacity};
use std::fmt;
use std::mem;

/// Binary heap ordered by a comparator predicate.
///
/// `cmp(a, b)` returns `true` when `a` belongs above `b`, so
/// [`greater_than_i32`](crate::algorithms::compare::greater_than_i32) gives a
/// max-heap.
///
/// # Examples
///
/// ```rust
/// use openhash::algorithms::compare::greater_than_i32;
/// use openhash::containers::GrowableHeap;
///
/// # fn main() -> openhash::Result<()> {
/// let mut heap = GrowableHeap::new(greater_than_i32)?;
/// for value in [4, 6, 10, 3, 1000, 35] {
///     heap.push(value)?;
/// }
/// assert_eq!(heap.as_slice(), &[1000, 10, 35, 3, 4, 6]);
/// assert_eq!(heap.pop(), Some(1000));
/// # Ok(())
/// # }
/// ```
pub struct GrowableHeap<T, C>
where
    C: Fn(&T, &T) -> bool,
{
    data: Vec<T>,
    capacity: usize,
    cmp: C,
}

impl<T, C> GrowableHeap<T, C>
where
    C: Fn(&T, &T) -> bool,
{
    /// Create an empty heap with room for two elements.
    pub fn new(cmp: C) -> Result<Self> {
        Self::check_element_size()?;

        let capacity = Self::initial_capacity(0);
        Ok(Self {
            data: try_vec_with_capacity(capacity)?,
            capacity,
            cmp,
        })
    }

    /// Heapify an owned vector; capacity becomes twice its length.
    pub fn from_vec(mut data: Vec<T>, cmp: C) -> Result<Self> {
        Self::check_element_size()?;

        let capacity = Self::initial_capacity(data.len());
        try_grow_to(&mut data, capacity)?;

        let mut heap = Self {
            data,
            capacity,
            cmp,
        };
        heap.rebuild();
        Ok(heap)
    }

    /// Copy `items` into a new heap; capacity becomes twice their count.
    pub fn from_slice(items: &[T], cmp: C) -> Result<Self>
    where
        T: Clone,
    {
        Self::check_element_size()?;

        let capacity = Self::initial_capacity(items.len());
        let mut data = try_vec_with_capacity(capacity)?;
        data.extend_from_slice(items);

        let mut heap = Self {
            data,
            capacity,
            cmp,
        };
        heap.rebuild();
        Ok(heap)
    }

    fn check_element_size() -> Result<()> {
        if mem::size_of::<T>() == 0 {
            return Err(OpenHashError::configuration(
                "heap elements must have a non-zero size",
            ));
        }
        Ok(())
    }

    #[inline]
    fn initial_capacity(len: usize) -> usize {
        len.max(1).saturating_mul(2)
    }

    fn rebuild(&mut self) {
        let cmp = &self.cmp;
        build_heap(&mut self.data, &mut |a: &T, b: &T| cmp(a, b));
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the heap is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Elements the heap holds before it next grows
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert `value`, doubling the capacity first when the heap is full.
    ///
    /// On allocation failure the heap is unchanged.
    pub fn push(&mut self, value: T) -> Result<()> {
        if self.data.len() == self.capacity {
            let new_capacity = self.capacity.checked_mul(2).ok_or_else(|| {
                OpenHashError::out_of_memory(usize::MAX)
            })?;
            try_grow_to(&mut self.data, new_capacity)?;

            log::trace!(
                "Growable heap expanded from {} to {} elements",
                self.capacity,
                new_capacity
            );
            self.capacity = new_capacity;
        }

        self.data.push(value);
        let cmp = &self.cmp;
        push_heap(&mut self.data, &mut |a: &T, b: &T| cmp(a, b));
        Ok(())
    }

    /// Remove and return the root, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        let cmp = &self.cmp;
        pop_heap(&mut self.data, &mut |a: &T, b: &T| cmp(a, b));
        self.data.pop()
    }

    /// The root element
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Visit every element in storage order.
    pub fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(&T),
    {
        for item in &self.data {
            visitor(item);
        }
    }

    /// Elements in storage (heap) order
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Heap-sort the elements and return them.
    ///
    /// The order is the reverse of the comparator's preference: a max-heap
    /// yields ascending order.
    pub fn into_sorted_vec(self) -> Vec<T> {
        let Self { mut data, cmp, .. } = self;
        heap_sort(&mut data, cmp);
        data
    }

    /// Consume the heap, returning its elements in storage order.
    pub fn release(self) -> Vec<T> {
        self.data
    }
}

impl<T: fmt::Debug, C> fmt::Debug for GrowableHeap<T, C>
where
    C: Fn(&T, &T) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowableHeap")
            .field("data", &self.data)
            .field("capacity", &self.capacity)
            .finish()
    }
}
