//! Binary heap engine over contiguous slices
//!
//! The functions in this module reorder a slice in place and never allocate.
//! Heap order is entirely defined by the comparator: `cmp(a, b)` returns
//! `true` when `a` belongs above `b`. A "greater than" comparator therefore
//! builds a max-heap and a "less than" comparator a min-heap.
//!
//! Indices outside the slice are ignored, so every function is total.
//!
//! # Examples
//!
//! ```rust
//! use openhash::algorithms::heap::heap_sort;
//! use openhash::algorithms::compare::greater_than_i32;
//!
//! let mut data = [4, 6, 10, 3, 1000, 35];
//! heap_sort(&mut data, greater_than_i32);
//! assert_eq!(data, [3, 4, 6, 10, 35, 1000]);
//! ```

use crate::memory::swap_elements;

/// Index of the parent of `index`. The root is its own parent.
#[inline]
pub fn parent(index: usize) -> usize {
    index.saturating_sub(1) >> 1
}

/// Index of the left child of `index`.
#[inline]
pub fn left(index: usize) -> usize {
    (index << 1) + 1
}

/// Index of the right child of `index`.
#[inline]
pub fn right(index: usize) -> usize {
    (index << 1) + 2
}

/// Move the element at `index` toward the root while it compares favorably
/// against its parent.
pub fn sift_up<T, F>(heap: &mut [T], mut index: usize, cmp: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if index >= heap.len() {
        return;
    }

    while index > 0 {
        let up = parent(index);
        if !cmp(&heap[index], &heap[up]) {
            break;
        }
        swap_elements(heap, index, up);
        index = up;
    }
}

/// Move the element at `index` toward the leaves, swapping it with the more
/// extreme of its children until neither child compares favorably.
pub fn sift_down<T, F>(heap: &mut [T], mut index: usize, cmp: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = heap.len();
    if index >= len {
        return;
    }

    loop {
        let l = left(index);
        let r = right(index);
        let mut best = index;

        if l < len && cmp(&heap[l], &heap[best]) {
            best = l;
        }
        if r < len && cmp(&heap[r], &heap[best]) {
            best = r;
        }
        if best == index {
            break;
        }

        swap_elements(heap, index, best);
        index = best;
    }
}

/// Bottom-up heapify in O(n).
pub fn build_heap<T, F>(heap: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    for index in (0..heap.len() / 2).rev() {
        sift_down(heap, index, cmp);
    }
}

/// Restore heap order after the caller appended an element at the end.
pub fn push_heap<T, F>(heap: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if let Some(last) = heap.len().checked_sub(1) {
        sift_up(heap, last, cmp);
    }
}

/// Move the root to the last position and re-heapify the remaining prefix.
///
/// After the call `heap[..len - 1]` is a heap and `heap[len - 1]` holds the
/// former root.
pub fn pop_heap<T, F>(heap: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = heap.len();
    if len < 2 {
        return;
    }

    swap_elements(heap, 0, len - 1);
    sift_down(&mut heap[..len - 1], 0, cmp);
}

/// Check that every parent compares at least as favorably as its children.
pub fn is_heap<T, F>(heap: &[T], mut cmp: F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    (1..heap.len()).all(|index| !cmp(&heap[index], &heap[parent(index)]))
}

/// In-place heap sort.
///
/// The maximum under the comparator is repeatedly moved to the end, so the
/// output order is the reverse of the comparator's preference: a "greater
/// than" comparator sorts ascending.
pub fn heap_sort<T, F>(data: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> bool,
{
    build_heap(data, &mut cmp);

    for end in (1..data.len()).rev() {
        swap_elements(data, 0, end);
        sift_down(&mut data[..end], 0, &mut cmp);
    }
}
