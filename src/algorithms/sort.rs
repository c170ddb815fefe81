//! Comparator-driven insertion sort
//!
//! The quadratic baseline [`heap_sort`](super::heap::heap_sort) is measured
//! against. Unlike heap-sort it follows the comparator's preference directly:
//! a "less than" comparator sorts ascending.

/// Stable in-place insertion sort.
///
/// Each element moves left past every predecessor it compares before under
/// `cmp`; equal elements keep their relative order.
pub fn insertion_sort<T, F>(data: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> bool,
{
    for index in 1..data.len() {
        let mut current = index;
        while current > 0 && cmp(&data[current], &data[current - 1]) {
            data.swap(current, current - 1);
            current -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::compare::{greater_than, greater_than_i32, less_than, less_than_i32};
    use crate::algorithms::heap::heap_sort;

    #[test]
    fn test_insertion_sort_directions() {
        let mut ascending = [4, 6, 10, 3, 1000, 35, -2];
        insertion_sort(&mut ascending, less_than_i32);
        assert_eq!(ascending, [-2, 3, 4, 6, 10, 35, 1000]);

        let mut descending = [4, 6, 10, 3, 1000, 35, -2];
        insertion_sort(&mut descending, greater_than_i32);
        assert_eq!(descending, [1000, 35, 10, 6, 4, 3, -2]);
    }

    #[test]
    fn test_insertion_sort_trivial_inputs() {
        let mut empty: [i32; 0] = [];
        insertion_sort(&mut empty, less_than_i32);

        let mut single = [7];
        insertion_sort(&mut single, less_than_i32);
        assert_eq!(single, [7]);
    }

    #[test]
    fn test_insertion_sort_is_stable() {
        let mut pairs = [(2u32, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (0, 'e')];
        insertion_sort(&mut pairs, |a, b| a.0 < b.0);
        assert_eq!(pairs, [(0, 'e'), (1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn test_agrees_with_heap_sort() {
        let mut by_insertion: Vec<Vec<u8>> = ["pear", "apple", "fig", "app"]
            .iter()
            .map(|word| word.as_bytes().to_vec())
            .collect();
        let mut by_heap = by_insertion.clone();

        insertion_sort(&mut by_insertion, less_than::<Vec<u8>>);
        heap_sort(&mut by_heap, greater_than::<Vec<u8>>);
        assert_eq!(by_insertion, by_heap);
    }
}
