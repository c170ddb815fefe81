//! Generic memory primitives
//!
//! Small building blocks shared by the hash table and the heap containers:
//! power-of-two rounding, fallible vector allocation, byte-buffer duplication
//! and element swapping. Allocation failures are reported as
//! [`OpenHashError::OutOfMemory`] instead of aborting the process.

use crate::error::{OpenHashError, Result};
use std::mem;

/// Round `n` up to the next power of two.
///
/// `0` rounds to `1`. Values above the largest representable power of two
/// saturate to it.
#[inline]
pub fn round_up_to_power_of_two(n: usize) -> usize {
    n.checked_next_power_of_two()
        .unwrap_or(1usize << (usize::BITS - 1))
}

/// Allocate an empty vector able to hold exactly `capacity` elements.
pub fn try_vec_with_capacity<T>(capacity: usize) -> Result<Vec<T>> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(capacity)
        .map_err(|_| OpenHashError::out_of_memory(capacity.saturating_mul(mem::size_of::<T>())))?;
    Ok(vec)
}

/// Make sure `vec` can hold `total` elements without reallocating.
///
/// On failure `vec` is left exactly as it was.
pub fn try_grow_to<T>(vec: &mut Vec<T>, total: usize) -> Result<()> {
    let additional = total.saturating_sub(vec.len());
    vec.try_reserve_exact(additional)
        .map_err(|_| OpenHashError::out_of_memory(total.saturating_mul(mem::size_of::<T>())))
}

/// Duplicate an opaque byte buffer into an independently owned allocation.
pub fn duplicate_bytes(src: &[u8]) -> Result<Vec<u8>> {
    let mut copy = try_vec_with_capacity(src.len())?;
    copy.extend_from_slice(src);
    Ok(copy)
}

/// Swap two elements of a slice. Out-of-range indices are ignored.
#[inline]
pub fn swap_elements<T>(slice: &mut [T], a: usize, b: usize) {
    if a < slice.len() && b < slice.len() {
        slice.swap(a, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_up_to_power_of_two() {
        assert_eq!(round_up_to_power_of_two(0), 1);
        assert_eq!(round_up_to_power_of_two(1), 1);
        assert_eq!(round_up_to_power_of_two(3), 4);
        assert_eq!(round_up_to_power_of_two(32), 32);
        assert_eq!(round_up_to_power_of_two(33), 64);
        assert_eq!(round_up_to_power_of_two(100), 128);
        assert!(round_up_to_power_of_two(usize::MAX).is_power_of_two());
    }

    #[test]
    fn test_try_vec_with_capacity() {
        let vec: Vec<u64> = try_vec_with_capacity(64).unwrap();
        assert!(vec.is_empty());
        assert!(vec.capacity() >= 64);

        let huge: Result<Vec<u64>> = try_vec_with_capacity(usize::MAX / 2);
        assert!(matches!(huge, Err(OpenHashError::OutOfMemory { .. })));
    }

    #[test]
    fn test_try_grow_to_keeps_contents_on_failure() {
        let mut vec = vec![1u32, 2, 3];
        assert!(try_grow_to(&mut vec, usize::MAX).is_err());
        assert_eq!(vec, vec![1, 2, 3]);

        try_grow_to(&mut vec, 16).unwrap();
        assert!(vec.capacity() >= 16);
        assert_eq!(vec, vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicate_bytes() {
        let src = [7u8, 0, 255, 3];
        let copy = duplicate_bytes(&src).unwrap();
        assert_eq!(copy, src);
        assert_ne!(copy.as_ptr(), src.as_ptr());

        assert!(duplicate_bytes(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_swap_elements() {
        let mut data = [1, 2, 3];
        swap_elements(&mut data, 0, 2);
        assert_eq!(data, [3, 2, 1]);

        swap_elements(&mut data, 0, 10);
        assert_eq!(data, [3, 2, 1]);
    }
}
