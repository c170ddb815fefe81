//! Ready-made comparator predicates
//!
//! Plug-in predicates for the heap engine and the growable heap. The byte
//! variants compare the raw byte representation lexicographically, the `_i32`
//! variants compare 4-byte signed integers.

/// Byte-wise `a < b`.
#[inline]
pub fn less_than<T: AsRef<[u8]> + ?Sized>(a: &T, b: &T) -> bool {
    a.as_ref() < b.as_ref()
}

/// Byte-wise `a > b`.
#[inline]
pub fn greater_than<T: AsRef<[u8]> + ?Sized>(a: &T, b: &T) -> bool {
    a.as_ref() > b.as_ref()
}

/// Byte-wise equality.
#[inline]
pub fn equal_to<T: AsRef<[u8]> + ?Sized>(a: &T, b: &T) -> bool {
    a.as_ref() == b.as_ref()
}

/// `a < b` for 4-byte integers.
#[inline]
pub fn less_than_i32(a: &i32, b: &i32) -> bool {
    a < b
}

/// `a > b` for 4-byte integers.
#[inline]
pub fn greater_than_i32(a: &i32, b: &i32) -> bool {
    a > b
}

/// `a == b` for 4-byte integers.
#[inline]
pub fn equal_to_i32(a: &i32, b: &i32) -> bool {
    a == b
}
