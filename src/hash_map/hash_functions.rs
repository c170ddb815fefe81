//! Bucket hash functions
//!
//! Every function maps `(key, table_size)` to a bucket index in
//! `0..table_size`. Keys are hashed as non-negative magnitudes: the sign bit is
//! cleared before hashing, so two keys that differ only in the sign bit land in
//! the same bucket. A `table_size` of zero always yields bucket 0.
//!
//! # Usage
//!
//! ```rust
//! use openhash::hash_map::{hash_by_division, hash_by_fold, HashFunction};
//!
//! assert_eq!(hash_by_division(130, 128), 2);
//! // "1000" folded in groups of three digits: 100 + 0
//! assert_eq!(hash_by_fold(1000, 128), 100);
//! assert_eq!(HashFunction::Fold.bucket(1000, 128), 100);
//! ```

use crate::hash_map::digit_analysis::DigitAnalysisHash;

/// Fractional part of the golden-ratio conjugate, used by multiplicative hashing
pub const GOLDEN_RATIO_CONJUGATE: f64 = 0.6180339887;

/// FNV offset basis for the native word size
#[cfg(target_pointer_width = "64")]
pub const FNV_OFFSET_BASIS: usize = 14695981039346656037;
/// FNV prime for the native word size
#[cfg(target_pointer_width = "64")]
pub const FNV_PRIME: usize = 1099511628211;

/// FNV offset basis for the native word size
#[cfg(not(target_pointer_width = "64"))]
pub const FNV_OFFSET_BASIS: usize = 2166136261;
/// FNV prime for the native word size
#[cfg(not(target_pointer_width = "64"))]
pub const FNV_PRIME: usize = 16777619;

/// Longest decimal rendering of a `u64`
pub(crate) const MAX_DECIMAL_DIGITS: usize = 20;

/// Clear the sign bit of `key`.
#[inline]
pub fn sign_cleared(key: i64) -> u64 {
    (key & i64::MAX) as u64
}

/// Reduce an arbitrary 64-bit value to a bucket the way division hashing does.
#[inline]
pub(crate) fn reduce(value: u64, table_size: usize) -> usize {
    if table_size == 0 {
        return 0;
    }
    ((value & i64::MAX as u64) % table_size as u64) as usize
}

/// Number of base-`base` digits of `value`; zero has no digits.
pub fn digit_count(mut value: u64, base: u64) -> usize {
    if base < 2 {
        return 0;
    }

    let mut count = 0;
    while value != 0 {
        value /= base;
        count += 1;
    }
    count
}

/// Write the decimal digits of `value` (most significant first) into
/// `scratch` and return them as digit values `0..=9`. Zero renders as `[0]`.
pub(crate) fn decimal_digits(mut value: u64, scratch: &mut [u8; MAX_DECIMAL_DIGITS]) -> &[u8] {
    let mut start = scratch.len();
    loop {
        start -= 1;
        scratch[start] = (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    &scratch[start..]
}

/// Division hashing: the sign-cleared key modulo the table size.
#[inline]
pub fn hash_by_division(key: i64, table_size: usize) -> usize {
    reduce(sign_cleared(key), table_size)
}

/// Digit folding.
///
/// The decimal rendering of the key is cut, left to right, into groups as
/// wide as the decimal length of `table_size`. The groups are summed as
/// integers (a trailing short group included) and the sum is reduced with
/// division hashing.
pub fn hash_by_fold(key: i64, table_size: usize) -> usize {
    if table_size == 0 {
        return 0;
    }

    let group_size = digit_count(table_size as u64, 10);
    let mut scratch = [0u8; MAX_DECIMAL_DIGITS];
    let digits = decimal_digits(sign_cleared(key), &mut scratch);

    let sum = digits
        .chunks(group_size)
        .map(|group| group.iter().fold(0u64, |acc, &d| acc * 10 + d as u64))
        .fold(0u64, u64::wrapping_add);

    reduce(sum, table_size)
}

/// Multiplicative (Fibonacci) hashing.
///
/// `ceil(table_size * frac(key * 0.6180339887))`, wrapped back into range:
/// the ceiling reaches `table_size` whenever the fractional part exceeds
/// `1 - 1/table_size`, and that bucket is folded onto 0.
pub fn hash_by_multiplication(key: i64, table_size: usize) -> usize {
    if table_size == 0 {
        return 0;
    }

    let product = sign_cleared(key) as f64 * GOLDEN_RATIO_CONJUGATE;
    let fraction = product - product.trunc();
    let index = (table_size as f64 * fraction).ceil() as usize;

    index % table_size
}

/// Byte-wise FNV-1 (multiply, then xor) with the native word-size parameters.
pub fn fnv1(data: &[u8]) -> usize {
    data.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        hash.wrapping_mul(FNV_PRIME) ^ byte as usize
    })
}

/// FNV-1 over the native byte representation of the sign-cleared key,
/// reduced with division hashing.
pub fn hash_by_fnv(key: i64, table_size: usize) -> usize {
    let hash = fnv1(&sign_cleared(key).to_ne_bytes());
    reduce(hash as u64, table_size)
}

/// Bucket hash function selected by a table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HashFunction {
    /// [`hash_by_division`]
    #[default]
    Division,
    /// [`hash_by_fold`]
    Fold,
    /// [`hash_by_multiplication`]
    Multiplicative,
    /// [`hash_by_fnv`]
    Fnv1,
    /// Adaptive digit analysis profiled from a key sample
    DigitAnalysis(DigitAnalysisHash),
}

impl HashFunction {
    /// Map `key` to a bucket in `0..table_size`.
    #[inline]
    pub fn bucket(&self, key: i64, table_size: usize) -> usize {
        match self {
            Self::Division => hash_by_division(key, table_size),
            Self::Fold => hash_by_fold(key, table_size),
            Self::Multiplicative => hash_by_multiplication(key, table_size),
            Self::Fnv1 => hash_by_fnv(key, table_size),
            Self::DigitAnalysis(analysis) => analysis.bucket(key, table_size),
        }
    }

    /// Short name for reports and logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Division => "division",
            Self::Fold => "fold",
            Self::Multiplicative => "multiplicative",
            Self::Fnv1 => "fnv1",
            Self::DigitAnalysis(_) => "digit-analysis",
        }
    }

    /// Whether this is the FNV-1 hash
    pub fn is_fnv1(&self) -> bool {
        matches!(self, Self::Fnv1)
    }
}
