//! Open-addressing hash table and its hash function family
//!
//! This module provides:
//! - `OpenHashTable`: `i64`-keyed table with tombstone deletion and load-factor driven resizing
//! - `HashFunction`: division, fold, multiplicative, FNV-1 and digit-analysis bucket hashes
//! - `ProbeStrategy`: linear, quadratic and double-hashing probe sequences
//! - Digit analysis: key-sample profiling that picks the least biased decimal positions

mod digit_analysis;
mod hash_functions;
mod open_hash_table;
mod probing;

pub use open_hash_table::{EntryStatus, Entry, InsertOutcome, Iter, OpenHashTable, ProbeStats};
pub use probing::ProbeStrategy;

// Export hash function utilities
pub use hash_functions::{
    digit_count, fnv1, hash_by_division, hash_by_fnv, hash_by_fold, hash_by_multiplication,
    sign_cleared, HashFunction, FNV_OFFSET_BASIS, FNV_PRIME, GOLDEN_RATIO_CONJUGATE,
};

// Export digit analysis
pub use digit_analysis::{
    hash_by_digit_analysis, profile_keyset, AbsoluteDeviation, DeviationEntry, DeviationMetric,
    DeviationTable, DigitAnalysisHash, SquaredDeviation, MAX_DIGIT_POSITIONS,
};
