//! Adaptive digit-analysis hashing
//!
//! Digit analysis is a two-phase scheme:
//!
//! 1. [`profile_keyset`] tallies, for a sample of keys, how often each digit
//!    value appears at each decimal position (position 0 is the most
//!    significant digit) and scores every position with a caller-supplied
//!    [`DeviationMetric`]. Positions are ranked by ascending deviation with
//!    the crate's heap-sort.
//! 2. [`hash_by_digit_analysis`] builds a bucket by concatenating the key's
//!    digits at the least-biased positions.
//!
//! The tally only counts digit values 1 through 9; a zero digit is never
//! counted. Positions where nothing was counted, or whose summed deviation is
//! exactly zero, score `f64::MAX` and rank last.
//!
//! ```rust
//! use openhash::hash_map::{DigitAnalysisHash, HashFunction, SquaredDeviation};
//!
//! let sample = [10, 20, 30, 41, 52];
//! let analysis = DigitAnalysisHash::from_keyset(&sample, &SquaredDeviation);
//! let hash = HashFunction::DigitAnalysis(analysis);
//! assert!(hash.bucket(41, 32) < 32);
//! ```

use crate::algorithms::heap::heap_sort;
use crate::hash_map::hash_functions::{decimal_digits, digit_count, sign_cleared, MAX_DECIMAL_DIGITS};

/// Number of digit positions profiled per key
pub const MAX_DIGIT_POSITIONS: usize = 10;

/// Number of tallied digit values (1 through 9)
const TALLIED_DIGITS: usize = 9;

/// A digit position and its bias score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationEntry {
    /// Zero-based digit position, counted from the most significant digit
    pub position: u8,
    /// Summed deviation score; lower is less biased
    pub deviation: f64,
}

/// Digit positions ranked by ascending deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationTable {
    entries: [DeviationEntry; MAX_DIGIT_POSITIONS],
}

impl DeviationTable {
    /// Ranked entries, least biased first
    pub fn entries(&self) -> &[DeviationEntry] {
        &self.entries
    }

    /// Ranked digit positions, least biased first
    pub fn ranked_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|entry| entry.position as usize)
    }
}

/// Scores how far an observed digit count strays from a uniform spread.
pub trait DeviationMetric {
    /// Deviation of `count` occurrences of one digit value within a sample of
    /// `sample_size` keys.
    fn deviation(&self, count: usize, sample_size: usize) -> f64;
}

impl<F> DeviationMetric for F
where
    F: Fn(usize, usize) -> f64,
{
    fn deviation(&self, count: usize, sample_size: usize) -> f64 {
        self(count, sample_size)
    }
}

/// Squared distance from the uniform expectation `n / 10`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredDeviation;

impl DeviationMetric for SquaredDeviation {
    fn deviation(&self, count: usize, sample_size: usize) -> f64 {
        let diff = count as f64 - sample_size as f64 / 10.0;
        diff * diff
    }
}

/// Absolute distance from the uniform expectation `n / 10`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsoluteDeviation;

impl DeviationMetric for AbsoluteDeviation {
    fn deviation(&self, count: usize, sample_size: usize) -> f64 {
        (count as f64 - sample_size as f64 / 10.0).abs()
    }
}

/// Profile a key sample and rank its digit positions by bias.
///
/// The result depends only on the sample and the metric.
pub fn profile_keyset<M>(keys: &[i64], metric: &M) -> DeviationTable
where
    M: DeviationMetric + ?Sized,
{
    let mut tally = [[0usize; TALLIED_DIGITS]; MAX_DIGIT_POSITIONS];
    let mut scratch = [0u8; MAX_DECIMAL_DIGITS];

    for &key in keys {
        let digits = decimal_digits(sign_cleared(key), &mut scratch);
        for (position, &digit) in digits.iter().take(MAX_DIGIT_POSITIONS).enumerate() {
            if digit != 0 {
                tally[position][digit as usize - 1] += 1;
            }
        }
    }

    let mut entries = [DeviationEntry {
        position: 0,
        deviation: f64::MAX,
    }; MAX_DIGIT_POSITIONS];

    for (position, counts) in tally.iter().enumerate() {
        let accum: f64 = counts
            .iter()
            .filter(|&&count| count != 0)
            .map(|&count| metric.deviation(count, keys.len()))
            .sum();

        entries[position] = DeviationEntry {
            position: position as u8,
            deviation: if accum != 0.0 { accum } else { f64::MAX },
        };
    }

    heap_sort(&mut entries, |a, b| a.deviation > b.deviation);

    log::debug!(
        "Profiled {} keys for digit analysis, least biased position {}",
        keys.len(),
        entries[0].position
    );

    DeviationTable { entries }
}

/// Digit-analysis bucket for `key`.
///
/// Takes the key's digits at the first `ndigits` ranked positions (at most
/// [`MAX_DIGIT_POSITIONS`]), concatenates them into a decimal number and
/// reduces it modulo `table_size`. A position past the end of the key
/// contributes a zero digit.
pub fn hash_by_digit_analysis(
    key: i64,
    table_size: usize,
    ndigits: usize,
    table: &DeviationTable,
) -> usize {
    if table_size == 0 {
        return 0;
    }

    let mut scratch = [0u8; MAX_DECIMAL_DIGITS];
    let digits = decimal_digits(sign_cleared(key), &mut scratch);

    let hashed = table
        .ranked_positions()
        .take(ndigits.min(MAX_DIGIT_POSITIONS))
        .fold(0u64, |acc, position| {
            acc * 10 + digits.get(position).copied().unwrap_or(0) as u64
        });

    (hashed % table_size as u64) as usize
}

/// A profiled deviation table together with the number of digits to use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitAnalysisHash {
    table: DeviationTable,
    digits: usize,
}

impl DigitAnalysisHash {
    /// Use an existing deviation table with `digits` positions per bucket.
    pub fn new(table: DeviationTable, digits: usize) -> Self {
        Self {
            table,
            digits: digits.min(MAX_DIGIT_POSITIONS),
        }
    }

    /// Profile `keys` and use as many digits as the sample size has.
    pub fn from_keyset<M>(keys: &[i64], metric: &M) -> Self
    where
        M: DeviationMetric + ?Sized,
    {
        let digits = digit_count(keys.len() as u64, 10);
        Self::new(profile_keyset(keys, metric), digits)
    }

    /// The ranked deviation table
    pub fn table(&self) -> &DeviationTable {
        &self.table
    }

    /// Digits concatenated per bucket
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Map `key` to a bucket in `0..table_size`.
    #[inline]
    pub fn bucket(&self, key: i64, table_size: usize) -> usize {
        hash_by_digit_analysis(key, table_size, self.digits, &self.table)
    }
}
