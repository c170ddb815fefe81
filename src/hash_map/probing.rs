//! Open-addressing probe sequences
//!
//! A probe strategy maps `(key, k, table_size, hash)` to the bucket visited on
//! the `k`-th probe. Probe `k = 0` is always the home bucket `hash(key)`.
//!
//! Strategies are identified by small integers so that a table configuration
//! can be written down and rebuilt: 1 = linear, 2 = quadratic, 3 = double
//! hashing.

use crate::error::{OpenHashError, Result};
use crate::hash_map::hash_functions::HashFunction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Collision resolution by open addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbeStrategy {
    /// `h(key) + k`
    Linear,
    /// `h(key) + ⌊k/2⌋ + ⌊k²/2⌋`
    Quadratic,
    /// `h1(key) + k·h2(key) + 4·tetra(k)`, with `h2` forced odd
    DoubleHashing,
}

impl ProbeStrategy {
    /// Identity of the linear strategy
    pub const LINEAR_ID: u8 = 1;
    /// Identity of the quadratic strategy
    pub const QUADRATIC_ID: u8 = 2;
    /// Identity of the double hashing strategy
    pub const DOUBLE_HASHING_ID: u8 = 3;

    /// All strategies in identity order
    pub const ALL: [ProbeStrategy; 3] = [
        ProbeStrategy::Linear,
        ProbeStrategy::Quadratic,
        ProbeStrategy::DoubleHashing,
    ];

    /// Resolve a strategy from its numeric identity.
    pub fn from_identity(identity: u8) -> Result<Self> {
        match identity {
            Self::LINEAR_ID => Ok(Self::Linear),
            Self::QUADRATIC_ID => Ok(Self::Quadratic),
            Self::DOUBLE_HASHING_ID => Ok(Self::DoubleHashing),
            other => Err(OpenHashError::configuration(format!(
                "unknown probing strategy identity {}",
                other
            ))),
        }
    }

    /// Numeric identity of this strategy
    pub fn identity(self) -> u8 {
        match self {
            Self::Linear => Self::LINEAR_ID,
            Self::Quadratic => Self::QUADRATIC_ID,
            Self::DoubleHashing => Self::DOUBLE_HASHING_ID,
        }
    }

    /// Secondary hash used by double hashing: FNV-1, or division when the
    /// primary is FNV-1 already.
    pub fn secondary_hash(primary: &HashFunction) -> HashFunction {
        if primary.is_fnv1() {
            HashFunction::Division
        } else {
            HashFunction::Fnv1
        }
    }

    /// Bucket visited on probe `k` for `key`.
    pub fn probe(self, key: i64, k: usize, table_size: usize, hash: &HashFunction) -> usize {
        if table_size == 0 {
            return 0;
        }

        let m = table_size as u128;
        let home = hash.bucket(key, table_size) as u128;
        let k_wide = k as u128;

        let index = match self {
            Self::Linear => (home + k_wide) % m,
            Self::Quadratic => {
                let half_k = k_wide / 2;
                let half_square = (k_wide * k_wide / 2) % m;
                (home + half_k + half_square) % m
            }
            Self::DoubleHashing => {
                let mut step = Self::secondary_hash(hash).bucket(key, table_size) as u128;
                if step & 1 == 0 {
                    step += 1;
                }
                let offset = 4 * tetrahedral_mod(k as u64, table_size as u64) as u128;
                (home + k_wide * step % m + offset) % m
            }
        };

        index as usize
    }
}

impl Default for ProbeStrategy {
    fn default() -> Self {
        ProbeStrategy::Quadratic
    }
}

impl fmt::Display for ProbeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
            Self::DoubleHashing => "double-hashing",
        };
        f.write_str(name)
    }
}

/// `(k³ − k) / 6 mod m` without overflowing for large `k`.
fn tetrahedral_mod(k: u64, m: u64) -> u64 {
    if k == 0 || m == 0 {
        return 0;
    }

    // (k - 1) k (k + 1) holds a multiple of 2 and a multiple of 3
    let mut factors = [k as u128 - 1, k as u128, k as u128 + 1];
    for divisor in [2u128, 3] {
        if let Some(factor) = factors.iter_mut().find(|f| **f % divisor == 0) {
            *factor /= divisor;
        }
    }

    let m = m as u128;
    let product = factors
        .iter()
        .fold(1u128, |acc, &factor| acc * (factor % m) % m);
    product as u64
}
