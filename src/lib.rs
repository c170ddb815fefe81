//! # openhash: Open-Addressing Hash Tables and Binary Heaps
//!
//! This crate provides an in-memory open-addressing hash table keyed by `i64`,
//! a family of bucket hash functions to drive it, and the binary heap engine
//! the adaptive hash is built on.
//!
//! ## Key Features
//!
//! - **Open Addressing**: tombstone deletion, load-factor driven growth and shrinking
//! - **Hash Functions**: division, digit folding, multiplicative, FNV-1 and adaptive digit analysis
//! - **Probing Strategies**: linear, quadratic and double hashing
//! - **Heap Engine**: comparator-driven sift operations and in-place heap sort over slices
//! - **Growable Heap**: self-expanding heap container with fallible growth
//! - **Configuration**: validated presets, environment and JSON file loading
//!
//! ## Quick Start
//!
//! ```rust
//! use openhash::{GrowableHeap, HashFunction, OpenHashTable, ProbeStrategy};
//! use openhash::algorithms::compare::greater_than_i32;
//!
//! # fn main() -> openhash::Result<()> {
//! // Quadratic probing over fold hashing
//! let mut table = OpenHashTable::with_strategy(128, HashFunction::Fold, ProbeStrategy::Quadratic)?;
//! table.insert(91, b"eighty".to_vec())?;
//! assert_eq!(table.get(91).map(Vec::len), Some(6));
//!
//! // Max-heap of 32-bit integers
//! let mut heap = GrowableHeap::new(greater_than_i32)?;
//! heap.push(35)?;
//! heap.push(1000)?;
//! assert_eq!(heap.peek(), Some(&1000));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod algorithms;
pub mod config;
pub mod containers;
pub mod error;
pub mod hash_map;
pub mod memory;

// Re-export core types
pub use config::{Config, HashTableConfig};
pub use containers::GrowableHeap;
pub use error::{OpenHashError, Result};
pub use hash_map::{
    DeviationTable, DigitAnalysisHash, Entry, EntryStatus, HashFunction, InsertOutcome,
    OpenHashTable, ProbeStats, ProbeStrategy,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently no-op, for future use)
pub fn init() {
    log::debug!("Initializing openhash v{}", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_before_building_tables() {
        init();
        init();
        let table: OpenHashTable<()> = OpenHashTable::new(0, HashFunction::Fnv1, 3).unwrap();
        assert_eq!(table.capacity(), 32);
        assert_eq!(table.probe_strategy(), ProbeStrategy::DoubleHashing);
    }

    #[test]
    fn test_root_reexports() {
        let mut table: OpenHashTable<i32> =
            OpenHashTable::with_config(HashTableConfig::balanced_preset(), HashFunction::Division)
                .unwrap();
        table.insert(1, 1).unwrap();
        assert_eq!(table.search(1).map(Entry::status), Some(EntryStatus::Occupied));
    }
}
