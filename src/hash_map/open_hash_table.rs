//! OpenHashTable - open-addressing hash table keyed by `i64`
//!
//! Every slot of the table is an [`Entry`] in one of three states:
//!
//! - **Free**: never used since the last rehash; a probe sequence ends here
//! - **Occupied**: holds a live key and its value
//! - **Deleted**: a tombstone left by [`OpenHashTable::remove`]; lookups probe
//!   past it so keys displaced beyond the slot stay reachable, and inserts may
//!   reuse it
//!
//! The capacity is always a power of two of at least 32. Before each insert the
//! table grows by the configured growth factor once the load factor exceeds the
//! configured maximum; when tombstones alone push the table past that
//! threshold it is rehashed in place instead. Rehashing plans every target slot
//! before moving anything, so a failed grow or shrink leaves the table as it
//! was.
//!
//! # Examples
//!
//! ```rust
//! use openhash::hash_map::{HashFunction, OpenHashTable};
//!
//! # fn main() -> openhash::Result<()> {
//! // 2 = quadratic probing
//! let mut table = OpenHashTable::new(128, HashFunction::Fold, 2)?;
//! table.insert(-512, "seven")?;
//! table.insert(1000, "fifty-five")?;
//!
//! assert_eq!(table.get(1000), Some(&"fifty-five"));
//! assert_eq!(table.remove(-512), Some("seven"));
//! assert!(!table.contains_key(-512));
//! # Ok(())
//! # }
//! ```

use crate::config::hash_table::MIN_TABLE_CAPACITY;
use crate::config::{Config, HashTableConfig};
use crate::error::{OpenHashError, Result};
use crate::hash_map::hash_functions::HashFunction;
use crate::hash_map::ProbeStrategy;
use crate::memory::{duplicate_bytes, round_up_to_power_of_two, try_vec_with_capacity};
use std::mem;

/// State of a table slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryStatus {
    /// Never used since the last rehash
    #[default]
    Free,
    /// Holds a live key and value
    Occupied,
    /// Tombstone of a removed key
    Deleted,
}

/// One slot of the table.
///
/// The value is present exactly when the status is [`EntryStatus::Occupied`].
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<V> {
    key: i64,
    value: Option<V>,
    status: EntryStatus,
}

impl<V> Entry<V> {
    fn free() -> Self {
        Self {
            key: 0,
            value: None,
            status: EntryStatus::Free,
        }
    }

    /// Key last stored in this slot; meaningless for a free slot
    pub fn key(&self) -> i64 {
        self.key
    }

    /// The live value, if the slot is occupied
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Slot state
    pub fn status(&self) -> EntryStatus {
        self.status
    }

    /// Whether the slot was never used
    pub fn is_free(&self) -> bool {
        self.status == EntryStatus::Free
    }

    /// Whether the slot holds a live key
    pub fn is_occupied(&self) -> bool {
        self.status == EntryStatus::Occupied
    }

    /// Whether the slot is a tombstone
    pub fn is_deleted(&self) -> bool {
        self.status == EntryStatus::Deleted
    }

    fn occupy(&mut self, key: i64, value: V) {
        self.key = key;
        self.value = Some(value);
        self.status = EntryStatus::Occupied;
    }
}

/// Result of a successful insert.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertOutcome<V> {
    /// Buckets examined to place the key, retries after a grow included
    pub probes: usize,
    /// Value replaced when the key was already present
    pub previous: Option<V>,
}

/// Collision statistics accumulated over a table's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeStats {
    /// Buckets examined by all inserts
    pub total_probes: u64,
    /// Longest probe sequence of a single insert
    pub max_probes: usize,
    /// Successful inserts, updates included
    pub inserts: u64,
    /// Grow, shrink and tombstone-purge rehashes
    pub rehashes: u64,
}

impl ProbeStats {
    /// Probes beyond the home bucket, summed over all inserts
    pub fn collisions(&self) -> u64 {
        self.total_probes.saturating_sub(self.inserts)
    }

    /// Mean probe sequence length per insert
    pub fn average_probes(&self) -> f64 {
        if self.inserts == 0 {
            0.0
        } else {
            self.total_probes as f64 / self.inserts as f64
        }
    }

    fn record_insert(&mut self, probes: usize) {
        self.inserts += 1;
        self.total_probes += probes as u64;
        self.max_probes = self.max_probes.max(probes);
    }
}

/// Where a probe sequence for a key stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Live entry holding the key
    Live(usize),
    /// First reusable slot: the earliest tombstone seen, else the terminating free slot
    Vacant(usize),
}

/// Open-addressing hash table from `i64` keys to owned values.
#[derive(Debug, Clone)]
pub struct OpenHashTable<V> {
    entries: Vec<Entry<V>>,
    size: usize,
    tombstones: usize,
    hash: HashFunction,
    strategy: ProbeStrategy,
    config: HashTableConfig,
    stats: ProbeStats,
}

impl<V> OpenHashTable<V> {
    /// Create a table from a capacity hint, a hash function and a probing
    /// strategy identity (1 = linear, 2 = quadratic, 3 = double hashing).
    ///
    /// The capacity is the hint rounded up to a power of two, at least 32.
    pub fn new(capacity_hint: usize, hash: HashFunction, probe_identity: u8) -> Result<Self> {
        let strategy = ProbeStrategy::from_identity(probe_identity)?;
        Self::with_strategy(capacity_hint, hash, strategy)
    }

    /// Create a table with a typed probing strategy and default thresholds.
    pub fn with_strategy(
        capacity_hint: usize,
        hash: HashFunction,
        strategy: ProbeStrategy,
    ) -> Result<Self> {
        let config = HashTableConfig {
            initial_capacity: capacity_hint,
            probe_strategy: strategy,
            ..HashTableConfig::default()
        };
        Self::allocate(config.effective_initial_capacity(), hash, config)
    }

    /// Create a table from a validated configuration.
    pub fn with_config(config: HashTableConfig, hash: HashFunction) -> Result<Self> {
        config.validate()?;
        Self::allocate(config.effective_initial_capacity(), hash, config)
    }

    fn allocate(capacity: usize, hash: HashFunction, config: HashTableConfig) -> Result<Self> {
        let entries = Self::free_entries(capacity)?;

        log::debug!(
            "Created open hash table: capacity {}, hash {}, probing {}",
            capacity,
            hash.name(),
            config.probe_strategy
        );

        Ok(Self {
            entries,
            size: 0,
            tombstones: 0,
            hash,
            strategy: config.probe_strategy,
            config,
            stats: ProbeStats::default(),
        })
    }

    fn free_entries(capacity: usize) -> Result<Vec<Entry<V>>> {
        let mut entries = try_vec_with_capacity(capacity)?;
        entries.resize_with(capacity, Entry::free);
        Ok(entries)
    }

    /// Number of live keys
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the table holds no live keys
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of slots; always a power of two
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Live keys per slot
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Number of tombstones awaiting a rehash
    pub fn deleted_count(&self) -> usize {
        self.tombstones
    }

    /// The primary hash function
    pub fn hash_function(&self) -> &HashFunction {
        &self.hash
    }

    /// The probing strategy
    pub fn probe_strategy(&self) -> ProbeStrategy {
        self.strategy
    }

    /// The thresholds this table was built with
    pub fn config(&self) -> &HashTableConfig {
        &self.config
    }

    /// Collision statistics
    pub fn probe_stats(&self) -> &ProbeStats {
        &self.stats
    }

    /// All slots, for inspection
    pub fn entries(&self) -> &[Entry<V>] {
        &self.entries
    }

    #[inline]
    fn bucket(&self, key: i64, k: usize) -> usize {
        self.strategy.probe(key, k, self.capacity(), &self.hash)
    }

    /// Follow the probe sequence for `key` as an insert would.
    ///
    /// Returns the slot to write (if any) and the number of buckets examined.
    fn locate(&self, key: i64) -> (Option<Slot>, usize) {
        let mut first_deleted = None;

        for k in 0..self.capacity() {
            let index = self.bucket(key, k);
            let entry = &self.entries[index];
            match entry.status {
                EntryStatus::Occupied if entry.key == key => return (Some(Slot::Live(index)), k + 1),
                EntryStatus::Occupied => {}
                EntryStatus::Deleted => {
                    first_deleted.get_or_insert(index);
                }
                EntryStatus::Free => {
                    return (Some(Slot::Vacant(first_deleted.unwrap_or(index))), k + 1);
                }
            }
        }

        (first_deleted.map(Slot::Vacant), self.capacity())
    }

    /// Follow the probe sequence for `key` as a lookup would: stop at a live
    /// match or a free slot, skipping tombstones.
    fn probe_lookup(&self, key: i64) -> Option<usize> {
        for k in 0..self.capacity() {
            let index = self.bucket(key, k);
            let entry = &self.entries[index];
            match entry.status {
                EntryStatus::Occupied if entry.key == key => return Some(index),
                EntryStatus::Free => return Some(index),
                _ => {}
            }
        }
        None
    }

    fn find_index(&self, key: i64) -> Option<usize> {
        self.probe_lookup(key)
            .filter(|&index| self.entries[index].is_occupied())
    }

    /// Insert or update `key`.
    ///
    /// An existing live key is updated in place and its old value returned in
    /// [`InsertOutcome::previous`]. A new key reuses the first tombstone on its
    /// probe sequence, or else the free slot that ends it.
    pub fn insert(&mut self, key: i64, value: V) -> Result<InsertOutcome<V>> {
        self.prepare_for_insert()?;

        let (slot, probes) = match self.locate(key) {
            (Some(slot), probes) => (slot, probes),
            (None, probes) => {
                log::trace!(
                    "Probe sequence for key {} exhausted after {} probes, growing",
                    key,
                    probes
                );
                self.grow()?;
                match self.locate(key) {
                    (Some(slot), retry) => (slot, probes + retry),
                    (None, retry) => {
                        log::warn!(
                            "Insert of key {} failed: no usable slot in {} buckets",
                            key,
                            self.capacity()
                        );
                        return Err(OpenHashError::probe_exhausted(key, retry));
                    }
                }
            }
        };

        let previous = match slot {
            Slot::Live(index) => self.entries[index].value.replace(value),
            Slot::Vacant(index) => {
                let entry = &mut self.entries[index];
                if entry.is_deleted() {
                    self.tombstones -= 1;
                }
                entry.occupy(key, value);
                self.size += 1;
                None
            }
        };

        self.stats.record_insert(probes);
        Ok(InsertOutcome { probes, previous })
    }

    fn prepare_for_insert(&mut self) -> Result<()> {
        let capacity = self.capacity() as f64;

        if self.load_factor() > self.config.max_load_factor {
            self.grow()
        } else if (self.size + self.tombstones) as f64 / capacity > self.config.max_load_factor {
            let purged = self.tombstones;
            match self.rehash(self.capacity()) {
                Ok(()) => {
                    log::debug!(
                        "Purged {} tombstones at capacity {}",
                        purged,
                        self.capacity()
                    );
                    Ok(())
                }
                // dense tables may not fit back into the same capacity
                Err(OpenHashError::ProbeSequenceExhausted { key, .. }) => {
                    log::debug!(
                        "Purge at capacity {} could not place key {}, growing instead",
                        self.capacity(),
                        key
                    );
                    self.grow()
                }
                Err(e) => Err(e),
            }
        } else {
            Ok(())
        }
    }

    fn grow(&mut self) -> Result<()> {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity
            .checked_mul(self.config.growth_factor)
            .ok_or_else(|| {
                OpenHashError::out_of_memory(old_capacity.saturating_mul(mem::size_of::<Entry<V>>()))
            })?;

        self.rehash(new_capacity)?;
        log::debug!(
            "Grew open hash table from {} to {} slots ({} keys)",
            old_capacity,
            new_capacity,
            self.size
        );
        Ok(())
    }

    /// Move every live entry into a fresh array of `new_capacity` slots.
    ///
    /// All target slots and the new array are obtained before any value is
    /// moved; an error leaves `self` unchanged.
    fn rehash(&mut self, new_capacity: usize) -> Result<()> {
        let mut new_entries = Self::free_entries(new_capacity)?;
        let mut plan: Vec<(usize, usize)> = try_vec_with_capacity(self.size)?;

        for (old_index, entry) in self.entries.iter().enumerate() {
            if !entry.is_occupied() {
                continue;
            }

            let target = (0..new_capacity)
                .map(|k| self.strategy.probe(entry.key, k, new_capacity, &self.hash))
                .find(|&index| new_entries[index].is_free())
                .ok_or_else(|| OpenHashError::probe_exhausted(entry.key, new_capacity))?;

            // reserve the slot so later entries probe past it
            new_entries[target].status = EntryStatus::Occupied;
            plan.push((old_index, target));
        }

        for (old_index, target) in plan {
            let old = &mut self.entries[old_index];
            let new = &mut new_entries[target];
            new.key = old.key;
            new.value = old.value.take();
        }

        self.entries = new_entries;
        self.tombstones = 0;
        self.stats.rehashes += 1;
        Ok(())
    }

    /// Slot holding `key`, or the first free slot on its probe sequence.
    ///
    /// Tombstones are skipped. `None` only when the probe sequence visited
    /// `capacity` buckets without reaching either.
    pub fn search(&self, key: i64) -> Option<&Entry<V>> {
        self.probe_lookup(key).map(|index| &self.entries[index])
    }

    /// Value stored for `key`
    pub fn get(&self, key: i64) -> Option<&V> {
        self.find_index(key)
            .and_then(|index| self.entries[index].value.as_ref())
    }

    /// Mutable value stored for `key`
    pub fn get_mut(&mut self, key: i64) -> Option<&mut V> {
        let index = self.find_index(key)?;
        self.entries[index].value.as_mut()
    }

    /// Whether `key` is live in the table
    pub fn contains_key(&self, key: i64) -> bool {
        self.find_index(key).is_some()
    }

    /// Remove `key`, leaving a tombstone in its slot.
    ///
    /// With `auto_shrink` configured, the table shrinks afterwards once the
    /// load factor is at or below `min_load_factor`.
    pub fn remove(&mut self, key: i64) -> Option<V> {
        let index = self.find_index(key)?;

        let entry = &mut self.entries[index];
        let value = entry.value.take();
        entry.status = EntryStatus::Deleted;
        self.size -= 1;
        self.tombstones += 1;

        if self.config.auto_shrink && self.load_factor() <= self.config.min_load_factor {
            if let Err(e) = self.shrink(self.config.min_load_factor) {
                log::warn!("Automatic shrink after removing key {} failed: {}", key, e);
            }
        }

        value
    }

    /// Shrink the table if its load factor is at or below `min_load_factor`.
    ///
    /// The new capacity is the capacity scaled by `min_load_factor`, rounded up
    /// to a power of two, but never below 32 and never so small that the load
    /// factor would exceed the configured maximum. Returns whether the table was
    /// reallocated.
    pub fn shrink(&mut self, min_load_factor: f64) -> Result<bool> {
        if !(min_load_factor > 0.0 && min_load_factor < 1.0) {
            return Err(OpenHashError::configuration(format!(
                "shrink threshold must be strictly between 0 and 1, got {}",
                min_load_factor
            )));
        }

        if self.load_factor() > min_load_factor {
            return Ok(false);
        }

        let old_capacity = self.capacity();
        let scaled = round_up_to_power_of_two((old_capacity as f64 * min_load_factor).ceil() as usize);

        let mut fitting = MIN_TABLE_CAPACITY;
        while self.size as f64 / fitting as f64 > self.config.max_load_factor {
            match fitting.checked_mul(2) {
                Some(next) => fitting = next,
                None => return Ok(false),
            }
        }

        let new_capacity = scaled.max(fitting).max(MIN_TABLE_CAPACITY);
        if new_capacity >= old_capacity {
            return Ok(false);
        }

        self.rehash(new_capacity)?;
        log::debug!(
            "Shrank open hash table from {} to {} slots ({} keys)",
            old_capacity,
            new_capacity,
            self.size
        );
        Ok(true)
    }

    /// Iterate over live `(key, &value)` pairs in slot order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.entries.iter(),
            remaining: self.size,
        }
    }

    /// Remove every key, keeping the capacity.
    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            *entry = Entry::free();
        }
        self.size = 0;
        self.tombstones = 0;
    }

    /// Consume the table, handing back the live pairs in slot order.
    pub fn release(self) -> Vec<(i64, V)> {
        log::debug!(
            "Releasing open hash table: {} keys, {} slots",
            self.size,
            self.capacity()
        );

        self.entries
            .into_iter()
            .filter_map(|entry| entry.value.map(|value| (entry.key, value)))
            .collect()
    }
}

impl OpenHashTable<Vec<u8>> {
    /// Insert an independently owned copy of `bytes` under `key`.
    pub fn insert_bytes(&mut self, key: i64, bytes: &[u8]) -> Result<InsertOutcome<Vec<u8>>> {
        let value = duplicate_bytes(bytes)?;
        self.insert(key, value)
    }
}

/// Iterator over the live entries of an [`OpenHashTable`]
pub struct Iter<'a, V> {
    inner: std::slice::Iter<'a, Entry<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.inner.by_ref() {
            if let Some(value) = entry.value.as_ref() {
                self.remaining -= 1;
                return Some((entry.key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V> ExactSizeIterator for Iter<'a, V> {}

impl<'a, V> IntoIterator for &'a OpenHashTable<V> {
    type Item = (i64, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
