//! Configuration for open-addressing hash tables.

use super::{parse_env_bool, parse_env_var, Config, ValidationError};
use crate::error::{OpenHashError, Result};
use crate::hash_map::ProbeStrategy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest table an [`OpenHashTable`](crate::hash_map::OpenHashTable) allocates
pub const MIN_TABLE_CAPACITY: usize = 32;

/// Configuration for [`OpenHashTable`](crate::hash_map::OpenHashTable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashTableConfig {
    /// Requested starting capacity, rounded up to a power of two (at least 32)
    pub initial_capacity: usize,

    /// Grow once the load factor exceeds this threshold
    pub max_load_factor: f64,

    /// Threshold used by automatic shrinking after removals
    pub min_load_factor: f64,

    /// Capacity multiplier applied on growth; a power of two
    pub growth_factor: usize,

    /// Probing strategy for tables built from this configuration
    pub probe_strategy: ProbeStrategy,

    /// Shrink automatically when removals drop the load to `min_load_factor`
    pub auto_shrink: bool,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: MIN_TABLE_CAPACITY,
            max_load_factor: 0.5,
            min_load_factor: 0.125,
            growth_factor: 2,
            probe_strategy: ProbeStrategy::default(),
            auto_shrink: false,
        }
    }
}

impl Config for HashTableConfig {
    fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.initial_capacity == 0 {
            errors.push(
                ValidationError::new(
                    "initial_capacity",
                    &self.initial_capacity.to_string(),
                    "initial capacity must be greater than 0",
                )
                .with_suggestion("typical values: 32-65536"),
            );
        }

        if !(self.max_load_factor > 0.0 && self.max_load_factor < 1.0) {
            errors.push(
                ValidationError::new(
                    "max_load_factor",
                    &self.max_load_factor.to_string(),
                    "maximum load factor must be strictly between 0.0 and 1.0",
                )
                .with_suggestion("typical values: 0.5-0.75"),
            );
        }

        if !(self.min_load_factor > 0.0 && self.min_load_factor < self.max_load_factor) {
            errors.push(ValidationError::new(
                "min_load_factor",
                &self.min_load_factor.to_string(),
                "minimum load factor must be positive and below the maximum load factor",
            ));
        }

        if self.growth_factor < 2 || !self.growth_factor.is_power_of_two() {
            errors.push(
                ValidationError::new(
                    "growth_factor",
                    &self.growth_factor.to_string(),
                    "growth factor must be a power of 2 of at least 2",
                )
                .with_suggestion("typical values: 2, 4"),
            );
        }

        if !errors.is_empty() {
            return Err(OpenHashError::configuration(format!(
                "Hash table configuration validation failed: {}",
                errors
                    .into_iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ")
            )));
        }

        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();

        config.initial_capacity = parse_env_var(
            &format!("{}TABLE_INITIAL_CAPACITY", prefix),
            config.initial_capacity,
        );
        config.max_load_factor = parse_env_var(
            &format!("{}TABLE_MAX_LOAD_FACTOR", prefix),
            config.max_load_factor,
        );
        config.min_load_factor = parse_env_var(
            &format!("{}TABLE_MIN_LOAD_FACTOR", prefix),
            config.min_load_factor,
        );
        config.growth_factor = parse_env_var(
            &format!("{}TABLE_GROWTH_FACTOR", prefix),
            config.growth_factor,
        );
        config.auto_shrink =
            parse_env_bool(&format!("{}TABLE_AUTO_SHRINK", prefix), config.auto_shrink);

        let identity = parse_env_var(
            &format!("{}TABLE_PROBE_STRATEGY", prefix),
            config.probe_strategy.identity(),
        );
        config.probe_strategy = ProbeStrategy::from_identity(identity)?;

        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            initial_capacity: 1024,
            max_load_factor: 0.4,
            min_load_factor: 0.1,
            growth_factor: 4,
            probe_strategy: ProbeStrategy::DoubleHashing,
            auto_shrink: false,
        }
    }

    fn memory_preset() -> Self {
        Self {
            initial_capacity: MIN_TABLE_CAPACITY,
            max_load_factor: 0.75,
            min_load_factor: 0.25,
            growth_factor: 2,
            probe_strategy: ProbeStrategy::DoubleHashing,
            auto_shrink: true,
        }
    }

    fn realtime_preset() -> Self {
        // Large upfront table, no shrinking: rehash pauses stay rare
        Self {
            initial_capacity: 4096,
            max_load_factor: 0.5,
            min_load_factor: 0.05,
            growth_factor: 2,
            probe_strategy: ProbeStrategy::Linear,
            auto_shrink: false,
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            OpenHashError::configuration(format!("Failed to serialize hash table config: {}", e))
        })?;

        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            OpenHashError::invalid_data(format!("Failed to parse hash table config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }
}

impl HashTableConfig {
    /// Create a new hash table configuration builder.
    pub fn builder() -> HashTableConfigBuilder {
        HashTableConfigBuilder::new()
    }

    /// Capacity a table built from this configuration starts with.
    pub fn effective_initial_capacity(&self) -> usize {
        crate::memory::round_up_to_power_of_two(self.initial_capacity).max(MIN_TABLE_CAPACITY)
    }
}

/// Builder for constructing hash table configurations.
#[derive(Debug, Clone)]
pub struct HashTableConfigBuilder {
    config: HashTableConfig,
}

impl HashTableConfigBuilder {
    /// Create a new builder starting from the defaults.
    pub fn new() -> Self {
        Self {
            config: HashTableConfig::default(),
        }
    }

    /// Set the requested starting capacity.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Set the growth threshold.
    pub fn max_load_factor(mut self, load: f64) -> Self {
        self.config.max_load_factor = load;
        self
    }

    /// Set the automatic shrink threshold.
    pub fn min_load_factor(mut self, load: f64) -> Self {
        self.config.min_load_factor = load;
        self
    }

    /// Set the growth multiplier.
    pub fn growth_factor(mut self, factor: usize) -> Self {
        self.config.growth_factor = factor;
        self
    }

    /// Set the probing strategy.
    pub fn probe_strategy(mut self, strategy: ProbeStrategy) -> Self {
        self.config.probe_strategy = strategy;
        self
    }

    /// Enable automatic shrinking on removal.
    pub fn auto_shrink(mut self, enabled: bool) -> Self {
        self.config.auto_shrink = enabled;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<HashTableConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for HashTableConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
