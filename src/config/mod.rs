//! Configuration APIs for openhash
//!
//! Table behaviour that is not part of a table's identity (load thresholds,
//! growth, default probing strategy) lives in a validated configuration type
//! that can be built from presets, environment variables, or a JSON file.
//!
//! # Configuration Traits
//!
//! The [`Config`] trait provides common functionality for all configuration types,
//! including validation, environment initialization, and preset management.
//!
//! # Preset Configurations
//!
//! ```rust
//! use openhash::config::{Config, HashTableConfig};
//!
//! // Sparse table, short probe sequences
//! let config = HashTableConfig::performance_preset();
//! assert!(config.validate().is_ok());
//!
//! // Dense table, fewer empty slots
//! let config = HashTableConfig::memory_preset();
//! assert!(config.max_load_factor > 0.5);
//! ```
//!
//! # Environment Initialization
//!
//! ```rust
//! use openhash::config::{Config, HashTableConfig};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads OPENHASH_TABLE_* variables, falling back to defaults
//! let config = HashTableConfig::from_env()?;
//!
//! // Custom prefix
//! let config = HashTableConfig::from_env_with_prefix("MYAPP_")?;
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod hash_table;

pub use hash_table::{HashTableConfig, HashTableConfigBuilder};

/// Common configuration trait providing validation, environment initialization,
/// and preset management functionality.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is valid, `Err` with details if invalid.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables.
    ///
    /// Environment variables use the format `OPENHASH_{COMPONENT}_{FIELD}`,
    /// for example `OPENHASH_TABLE_MAX_LOAD_FACTOR=0.75`.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix("OPENHASH_")
    }

    /// Initialize configuration from environment variables with a custom prefix.
    ///
    /// Unset or unparsable variables keep their default values.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Get a performance-optimized preset configuration.
    fn performance_preset() -> Self;

    /// Get a memory-optimized preset configuration.
    fn memory_preset() -> Self;

    /// Get a real-time preset configuration.
    ///
    /// Optimized for predictable per-operation latency.
    fn realtime_preset() -> Self;

    /// Get a balanced preset configuration.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a file as JSON.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load and validate a configuration from a JSON file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Configuration validation error details.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// The invalid value
    pub value: String,
    /// Description of why the value is invalid
    pub reason: String,
    /// Suggested valid values or ranges
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Create a new validation error.
    pub fn new(field: &str, value: &str, reason: &str) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
            suggestion: None,
        }
    }

    /// Add a suggestion for valid values.
    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid configuration for field '{}': value '{}' is invalid ({})",
            self.field, self.value, self.reason
        )?;

        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". Suggested values: {}", suggestion)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Parse an environment variable, falling back to `default` when it is unset
/// or does not parse.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr + Clone,
{
    env::var(var_name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Parse a boolean environment variable.
///
/// Accepts "true", "1", "yes", "on" (case-insensitive) as true,
/// everything else as false.
pub fn parse_env_bool(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .map(|s| {
            let s = s.to_lowercase();
            matches!(s.as_str(), "true" | "1" | "yes" | "on")
        })
        .unwrap_or(default)
}
