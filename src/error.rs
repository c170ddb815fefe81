//! Error handling for the openhash library
//!
//! Every fallible operation in the crate reports through [`OpenHashError`].
//! Absent keys and empty heaps are not errors: lookups return `None`.

use thiserror::Error;

/// Main error type for the openhash library
#[derive(Error, Debug)]
pub enum OpenHashError {
    /// I/O related errors (configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input, such as an unparsable configuration file
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Error message describing the issue
        message: String,
    },

    /// Memory allocation failures
    #[error("Memory allocation failed: requested {size} bytes")]
    OutOfMemory {
        /// Number of bytes requested
        size: usize,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },

    /// A probe sequence visited `probes` buckets without finding a usable slot
    #[error("Probe sequence exhausted for key {key} after {probes} probes")]
    ProbeSequenceExhausted {
        /// The key being placed
        key: i64,
        /// Number of buckets visited
        probes: usize,
    },
}

impl OpenHashError {
    /// Create an invalid data error
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create an out of memory error
    pub fn out_of_memory(size: usize) -> Self {
        Self::OutOfMemory { size }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a probe exhaustion error
    pub fn probe_exhausted(key: i64, probes: usize) -> Self {
        Self::ProbeSequenceExhausted { key, probes }
    }

    /// Check if this is a recoverable error
    ///
    /// Allocation and probing failures leave every structure in its last
    /// consistent state, so the caller may retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::OutOfMemory { .. } => true,
            Self::ProbeSequenceExhausted { .. } => true,
            Self::InvalidData { .. } => false,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::InvalidData { .. } => "data",
            Self::OutOfMemory { .. } => "memory",
            Self::Configuration { .. } => "config",
            Self::ProbeSequenceExhausted { .. } => "probe",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, OpenHashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = OpenHashError::invalid_data("test message");
        assert_eq!(err.category(), "data");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_all_error_types() {
        let memory_err = OpenHashError::out_of_memory(1024);
        assert_eq!(memory_err.category(), "memory");
        assert!(memory_err.is_recoverable());

        let config_err = OpenHashError::configuration("unknown probing strategy");
        assert_eq!(config_err.category(), "config");
        assert!(!config_err.is_recoverable());

        let probe_err = OpenHashError::probe_exhausted(-7, 32);
        assert_eq!(probe_err.category(), "probe");
        assert!(probe_err.is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = OpenHashError::configuration("bad identity");
        let display = format!("{}", err);
        assert!(display.contains("Invalid configuration"));
        assert!(display.contains("bad identity"));

        let probe_err = OpenHashError::probe_exhausted(42, 64);
        let probe_display = format!("{}", probe_err);
        assert!(probe_display.contains("42"));
        assert!(probe_display.contains("64"));

        let oom = OpenHashError::out_of_memory(4096);
        assert!(format!("{}", oom).contains("4096"));
    }

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing config");
        let err: OpenHashError = io_error.into();

        assert_eq!(err.category(), "io");
        assert!(err.is_recoverable());
        assert!(format!("{}", err).contains("I/O error"));
    }

    #[test]
    fn test_error_debug() {
        let err = OpenHashError::invalid_data("debug test");
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("InvalidData"));
        assert!(debug_str.contains("debug test"));
    }
}
