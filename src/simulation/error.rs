//! Error types for configuration and persistence.
//!
//! Ticks never fail: numeric edge cases are clamped locally. Only external
//! input (parameter files and generation files) can be rejected, and a rejected
//! load leaves the running simulation untouched.

use std::path::PathBuf;

/// Errors raised while loading or validating [`super::params::Params`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The parameter file could not be read or written.
    #[error("failed to access config file {}: {source}", path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The parameter file is not valid JSON for [`super::params::Params`].
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        /// Path of the file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A parameter value is out of its valid domain.
    #[error("invalid parameter `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Errors raised while saving or loading a generation file.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The generation file could not be read or written.
    #[error("failed to access generation file {}: {source}", path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The run id or generation header line is absent.
    #[error("missing header line {line} ({name})")]
    MissingHeader {
        /// 1-based line number that was expected.
        line: usize,
        /// Which header field was expected.
        name: &'static str,
    },

    /// A header line is present but is not an integer.
    #[error("line {line}: {name} is not an integer: {value:?}")]
    InvalidHeader {
        /// 1-based line number.
        line: usize,
        /// Which header field was being parsed.
        name: &'static str,
        /// The raw text found.
        value: String,
    },

    /// An agent line has the wrong number of tab-separated gene fields.
    #[error("line {line}: expected {expected} genes, found {found}")]
    ColumnCount {
        /// 1-based line number.
        line: usize,
        /// Number of genes required by the parameters.
        expected: usize,
        /// Number of genes present.
        found: usize,
    },

    /// A gene field could not be parsed as a finite float.
    #[error("line {line}, gene {index}: not a finite number: {value:?}")]
    InvalidGene {
        /// 1-based line number.
        line: usize,
        /// 0-based gene index within the line.
        index: usize,
        /// The raw text found.
        value: String,
    },

    /// A genome entry carries the wrong number of genes.
    #[error("entry {entry}: expected {expected} genes, found {found}")]
    GeneCount {
        /// 0-based entry index.
        entry: usize,
        /// Number of genes required by the parameters.
        expected: usize,
        /// Number of genes present.
        found: usize,
    },

    /// The number of agent lines differs from the configured population size.
    #[error("expected {expected} agents, found {found}")]
    PopulationSize {
        /// Configured population size.
        expected: usize,
        /// Number of agent lines in the file.
        found: usize,
    },
}
