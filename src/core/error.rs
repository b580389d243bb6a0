//! Error types for loading static configuration data.
//!
//! The analysis itself never fails: data-quality problems and lookup
//! misses are represented in the report. Only loading the taxonomy and
//! the requirement store can produce these errors.

use std::path::PathBuf;
use thiserror::Error;

/// Failure loading or validating a category taxonomy
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// The taxonomy file could not be read
    #[error("Failed to read taxonomy at {path}: {source}")]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The taxonomy is not valid TOML for the expected schema
    #[error("Failed to parse taxonomy: {0}")]
    Parse(#[from] toml::de::Error),

    /// A category declared an empty code prefix
    #[error("Empty prefix declared for category '{category}'")]
    EmptyPrefix {
        /// Category that declared it
        category: String,
    },

    /// One prefix was mapped to two different categories
    #[error("Prefix '{prefix}' maps to both '{first}' and '{second}'")]
    ConflictingPrefix {
        /// The duplicated prefix
        prefix: String,
        /// Category that claimed it first
        first: String,
        /// Category that claimed it again
        second: String,
    },
}

/// Failure loading the requirement store
#[derive(Debug, Error)]
pub enum RequirementError {
    /// The requirement file could not be read
    #[error("Failed to read requirements at {path}: {source}")]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The requirement document is not valid JSON for the expected schema
    #[error("Failed to parse requirements: {0}")]
    Parse(#[from] serde_json::Error),
}
