//! Error types for game setup.
//!
//! Per-frame operations never fail; misses are reported through `Option`,
//! sentinels or no-ops. Only loading and validating settings can fail.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load or validate a [`GameConfig`](crate::config::GameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The settings document is not valid JSON for the config schema.
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// A setting has a value the game cannot run with.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A placement names a type that is not in the type table.
    #[error("placement `{name}` uses unregistered type `{type_name}`")]
    UnknownType {
        /// Placement name.
        name: String,
        /// Type name that failed to resolve.
        type_name: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
