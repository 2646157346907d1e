//! Error types for fabryk-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for fabryk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading mappings, terminologies, or records.
///
/// Resolution-time problems (unknown index types, missing data types) are
/// not errors; they are logged and degrade gracefully. Only setup-time
/// failures surface through this type.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error without path context
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific file
    #[error("I/O error at {shown}: {source}", shown = .path.display())]
    IoWithPath {
        /// File that could not be read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error (settings files, CLI options)
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// Parse error (YAML, JSON, TOML)
    #[error("Parse error: {message}")]
    Parse {
        /// What failed to parse
        message: String,
    },

    /// Mapping configuration does not have the required shape
    #[error("Malformed configuration{location}: {message}", location = .key.as_ref().map(|k| format!(" at '{k}'")).unwrap_or_default())]
    MalformedConfiguration {
        /// Offending top-level or nested key, if known
        key: Option<String>,
        /// What is wrong with it
        message: String,
    },

    /// XML record could not be parsed
    #[error("XML error: {message}")]
    Xml {
        /// Parser message
        message: String,
    },
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a malformed-configuration error without key context.
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Error::MalformedConfiguration {
            key: None,
            message: message.into(),
        }
    }

    /// Creates a malformed-configuration error for a specific key.
    pub fn malformed_key<K, M>(key: K, message: M) -> Self
    where
        K: Into<String>,
        M: Into<String>,
    {
        Error::MalformedConfiguration {
            key: Some(key.into()),
            message: message.into(),
        }
    }

    /// Creates a new XML error.
    pub fn xml<S: Into<String>>(message: S) -> Self {
        Error::Xml {
            message: message.into(),
        }
    }

    /// Returns whether this error came from a badly shaped mapping configuration.
    pub fn is_malformed_configuration(&self) -> bool {
        matches!(self, Error::MalformedConfiguration { .. })
    }
}
