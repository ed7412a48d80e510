//! Error types for puppet-setting

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for puppet-setting operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for puppet-setting
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Validation Errors
    // -------------------------------------------------------------------------
    #[error("Invalid puppet_setting name '{0}': expected <agent|main|master|user>/<setting>")]
    InvalidName(String),

    #[error("Invalid section '{0}': expected one of agent, main, master, user")]
    InvalidSection(String),

    #[error("Invalid value '{0}' for ensure: expected present or absent")]
    InvalidEnsure(String),

    #[error("Invalid value for puppet_setting '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    #[error("Duplicate declaration of puppet_setting '{0}'")]
    DuplicateResource(String),

    // -------------------------------------------------------------------------
    // Editor Errors
    // -------------------------------------------------------------------------
    #[error("Cannot write [{section}] {key}: {reason}")]
    UnwritableSetting {
        section: String,
        key: String,
        reason: String,
    },

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to parse resource declarations: {0}")]
    Parse(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Concurrency Errors
    // -------------------------------------------------------------------------
    #[error("Internal lock was poisoned - possible thread panic")]
    LockPoisoned,
}

impl Error {
    /// Check if this error was raised while validating a declared resource
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidName(_)
                | Error::InvalidSection(_)
                | Error::InvalidEnsure(_)
                | Error::InvalidValue { .. }
                | Error::DuplicateResource(_)
        )
    }

    /// Check if this error came from the filesystem
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            Error::FileRead { .. } | Error::FileWrite { .. } | Error::DirectoryCreate { .. }
        )
    }
}
