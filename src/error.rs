//! Error types for quickqr.
//!
//! Encoding and decoding payloads never fail. Errors only come from the
//! I/O edges: configuration files, the recent-list storage slot, QR symbol
//! construction and image export.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum QuickQrError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Recent-list storage errors
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The payload does not fit in any QR symbol version
    #[error("render error: {0}")]
    Render(String),

    /// PNG encoding or saving failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Errors raised by a [`Storage`](crate::storage::Storage) backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the slot failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The recent list could not be serialized
    #[error("failed to serialize recent list: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias using `QuickQrError`.
pub type Result<T> = std::result::Result<T, QuickQrError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
