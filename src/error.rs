//! Error types for parameter validation and configuration I/O.

/// Rejected generation input. Raised before any grid is allocated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ParameterError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ParameterError::InvalidParameter { name, reason: reason.into() }
    }
}

/// Errors that can occur when loading or saving a generator config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    Write(#[source] std::io::Error),

    /// Failed to parse JSON content.
    #[error("failed to parse config: {0}")]
    Parse(#[source] serde_json::Error),

    /// Failed to serialize config to JSON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The config parsed but holds values the pipeline rejects.
    #[error(transparent)]
    Invalid(#[from] ParameterError),
}

/// Errors raised while writing generated grids to disk.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize world: {0}")]
    Serialize(#[source] serde_json::Error),
}
