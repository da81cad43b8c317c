use thiserror::Error;

/// Top-level error type for legwork.
///
/// Geometric degeneracy never appears here: singular projections and
/// unreachable limb targets are expressed as `Option` or as a clamp at the
/// call site. Only configuration and I/O can fail.
#[derive(Debug, Error)]
pub enum LegworkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Incompatible configuration: {0}")]
    Incompatible(String),
}

impl ConfigError {
    /// Shorthand for [`ConfigError::InvalidValue`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
