use thiserror::Error;

/// Everything that can stop the dashboard before it has loaded any data.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The toml file or a `SUPERSTORE__*` variable could not be read or typed.
    #[error("Failed to read dashboard settings: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid dashboard setting: {0}")]
    ValidationError(String),

    /// The global tracing subscriber was already set.
    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}
