use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    AnalyticsSettings, Config, DataSettings, LogFormat, LoggingSettings, ServerSettings,
};

/// Prefix for environment overrides, e.g. `SUPERSTORE__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "SUPERSTORE";

/// Loads the application configuration.
///
/// The toml file at `path` is optional; every key has a default. Environment
/// variables prefixed with `SUPERSTORE__` override values from the file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
