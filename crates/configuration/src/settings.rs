use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub analytics: AnalyticsSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where the transaction table is read from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Path to the spreadsheet (`.xlsx`, `.xls`, `.ods`, ...) or a `.csv` export.
    pub path: PathBuf,
    /// Worksheet holding the order lines. Ignored for csv files.
    pub sheet: String,
}

/// Bind address of the dashboard's HTTP API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Parameters of the aggregation pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// How many best-selling products the bar chart shows.
    pub top_n: usize,
}

/// Output format of the console log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive such as `info` or `web_server=debug,info`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---
// These let a user omit any section (or the whole file) and still get a
// working dashboard pointed at the usual Global Superstore export.

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("global_superstore_2016.xlsx"),
            sheet: "Orders".to_string(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8050,
        }
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self { top_n: 10 }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            directory: None,
            file_prefix: "superstore.log".to_string(),
        }
    }
}

impl Config {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "data.path must not be empty".to_string(),
            ));
        }
        if self.data.sheet.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "data.sheet must not be empty".to_string(),
            ));
        }
        if self.analytics.top_n == 0 {
            return Err(ConfigError::ValidationError(
                "analytics.top_n must be greater than 0".to_string(),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl ServerSettings {
    /// Host and port in the form the listener resolves, so `localhost` works
    /// as well as IPv4 and IPv6 literals.
    pub fn bind_target(&self) -> (&str, u16) {
        (self.host.trim(), self.port)
    }
}
