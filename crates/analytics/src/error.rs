use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid analytics parameters: {0}")]
    InvalidParameters(String),
}
