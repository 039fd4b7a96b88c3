use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DashboardError {
    #[error("Unknown control '{0}'")]
    UnknownControl(String),
}
