use handoff_common::HandoffError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DirectoryError>;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Driver error: {0}")]
    Driver(String),
}

impl From<mongodb::error::Error> for DirectoryError {
    fn from(err: mongodb::error::Error) -> Self {
        DirectoryError::Driver(err.to_string())
    }
}

impl From<HandoffError> for DirectoryError {
    fn from(err: HandoffError) -> Self {
        DirectoryError::Config(err.to_string())
    }
}
