use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentClientError>;

#[derive(Debug, Error)]
pub enum PaymentClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for PaymentClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PaymentClientError::Parse(err.to_string())
        } else {
            PaymentClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PaymentClientError {
    fn from(err: serde_json::Error) -> Self {
        PaymentClientError::Parse(err.to_string())
    }
}
