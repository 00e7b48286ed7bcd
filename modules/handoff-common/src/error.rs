use thiserror::Error;

use crate::payment::FieldIssue;

pub type Result<T> = std::result::Result<T, HandoffError>;

#[derive(Error, Debug)]
pub enum HandoffError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {}", format_issues(.0))]
    Validation(Vec<FieldIssue>),
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
