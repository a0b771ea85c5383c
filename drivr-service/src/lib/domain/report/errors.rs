use thiserror::Error;

/// Error for ReportId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReportIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for report body validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MarkdownError {
    #[error("Markdown must not be empty")]
    Empty,
}

/// Top-level error for all report-related operations
#[derive(Debug, Clone, Error)]
pub enum ReportError {
    #[error("Invalid report ID: {0}")]
    InvalidReportId(#[from] ReportIdError),

    #[error("Invalid markdown: {0}")]
    InvalidMarkdown(#[from] MarkdownError),

    #[error("Report not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for ReportError {
    fn from(err: anyhow::Error) -> Self {
        ReportError::Unknown(err.to_string())
    }
}
