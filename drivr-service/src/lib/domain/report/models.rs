use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::report::errors::MarkdownError;
use crate::domain::report::errors::ReportIdError;
use crate::domain::user::models::UserId;

/// Report unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportId(pub Uuid);

impl ReportId {
    /// Generate a new random report ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a report ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ReportIdError> {
        Uuid::parse_str(s)
            .map(ReportId)
            .map_err(|e| ReportIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for ReportId {
    type Err = ReportIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Markdown source of a report. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markdown(String);

impl Markdown {
    /// # Errors
    /// * `Empty` - Source is empty or whitespace only
    pub fn new(markdown: String) -> Result<Self, MarkdownError> {
        if markdown.trim().is_empty() {
            Err(MarkdownError::Empty)
        } else {
            Ok(Self(markdown))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Report aggregate.
///
/// `html` is the client-rendered form of `markdown`; both are stored as given.
#[derive(Debug, Clone)]
pub struct Report {
    pub id: ReportId,
    pub user_id: UserId,
    pub markdown: Markdown,
    pub html: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Command to create a report owned by the acting user.
#[derive(Debug)]
pub struct CreateReportCommand {
    pub markdown: Markdown,
    pub html: String,
}

/// Partial update of a report.
#[derive(Debug, Default)]
pub struct UpdateReportCommand {
    pub markdown: Option<Markdown>,
    pub html: Option<String>,
}
