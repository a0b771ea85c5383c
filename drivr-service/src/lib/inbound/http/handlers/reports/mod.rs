pub mod create_report;
pub mod delete_report;
pub mod get_report;
pub mod list_reports;
pub mod update_report;

use chrono::DateTime;
use chrono::Utc;
pub use create_report::create_report;
pub use delete_report::delete_report;
pub use get_report::get_report;
pub use list_reports::list_reports;
use serde::Serialize;
pub use update_report::update_report;

use crate::domain::report::errors::ReportError;
use crate::domain::report::models::Report;
use crate::domain::report::models::ReportId;
use crate::inbound::http::handlers::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportData {
    pub id: String,
    pub user_id: String,
    pub markdown: String,
    pub html: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Report> for ReportData {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id.to_string(),
            user_id: report.user_id.to_string(),
            markdown: report.markdown.as_str().to_string(),
            html: report.html.clone(),
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

fn parse_report_id(raw: &str) -> Result<ReportId, ApiError> {
    ReportId::from_string(raw).map_err(|e| ApiError::from(ReportError::from(e)))
}
