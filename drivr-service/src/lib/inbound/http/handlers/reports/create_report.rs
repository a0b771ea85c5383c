use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ReportData;
use crate::domain::report::errors::ReportError;
use crate::domain::report::models::CreateReportCommand;
use crate::domain::report::models::Markdown;
use crate::domain::report::ports::ReportServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateReportRequest {
    markdown: String,
    html: String,
}

impl CreateReportRequest {
    fn try_into_command(self) -> Result<CreateReportCommand, ReportError> {
        Ok(CreateReportCommand {
            markdown: Markdown::new(self.markdown)?,
            html: self.html,
        })
    }
}

pub async fn create_report(
    State(state): State<AppState>,
    Extension(CurrentUser(principal)): Extension<CurrentUser>,
    Json(body): Json<CreateReportRequest>,
) -> Result<ApiSuccess<ReportData>, ApiError> {
    state
        .report_service
        .create_report(&principal, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref report| ApiSuccess::new(StatusCode::CREATED, report.into()))
}
