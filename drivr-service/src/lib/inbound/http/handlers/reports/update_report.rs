use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::parse_report_id;
use super::ReportData;
use crate::domain::report::errors::ReportError;
use crate::domain::report::models::Markdown;
use crate::domain::report::models::UpdateReportCommand;
use crate::domain::report::ports::ReportServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateReportRequest {
    pub markdown: Option<String>,
    pub html: Option<String>,
}

impl UpdateReportRequest {
    fn try_into_command(self) -> Result<UpdateReportCommand, ReportError> {
        Ok(UpdateReportCommand {
            markdown: self.markdown.map(Markdown::new).transpose()?,
            html: self.html,
        })
    }
}

pub async fn update_report(
    State(state): State<AppState>,
    Extension(CurrentUser(principal)): Extension<CurrentUser>,
    Path(report_id): Path<String>,
    Json(req): Json<UpdateReportRequest>,
) -> Result<ApiSuccess<ReportData>, ApiError> {
    let report_id = parse_report_id(&report_id)?;
    let command = req.try_into_command()?;

    state
        .report_service
        .update_report(&principal, &report_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref report| ApiSuccess::new(StatusCode::OK, report.into()))
}
