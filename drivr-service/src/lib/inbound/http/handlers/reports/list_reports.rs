use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ReportData;
use crate::domain::report::ports::ReportServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PaginationQuery;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn list_reports(
    State(state): State<AppState>,
    Extension(CurrentUser(principal)): Extension<CurrentUser>,
    Query(query): Query<PaginationQuery>,
) -> Result<ApiSuccess<Vec<ReportData>>, ApiError> {
    state
        .report_service
        .list_reports(&principal, query.into())
        .await
        .map_err(ApiError::from)
        .map(|reports| {
            ApiSuccess::new(
                StatusCode::OK,
                reports.iter().map(ReportData::from).collect(),
            )
        })
}
