use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_report_id;
use crate::domain::report::ports::ReportServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn delete_report(
    State(state): State<AppState>,
    Extension(CurrentUser(principal)): Extension<CurrentUser>,
    Path(report_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let report_id = parse_report_id(&report_id)?;

    state
        .report_service
        .delete_report(&principal, &report_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
