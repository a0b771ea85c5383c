use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Exchange an email/password pair for a bearer token.
///
/// Answers with a bare token object rather than the usual envelope so OAuth2
/// password-flow clients can consume it directly.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .user_service
        .authenticate(&form.username, &form.password)
        .await?;

    if !user.is_active {
        tracing::info!(user_id = %user.id, "login refused for inactive user");
        return Err(ApiError::BadRequest("Inactive user.".to_string()));
    }

    let issued = state
        .authenticator
        .issue_token(&user.id.to_string())
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    tracing::info!(user_id = %user.id, expires_at = %issued.expires_at, "access token issued");

    Ok(Json(TokenResponse {
        access_token: issued.access_token,
        token_type: "bearer".to_string(),
    }))
}

/// OAuth2 password-flow form. `username` carries the email address.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}
