use async_trait::async_trait;
use auth::Access;
use auth::AuthDecision;
use auth::Principal;
use auth::UserLookup;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::NOT_AUTHENTICATED_MESSAGE;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Principal that passed the route's access level, stored in request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal<UserId>);

/// Adapts the user service to the token resolver's lookup port.
pub struct UserServiceLookup<'a>(pub &'a dyn UserServicePort);

#[async_trait]
impl<'a> UserLookup for UserServiceLookup<'a> {
    type Id = UserId;
    type Record = User;
    type Error = UserError;

    async fn lookup_user(&self, id: &UserId) -> Result<Option<User>, UserError> {
        self.0.find_user(id).await
    }
}

pub async fn require_active(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    authorize(&state, Access::Active, req, next).await
}

/// Moderator role; the account need not be active.
pub async fn require_moderator(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    authorize(&state, Access::Moderator, req, next).await
}

async fn authorize(
    state: &AppState,
    access: Access,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&req)?.to_owned();
    let lookup = UserServiceLookup(state.user_service.as_ref());

    let decision = state
        .authenticator
        .authorize(&token, access, &lookup)
        .await?;

    match decision {
        AuthDecision::Granted(principal) => {
            req.extensions_mut().insert(CurrentUser(principal));
            Ok(next.run(req).await)
        }
        AuthDecision::Denied(denial) => {
            tracing::warn!(reason = %denial, ?access, uri = %req.uri(), "request denied");
            Err(denial.into())
        }
    }
}

/// Extract the credential of an `Authorization: Bearer <token>` header.
fn bearer_token(req: &Request) -> Result<&str, ApiError> {
    let not_authenticated = || ApiError::Unauthorized(NOT_AUTHENTICATED_MESSAGE.to_string());

    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(not_authenticated)?
        .to_str()
        .map_err(|_| not_authenticated())?;

    match header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => Ok(token.trim()),
        _ => Err(not_authenticated()),
    }
}
