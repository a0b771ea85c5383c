use std::str::FromStr;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::decision::AuthDecision;
use crate::decision::Denial;
use crate::decision::Principal;
use crate::jwt::DecodeError;
use crate::jwt::TokenService;

/// User lookup capability supplied by the storage layer.
///
/// The resolver parses the token subject into `Id`, asks for the matching
/// record and projects it into a [`Principal`].
#[async_trait]
pub trait UserLookup: Send + Sync {
    type Id: FromStr + Send + Sync;
    type Record: Into<Principal<Self::Id>> + Send;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Find the user with the given identifier.
    ///
    /// # Returns
    /// Optional user record (None if not found)
    async fn lookup_user(&self, id: &Self::Id) -> Result<Option<Self::Record>, Self::Error>;
}

/// Resolves a bearer token into the principal it belongs to.
///
/// Performs no I/O of its own beyond the injected lookup call.
pub struct AuthResolver<'a> {
    tokens: &'a TokenService,
}

impl<'a> AuthResolver<'a> {
    pub fn new(tokens: &'a TokenService) -> Self {
        Self { tokens }
    }

    /// Resolve `token` to a principal at time `now`.
    ///
    /// # Returns
    /// `Granted` with the projected principal, or `Denied` with:
    /// * `InvalidToken` - Token missing, badly signed or unparseable
    /// * `ExpiredToken` - Token expired at `now`
    /// * `MalformedPayload` - Subject is not a valid user identifier
    /// * `UserNotFound` - Lookup found no user for the subject
    ///
    /// # Errors
    /// Lookup failures are returned as-is; they are not denials.
    pub async fn resolve<L>(
        &self,
        token: &str,
        lookup: &L,
        now: DateTime<Utc>,
    ) -> Result<AuthDecision<L::Id>, L::Error>
    where
        L: UserLookup + ?Sized,
    {
        if token.trim().is_empty() {
            return Ok(AuthDecision::Denied(Denial::InvalidToken));
        }

        let payload = match self.tokens.decode(token, now) {
            Ok(payload) => payload,
            Err(DecodeError::Expired) => return Ok(AuthDecision::Denied(Denial::ExpiredToken)),
            Err(e) => {
                tracing::debug!(error = %e, "Token rejected");
                return Ok(AuthDecision::Denied(Denial::InvalidToken));
            }
        };

        let Ok(id) = payload.sub.parse::<L::Id>() else {
            tracing::debug!(subject = %payload.sub, "Token subject is not a user identifier");
            return Ok(AuthDecision::Denied(Denial::MalformedPayload));
        };

        match lookup.lookup_user(&id).await? {
            Some(record) => Ok(AuthDecision::Granted(record.into())),
            None => Ok(AuthDecision::Denied(Denial::UserNotFound)),
        }
    }
}
