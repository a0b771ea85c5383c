use thiserror::Error;

/// Resolved identity of the caller, projected from the stored user record.
///
/// Request-scoped: built per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal<Id> {
    pub id: Id,
    pub is_active: bool,
    pub is_moderator: bool,
}

/// Why a request was refused.
///
/// Every variant is terminal; nothing in the authorization chain retries.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash)]
pub enum Denial {
    #[error("Token is missing or its signature is invalid")]
    InvalidToken,

    #[error("Token is expired")]
    ExpiredToken,

    #[error("Token subject is not a valid user identifier")]
    MalformedPayload,

    #[error("User not found")]
    UserNotFound,

    #[error("User is inactive")]
    UserInactive,

    #[error("User lacks the required role")]
    InsufficientRole,
}

/// Outcome of every authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision<Id> {
    Granted(Principal<Id>),
    Denied(Denial),
}

impl<Id> AuthDecision<Id> {
    pub fn is_granted(&self) -> bool {
        matches!(self, AuthDecision::Granted(_))
    }

    /// Continue with `gate` only if the decision is still granted.
    pub fn and_then<F>(self, gate: F) -> Self
    where
        F: FnOnce(Principal<Id>) -> Result<Principal<Id>, Denial>,
    {
        match self {
            AuthDecision::Granted(principal) => gate(principal).into(),
            denied => denied,
        }
    }

    pub fn into_result(self) -> Result<Principal<Id>, Denial> {
        match self {
            AuthDecision::Granted(principal) => Ok(principal),
            AuthDecision::Denied(reason) => Err(reason),
        }
    }
}

impl<Id> From<Result<Principal<Id>, Denial>> for AuthDecision<Id> {
    fn from(result: Result<Principal<Id>, Denial>) -> Self {
        match result {
            Ok(principal) => AuthDecision::Granted(principal),
            Err(reason) => AuthDecision::Denied(reason),
        }
    }
}
