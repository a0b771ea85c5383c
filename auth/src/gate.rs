use crate::decision::AuthDecision;
use crate::decision::Denial;
use crate::decision::Principal;

/// Passes iff the principal's account is active.
pub fn require_active<Id>(principal: Principal<Id>) -> Result<Principal<Id>, Denial> {
    if principal.is_active {
        Ok(principal)
    } else {
        Err(Denial::UserInactive)
    }
}

/// Passes iff the principal is a moderator.
///
/// Does not look at `is_active`: an inactive moderator still passes.
pub fn require_moderator<Id>(principal: Principal<Id>) -> Result<Principal<Id>, Denial> {
    if principal.is_moderator {
        Ok(principal)
    } else {
        Err(Denial::InsufficientRole)
    }
}

/// Authorization level an operation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Any resolved user
    Authenticated,
    /// Resolved user whose account is active
    Active,
    /// Resolved user with the moderator role, active or not
    Moderator,
}

impl Access {
    /// Apply the gate for this level to an already resolved principal.
    pub fn check<Id>(self, principal: Principal<Id>) -> AuthDecision<Id> {
        match self {
            Access::Authenticated => AuthDecision::Granted(principal),
            Access::Active => require_active(principal).into(),
            Access::Moderator => require_moderator(principal).into(),
        }
    }
}
