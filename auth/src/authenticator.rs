use chrono::DateTime;
use chrono::Utc;

use crate::config::TokenConfig;
use crate::decision::AuthDecision;
use crate::gate::Access;
use crate::jwt::JwtError;
use crate::jwt::TokenService;
use crate::resolver::AuthResolver;
use crate::resolver::UserLookup;

/// Authentication coordinator combining token issuance, resolution and gating.
///
/// Built once at startup from immutable configuration and shared by reference
/// with every request handler.
pub struct Authenticator {
    token_service: TokenService,
}

/// Freshly issued access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Signed bearer token
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `config` - Token signing configuration
    ///
    /// # Errors
    /// * `InvalidConfiguration` - The configuration cannot be used for signing
    pub fn new(config: &TokenConfig) -> Result<Self, JwtError> {
        Ok(Self {
            token_service: TokenService::new(config)?,
        })
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// Issue an access token for `subject`, valid from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        let now = Utc::now();
        let access_token = self.token_service.issue(subject, now)?;
        let expires_at = now
            .checked_add_signed(self.token_service.lifetime())
            .ok_or_else(|| {
                JwtError::EncodingFailed("token expiration is out of range".to_string())
            })?;

        Ok(IssuedToken {
            access_token,
            expires_at,
        })
    }

    /// Resolve a bearer token to the caller's principal.
    pub async fn resolve<L>(&self, token: &str, lookup: &L) -> Result<AuthDecision<L::Id>, L::Error>
    where
        L: UserLookup + ?Sized,
    {
        AuthResolver::new(&self.token_service)
            .resolve(token, lookup, Utc::now())
            .await
    }

    /// Resolve a bearer token, then apply the gate for `access`.
    pub async fn authorize<L>(
        &self,
        token: &str,
        access: Access,
        lookup: &L,
    ) -> Result<AuthDecision<L::Id>, L::Error>
    where
        L: UserLookup + ?Sized,
    {
        let decision = self.resolve(token, lookup).await?;
        Ok(decision.and_then(|principal| access.check(principal).into_result()))
    }
}
