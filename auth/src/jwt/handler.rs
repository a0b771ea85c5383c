use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenPayload;
use super::errors::DecodeError;
use super::errors::JwtError;
use crate::config::TokenConfig;

/// Issues and decodes signed, time-limited access tokens.
///
/// Holds only immutable key material and settings, so a single instance can be
/// shared across all request handlers.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl TokenService {
    /// Create a token service from configuration.
    ///
    /// # Arguments
    /// * `config` - Secret, algorithm name and token lifetime
    ///
    /// # Errors
    /// * `InvalidConfiguration` - Empty secret, unknown or non-HMAC algorithm,
    ///   or a lifetime that is non-positive or too large to add to the current time
    pub fn new(config: &TokenConfig) -> Result<Self, JwtError> {
        if config.secret.is_empty() {
            return Err(JwtError::InvalidConfiguration(
                "signing secret must not be empty".to_string(),
            ));
        }

        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| {
            JwtError::InvalidConfiguration(format!("unknown algorithm '{}'", config.algorithm))
        })?;

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(JwtError::InvalidConfiguration(format!(
                "algorithm '{}' does not use a shared secret",
                config.algorithm
            )));
        }

        if config.expiration_minutes <= 0 {
            return Err(JwtError::InvalidConfiguration(format!(
                "token expiration must be positive, got {} minutes",
                config.expiration_minutes
            )));
        }

        let lifetime = Duration::try_minutes(config.expiration_minutes)
            .filter(|lifetime| Utc::now().checked_add_signed(*lifetime).is_some())
            .ok_or_else(|| {
                JwtError::InvalidConfiguration(format!(
                    "token expiration of {} minutes is out of range",
                    config.expiration_minutes
                ))
            })?;

        let secret = config.secret.as_bytes();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            lifetime,
        })
    }

    /// Configured signing algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Lifetime given to every issued token.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for `subject`, expiring one lifetime after `now`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed, or the expiration overflows
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        let payload = TokenPayload::new(subject, now, self.lifetime).ok_or_else(|| {
            JwtError::EncodingFailed("token expiration is out of range".to_string())
        })?;
        let header = Header::new(self.algorithm);

        encode(&header, &payload, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and algorithm, then its expiration against `now`.
    ///
    /// No clock-skew leeway is applied: a token is rejected from its
    /// expiration second onwards.
    ///
    /// # Errors
    /// * `InvalidSignature` - Not a token, wrong signature or wrong algorithm
    /// * `Malformed` - Signature is valid but the payload is not `{sub, exp}`
    /// * `Expired` - `exp <= now`
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<TokenPayload, DecodeError> {
        decode_header(token).map_err(|_| DecodeError::InvalidSignature)?;

        let mut validation = Validation::new(self.algorithm);
        // Expiration is checked below against the caller's clock
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        let payload = decode::<TokenPayload>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::Json(err) => DecodeError::Malformed(err.to_string()),
                ErrorKind::Utf8(err) => DecodeError::Malformed(err.to_string()),
                _ => DecodeError::InvalidSignature,
            })?;

        if payload.is_expired(now) {
            return Err(DecodeError::Expired);
        }

        Ok(payload)
    }
}
