use thiserror::Error;

/// Error type for token configuration and issuance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Invalid token configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Reasons a presented token is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Token signature or algorithm is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token payload is malformed: {0}")]
    Malformed(String),
}
