use serde::Deserialize;

/// Token signing configuration.
///
/// Read once at startup and shared immutably for the lifetime of the process.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// Shared HMAC secret. There is no default: a missing secret must abort startup.
    pub secret: String,

    /// Signing algorithm name (`HS256`, `HS384` or `HS512`)
    #[serde(default = "TokenConfig::default_algorithm")]
    pub algorithm: String,

    /// Lifetime of an access token in minutes
    #[serde(default = "TokenConfig::default_expiration_minutes")]
    pub expiration_minutes: i64,
}

impl TokenConfig {
    /// 60 minutes * 24 hours * 8 days
    pub const DEFAULT_EXPIRATION_MINUTES: i64 = 60 * 24 * 8;

    /// Create a token configuration with default algorithm and expiration.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Self::default_algorithm(),
            expiration_minutes: Self::DEFAULT_EXPIRATION_MINUTES,
        }
    }

    /// Set the signing algorithm name.
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Set the token lifetime in minutes.
    pub fn with_expiration_minutes(mut self, minutes: i64) -> Self {
        self.expiration_minutes = minutes;
        self
    }

    fn default_algorithm() -> String {
        "HS256".to_string()
    }

    fn default_expiration_minutes() -> i64 {
        Self::DEFAULT_EXPIRATION_MINUTES
    }
}

/// Argon2id cost parameters.
///
/// Defaults match the argon2 crate defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HashingConfig {
    #[serde(default = "HashingConfig::default_memory_kib")]
    pub memory_kib: u32,

    #[serde(default = "HashingConfig::default_iterations")]
    pub iterations: u32,

    #[serde(default = "HashingConfig::default_parallelism")]
    pub parallelism: u32,
}

impl HashingConfig {
    fn default_memory_kib() -> u32 {
        argon2::Params::DEFAULT_M_COST
    }

    fn default_iterations() -> u32 {
        argon2::Params::DEFAULT_T_COST
    }

    fn default_parallelism() -> u32 {
        argon2::Params::DEFAULT_P_COST
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: Self::default_memory_kib(),
            iterations: Self::default_iterations(),
            parallelism: Self::default_parallelism(),
        }
    }
}
