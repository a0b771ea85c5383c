use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// Access token payload.
///
/// Carries only the subject and the expiration (Unix timestamp, seconds).
/// Tokens are stateless: nothing about them is stored server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPayload {
    /// Subject (user identifier). Integer subjects are accepted and read as their decimal form.
    #[serde(deserialize_with = "subject_from_string_or_integer")]
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenPayload {
    /// Build the payload for a token issued at `now` and valid for `lifetime`.
    ///
    /// Returns `None` when the expiration falls outside the representable range.
    pub fn new(subject: impl ToString, now: DateTime<Utc>, lifetime: Duration) -> Option<Self> {
        let expires_at = now.checked_add_signed(lifetime)?;

        Some(Self {
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
        })
    }

    /// A token is expired once `now` reaches its expiration second.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSubject {
    Text(String),
    Integer(i64),
}

fn subject_from_string_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match RawSubject::deserialize(deserializer)? {
        RawSubject::Text(sub) => Ok(sub),
        RawSubject::Integer(sub) => Ok(sub.to_string()),
    }
}
