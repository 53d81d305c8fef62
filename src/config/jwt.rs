use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;
use serde::Deserialize;

/// Signing material and lifetime for issued tokens.
#[derive(Debug, Deserialize)]
pub struct JwtSettings {
    pub secret: SecretString,
    pub valid_for_hours: i64,
}

impl JwtSettings {
    pub fn new(secret: String, valid_for_hours: i64) -> Self {
        Self {
            secret: SecretString::new(secret.into_boxed_str()),
            valid_for_hours,
        }
    }

    /// Expiry instant for a token issued at `issued_at`.
    pub fn expires_at(&self, issued_at: DateTime<Utc>) -> DateTime<Utc> {
        issued_at + Duration::hours(self.valid_for_hours)
    }
}
