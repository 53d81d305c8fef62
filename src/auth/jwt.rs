use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::ExposeSecret;

use crate::config::jwt::JwtSettings;
use crate::middleware::auth::Claims;
use crate::models::user::UserRecord;

/// Issue a signed token carrying the user's identity, role and status.
pub fn generate_token(
    user: &UserRecord,
    jwt_settings: &JwtSettings,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role,
        status: user.status,
        exp: jwt_settings.expires_at(Utc::now()).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_settings.secret.expose_secret().as_bytes()),
    )
}
