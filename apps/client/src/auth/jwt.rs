// Access token decoding
// Tokens are issued by the hosted auth service; this side only reads them

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::session::Session;
use crate::domain::user::UserId;

/// Errors raised while reading an access token
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Access token expired")]
    Expired,

    #[error("Invalid access token: {0}")]
    InvalidToken(String),
}

/// Claims carried by an access token
///
/// # Fields
/// * `sub` - Subject (user_id)
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Creates a signed access token
///
/// The hosted service mints real tokens; this exists for local development
/// and tests.
///
/// # Example
/// ```
/// use callsight_client::auth::jwt::{create_token, verify_token};
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// let user_id = Uuid::new_v4();
/// let token = create_token(user_id, Some("jane@acme.io"), "secret", Duration::hours(1)).unwrap();
///
/// let claims = verify_token(&token, Some("secret")).expect("valid token");
/// assert_eq!(claims.sub, user_id);
/// ```
pub fn create_token(
    user_id: Uuid,
    email: Option<&str>,
    secret: &str,
    ttl: Duration,
) -> Result<String, AuthError> {
    let claims = Claims {
        sub: user_id,
        exp: (Utc::now() + ttl).timestamp() as usize,
        email: email.map(str::to_string),
        role: Some("authenticated".to_string()),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| AuthError::InvalidToken(e.to_string()))
}

/// Decodes and checks an access token
///
/// With a secret the HS256 signature is verified. Without one only the
/// claims and expiry are checked, since the hosted service re-validates the
/// token on every request anyway.
pub fn verify_token(token: &str, secret: Option<&str>) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    let key = match secret {
        Some(secret) => DecodingKey::from_secret(secret.as_ref()),
        None => {
            validation.insecure_disable_signature_validation();
            DecodingKey::from_secret(&[])
        }
    };

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::InvalidToken(e.to_string()),
        })
}

/// Builds a session from an access token
pub fn session_from_token(token: &str, secret: Option<&str>) -> Result<Session, AuthError> {
    let claims = verify_token(token, secret)?;

    Ok(Session {
        user_id: UserId::new(claims.sub),
        email: claims.email,
        access_token: token.to_string(),
    })
}
