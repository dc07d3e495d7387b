//! Token issuing for the development endpoint

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::RoleClaim;
use crate::config::StubUser;
use crate::error::{Error, Result};

/// Claims signed into every issued token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IssuedClaims {
    /// Subject (username)
    pub sub: String,
    pub roles: Vec<RoleClaim>,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
    /// Token ID
    pub jti: String,
}

impl IssuedClaims {
    /// Create claims for a user
    pub fn for_user(user: &StubUser, ttl_secs: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: user.username.clone(),
            roles: user.roles.iter().map(RoleClaim::new).collect(),
            iat: now,
            exp: now + ttl_secs,
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Create an HS256 token for a user
pub fn issue_token(user: &StubUser, secret: &str, ttl_secs: i64) -> Result<String> {
    let claims = IssuedClaims::for_user(user, ttl_secs);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Other(format!("Failed to create token: {}", e)))
}

/// Validate and decode a token issued by this endpoint
pub fn verify_token(token: &str, secret: &str) -> Result<IssuedClaims> {
    decode::<IssuedClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| Error::MalformedToken(format!("Invalid token: {}", e)))
}
