//! Token payload decoding
//!
//! Tokens are decoded only to read the claims the server already vouched
//! for. Nothing here checks the signature or the expiry, so the result must
//! never be used to make a trust decision.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::auth::models::Session;
use crate::error::{Error, Result};

/// Standard alphabet, padding optional
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// A role entry inside the token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleClaim {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
}

impl RoleClaim {
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: Some(authority.into()),
        }
    }

    /// Read the authority of a raw role entry. `None` for entries that are
    /// not objects or carry no string `authority`.
    pub fn authority_of(entry: &serde_json::Value) -> Option<&str> {
        entry.get("authority").and_then(serde_json::Value::as_str)
    }
}

/// Claims decoded from a token payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Raw role entries, checked by `to_user`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<serde_json::Value>>,
    /// Issued at, any JSON value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<serde_json::Value>,
    /// Expiration time, any JSON value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<serde_json::Value>,
    /// Any other payload fields
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Claims {
    /// Extract the session identity from the claims
    pub fn to_user(&self) -> Result<Session> {
        let username = match self.sub.as_deref() {
            Some(sub) if !sub.is_empty() => sub.to_string(),
            _ => return Err(Error::MissingClaim("sub".to_string())),
        };

        let roles = self
            .roles
            .as_ref()
            .ok_or_else(|| Error::MissingClaim("roles".to_string()))?
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                RoleClaim::authority_of(entry)
                    .map(str::to_string)
                    .ok_or_else(|| Error::MissingClaim(format!("roles[{}].authority", i)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Session { username, roles })
    }

    /// Issue time, when `iat` is a usable NumericDate
    pub fn issued_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.iat.as_ref().and_then(numeric_date)
    }

    /// Expiry, when `exp` is a usable NumericDate. For display only.
    pub fn expires_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.exp.as_ref().and_then(numeric_date)
    }
}

/// Seconds since the epoch, whole or fractional
fn numeric_date(value: &serde_json::Value) -> Option<chrono::DateTime<chrono::Utc>> {
    if let Some(secs) = value.as_i64() {
        return chrono::DateTime::from_timestamp(secs, 0);
    }
    let secs = value.as_f64()?;
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9) as u32;
    chrono::DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
}

/// Decode the payload segment of a token without verifying it
pub fn decode_unverified_claims(token: &str) -> Result<Claims> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| Error::MalformedToken("expected at least two segments".to_string()))?;

    let standard = payload.replace('-', "+").replace('_', "/");
    let bytes = PAYLOAD_ENGINE
        .decode(standard.as_bytes())
        .map_err(|e| Error::MalformedToken(format!("payload is not base64: {}", e)))?;

    let json = String::from_utf8(bytes)
        .map_err(|_| Error::MalformedToken("payload is not UTF-8".to_string()))?;

    serde_json::from_str(&json)
        .map_err(|e| Error::MalformedToken(format!("payload is not JSON: {}", e)))
}
