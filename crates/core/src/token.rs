//! Access token inspection
//!
//! Tokens are decoded without signature verification. The backend is the only
//! party that verifies signatures; the client only looks at `exp` to decide
//! whether to refresh before sending a request.

use crate::error::{CoreError, CoreResult};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
use tracing::debug;

/// Claims read from an access token payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Expiration time (as UTC timestamp)
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Decode the claims of a JWT without checking its signature or expiry
pub fn decode_claims(token: &str) -> CoreResult<TokenClaims> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.set_required_spec_claims(&["exp"]);

    decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| CoreError::invalid_token(e.to_string()))
}

/// Whether `token` is expired at `now` (epoch seconds)
///
/// Anything that cannot be decoded counts as expired so the caller refreshes
/// rather than sending a token the backend will reject.
pub fn is_expired_at(token: &str, now: i64) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims.exp <= now,
        Err(e) => {
            debug!("Treating undecodable token as expired: {e}");
            true
        }
    }
}

/// Whether `token` is expired right now
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now().timestamp())
}
