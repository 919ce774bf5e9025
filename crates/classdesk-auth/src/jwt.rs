//! Token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the process-wide secret from
//! [`JwtConfig`]. Issuance has no side effects; there is no session store.

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use classdesk_config::JwtConfig;
use classdesk_core::AppError;

use crate::claims::Claims;

/// Creates a signed token for `account_id` that expires after
/// `jwt_config.token_expiry` seconds.
///
/// # Errors
///
/// Returns an internal error if encoding fails or the expiry does not fit
/// in a timestamp.
pub fn issue_token(account_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now
        .checked_add(jwt_config.token_expiry)
        .ok_or_else(|| AppError::internal(anyhow!("Token expiry overflows the timestamp")))?;

    let claims = Claims {
        sub: account_id,
        iat: now,
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
}

/// Checks signature and expiry and returns the embedded claims.
///
/// Expiry is checked with zero leeway.
///
/// # Errors
///
/// Returns [`AppError::Unauthenticated`] if the token is malformed, signed
/// with another secret, or expired.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "token rejected");
        AppError::unauthenticated("Invalid token. Please log in again.")
    })
}
