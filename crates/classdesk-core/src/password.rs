//! Credential hashing.
//!
//! bcrypt is deliberately slow, so every call is moved onto tokio's blocking
//! pool instead of running on an async worker.

use std::sync::OnceLock;

use anyhow::anyhow;
use bcrypt::{hash, verify};

use crate::errors::AppError;

/// bcrypt work factor (2^12 rounds).
pub const HASH_COST: u32 = 12;

pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();

    tokio::task::spawn_blocking(move || hash(password, HASH_COST))
        .await
        .map_err(|e| AppError::internal(anyhow!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

/// Returns `Ok(false)` on mismatch. Only a malformed stored hash is an error.
pub async fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let hashed = hashed.to_owned();

    tokio::task::spawn_blocking(move || verify(password, &hashed))
        .await
        .map_err(|e| AppError::internal(anyhow!("Password verification task failed: {}", e)))?
        .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
}

/// Runs a full verification against a throwaway hash so that a login for an
/// unknown username costs the same as one with a wrong password.
pub async fn verify_against_dummy(password: &str) {
    let password = password.to_owned();

    let _ = tokio::task::spawn_blocking(move || {
        let _ = verify(password, dummy_hash());
    })
    .await;
}

fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| hash("classdesk-unknown-account", HASH_COST).unwrap_or_default())
}
