//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
///
/// - `sub`: account id
/// - `iat`: issued-at (Unix seconds)
/// - `exp`: expiry (Unix seconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}
