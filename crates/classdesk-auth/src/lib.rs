//! # Classdesk Auth
//!
//! Stateless bearer tokens for the Classdesk API.
//!
//! - [`claims`]: the token payload
//! - [`jwt`]: issuing and verifying HS256 tokens
//!
//! Tokens only carry the account id. Everything else (role, names) is read
//! from the store on each request, so a deleted account cannot keep using a
//! token that is still within its lifetime.
//!
//! # Example
//!
//! ```ignore
//! use classdesk_auth::{issue_token, verify_token};
//! use classdesk_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = issue_token(account_id, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, account_id);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{issue_token, verify_token};
