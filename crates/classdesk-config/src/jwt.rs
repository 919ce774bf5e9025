use std::env;

/// Secret used when `JWT_SECRET` is not set. Fine for local development only.
pub const DEVELOPMENT_SECRET: &str = "classdesk-development-secret-change-me";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET is not set, falling back to the development secret");
                DEVELOPMENT_SECRET.to_string()
            }
        };

        Self {
            secret,
            token_expiry: env::var("JWT_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|secs: &i64| *secs > 0)
                .unwrap_or(86400), // 1 day
        }
    }
}
