use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use classdesk_auth::verify_token;
use classdesk_core::AppError;
use classdesk_models::AccountId;
use classdesk_models::accounts::Account;

use crate::state::AppState;

pub const NOT_LOGGED_IN_MESSAGE: &str = "You are not logged in. Please log in to get access.";
pub const ACCOUNT_GONE_MESSAGE: &str = "The user belonging to this token no longer exists.";

/// Extractor that validates the bearer token and resolves the live account.
///
/// The account is read from the store on every request, so role changes and
/// deletions take effect immediately.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Account);

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthenticated(NOT_LOGGED_IN_MESSAGE))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Already resolved by a route layer.
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let token = bearer_token(&parts.headers)?;
        let claims = verify_token(token, &state.jwt_config)?;

        let account = state
            .stores
            .accounts
            .find_by_id(AccountId::from(claims.sub))
            .await?
            .ok_or_else(|| AppError::unauthenticated(ACCOUNT_GONE_MESSAGE))?;

        Ok(AuthUser(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.to_string(), NOT_LOGGED_IN_MESSAGE);
    }

    #[test]
    fn test_wrong_scheme_or_empty_token() {
        assert!(bearer_token(&headers_with("Basic dXNlcjpwYXNz")).is_err());
        assert!(bearer_token(&headers_with("Bearer ")).is_err());
    }
}
