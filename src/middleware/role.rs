//! Role checks.
//!
//! [`authorize`] is the pure predicate. It is applied either per handler via
//! the [`RequireAdmin`] extractor, or to a whole router via the
//! [`require_admin`] route layer.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};

use classdesk_core::AppError;
use classdesk_models::accounts::{Account, Role};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub const ADMIN_ONLY_MESSAGE: &str = "Access denied. Admin only.";
pub const NO_PERMISSION_MESSAGE: &str = "You do not have permission to perform this action";

pub fn authorize(account: &Account, allowed_roles: &[Role]) -> Result<(), AppError> {
    if allowed_roles.contains(&account.role()) {
        return Ok(());
    }

    if allowed_roles == [Role::Admin] {
        Err(AppError::forbidden(ADMIN_ONLY_MESSAGE))
    } else {
        Err(AppError::forbidden(NO_PERMISSION_MESSAGE))
    }
}

/// Extractor for handlers that only an Admin may call.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Account);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(account) = AuthUser::from_request_parts(parts, state).await?;
        authorize(&account, &[Role::Admin])?;
        Ok(RequireAdmin(account))
    }
}

/// Route layer that admits Admin accounts only. The resolved [`AuthUser`] is
/// stored in the request extensions for the handler.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let auth_user = match AuthUser::from_request_parts(&mut parts, &state).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    if let Err(err) = authorize(&auth_user.0, &[Role::Admin]) {
        return err.into_response();
    }

    parts.extensions.insert(auth_user);
    next.run(Request::from_parts(parts, body)).await
}
