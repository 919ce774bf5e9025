use axum::{Json, extract::State};
use tracing::instrument;

use classdesk_core::AppError;
use classdesk_models::AccountId;

use super::model::{Account, AccountFilterParams, MessageResponse};
use super::service::AccountService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedPath, ValidatedQuery};

/// List accounts, newest first
#[utoipa::path(
    get,
    path = "/api/accounts",
    params(AccountFilterParams),
    responses(
        (status = 200, description = "Accounts", body = Vec<Account>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Accounts"
)]
#[instrument(skip(state))]
pub async fn get_accounts(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<AccountFilterParams>,
) -> Result<Json<Vec<Account>>, AppError> {
    let accounts = AccountService::get_accounts(&state.stores, params.role).await?;
    Ok(Json(accounts))
}

#[utoipa::path(
    delete,
    path = "/api/accounts/{id}",
    params(
        ("id" = String, Path, description = "Account ID (UUID)")
    ),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 400, description = "Cannot delete own account", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Accounts"
)]
#[instrument(skip(state, admin))]
pub async fn delete_account(
    State(state): State<AppState>,
    admin: AuthUser,
    ValidatedPath(id): ValidatedPath<AccountId>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = AccountService::delete_account(&state.stores, &admin.0, id).await?;
    Ok(Json(message))
}
