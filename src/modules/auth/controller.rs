use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;
use utoipa::ToSchema;

use classdesk_auth::issue_token;
use classdesk_core::AppError;

use super::model::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{JsonBody, ValidatedJson};

/// Body of every error response.
#[derive(ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// Register a Student, Faculty or Admin account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing field, invalid role or duplicate key", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let account = AuthService::register(state.stores.accounts.as_ref(), dto).await?;
    let token = issue_token(account.id.into_inner(), &state.jwt_config)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: account,
        }),
    ))
}

/// Exchange username and password for a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Username or password missing", body = ErrorResponse),
        (status = 401, description = "Incorrect username or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let account = AuthService::login(state.stores.accounts.as_ref(), dto).await?;
    let token = issue_token(account.id.into_inner(), &state.jwt_config)?;

    tracing::info!(account_id = %account.id, "login succeeded");

    Ok(Json(AuthResponse {
        token,
        user: account,
    }))
}

/// Current account
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "The authenticated account", body = UserResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip(auth_user), fields(account_id = %auth_user.0.id))]
pub async fn get_me(auth_user: AuthUser) -> Json<UserResponse> {
    Json(UserResponse { user: auth_user.0 })
}
