use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use classdesk_core::AppError;
use classdesk_models::SubjectId;

use super::model::{
    AssignFacultyDto, CreateSubjectDto, MessageResponse, Subject, SubjectDetail, UpdateSubjectDto,
};
use super::service::SubjectService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

#[utoipa::path(
    post,
    path = "/api/subjects",
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject created", body = Subject),
        (status = 400, description = "Invalid input or duplicate code", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Subjects"
)]
#[instrument(skip(state, _admin))]
pub async fn create_subject(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<(StatusCode, Json<Subject>), AppError> {
    let subject = SubjectService::create_subject(&state.stores, dto).await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

#[utoipa::path(
    get,
    path = "/api/subjects",
    responses(
        (status = 200, description = "All subjects with classrooms and faculty resolved", body = Vec<SubjectDetail>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Subjects"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_subjects(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<SubjectDetail>>, AppError> {
    let subjects = SubjectService::get_subjects(&state.stores).await?;
    Ok(Json(subjects))
}

#[utoipa::path(
    get,
    path = "/api/subjects/{id}",
    params(
        ("id" = String, Path, description = "Subject ID (UUID)")
    ),
    responses(
        (status = 200, description = "Subject with classrooms and faculty resolved", body = SubjectDetail),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Subjects"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_subject(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<SubjectId>,
) -> Result<Json<SubjectDetail>, AppError> {
    let subject = SubjectService::get_subject(&state.stores, id).await?;
    Ok(Json(subject))
}

#[utoipa::path(
    put,
    path = "/api/subjects/{id}",
    params(
        ("id" = String, Path, description = "Subject ID (UUID)")
    ),
    request_body = UpdateSubjectDto,
    responses(
        (status = 200, description = "Subject updated", body = Subject),
        (status = 400, description = "Invalid input or duplicate code", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Subjects"
)]
#[instrument(skip(state, _admin))]
pub async fn update_subject(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedPath(id): ValidatedPath<SubjectId>,
    ValidatedJson(dto): ValidatedJson<UpdateSubjectDto>,
) -> Result<Json<Subject>, AppError> {
    let subject = SubjectService::update_subject(&state.stores, id, dto).await?;
    Ok(Json(subject))
}

#[utoipa::path(
    delete,
    path = "/api/subjects/{id}",
    params(
        ("id" = String, Path, description = "Subject ID (UUID)")
    ),
    responses(
        (status = 200, description = "Subject deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Subjects"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_subject(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedPath(id): ValidatedPath<SubjectId>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = SubjectService::delete_subject(&state.stores, id).await?;
    Ok(Json(message))
}

/// Assign a faculty member to teach the subject in a classroom
#[utoipa::path(
    post,
    path = "/api/subjects/{id}/assign",
    params(
        ("id" = String, Path, description = "Subject ID (UUID)")
    ),
    request_body = AssignFacultyDto,
    responses(
        (status = 200, description = "Updated subject", body = Subject),
        (status = 400, description = "Not a faculty account, or pair already assigned", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Subject, classroom or faculty not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Subjects"
)]
#[instrument(skip(state, _admin))]
pub async fn assign_faculty(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedPath(id): ValidatedPath<SubjectId>,
    ValidatedJson(dto): ValidatedJson<AssignFacultyDto>,
) -> Result<Json<Subject>, AppError> {
    let subject = SubjectService::assign_faculty(&state.stores, id, dto).await?;
    Ok(Json(subject))
}
