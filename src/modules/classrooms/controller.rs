use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use classdesk_core::AppError;
use classdesk_models::ClassroomId;

use super::model::{
    Classroom, ClassroomDetail, CreateClassroomDto, EnrollStudentsDto, MessageResponse,
    UpdateClassroomDto,
};
use super::service::ClassroomService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

#[utoipa::path(
    post,
    path = "/api/classrooms",
    request_body = CreateClassroomDto,
    responses(
        (status = 201, description = "Classroom created", body = Classroom),
        (status = 400, description = "Invalid input or duplicate name", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Classrooms"
)]
#[instrument(skip(state, _admin))]
pub async fn create_classroom(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateClassroomDto>,
) -> Result<(StatusCode, Json<Classroom>), AppError> {
    let classroom = ClassroomService::create_classroom(&state.stores, dto).await?;
    Ok((StatusCode::CREATED, Json(classroom)))
}

#[utoipa::path(
    get,
    path = "/api/classrooms",
    responses(
        (status = 200, description = "All classrooms with students and subjects resolved", body = Vec<ClassroomDetail>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Classrooms"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_classrooms(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<ClassroomDetail>>, AppError> {
    let classrooms = ClassroomService::get_classrooms(&state.stores).await?;
    Ok(Json(classrooms))
}

#[utoipa::path(
    get,
    path = "/api/classrooms/{id}",
    params(
        ("id" = String, Path, description = "Classroom ID (UUID)")
    ),
    responses(
        (status = 200, description = "Classroom with students and subjects resolved", body = ClassroomDetail),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Classroom not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Classrooms"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_classroom(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<ClassroomId>,
) -> Result<Json<ClassroomDetail>, AppError> {
    let classroom = ClassroomService::get_classroom(&state.stores, id).await?;
    Ok(Json(classroom))
}

#[utoipa::path(
    put,
    path = "/api/classrooms/{id}",
    params(
        ("id" = String, Path, description = "Classroom ID (UUID)")
    ),
    request_body = UpdateClassroomDto,
    responses(
        (status = 200, description = "Classroom updated", body = Classroom),
        (status = 400, description = "Invalid input, duplicate name or capacity below enrollment", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Classroom not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Classrooms"
)]
#[instrument(skip(state, _admin))]
pub async fn update_classroom(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedPath(id): ValidatedPath<ClassroomId>,
    ValidatedJson(dto): ValidatedJson<UpdateClassroomDto>,
) -> Result<Json<Classroom>, AppError> {
    let classroom = ClassroomService::update_classroom(&state.stores, id, dto).await?;
    Ok(Json(classroom))
}

#[utoipa::path(
    delete,
    path = "/api/classrooms/{id}",
    params(
        ("id" = String, Path, description = "Classroom ID (UUID)")
    ),
    responses(
        (status = 200, description = "Classroom deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Classroom not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Classrooms"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_classroom(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedPath(id): ValidatedPath<ClassroomId>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = ClassroomService::delete_classroom(&state.stores, id).await?;
    Ok(Json(message))
}

/// Enroll student accounts into a classroom
#[utoipa::path(
    post,
    path = "/api/classrooms/{id}/students",
    params(
        ("id" = String, Path, description = "Classroom ID (UUID)")
    ),
    request_body = EnrollStudentsDto,
    responses(
        (status = 200, description = "Updated classroom", body = Classroom),
        (status = 400, description = "Not a student, or capacity exceeded", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Classroom or student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Classrooms"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn enroll_students(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedPath(id): ValidatedPath<ClassroomId>,
    ValidatedJson(dto): ValidatedJson<EnrollStudentsDto>,
) -> Result<Json<Classroom>, AppError> {
    let classroom = ClassroomService::enroll_students(&state.stores, id, dto).await?;
    Ok(Json(classroom))
}
