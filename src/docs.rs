use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use classdesk_models::accounts::{
    Account, FacultyProfile, RegisterRequest, Role, RoleProfile, StudentProfile, StudentYear,
};
use classdesk_models::auth::{AuthResponse, LoginRequest, MessageResponse, UserResponse};
use classdesk_models::classrooms::{
    Classroom, CreateClassroomDto, EnrollStudentsDto, SubjectAssignment, UpdateClassroomDto,
};
use classdesk_models::subjects::{
    AssignFacultyDto, ClassroomAssignment, CreateSubjectDto, Subject, UpdateSubjectDto,
};
use classdesk_models::views::{
    AccountSummary, ClassroomDetail, ClassroomSubjectDetail, ClassroomSummary,
    SubjectClassroomDetail, SubjectDetail, SubjectSummary,
};
use classdesk_models::{AccountId, ClassroomId, SubjectId};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_me,
        crate::modules::classrooms::controller::create_classroom,
        crate::modules::classrooms::controller::get_classrooms,
        crate::modules::classrooms::controller::get_classroom,
        crate::modules::classrooms::controller::update_classroom,
        crate::modules::classrooms::controller::delete_classroom,
        crate::modules::classrooms::controller::enroll_students,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::subjects::controller::get_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::subjects::controller::assign_faculty,
        crate::modules::accounts::controller::get_accounts,
        crate::modules::accounts::controller::delete_account,
    ),
    components(
        schemas(
            AccountId,
            ClassroomId,
            SubjectId,
            Role,
            StudentYear,
            StudentProfile,
            FacultyProfile,
            RoleProfile,
            Account,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserResponse,
            MessageResponse,
            ErrorResponse,
            Classroom,
            SubjectAssignment,
            CreateClassroomDto,
            UpdateClassroomDto,
            EnrollStudentsDto,
            Subject,
            ClassroomAssignment,
            CreateSubjectDto,
            UpdateSubjectDto,
            AssignFacultyDto,
            AccountSummary,
            ClassroomSummary,
            SubjectSummary,
            ClassroomSubjectDetail,
            ClassroomDetail,
            SubjectClassroomDetail,
            SubjectDetail,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and the current account"),
        (name = "Classrooms", description = "Classroom management and enrollment"),
        (name = "Subjects", description = "Subject management and faculty assignment"),
        (name = "Accounts", description = "Account administration")
    ),
    info(
        title = "Classdesk API",
        version = "0.1.0",
        description = "Role-based classroom management API built with Rust and Axum.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
