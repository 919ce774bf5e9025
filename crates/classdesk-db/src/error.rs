use thiserror::Error;

use classdesk_core::AppError;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique key is already taken. Carries the client-facing message.
    #[error("{0}")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored document is malformed: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate(message.into())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(message) => AppError::Validation(message),
            other => AppError::internal(other),
        }
    }
}

pub(crate) const USERNAME_TAKEN: &str = "Username already exists";
pub(crate) const STUDENT_ID_TAKEN: &str = "Student ID already exists";
pub(crate) const FACULTY_ID_TAKEN: &str = "Faculty ID already exists";
pub(crate) const CLASSROOM_NAME_TAKEN: &str = "Classroom already exists";
pub(crate) const SUBJECT_CODE_TAKEN: &str = "Subject with this code already exists";
