use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{AccountId, ClassroomId, SubjectId};

/// A classroom the subject is taught in, and the faculty member teaching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomAssignment {
    pub classroom: ClassroomId,
    pub faculty: AccountId,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub code: String,
    pub classrooms: Vec<ClassroomAssignment>,
    pub created_at: DateTime<Utc>,
}

impl Subject {
    pub fn new(name: String, code: String) -> Self {
        Self {
            id: SubjectId::new(),
            name,
            code,
            classrooms: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Records the pair. Returns `false` if it is already present.
    pub fn assign(&mut self, assignment: ClassroomAssignment) -> bool {
        if self.classrooms.contains(&assignment) {
            return false;
        }
        self.classrooms.push(assignment);
        true
    }

    pub fn remove_classroom(&mut self, classroom: ClassroomId) -> bool {
        let before = self.classrooms.len();
        self.classrooms.retain(|a| a.classroom != classroom);
        self.classrooms.len() != before
    }

    pub fn remove_faculty(&mut self, faculty: AccountId) -> bool {
        let before = self.classrooms.len();
        self.classrooms.retain(|a| a.faculty != faculty);
        self.classrooms.len() != before
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectDto {
    #[validate(length(min = 1, message = "Subject name is required"))]
    #[schema(example = "Calculus I")]
    pub name: String,

    #[validate(length(min = 1, message = "Subject code is required"))]
    #[schema(example = "MATH101")]
    pub code: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubjectDto {
    #[validate(length(min = 1, message = "Subject name is required"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Subject code is required"))]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignFacultyDto {
    pub classroom_id: ClassroomId,
    /// Account id of the faculty member.
    pub faculty_id: AccountId,
}
