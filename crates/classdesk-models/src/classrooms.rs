use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{AccountId, ClassroomId, SubjectId};

/// A subject taught in a classroom, and who teaches it there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAssignment {
    pub subject: SubjectId,
    pub faculty: AccountId,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub id: ClassroomId,
    pub name: String,
    pub capacity: i32,
    /// Enrolled student accounts in enrollment order, no repeats.
    pub students: Vec<AccountId>,
    pub subjects: Vec<SubjectAssignment>,
    pub created_at: DateTime<Utc>,
}

impl Classroom {
    pub fn new(name: String, capacity: i32) -> Self {
        Self {
            id: ClassroomId::new(),
            name,
            capacity,
            students: Vec::new(),
            subjects: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Number of students the enrollment would hold after adding `ids`,
    /// counting each id once.
    pub fn enrollment_after(&self, ids: &[AccountId]) -> usize {
        let mut seen = self.students.clone();
        for id in ids {
            if !seen.contains(id) {
                seen.push(*id);
            }
        }
        seen.len()
    }

    /// Appends the ids not already enrolled. Returns how many were added.
    pub fn enroll(&mut self, ids: &[AccountId]) -> usize {
        let before = self.students.len();
        for id in ids {
            if !self.students.contains(id) {
                self.students.push(*id);
            }
        }
        self.students.len() - before
    }

    pub fn has_room_for(&self, total: usize) -> bool {
        usize::try_from(self.capacity).is_ok_and(|capacity| total <= capacity)
    }

    /// Whether the current enrollment would still fit under `capacity`.
    pub fn fits_within(&self, capacity: i32) -> bool {
        usize::try_from(capacity).is_ok_and(|capacity| self.students.len() <= capacity)
    }

    pub fn add_subject(&mut self, assignment: SubjectAssignment) -> bool {
        if self.subjects.contains(&assignment) {
            return false;
        }
        self.subjects.push(assignment);
        true
    }

    pub fn remove_subject(&mut self, subject: SubjectId) -> bool {
        let before = self.subjects.len();
        self.subjects.retain(|a| a.subject != subject);
        self.subjects.len() != before
    }

    /// Drops the account from the enrollment and from every pair naming it as
    /// faculty.
    pub fn remove_account(&mut self, account: AccountId) -> bool {
        let before = (self.students.len(), self.subjects.len());
        self.students.retain(|id| *id != account);
        self.subjects.retain(|a| a.faculty != account);
        before != (self.students.len(), self.subjects.len())
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassroomDto {
    #[validate(length(min = 1, message = "Classroom name is required"))]
    #[schema(example = "Room101")]
    pub name: String,

    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    #[schema(example = 30)]
    pub capacity: i32,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassroomDto {
    #[validate(length(min = 1, message = "Classroom name is required"))]
    pub name: Option<String>,

    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollStudentsDto {
    #[validate(length(min = 1, message = "Provide at least one student id"))]
    pub student_ids: Vec<AccountId>,
}
