//! Read-side views.
//!
//! Classrooms and subjects store bare ids. Reads return these views instead,
//! with every id swapped for a short summary of what it names. Ids that no
//! longer resolve are left out.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::accounts::Account;
use crate::classrooms::Classroom;
use crate::ids::{AccountId, ClassroomId, SubjectId};
use crate::subjects::Subject;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: AccountId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ClassroomSummary {
    pub id: ClassroomId,
    pub name: String,
}

impl From<&Classroom> for ClassroomSummary {
    fn from(classroom: &Classroom) -> Self {
        Self {
            id: classroom.id,
            name: classroom.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SubjectSummary {
    pub id: SubjectId,
    pub name: String,
    pub code: String,
}

impl From<&Subject> for SubjectSummary {
    fn from(subject: &Subject) -> Self {
        Self {
            id: subject.id,
            name: subject.name.clone(),
            code: subject.code.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClassroomSubjectDetail {
    pub subject: SubjectSummary,
    pub faculty: AccountSummary,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomDetail {
    pub id: ClassroomId,
    pub name: String,
    pub capacity: i32,
    pub students: Vec<AccountSummary>,
    pub subjects: Vec<ClassroomSubjectDetail>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubjectClassroomDetail {
    pub classroom: ClassroomSummary,
    pub faculty: AccountSummary,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDetail {
    pub id: SubjectId,
    pub name: String,
    pub code: String,
    pub classrooms: Vec<SubjectClassroomDetail>,
    pub created_at: DateTime<Utc>,
}

/// Summaries of the documents a batch of classrooms or subjects refers to.
#[derive(Debug, Default)]
pub struct References {
    accounts: HashMap<AccountId, AccountSummary>,
    classrooms: HashMap<ClassroomId, ClassroomSummary>,
    subjects: HashMap<SubjectId, SubjectSummary>,
}

impl References {
    pub fn with_accounts(mut self, accounts: &[Account]) -> Self {
        self.accounts
            .extend(accounts.iter().map(|a| (a.id, AccountSummary::from(a))));
        self
    }

    pub fn with_classrooms(mut self, classrooms: &[Classroom]) -> Self {
        self.classrooms
            .extend(classrooms.iter().map(|c| (c.id, ClassroomSummary::from(c))));
        self
    }

    pub fn with_subjects(mut self, subjects: &[Subject]) -> Self {
        self.subjects
            .extend(subjects.iter().map(|s| (s.id, SubjectSummary::from(s))));
        self
    }

    pub fn classroom(&self, classroom: Classroom) -> ClassroomDetail {
        let students = classroom
            .students
            .iter()
            .filter_map(|id| self.accounts.get(id).cloned())
            .collect();

        let subjects = classroom
            .subjects
            .iter()
            .filter_map(|pair| {
                Some(ClassroomSubjectDetail {
                    subject: self.subjects.get(&pair.subject)?.clone(),
                    faculty: self.accounts.get(&pair.faculty)?.clone(),
                })
            })
            .collect();

        ClassroomDetail {
            id: classroom.id,
            name: classroom.name,
            capacity: classroom.capacity,
            students,
            subjects,
            created_at: classroom.created_at,
        }
    }

    pub fn subject(&self, subject: Subject) -> SubjectDetail {
        let classrooms = subject
            .classrooms
            .iter()
            .filter_map(|pair| {
                Some(SubjectClassroomDetail {
                    classroom: self.classrooms.get(&pair.classroom)?.clone(),
                    faculty: self.accounts.get(&pair.faculty)?.clone(),
                })
            })
            .collect();

        SubjectDetail {
            id: subject.id,
            name: subject.name,
            code: subject.code,
            classrooms,
            created_at: subject.created_at,
        }
    }
}

/// Sorted, deduplicated ids, ready for a batch lookup.
pub fn unique_ids<T: Ord>(ids: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut ids: Vec<T> = ids.into_iter().collect();
    ids.sort();
    ids.dedup();
    ids
}
