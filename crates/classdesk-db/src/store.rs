//! Storage seams.
//!
//! Each collection sits behind its own trait so the HTTP layer never knows
//! whether it talks to Postgres or to the in-memory backend. Uniqueness is
//! enforced by the store on insert and update, and reported as
//! [`StoreError::Duplicate`](crate::StoreError::Duplicate).

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use classdesk_models::accounts::{Account, Role};
use classdesk_models::classrooms::Classroom;
use classdesk_models::subjects::Subject;
use classdesk_models::{AccountId, ClassroomId, SubjectId};

use crate::error::StoreResult;
use crate::memory::{MemoryAccountStore, MemoryClassroomStore, MemorySubjectStore};
use crate::postgres::{PgAccountStore, PgClassroomStore, PgSubjectStore};

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn insert(&self, account: Account) -> StoreResult<Account>;
    async fn find_by_id(&self, id: AccountId) -> StoreResult<Option<Account>>;
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Account>>;
    /// Ids with no account are skipped. Order is unspecified.
    async fn find_by_ids(&self, ids: &[AccountId]) -> StoreResult<Vec<Account>>;
    /// Newest first.
    async fn list(&self, role: Option<Role>) -> StoreResult<Vec<Account>>;
    async fn delete(&self, id: AccountId) -> StoreResult<bool>;
}

#[async_trait]
pub trait ClassroomStore: Send + Sync {
    async fn insert(&self, classroom: Classroom) -> StoreResult<Classroom>;
    async fn find_by_id(&self, id: ClassroomId) -> StoreResult<Option<Classroom>>;
    async fn find_by_ids(&self, ids: &[ClassroomId]) -> StoreResult<Vec<Classroom>>;
    /// Oldest first.
    async fn list(&self) -> StoreResult<Vec<Classroom>>;
    /// Replaces the stored document. Returns `false` if it no longer exists.
    async fn update(&self, classroom: &Classroom) -> StoreResult<bool>;
    /// Sets name and capacity only, leaving enrollment and pairs untouched.
    /// Returns `false` if the classroom is gone or holds more than
    /// `capacity` students at the time of the write.
    async fn update_details(&self, id: ClassroomId, name: &str, capacity: i32)
    -> StoreResult<bool>;
    async fn delete(&self, id: ClassroomId) -> StoreResult<bool>;
    /// Drops every pair that names `subject`.
    async fn detach_subject(&self, subject: SubjectId) -> StoreResult<()>;
    /// Drops `account` from every enrollment and every pair naming it as faculty.
    async fn detach_account(&self, account: AccountId) -> StoreResult<()>;
}

#[async_trait]
pub trait SubjectStore: Send + Sync {
    async fn insert(&self, subject: Subject) -> StoreResult<Subject>;
    async fn find_by_id(&self, id: SubjectId) -> StoreResult<Option<Subject>>;
    async fn find_by_ids(&self, ids: &[SubjectId]) -> StoreResult<Vec<Subject>>;
    /// Oldest first.
    async fn list(&self) -> StoreResult<Vec<Subject>>;
    async fn update(&self, subject: &Subject) -> StoreResult<bool>;
    /// Sets name and code only, leaving the pairs untouched.
    async fn update_details(&self, id: SubjectId, name: &str, code: &str) -> StoreResult<bool>;
    async fn delete(&self, id: SubjectId) -> StoreResult<bool>;
    async fn detach_classroom(&self, classroom: ClassroomId) -> StoreResult<()>;
    async fn detach_faculty(&self, faculty: AccountId) -> StoreResult<()>;
}

/// The store handles shared through application state.
#[derive(Clone)]
pub struct Stores {
    pub accounts: Arc<dyn AccountStore>,
    pub classrooms: Arc<dyn ClassroomStore>,
    pub subjects: Arc<dyn SubjectStore>,
}

impl Stores {
    /// Volatile backend. Everything is lost on restart.
    pub fn in_memory() -> Self {
        Self {
            accounts: Arc::new(MemoryAccountStore::default()),
            classrooms: Arc::new(MemoryClassroomStore::default()),
            subjects: Arc::new(MemorySubjectStore::default()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            accounts: Arc::new(PgAccountStore::new(pool.clone())),
            classrooms: Arc::new(PgClassroomStore::new(pool.clone())),
            subjects: Arc::new(PgSubjectStore::new(pool)),
        }
    }
}
