//! In-memory backend.
//!
//! Documents live in insertion-ordered vectors behind a tokio `RwLock`.
//! Uniqueness checks and the write they guard happen under one write lock.

use async_trait::async_trait;
use tokio::sync::RwLock;

use classdesk_models::accounts::{Account, Role};
use classdesk_models::classrooms::Classroom;
use classdesk_models::subjects::Subject;
use classdesk_models::{AccountId, ClassroomId, SubjectId};

use crate::error::{
    CLASSROOM_NAME_TAKEN, FACULTY_ID_TAKEN, STUDENT_ID_TAKEN, SUBJECT_CODE_TAKEN, StoreError,
    StoreResult, USERNAME_TAKEN,
};
use crate::store::{AccountStore, ClassroomStore, SubjectStore};

#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<Vec<Account>>,
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn insert(&self, account: Account) -> StoreResult<Account> {
        let mut accounts = self.accounts.write().await;

        if accounts.iter().any(|a| a.username == account.username) {
            return Err(StoreError::duplicate(USERNAME_TAKEN));
        }
        if let Some(student_id) = account.student_id()
            && accounts.iter().any(|a| a.student_id() == Some(student_id))
        {
            return Err(StoreError::duplicate(STUDENT_ID_TAKEN));
        }
        if let Some(faculty_id) = account.faculty_id()
            && accounts.iter().any(|a| a.faculty_id() == Some(faculty_id))
        {
            return Err(StoreError::duplicate(FACULTY_ID_TAKEN));
        }

        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: AccountId) -> StoreResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.username == username).cloned())
    }

    async fn find_by_ids(&self, ids: &[AccountId]) -> StoreResult<Vec<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .filter(|a| ids.contains(&a.id))
            .cloned()
            .collect())
    }

    async fn list(&self, role: Option<Role>) -> StoreResult<Vec<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .rev()
            .filter(|a| role.is_none_or(|r| a.role() == r))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: AccountId) -> StoreResult<bool> {
        let mut accounts = self.accounts.write().await;
        let before = accounts.len();
        accounts.retain(|a| a.id != id);
        Ok(accounts.len() != before)
    }
}

#[derive(Default)]
pub struct MemoryClassroomStore {
    classrooms: RwLock<Vec<Classroom>>,
}

#[async_trait]
impl ClassroomStore for MemoryClassroomStore {
    async fn insert(&self, classroom: Classroom) -> StoreResult<Classroom> {
        let mut classrooms = self.classrooms.write().await;
        if classrooms.iter().any(|c| c.name == classroom.name) {
            return Err(StoreError::duplicate(CLASSROOM_NAME_TAKEN));
        }
        classrooms.push(classroom.clone());
        Ok(classroom)
    }

    async fn find_by_id(&self, id: ClassroomId) -> StoreResult<Option<Classroom>> {
        let classrooms = self.classrooms.read().await;
        Ok(classrooms.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ClassroomId]) -> StoreResult<Vec<Classroom>> {
        let classrooms = self.classrooms.read().await;
        Ok(classrooms
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn list(&self) -> StoreResult<Vec<Classroom>> {
        Ok(self.classrooms.read().await.clone())
    }

    async fn update(&self, classroom: &Classroom) -> StoreResult<bool> {
        let mut classrooms = self.classrooms.write().await;
        if classrooms
            .iter()
            .any(|c| c.id != classroom.id && c.name == classroom.name)
        {
            return Err(StoreError::duplicate(CLASSROOM_NAME_TAKEN));
        }
        match classrooms.iter_mut().find(|c| c.id == classroom.id) {
            Some(stored) => {
                *stored = classroom.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_details(
        &self,
        id: ClassroomId,
        name: &str,
        capacity: i32,
    ) -> StoreResult<bool> {
        let mut classrooms = self.classrooms.write().await;
        if classrooms.iter().any(|c| c.id != id && c.name == name) {
            return Err(StoreError::duplicate(CLASSROOM_NAME_TAKEN));
        }
        match classrooms.iter_mut().find(|c| c.id == id) {
            Some(stored) if stored.fits_within(capacity) => {
                stored.name = name.to_string();
                stored.capacity = capacity;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: ClassroomId) -> StoreResult<bool> {
        let mut classrooms = self.classrooms.write().await;
        let before = classrooms.len();
        classrooms.retain(|c| c.id != id);
        Ok(classrooms.len() != before)
    }

    async fn detach_subject(&self, subject: SubjectId) -> StoreResult<()> {
        let mut classrooms = self.classrooms.write().await;
        for classroom in classrooms.iter_mut() {
            classroom.remove_subject(subject);
        }
        Ok(())
    }

    async fn detach_account(&self, account: AccountId) -> StoreResult<()> {
        let mut classrooms = self.classrooms.write().await;
        for classroom in classrooms.iter_mut() {
            classroom.remove_account(account);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySubjectStore {
    subjects: RwLock<Vec<Subject>>,
}

#[async_trait]
impl SubjectStore for MemorySubjectStore {
    async fn insert(&self, subject: Subject) -> StoreResult<Subject> {
        let mut subjects = self.subjects.write().await;
        if subjects.iter().any(|s| s.code == subject.code) {
            return Err(StoreError::duplicate(SUBJECT_CODE_TAKEN));
        }
        subjects.push(subject.clone());
        Ok(subject)
    }

    async fn find_by_id(&self, id: SubjectId) -> StoreResult<Option<Subject>> {
        let subjects = self.subjects.read().await;
        Ok(subjects.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[SubjectId]) -> StoreResult<Vec<Subject>> {
        let subjects = self.subjects.read().await;
        Ok(subjects
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn list(&self) -> StoreResult<Vec<Subject>> {
        Ok(self.subjects.read().await.clone())
    }

    async fn update(&self, subject: &Subject) -> StoreResult<bool> {
        let mut subjects = self.subjects.write().await;
        if subjects
            .iter()
            .any(|s| s.id != subject.id && s.code == subject.code)
        {
            return Err(StoreError::duplicate(SUBJECT_CODE_TAKEN));
        }
        match subjects.iter_mut().find(|s| s.id == subject.id) {
            Some(stored) => {
                *stored = subject.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_details(&self, id: SubjectId, name: &str, code: &str) -> StoreResult<bool> {
        let mut subjects = self.subjects.write().await;
        if subjects.iter().any(|s| s.id != id && s.code == code) {
            return Err(StoreError::duplicate(SUBJECT_CODE_TAKEN));
        }
        match subjects.iter_mut().find(|s| s.id == id) {
            Some(stored) => {
                stored.name = name.to_string();
                stored.code = code.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: SubjectId) -> StoreResult<bool> {
        let mut subjects = self.subjects.write().await;
        let before = subjects.len();
        subjects.retain(|s| s.id != id);
        Ok(subjects.len() != before)
    }

    async fn detach_classroom(&self, classroom: ClassroomId) -> StoreResult<()> {
        let mut subjects = self.subjects.write().await;
        for subject in subjects.iter_mut() {
            subject.remove_classroom(classroom);
        }
        Ok(())
    }

    async fn detach_faculty(&self, faculty: AccountId) -> StoreResult<()> {
        let mut subjects = self.subjects.write().await;
        for subject in subjects.iter_mut() {
            subject.remove_faculty(faculty);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use classdesk_models::accounts::{RoleProfile, StudentProfile, StudentYear};
    use classdesk_models::classrooms::SubjectAssignment;
    use classdesk_models::subjects::ClassroomAssignment;

    fn student(username: &str, student_id: &str) -> Account {
        Account {
            id: AccountId::new(),
            first_name: "Test".into(),
            last_name: "Student".into(),
            middle_name: None,
            username: username.into(),
            password_hash: "hash".into(),
            created_at: Utc::now(),
            profile: RoleProfile::Student(StudentProfile {
                student_id: student_id.into(),
                year: StudentYear::try_from(1).unwrap(),
                course: "Biology".into(),
            }),
        }
    }

    fn admin(username: &str) -> Account {
        Account {
            profile: RoleProfile::Admin,
            ..student(username, "unused")
        }
    }

    #[tokio::test]
    async fn test_username_unique_across_roles() {
        let store = MemoryAccountStore::default();
        store.insert(student("alice", "S1")).await.unwrap();

        let err = store.insert(admin("alice")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(ref m) if m == USERNAME_TAKEN));
    }

    #[tokio::test]
    async fn test_student_id_unique_independent_of_username() {
        let store = MemoryAccountStore::default();
        store.insert(student("alice", "S1")).await.unwrap();

        let err = store.insert(student("bob", "S1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(ref m) if m == STUDENT_ID_TAKEN));

        store.insert(student("carol", "S2")).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_filters_by_role() {
        let store = MemoryAccountStore::default();
        let first = store.insert(student("alice", "S1")).await.unwrap();
        let second = store.insert(admin("root")).await.unwrap();

        let all = store.list(None).await.unwrap();
        assert_eq!(
            all.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![second.id, first.id]
        );

        let students = store.list(Some(Role::Student)).await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id, first.id);
    }

    #[tokio::test]
    async fn test_account_delete() {
        let store = MemoryAccountStore::default();
        let account = store.insert(student("alice", "S1")).await.unwrap();

        assert!(store.delete(account.id).await.unwrap());
        assert!(!store.delete(account.id).await.unwrap());
        assert!(store.find_by_id(account.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_classroom_rename_conflict() {
        let store = MemoryClassroomStore::default();
        store.insert(Classroom::new("Room101".into(), 30)).await.unwrap();
        let mut other = store
            .insert(Classroom::new("Room102".into(), 30))
            .await
            .unwrap();

        other.name = "Room101".into();
        let err = store.update(&other).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(ref m) if m == CLASSROOM_NAME_TAKEN));

        other.capacity = 10;
        other.name = "Room102".into();
        assert!(store.update(&other).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_classroom() {
        let store = MemoryClassroomStore::default();
        let ghost = Classroom::new("Ghost".into(), 1);
        assert!(!store.update(&ghost).await.unwrap());
    }

    #[tokio::test]
    async fn test_detach_account_from_classrooms() {
        let store = MemoryClassroomStore::default();
        let account = AccountId::new();
        let mut classroom = Classroom::new("Room101".into(), 30);
        classroom.enroll(&[account]);
        classroom.add_subject(SubjectAssignment {
            subject: SubjectId::new(),
            faculty: account,
        });
        let classroom = store.insert(classroom).await.unwrap();

        store.detach_account(account).await.unwrap();

        let stored = store.find_by_id(classroom.id).await.unwrap().unwrap();
        assert!(stored.students.is_empty());
        assert!(stored.subjects.is_empty());
    }

    #[tokio::test]
    async fn test_update_details_keeps_concurrent_detach() {
        let store = MemoryClassroomStore::default();
        let student = AccountId::new();
        let mut classroom = Classroom::new("Room101".into(), 30);
        classroom.enroll(&[student]);
        let snapshot = store.insert(classroom).await.unwrap();

        store.detach_account(student).await.unwrap();
        assert!(
            store
                .update_details(snapshot.id, "Room 101", snapshot.capacity)
                .await
                .unwrap()
        );

        let stored = store.find_by_id(snapshot.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Room 101");
        assert!(stored.students.is_empty());
    }

    #[tokio::test]
    async fn test_update_details_refuses_capacity_below_enrollment() {
        let store = MemoryClassroomStore::default();
        let mut classroom = Classroom::new("Room101".into(), 30);
        classroom.enroll(&[AccountId::new(), AccountId::new()]);
        let classroom = store.insert(classroom).await.unwrap();

        assert!(!store.update_details(classroom.id, "Room101", 1).await.unwrap());
        assert!(store.update_details(classroom.id, "Room101", 2).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_ids_skips_unknown() {
        let store = MemoryAccountStore::default();
        let alice = store.insert(student("alice", "S1")).await.unwrap();

        let found = store.find_by_ids(&[alice.id, AccountId::new()]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, alice.id);
    }

    #[tokio::test]
    async fn test_subject_code_unique_and_detach_classroom() {
        let store = MemorySubjectStore::default();
        let mut subject = Subject::new("Calculus".into(), "MATH101".into());
        let classroom = ClassroomId::new();
        subject.assign(ClassroomAssignment {
            classroom,
            faculty: AccountId::new(),
        });
        let subject = store.insert(subject).await.unwrap();

        let err = store
            .insert(Subject::new("Other".into(), "MATH101".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(ref m) if m == SUBJECT_CODE_TAKEN));

        store.detach_classroom(classroom).await.unwrap();
        let stored = store.find_by_id(subject.id).await.unwrap().unwrap();
        assert!(stored.classrooms.is_empty());
    }
}
