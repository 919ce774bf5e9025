//! Postgres backend.
//!
//! Accounts live in a single table with a `role` discriminator and nullable
//! role columns. Classroom and subject pairs are stored as JSONB arrays, and
//! enrolled student ids as a `uuid[]` column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use classdesk_models::accounts::{
    Account, FacultyProfile, Role, RoleProfile, StudentProfile, StudentYear,
};
use classdesk_models::classrooms::{Classroom, SubjectAssignment};
use classdesk_models::subjects::{ClassroomAssignment, Subject};
use classdesk_models::{AccountId, ClassroomId, SubjectId};

use crate::error::{
    CLASSROOM_NAME_TAKEN, FACULTY_ID_TAKEN, STUDENT_ID_TAKEN, SUBJECT_CODE_TAKEN, StoreError,
    StoreResult, USERNAME_TAKEN,
};
use crate::store::{AccountStore, ClassroomStore, SubjectStore};

/// Turns a unique violation into the matching client-facing duplicate error.
fn map_unique_violation(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        let message = match db_err.constraint() {
            Some("accounts_username_key") => USERNAME_TAKEN,
            Some("accounts_student_id_key") => STUDENT_ID_TAKEN,
            Some("accounts_faculty_id_key") => FACULTY_ID_TAKEN,
            Some("classrooms_name_key") => CLASSROOM_NAME_TAKEN,
            Some("subjects_code_key") => SUBJECT_CODE_TAKEN,
            _ => return StoreError::Database(err),
        };
        return StoreError::duplicate(message);
    }
    StoreError::Database(err)
}

const ACCOUNT_COLUMNS: &str = "id, role, first_name, last_name, middle_name, username, \
     password_hash, student_id, year, course, faculty_id, faculty, created_at";

#[derive(FromRow)]
struct AccountRow {
    id: AccountId,
    role: String,
    first_name: String,
    last_name: String,
    middle_name: Option<String>,
    username: String,
    password_hash: String,
    student_id: Option<String>,
    year: Option<i16>,
    course: Option<String>,
    faculty_id: Option<String>,
    faculty: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let corrupt = |what: &str| StoreError::Corrupt(format!("account {}: {}", row.id, what));

        let role: Role = row.role.parse().map_err(|_| corrupt("unknown role"))?;
        let profile = match role {
            Role::Student => RoleProfile::Student(StudentProfile {
                student_id: row.student_id.clone().ok_or_else(|| corrupt("student_id"))?,
                year: row
                    .year
                    .and_then(|y| u8::try_from(y).ok())
                    .and_then(|y| StudentYear::try_from(y).ok())
                    .ok_or_else(|| corrupt("year"))?,
                course: row.course.clone().ok_or_else(|| corrupt("course"))?,
            }),
            Role::Faculty => RoleProfile::Faculty(FacultyProfile {
                faculty_id: row.faculty_id.clone().ok_or_else(|| corrupt("faculty_id"))?,
                faculty: row.faculty.clone().ok_or_else(|| corrupt("faculty"))?,
            }),
            Role::Admin => RoleProfile::Admin,
        };

        Ok(Account {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            middle_name: row.middle_name,
            username: row.username,
            password_hash: row.password_hash,
            created_at: row.created_at,
            profile,
        })
    }
}

pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    #[instrument(skip(self, account), fields(username = %account.username))]
    async fn insert(&self, account: Account) -> StoreResult<Account> {
        let (student_id, year, course, faculty_id, faculty) = match &account.profile {
            RoleProfile::Student(p) => (
                Some(p.student_id.as_str()),
                Some(i16::from(p.year.get())),
                Some(p.course.as_str()),
                None,
                None,
            ),
            RoleProfile::Faculty(p) => (
                None,
                None,
                None,
                Some(p.faculty_id.as_str()),
                Some(p.faculty.as_str()),
            ),
            RoleProfile::Admin => (None, None, None, None, None),
        };

        sqlx::query(
            r#"
            INSERT INTO accounts (id, role, first_name, last_name, middle_name, username,
                password_hash, student_id, year, course, faculty_id, faculty, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(account.id)
        .bind(account.role().as_str())
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.middle_name)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(student_id)
        .bind(year)
        .bind(course)
        .bind(faculty_id)
        .bind(faculty)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(account)
    }

    async fn find_by_id(&self, id: AccountId) -> StoreResult<Option<Account>> {
        let sql = format!("SELECT {} FROM accounts WHERE id = $1", ACCOUNT_COLUMNS);
        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        let sql = format!("SELECT {} FROM accounts WHERE username = $1", ACCOUNT_COLUMNS);
        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[AccountId]) -> StoreResult<Vec<Account>> {
        let sql = format!("SELECT {} FROM accounts WHERE id = ANY($1)", ACCOUNT_COLUMNS);
        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }

    async fn list(&self, role: Option<Role>) -> StoreResult<Vec<Account>> {
        let sql = format!(
            "SELECT {} FROM accounts WHERE ($1::text IS NULL OR role = $1) ORDER BY created_at DESC",
            ACCOUNT_COLUMNS
        );
        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(role.map(|r| r.as_str()))
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }

    async fn delete(&self, id: AccountId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(FromRow)]
struct ClassroomRow {
    id: ClassroomId,
    name: String,
    capacity: i32,
    student_ids: Vec<AccountId>,
    subjects: Json<Vec<SubjectAssignment>>,
    created_at: DateTime<Utc>,
}

impl From<ClassroomRow> for Classroom {
    fn from(row: ClassroomRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            capacity: row.capacity,
            students: row.student_ids,
            subjects: row.subjects.0,
            created_at: row.created_at,
        }
    }
}

pub struct PgClassroomStore {
    pool: PgPool,
}

impl PgClassroomStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassroomStore for PgClassroomStore {
    #[instrument(skip(self, classroom), fields(name = %classroom.name))]
    async fn insert(&self, classroom: Classroom) -> StoreResult<Classroom> {
        sqlx::query(
            r#"
            INSERT INTO classrooms (id, name, capacity, student_ids, subjects, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(classroom.id)
        .bind(&classroom.name)
        .bind(classroom.capacity)
        .bind(&classroom.students)
        .bind(Json(&classroom.subjects))
        .bind(classroom.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(classroom)
    }

    async fn find_by_id(&self, id: ClassroomId) -> StoreResult<Option<Classroom>> {
        let row = sqlx::query_as::<_, ClassroomRow>(
            "SELECT id, name, capacity, student_ids, subjects, created_at FROM classrooms WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Classroom::from))
    }

    async fn find_by_ids(&self, ids: &[ClassroomId]) -> StoreResult<Vec<Classroom>> {
        let rows = sqlx::query_as::<_, ClassroomRow>(
            "SELECT id, name, capacity, student_ids, subjects, created_at FROM classrooms WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Classroom::from).collect())
    }

    async fn list(&self) -> StoreResult<Vec<Classroom>> {
        let rows = sqlx::query_as::<_, ClassroomRow>(
            "SELECT id, name, capacity, student_ids, subjects, created_at FROM classrooms ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Classroom::from).collect())
    }

    #[instrument(skip(self, classroom), fields(id = %classroom.id))]
    async fn update(&self, classroom: &Classroom) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE classrooms
            SET name = $2, capacity = $3, student_ids = $4, subjects = $5
            WHERE id = $1
            "#,
        )
        .bind(classroom.id)
        .bind(&classroom.name)
        .bind(classroom.capacity)
        .bind(&classroom.students)
        .bind(Json(&classroom.subjects))
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn update_details(
        &self,
        id: ClassroomId,
        name: &str,
        capacity: i32,
    ) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE classrooms
            SET name = $2, capacity = $3
            WHERE id = $1 AND cardinality(student_ids) <= $3
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(capacity)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ClassroomId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM classrooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn detach_subject(&self, subject: SubjectId) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE classrooms
            SET subjects = COALESCE(
                (SELECT jsonb_agg(pair) FROM jsonb_array_elements(subjects) pair
                 WHERE pair->>'subject' <> $1::text),
                '[]'::jsonb)
            WHERE subjects @> jsonb_build_array(jsonb_build_object('subject', $1::text))
            "#,
        )
        .bind(subject)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn detach_account(&self, account: AccountId) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE classrooms
            SET student_ids = array_remove(student_ids, $1),
                subjects = COALESCE(
                    (SELECT jsonb_agg(pair) FROM jsonb_array_elements(subjects) pair
                     WHERE pair->>'faculty' <> $1::text),
                    '[]'::jsonb)
            WHERE $1 = ANY(student_ids)
               OR subjects @> jsonb_build_array(jsonb_build_object('faculty', $1::text))
            "#,
        )
        .bind(account)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[derive(FromRow)]
struct SubjectRow {
    id: SubjectId,
    name: String,
    code: String,
    classrooms: Json<Vec<ClassroomAssignment>>,
    created_at: DateTime<Utc>,
}

impl From<SubjectRow> for Subject {
    fn from(row: SubjectRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            code: row.code,
            classrooms: row.classrooms.0,
            created_at: row.created_at,
        }
    }
}

pub struct PgSubjectStore {
    pool: PgPool,
}

impl PgSubjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn strip_pairs(&self, key: &str, id: uuid::Uuid) -> StoreResult<()> {
        let sql = format!(
            r#"
            UPDATE subjects
            SET classrooms = COALESCE(
                (SELECT jsonb_agg(pair) FROM jsonb_array_elements(classrooms) pair
                 WHERE pair->>'{key}' <> $1::text),
                '[]'::jsonb)
            WHERE classrooms @> jsonb_build_array(jsonb_build_object('{key}', $1::text))
            "#
        );
        sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl SubjectStore for PgSubjectStore {
    #[instrument(skip(self, subject), fields(code = %subject.code))]
    async fn insert(&self, subject: Subject) -> StoreResult<Subject> {
        sqlx::query(
            r#"
            INSERT INTO subjects (id, name, code, classrooms, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(subject.id)
        .bind(&subject.name)
        .bind(&subject.code)
        .bind(Json(&subject.classrooms))
        .bind(subject.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(subject)
    }

    async fn find_by_id(&self, id: SubjectId) -> StoreResult<Option<Subject>> {
        let row = sqlx::query_as::<_, SubjectRow>(
            "SELECT id, name, code, classrooms, created_at FROM subjects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Subject::from))
    }

    async fn find_by_ids(&self, ids: &[SubjectId]) -> StoreResult<Vec<Subject>> {
        let rows = sqlx::query_as::<_, SubjectRow>(
            "SELECT id, name, code, classrooms, created_at FROM subjects WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Subject::from).collect())
    }

    async fn list(&self) -> StoreResult<Vec<Subject>> {
        let rows = sqlx::query_as::<_, SubjectRow>(
            "SELECT id, name, code, classrooms, created_at FROM subjects ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Subject::from).collect())
    }

    #[instrument(skip(self, subject), fields(id = %subject.id))]
    async fn update(&self, subject: &Subject) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE subjects SET name = $2, code = $3, classrooms = $4 WHERE id = $1",
        )
        .bind(subject.id)
        .bind(&subject.name)
        .bind(&subject.code)
        .bind(Json(&subject.classrooms))
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn update_details(&self, id: SubjectId, name: &str, code: &str) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE subjects SET name = $2, code = $3 WHERE id = $1")
            .bind(id)
            .bind(name)
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(map_unique_violation)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: SubjectId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn detach_classroom(&self, classroom: ClassroomId) -> StoreResult<()> {
        self.strip_pairs("classroom", classroom.into_inner()).await
    }

    async fn detach_faculty(&self, faculty: AccountId) -> StoreResult<()> {
        self.strip_pairs("faculty", faculty.into_inner()).await
    }
}
