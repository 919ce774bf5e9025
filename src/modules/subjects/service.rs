use tracing::instrument;

use classdesk_core::AppError;
use classdesk_db::Stores;
use classdesk_models::SubjectId;
use classdesk_models::classrooms::SubjectAssignment;
use classdesk_models::views::unique_ids;

use super::model::{
    AssignFacultyDto, ClassroomAssignment, CreateSubjectDto, MessageResponse, References,
    Subject, SubjectDetail, UpdateSubjectDto,
};
use crate::modules::classrooms::service::{CLASSROOM_NOT_FOUND, ClassroomService};

pub const SUBJECT_NOT_FOUND: &str = "Subject not found";
pub const ASSIGNMENT_EXISTS: &str = "Assignment already exists";

fn required(value: &str, message: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(value.to_string())
}

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(stores))]
    pub async fn create_subject(
        stores: &Stores,
        dto: CreateSubjectDto,
    ) -> Result<Subject, AppError> {
        let subject = Subject::new(
            required(&dto.name, "Subject name is required")?,
            required(&dto.code, "Subject code is required")?,
        );
        let subject = stores.subjects.insert(subject).await?;

        tracing::info!(subject_id = %subject.id, code = %subject.code, "subject created");
        Ok(subject)
    }

    #[instrument(skip(stores))]
    pub async fn get_subjects(stores: &Stores) -> Result<Vec<SubjectDetail>, AppError> {
        let subjects = stores.subjects.list().await?;
        Self::resolve(stores, subjects).await
    }

    #[instrument(skip(stores))]
    pub async fn get_subject(stores: &Stores, id: SubjectId) -> Result<SubjectDetail, AppError> {
        let subject = Self::find_subject(stores, id).await?;
        let mut details = Self::resolve(stores, vec![subject]).await?;
        details
            .pop()
            .ok_or_else(|| AppError::not_found(SUBJECT_NOT_FOUND))
    }

    /// Renames or recodes in place, leaving the classroom pairs untouched.
    #[instrument(skip(stores))]
    pub async fn update_subject(
        stores: &Stores,
        id: SubjectId,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        let current = Self::find_subject(stores, id).await?;

        let name = match dto.name {
            Some(name) => required(&name, "Subject name is required")?,
            None => current.name,
        };
        let code = match dto.code {
            Some(code) => required(&code, "Subject code is required")?,
            None => current.code,
        };

        if !stores.subjects.update_details(id, &name, &code).await? {
            return Err(AppError::not_found(SUBJECT_NOT_FOUND));
        }

        Self::find_subject(stores, id).await
    }

    /// Deletes the subject and drops its pairs from every classroom.
    #[instrument(skip(stores))]
    pub async fn delete_subject(
        stores: &Stores,
        id: SubjectId,
    ) -> Result<MessageResponse, AppError> {
        if !stores.subjects.delete(id).await? {
            return Err(AppError::not_found(SUBJECT_NOT_FOUND));
        }

        stores.classrooms.detach_subject(id).await?;

        tracing::info!(subject_id = %id, "subject deleted");
        Ok(MessageResponse::new("Subject deleted successfully"))
    }

    /// Records that `faculty_id` teaches the subject in `classroom_id`, on
    /// both the subject and the classroom.
    #[instrument(skip(stores))]
    pub async fn assign_faculty(
        stores: &Stores,
        id: SubjectId,
        dto: AssignFacultyDto,
    ) -> Result<Subject, AppError> {
        let mut subject = Self::find_subject(stores, id).await?;
        let mut classroom = ClassroomService::find_classroom(stores, dto.classroom_id).await?;

        let faculty = stores
            .accounts
            .find_by_id(dto.faculty_id)
            .await?
            .ok_or_else(|| AppError::not_found("Faculty not found"))?;

        if !faculty.is_faculty() {
            return Err(AppError::validation("Account is not a faculty member"));
        }

        let assigned = subject.assign(ClassroomAssignment {
            classroom: classroom.id,
            faculty: faculty.id,
        });
        if !assigned {
            return Err(AppError::validation(ASSIGNMENT_EXISTS));
        }

        if !stores.subjects.update(&subject).await? {
            return Err(AppError::not_found(SUBJECT_NOT_FOUND));
        }

        classroom.add_subject(SubjectAssignment {
            subject: subject.id,
            faculty: faculty.id,
        });
        if !stores.classrooms.update(&classroom).await? {
            return Err(AppError::not_found(CLASSROOM_NOT_FOUND));
        }

        tracing::info!(
            subject_id = %subject.id,
            classroom_id = %classroom.id,
            faculty_id = %faculty.id,
            "faculty assigned"
        );
        Ok(subject)
    }

    async fn find_subject(stores: &Stores, id: SubjectId) -> Result<Subject, AppError> {
        stores
            .subjects
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(SUBJECT_NOT_FOUND))
    }

    async fn resolve(
        stores: &Stores,
        subjects: Vec<Subject>,
    ) -> Result<Vec<SubjectDetail>, AppError> {
        let account_ids = unique_ids(
            subjects
                .iter()
                .flat_map(|s| s.classrooms.iter().map(|pair| pair.faculty)),
        );
        let classroom_ids = unique_ids(
            subjects
                .iter()
                .flat_map(|s| s.classrooms.iter().map(|pair| pair.classroom)),
        );

        let references = References::default()
            .with_accounts(&stores.accounts.find_by_ids(&account_ids).await?)
            .with_classrooms(&stores.classrooms.find_by_ids(&classroom_ids).await?);

        Ok(subjects.into_iter().map(|s| references.subject(s)).collect())
    }
}
