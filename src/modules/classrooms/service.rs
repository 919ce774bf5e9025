use tracing::instrument;

use classdesk_core::AppError;
use classdesk_db::Stores;
use classdesk_models::views::unique_ids;
use classdesk_models::{AccountId, ClassroomId};

use super::model::{
    Classroom, ClassroomDetail, CreateClassroomDto, EnrollStudentsDto, MessageResponse,
    References, UpdateClassroomDto,
};

pub const CLASSROOM_NOT_FOUND: &str = "Classroom not found";
pub const CAPACITY_EXCEEDED: &str = "Classroom capacity exceeded";
pub const CAPACITY_BELOW_ENROLLMENT: &str =
    "Capacity cannot be less than the number of enrolled students";

fn clean_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Classroom name is required"));
    }
    Ok(name.to_string())
}

pub struct ClassroomService;

impl ClassroomService {
    #[instrument(skip(stores))]
    pub async fn create_classroom(
        stores: &Stores,
        dto: CreateClassroomDto,
    ) -> Result<Classroom, AppError> {
        let classroom = Classroom::new(clean_name(&dto.name)?, dto.capacity);
        let classroom = stores.classrooms.insert(classroom).await?;

        tracing::info!(classroom_id = %classroom.id, "classroom created");
        Ok(classroom)
    }

    #[instrument(skip(stores))]
    pub async fn get_classrooms(stores: &Stores) -> Result<Vec<ClassroomDetail>, AppError> {
        let classrooms = stores.classrooms.list().await?;
        Self::resolve(stores, classrooms).await
    }

    #[instrument(skip(stores))]
    pub async fn get_classroom(
        stores: &Stores,
        id: ClassroomId,
    ) -> Result<ClassroomDetail, AppError> {
        let classroom = Self::find_classroom(stores, id).await?;
        let mut details = Self::resolve(stores, vec![classroom]).await?;
        details
            .pop()
            .ok_or_else(|| AppError::not_found(CLASSROOM_NOT_FOUND))
    }

    /// Renames and resizes in place. Enrollment and subject pairs are never
    /// rewritten here, so concurrent cleanup is not undone.
    #[instrument(skip(stores))]
    pub async fn update_classroom(
        stores: &Stores,
        id: ClassroomId,
        dto: UpdateClassroomDto,
    ) -> Result<Classroom, AppError> {
        let current = Self::find_classroom(stores, id).await?;

        let name = match dto.name {
            Some(name) => clean_name(&name)?,
            None => current.name.clone(),
        };
        let capacity = dto.capacity.unwrap_or(current.capacity);

        if !current.fits_within(capacity) {
            return Err(AppError::validation(CAPACITY_BELOW_ENROLLMENT));
        }

        if !stores
            .classrooms
            .update_details(id, &name, capacity)
            .await?
        {
            // Deleted, or enrollment grew past `capacity` since the read.
            Self::find_classroom(stores, id).await?;
            return Err(AppError::validation(CAPACITY_BELOW_ENROLLMENT));
        }

        Self::find_classroom(stores, id).await
    }

    /// Deletes the classroom and drops its pairs from every subject.
    #[instrument(skip(stores))]
    pub async fn delete_classroom(
        stores: &Stores,
        id: ClassroomId,
    ) -> Result<MessageResponse, AppError> {
        if !stores.classrooms.delete(id).await? {
            return Err(AppError::not_found(CLASSROOM_NOT_FOUND));
        }

        stores.subjects.detach_classroom(id).await?;

        tracing::info!(classroom_id = %id, "classroom deleted");
        Ok(MessageResponse::new("Classroom deleted successfully"))
    }

    /// Adds students to the enrollment. Ids already enrolled, or repeated in
    /// the request, are counted once.
    #[instrument(skip(stores, dto), fields(count = dto.student_ids.len()))]
    pub async fn enroll_students(
        stores: &Stores,
        id: ClassroomId,
        dto: EnrollStudentsDto,
    ) -> Result<Classroom, AppError> {
        let mut classroom = Self::find_classroom(stores, id).await?;

        for student_id in &dto.student_ids {
            Self::ensure_student(stores, *student_id).await?;
        }

        if !classroom.has_room_for(classroom.enrollment_after(&dto.student_ids)) {
            return Err(AppError::validation(CAPACITY_EXCEEDED));
        }

        let added = classroom.enroll(&dto.student_ids);

        if !stores.classrooms.update(&classroom).await? {
            return Err(AppError::not_found(CLASSROOM_NOT_FOUND));
        }

        tracing::info!(classroom_id = %id, added, "students enrolled");
        Ok(classroom)
    }

    pub(crate) async fn find_classroom(
        stores: &Stores,
        id: ClassroomId,
    ) -> Result<Classroom, AppError> {
        stores
            .classrooms
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(CLASSROOM_NOT_FOUND))
    }

    /// Swaps the stored ids for summaries, in two batch lookups.
    async fn resolve(
        stores: &Stores,
        classrooms: Vec<Classroom>,
    ) -> Result<Vec<ClassroomDetail>, AppError> {
        let account_ids = unique_ids(classrooms.iter().flat_map(|c| {
            c.students
                .iter()
                .copied()
                .chain(c.subjects.iter().map(|pair| pair.faculty))
        }));
        let subject_ids = unique_ids(
            classrooms
                .iter()
                .flat_map(|c| c.subjects.iter().map(|pair| pair.subject)),
        );

        let references = References::default()
            .with_accounts(&stores.accounts.find_by_ids(&account_ids).await?)
            .with_subjects(&stores.subjects.find_by_ids(&subject_ids).await?);

        Ok(classrooms
            .into_iter()
            .map(|c| references.classroom(c))
            .collect())
    }

    async fn ensure_student(stores: &Stores, id: AccountId) -> Result<(), AppError> {
        let account = stores
            .accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Student {} not found", id)))?;

        if !account.is_student() {
            return Err(AppError::validation(format!(
                "Account {} is not a student",
                id
            )));
        }

        Ok(())
    }
}
