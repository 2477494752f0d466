use crate::entities::{assignments, enrollments, exams};
use chrono::{DateTime, Utc};
use models::coursework::DeadlineStatus;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

pub struct CourseworkService;

impl CourseworkService {
    /// Ids of every section the student is enrolled in, across all semesters
    pub async fn enrolled_section_ids(
        db: &DatabaseConnection,
        student_id: Uuid,
    ) -> Result<Vec<Uuid>, DbErr> {
        enrollments::Entity::find()
            .select_only()
            .column(enrollments::Column::SectionId)
            .filter(enrollments::Column::StudentId.eq(student_id))
            .into_tuple::<Uuid>()
            .all(db)
            .await
    }

    /// Assignments in `section_ids` due at or after `now`, soonest first, at most `limit`
    pub async fn upcoming_assignments(
        db: &DatabaseConnection,
        section_ids: &[Uuid],
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<assignments::Model>, DbErr> {
        if section_ids.is_empty() || limit == 0 {
            return Ok(vec![]);
        }

        assignments::Entity::find()
            .filter(assignments::Column::SectionId.is_in(section_ids.to_vec()))
            .filter(assignments::Column::DueDate.gte(now))
            .order_by_asc(assignments::Column::DueDate)
            .limit(limit)
            .all(db)
            .await
    }

    /// Exams in `section_ids` held at or after `now`, soonest first, at most `limit`
    pub async fn upcoming_exams(
        db: &DatabaseConnection,
        section_ids: &[Uuid],
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<exams::Model>, DbErr> {
        if section_ids.is_empty() || limit == 0 {
            return Ok(vec![]);
        }

        exams::Entity::find()
            .filter(exams::Column::SectionId.is_in(section_ids.to_vec()))
            .filter(exams::Column::Date.gte(now))
            .order_by_asc(exams::Column::Date)
            .limit(limit)
            .all(db)
            .await
    }

    /// All assignments for the student's sections, filtered by `status` relative to `now`
    pub async fn list_assignments(
        db: &DatabaseConnection,
        student_id: Uuid,
        status: DeadlineStatus,
        now: DateTime<Utc>,
    ) -> Result<Vec<assignments::Model>, DbErr> {
        let section_ids = Self::enrolled_section_ids(db, student_id).await?;
        if section_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut query =
            assignments::Entity::find().filter(assignments::Column::SectionId.is_in(section_ids));

        query = match status {
            DeadlineStatus::Upcoming => query.filter(assignments::Column::DueDate.gte(now)),
            DeadlineStatus::Past => query.filter(assignments::Column::DueDate.lt(now)),
            DeadlineStatus::All => query,
        };

        query
            .order_by_asc(assignments::Column::DueDate)
            .all(db)
            .await
    }

    /// All exams for the student's sections, filtered by `status` relative to `now`
    pub async fn list_exams(
        db: &DatabaseConnection,
        student_id: Uuid,
        status: DeadlineStatus,
        now: DateTime<Utc>,
    ) -> Result<Vec<exams::Model>, DbErr> {
        let section_ids = Self::enrolled_section_ids(db, student_id).await?;
        if section_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut query = exams::Entity::find().filter(exams::Column::SectionId.is_in(section_ids));

        query = match status {
            DeadlineStatus::Upcoming => query.filter(exams::Column::Date.gte(now)),
            DeadlineStatus::Past => query.filter(exams::Column::Date.lt(now)),
            DeadlineStatus::All => query,
        };

        query.order_by_asc(exams::Column::Date).all(db).await
    }
}
