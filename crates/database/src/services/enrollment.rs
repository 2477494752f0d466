use crate::{
    entities::{class_sections, courses, enrollments},
    error::ServiceError,
};
use chrono::NaiveDate;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, SqlErr, TransactionTrait, prelude::Expr,
};
use uuid::Uuid;

/// A successful enrollment, with the section as it stands afterwards
#[derive(Debug, Clone)]
pub struct Enrolled {
    pub enrollment: enrollments::Model,
    pub section: class_sections::Model,
    pub course: courses::Model,
}

/// A successful drop, with the section as it stands afterwards
#[derive(Debug, Clone)]
pub struct Dropped {
    pub section: class_sections::Model,
    pub course: courses::Model,
}

pub struct EnrollmentService;

impl EnrollmentService {
    /// Registers a student in a section.
    ///
    /// Fails with [`ServiceError::AlreadyEnrolled`] when the student already
    /// holds a seat and [`ServiceError::SectionFull`] when no seat is left.
    /// The seat is claimed with a single guarded `UPDATE` inside the same
    /// transaction as the enrollment insert, so concurrent requests serialize
    /// on the section row and `enrolled` never passes `capacity`.
    pub async fn enroll(
        db: &DatabaseConnection,
        student_id: Uuid,
        section_id: Uuid,
        today: NaiveDate,
    ) -> Result<Enrolled, ServiceError> {
        let txn = db.begin().await?;

        // The claim must be the first statement so the section is write-locked
        // before anything in this transaction is read
        let claimed = class_sections::Entity::update_many()
            .col_expr(
                class_sections::Column::Enrolled,
                Expr::col(class_sections::Column::Enrolled).add(1),
            )
            .filter(class_sections::Column::Id.eq(section_id))
            .filter(
                Expr::col(class_sections::Column::Enrolled)
                    .lt(Expr::col(class_sections::Column::Capacity)),
            )
            .exec(&txn)
            .await?;

        if claimed.rows_affected == 0 {
            let err = Self::unclaimed_reason(&txn, student_id, section_id).await;
            txn.rollback().await?;

            debug!("Student {student_id} not enrolled in {section_id}: {err}");
            return Err(err);
        }

        let inserted = enrollments::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(student_id),
            section_id: Set(section_id),
            date_enrolled: Set(today),
        }
        .insert(&txn)
        .await;

        // A duplicate trips the unique index; rolling back returns the seat
        let enrollment = match inserted {
            Ok(enrollment) => enrollment,
            Err(err) => {
                txn.rollback().await?;

                return Err(match err.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::AlreadyEnrolled,
                    _ => ServiceError::Database(err),
                });
            }
        };

        let (section, course) = Self::find_section(&txn, section_id).await?;
        txn.commit().await?;

        info!(
            "Student {student_id} enrolled in {} {} ({}/{})",
            course.code, section.section_number, section.enrolled, section.capacity
        );

        Ok(Enrolled {
            enrollment,
            section,
            course,
        })
    }

    /// Removes a student from a section, fails with [`ServiceError::NotEnrolled`]
    /// when there is nothing to drop. The counter never goes below zero.
    pub async fn drop(
        db: &DatabaseConnection,
        student_id: Uuid,
        section_id: Uuid,
    ) -> Result<Dropped, ServiceError> {
        let txn = db.begin().await?;

        let deleted = enrollments::Entity::delete_many()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::SectionId.eq(section_id))
            .exec(&txn)
            .await?;

        if deleted.rows_affected == 0 {
            let err = match Self::find_section(&txn, section_id).await {
                Ok(_) => ServiceError::NotEnrolled,
                Err(err) => err,
            };
            txn.rollback().await?;

            return Err(err);
        }

        class_sections::Entity::update_many()
            .col_expr(
                class_sections::Column::Enrolled,
                Expr::col(class_sections::Column::Enrolled).sub(1),
            )
            .filter(class_sections::Column::Id.eq(section_id))
            .filter(class_sections::Column::Enrolled.gt(0))
            .exec(&txn)
            .await?;

        let (section, course) = Self::find_section(&txn, section_id).await?;
        txn.commit().await?;

        info!(
            "Student {student_id} dropped {} {} ({}/{})",
            course.code, section.section_number, section.enrolled, section.capacity
        );

        Ok(Dropped { section, course })
    }

    /// Whether the student holds a seat in the section
    pub async fn is_enrolled(
        db: &DatabaseConnection,
        student_id: Uuid,
        section_id: Uuid,
    ) -> Result<bool, ServiceError> {
        let enrollment = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::SectionId.eq(section_id))
            .one(db)
            .await?;

        Ok(enrollment.is_some())
    }

    async fn find_section(
        txn: &DatabaseTransaction,
        section_id: Uuid,
    ) -> Result<(class_sections::Model, courses::Model), ServiceError> {
        let (section, course) = class_sections::Entity::find_by_id(section_id)
            .find_also_related(courses::Entity)
            .one(txn)
            .await?
            .ok_or(ServiceError::NotFound("Class section"))?;

        let course = course.ok_or(ServiceError::NotFound("Course"))?;
        Ok((section, course))
    }

    /// Why the guarded claim matched no row
    async fn unclaimed_reason(
        txn: &DatabaseTransaction,
        student_id: Uuid,
        section_id: Uuid,
    ) -> ServiceError {
        if let Err(err) = Self::find_section(txn, section_id).await {
            return err;
        }

        let existing = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::SectionId.eq(section_id))
            .one(txn)
            .await;

        match existing {
            Ok(Some(_)) => ServiceError::AlreadyEnrolled,
            Ok(None) => ServiceError::SectionFull,
            Err(err) => ServiceError::Database(err),
        }
    }
}
