use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One offered instance of a course in a semester.
///
/// `enrolled` is only changed by the enrollment service and always stays
/// within `0..=capacity`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "class_sections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub course_id: Uuid,
    pub section_number: String,
    pub semester: String, // e.g. "Spring 2025"
    pub instructor_id: Uuid,
    pub location: String,
    pub capacity: i32,
    pub enrolled: i32,
}

impl Model {
    pub fn seats_left(&self) -> i32 {
        (self.capacity - self.enrolled).max(0)
    }

    pub fn is_full(&self) -> bool {
        self.enrolled >= self.capacity
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::faculty::Entity",
        from = "Column::InstructorId",
        to = "super::faculty::Column::Id"
    )]
    Instructor,
    #[sea_orm(has_many = "super::class_schedules::Entity")]
    Schedules,
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::assignments::Entity")]
    Assignments,
    #[sea_orm(has_many = "super::exams::Entity")]
    Exams,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::faculty::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl Related<super::class_schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exams.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
