use chrono::{DateTime, Utc};
use database::entities::{assignments, exams};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub section_id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub points_possible: i32,
}

impl From<assignments::Model> for AssignmentResponse {
    fn from(assignment: assignments::Model) -> Self {
        Self {
            id: assignment.id,
            section_id: assignment.section_id,
            title: assignment.title,
            description: assignment.description,
            due_date: assignment.due_date,
            points_possible: assignment.points_possible,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExamResponse {
    pub id: Uuid,
    pub section_id: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub duration_minutes: i32,
}

impl From<exams::Model> for ExamResponse {
    fn from(exam: exams::Model) -> Self {
        Self {
            id: exam.id,
            section_id: exam.section_id,
            title: exam.title,
            date: exam.date,
            location: exam.location,
            duration_minutes: exam.duration_minutes,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StatusQueryParams {
    /// `upcoming`, `past`, or anything else for all
    pub status: Option<String>,
}
