use crate::dtos::{
    catalog::SectionResponse,
    coursework::{AssignmentResponse, ExamResponse},
};
use chrono::{NaiveDate, NaiveTime};
use database::{
    entities::{assignments, exams},
    services::schedule::{ScheduledSection, StudentSchedule},
};
use models::{
    days::DayOfWeek,
    schedule::{ScheduleConflict, ScheduleSlot},
    semester::Semester,
};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScheduledClassResponse {
    pub section_id: Uuid,
    pub course_code: String,
    pub course_name: String,
    pub section_number: String,
    pub location: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<ScheduleSlot<ScheduledSection>> for ScheduledClassResponse {
    fn from(slot: ScheduleSlot<ScheduledSection>) -> Self {
        Self {
            section_id: slot.section.section_id,
            course_code: slot.section.course_code,
            course_name: slot.section.course_name,
            section_number: slot.section.section_number,
            location: slot.section.location,
            start_time: slot.start,
            end_time: slot.end,
        }
    }
}

/// Two classes that meet at the same time; shown, never enforced
#[derive(Debug, Serialize, ToSchema)]
pub struct ConflictResponse {
    pub day: DayOfWeek,
    pub first: ScheduledClassResponse,
    pub second: ScheduledClassResponse,
}

impl From<ScheduleConflict<ScheduledSection>> for ConflictResponse {
    fn from(conflict: ScheduleConflict<ScheduledSection>) -> Self {
        Self {
            day: conflict.day,
            first: conflict.first.into(),
            second: conflict.second.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrolledSectionResponse {
    pub enrollment_id: Uuid,
    pub date_enrolled: NaiveDate,
    pub section: SectionResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MyScheduleResponse {
    pub semester: String,
    /// Every day from `MON` to `SUN`, classes sorted by start time
    #[schema(value_type = Object)]
    pub week: BTreeMap<DayOfWeek, Vec<ScheduledClassResponse>>,
    pub conflicts: Vec<ConflictResponse>,
    pub enrollments: Vec<EnrolledSectionResponse>,
    pub upcoming_assignments: Vec<AssignmentResponse>,
    pub upcoming_exams: Vec<ExamResponse>,
}

impl MyScheduleResponse {
    pub fn new(
        semester: &Semester,
        schedule: StudentSchedule,
        upcoming_assignments: Vec<assignments::Model>,
        upcoming_exams: Vec<exams::Model>,
    ) -> Self {
        let conflicts = schedule
            .week
            .conflicts()
            .into_iter()
            .map(Into::into)
            .collect();

        let enrollments = schedule
            .enrollments
            .into_iter()
            .map(|enrolled| EnrolledSectionResponse {
                enrollment_id: enrolled.enrollment.id,
                date_enrolled: enrolled.enrollment.date_enrolled,
                section: SectionResponse::new(enrolled.section, Some(&enrolled.course), None),
            })
            .collect();

        let week = schedule
            .week
            .into_days()
            .into_iter()
            .map(|(day, slots)| (day, slots.into_iter().map(Into::into).collect()))
            .collect();

        Self {
            semester: semester.to_string(),
            week,
            conflicts,
            enrollments,
            upcoming_assignments: upcoming_assignments.into_iter().map(Into::into).collect(),
            upcoming_exams: upcoming_exams.into_iter().map(Into::into).collect(),
        }
    }
}
