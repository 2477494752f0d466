use crate::entities::{class_schedules, class_sections, courses, enrollments};
use models::{
    schedule::{ScheduleSlot, WeeklySchedule},
    semester::Semester,
};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// What a schedule slot says about the section meeting in it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledSection {
    pub section_id: Uuid,
    pub course_code: String,
    pub course_name: String,
    pub section_number: String,
    pub location: String,
}

/// A section the student is enrolled in this semester
#[derive(Debug, Clone)]
pub struct EnrolledSection {
    pub enrollment: enrollments::Model,
    pub section: class_sections::Model,
    pub course: courses::Model,
}

/// A student's enrollments for one semester and the week they add up to
#[derive(Debug, Clone)]
pub struct StudentSchedule {
    pub enrollments: Vec<EnrolledSection>,
    pub week: WeeklySchedule<ScheduledSection>,
}

impl StudentSchedule {
    pub fn section_ids(&self) -> Vec<Uuid> {
        self.enrollments.iter().map(|e| e.section.id).collect()
    }
}

pub struct ScheduleService;

impl ScheduleService {
    /// Builds the weekly timetable for a student's enrollments in `semester`
    pub async fn weekly_schedule(
        db: &DatabaseConnection,
        student_id: Uuid,
        semester: &Semester,
    ) -> Result<StudentSchedule, DbErr> {
        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .find_also_related(class_sections::Entity)
            .filter(class_sections::Column::Semester.eq(semester.as_str()))
            .order_by_asc(enrollments::Column::DateEnrolled)
            .all(db)
            .await?;

        let rows: Vec<(enrollments::Model, class_sections::Model)> = rows
            .into_iter()
            .filter_map(|(enrollment, section)| section.map(|s| (enrollment, s)))
            .collect();

        if rows.is_empty() {
            return Ok(StudentSchedule {
                enrollments: vec![],
                week: WeeklySchedule::new(),
            });
        }

        let course_ids: Vec<Uuid> = rows.iter().map(|(_, s)| s.course_id).collect();
        let section_ids: Vec<Uuid> = rows.iter().map(|(_, s)| s.id).collect();

        // Batch fetch the courses and meeting slots for all sections
        let courses_by_id: HashMap<Uuid, courses::Model> = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|course| (course.id, course))
            .collect();

        let slots = class_schedules::Entity::find()
            .filter(class_schedules::Column::SectionId.is_in(section_ids))
            .all(db)
            .await?;

        let mut enrolled = Vec::with_capacity(rows.len());
        let mut sections_by_id: HashMap<Uuid, ScheduledSection> = HashMap::new();

        for (enrollment, section) in rows {
            let Some(course) = courses_by_id.get(&section.course_id).cloned() else {
                continue;
            };

            sections_by_id.insert(
                section.id,
                ScheduledSection {
                    section_id: section.id,
                    course_code: course.code.clone(),
                    course_name: course.name.clone(),
                    section_number: section.section_number.clone(),
                    location: section.location.clone(),
                },
            );

            enrolled.push(EnrolledSection {
                enrollment,
                section,
                course,
            });
        }

        let week = WeeklySchedule::from_slots(slots.into_iter().filter_map(|slot| {
            let section = sections_by_id.get(&slot.section_id)?.clone();
            Some((
                slot.day,
                ScheduleSlot {
                    section,
                    start: slot.start_time,
                    end: slot.end_time,
                },
            ))
        }));

        Ok(StudentSchedule {
            enrollments: enrolled,
            week,
        })
    }
}
