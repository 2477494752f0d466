use crate::dtos::coursework::{AssignmentResponse, ExamResponse};
use chrono::NaiveTime;
use database::{
    entities::{class_schedules, class_sections, courses, departments},
    services::catalog::{
        CourseDetail, DepartmentDetail, FacultyDetail, FacultyMember, SectionDetail,
    },
};
use models::days::DayOfWeek;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentResponse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: String,
}

impl From<departments::Model> for DepartmentResponse {
    fn from(department: departments::Model) -> Self {
        Self {
            id: department.id,
            code: department.code,
            name: department.name,
            description: department.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentDetailResponse {
    pub department: DepartmentResponse,
    pub faculty: Vec<FacultyResponse>,
    pub courses: Vec<CourseResponse>,
}

impl From<DepartmentDetail> for DepartmentDetailResponse {
    fn from(detail: DepartmentDetail) -> Self {
        Self {
            department: detail.department.into(),
            faculty: detail.faculty.into_iter().map(Into::into).collect(),
            courses: detail.courses.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FacultyResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub department_id: Uuid,
    pub name: String,
    pub email: String,
    /// Professor, Associate Professor, etc.
    pub title: String,
    pub office_location: String,
}

impl From<FacultyMember> for FacultyResponse {
    fn from((member, user): FacultyMember) -> Self {
        Self {
            id: member.id,
            user_id: user.id,
            department_id: member.department_id,
            name: user.full_name(),
            email: user.email,
            title: member.title,
            office_location: member.office_location,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FacultyDetailResponse {
    #[serde(flatten)]
    pub faculty: FacultyResponse,
    pub office_hours: String,
    pub research_interests: String,
    pub department: Option<DepartmentResponse>,
    /// Sections taught this semester
    pub classes: Vec<SectionResponse>,
}

impl From<FacultyDetail> for FacultyDetailResponse {
    fn from(detail: FacultyDetail) -> Self {
        let office_hours = detail.faculty.office_hours.clone();
        let research_interests = detail.faculty.research_interests.clone();
        let instructor = detail.user.full_name();

        Self {
            faculty: (detail.faculty, detail.user).into(),
            office_hours,
            research_interests,
            department: detail.department.map(Into::into),
            classes: detail
                .classes
                .into_iter()
                .map(|(section, course)| {
                    SectionResponse::new(section, Some(&course), Some(instructor.clone()))
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub department_id: Uuid,
    pub description: String,
    pub credit_hours: String,
}

impl From<courses::Model> for CourseResponse {
    fn from(course: courses::Model) -> Self {
        Self {
            id: course.id,
            code: course.code,
            name: course.name,
            department_id: course.department_id,
            description: course.description,
            credit_hours: course.credit_hours,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub department: Option<DepartmentResponse>,
    /// Sections offered this semester
    pub sections: Vec<SectionResponse>,
}

impl From<CourseDetail> for CourseDetailResponse {
    fn from(detail: CourseDetail) -> Self {
        let sections = detail
            .sections
            .into_iter()
            .map(|(section, instructor)| {
                SectionResponse::new(section, Some(&detail.course), instructor)
            })
            .collect();

        Self {
            course: detail.course.into(),
            department: detail.department.map(Into::into),
            sections,
        }
    }
}

/// A class section with its seat counts
#[derive(Debug, Serialize, ToSchema)]
pub struct SectionResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub course_code: Option<String>,
    pub course_name: Option<String>,
    pub section_number: String,
    pub semester: String,
    pub location: String,
    pub instructor: Option<String>,
    pub capacity: i32,
    pub enrolled: i32,
    pub seats_left: i32,
    pub is_full: bool,
}

impl SectionResponse {
    pub fn new(
        section: class_sections::Model,
        course: Option<&courses::Model>,
        instructor: Option<String>,
    ) -> Self {
        Self {
            seats_left: section.seats_left(),
            is_full: section.is_full(),
            id: section.id,
            course_id: section.course_id,
            course_code: course.map(|c| c.code.clone()),
            course_name: course.map(|c| c.name.clone()),
            section_number: section.section_number,
            semester: section.semester,
            location: section.location,
            instructor,
            capacity: section.capacity,
            enrolled: section.enrolled,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleSlotResponse {
    pub day: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<class_schedules::Model> for ScheduleSlotResponse {
    fn from(slot: class_schedules::Model) -> Self {
        Self {
            day: slot.day,
            start_time: slot.start_time,
            end_time: slot.end_time,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SectionDetailResponse {
    #[serde(flatten)]
    pub section: SectionResponse,
    pub course: CourseResponse,
    pub instructor_details: Option<FacultyResponse>,
    pub schedules: Vec<ScheduleSlotResponse>,
    pub assignments: Vec<AssignmentResponse>,
    pub exams: Vec<ExamResponse>,
}

impl From<SectionDetail> for SectionDetailResponse {
    fn from(detail: SectionDetail) -> Self {
        let instructor_name = detail.instructor.as_ref().map(|(_, user)| user.full_name());

        Self {
            section: SectionResponse::new(detail.section, Some(&detail.course), instructor_name),
            course: detail.course.into(),
            instructor_details: detail.instructor.map(Into::into),
            schedules: detail.schedules.into_iter().map(Into::into).collect(),
            assignments: detail.assignments.into_iter().map(Into::into).collect(),
            exams: detail.exams.into_iter().map(Into::into).collect(),
        }
    }
}

/// Filters shared by the faculty and course listings
#[derive(Debug, Deserialize, IntoParams)]
pub struct CatalogQueryParams {
    /// Only entries in this department
    pub department: Option<Uuid>,
    /// Case-insensitive substring
    pub search: Option<String>,
}
