//! The JSON document the importer loads reference data from.

use crate::{credit_hours::CreditHours, days::DayOfWeek, schedule::TimeRange, semester::Semester};
use chrono::{DateTime, NaiveTime, Utc};
use serde::Deserialize;

/// A whole catalog, one entry per department
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDocument {
    pub departments: Vec<DepartmentData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentData {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub faculty: Vec<FacultyData>,
    #[serde(default)]
    pub courses: Vec<CourseData>,
}

/// A faculty member and the user account behind them
#[derive(Debug, Clone, Deserialize)]
pub struct FacultyData {
    /// Subject claim the identity provider issues for this person
    pub subject: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Professor, Associate Professor, etc.
    pub title: String,
    #[serde(default)]
    pub office_location: String,
    #[serde(default)]
    pub office_hours: String,
    #[serde(default)]
    pub research_interests: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseData {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub credit_hours: CreditHours,
    #[serde(default)]
    pub sections: Vec<SectionData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionData {
    pub section_number: String,
    pub semester: Semester,
    /// Username of a faculty member, declared in any department of the document
    pub instructor: String,
    #[serde(default)]
    pub location: String,
    pub capacity: i32,
    #[serde(default)]
    pub schedules: Vec<ScheduleData>,
    #[serde(default)]
    pub assignments: Vec<AssignmentData>,
    #[serde(default)]
    pub exams: Vec<ExamData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleData {
    pub day: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentData {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub points_possible: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExamData {
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    pub duration_minutes: i32,
}

impl CatalogDocument {
    /// Checks the invariants the database would otherwise reject halfway through an import
    pub fn validate(&self) -> Result<(), String> {
        let usernames: Vec<&str> = self
            .departments
            .iter()
            .flat_map(|d| d.faculty.iter().map(|f| f.username.as_str()))
            .collect();

        for department in &self.departments {
            if department.code.trim().is_empty() {
                return Err(format!("department {:?} has an empty code", department.name));
            }

            for course in &department.courses {
                for section in &course.sections {
                    let label = format!("{} section {}", course.code, section.section_number);

                    if section.capacity < 0 {
                        return Err(format!("{label} has a negative capacity"));
                    }

                    if !usernames.contains(&section.instructor.as_str()) {
                        return Err(format!(
                            "{label} names unknown instructor {:?}",
                            section.instructor
                        ));
                    }

                    if let Some(slot) = section
                        .schedules
                        .iter()
                        .find(|s| TimeRange::new(s.start_time, s.end_time).is_none())
                    {
                        return Err(format!(
                            "{label} has a {} slot that ends before it starts",
                            slot.day
                        ));
                    }

                    if section.assignments.iter().any(|a| a.points_possible < 0)
                        || section.exams.iter().any(|e| e.duration_minutes < 0)
                    {
                        return Err(format!("{label} has negative points or duration"));
                    }
                }
            }
        }

        Ok(())
    }
}
