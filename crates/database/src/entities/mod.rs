pub mod assignments;
pub mod class_schedules;
pub mod class_sections;
pub mod courses;
pub mod departments;
pub mod enrollments;
pub mod exams;
pub mod faculty;
pub mod users;
