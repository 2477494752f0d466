//! Fixtures shared by the database integration tests
#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use database::{
    db::create_connection,
    entities::{
        assignments, class_schedules, class_sections, courses, departments, exams, faculty, users,
    },
};
use migration::{Migrator, MigratorTrait};
use models::{days::DayOfWeek, role::Role};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tempfile::TempDir;
use uuid::Uuid;

pub const SEMESTER: &str = "Spring 2025";

/// Fresh in-memory database with every migration applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = create_connection("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// File-backed database with a full connection pool, for tests where
/// transactions must actually interleave. Keep the `TempDir` alive for the
/// duration of the test.
pub async fn setup_pooled_test_db() -> (TempDir, DatabaseConnection) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("campus.db");
    let url = format!("sqlite://{}?mode=rwc", path.display());

    let db = create_connection(&url)
        .await
        .expect("Failed to connect to file database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    (dir, db)
}

/// Fixed "now" so deadline tests do not depend on the wall clock
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

pub fn today() -> NaiveDate {
    now().date_naive()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub async fn insert_user(db: &DatabaseConnection, username: &str, role: Role) -> users::Model {
    users::ActiveModel {
        id: Set(Uuid::new_v4()),
        subject: Set(format!("sub-{username}")),
        username: Set(username.to_string()),
        first_name: Set(username.to_string()),
        last_name: Set("Tester".to_string()),
        email: Set(format!("{username}@campus.edu")),
        role: Set(role),
        is_active: Set(true),
        created_at: Set(now()),
    }
    .insert(db)
    .await
    .expect("Failed to insert user")
}

pub async fn insert_department(db: &DatabaseConnection, code: &str) -> departments::Model {
    departments::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("Department of {code}")),
        code: Set(code.to_string()),
        description: Set(String::new()),
    }
    .insert(db)
    .await
    .expect("Failed to insert department")
}

pub async fn insert_faculty(
    db: &DatabaseConnection,
    user: &users::Model,
    department: &departments::Model,
    title: &str,
) -> faculty::Model {
    faculty::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        department_id: Set(department.id),
        title: Set(title.to_string()),
        office_location: Set("Hall 101".to_string()),
        office_hours: Set("Mon 10-11".to_string()),
        research_interests: Set(String::new()),
    }
    .insert(db)
    .await
    .expect("Failed to insert faculty")
}

pub async fn insert_course(
    db: &DatabaseConnection,
    department: &departments::Model,
    code: &str,
    name: &str,
) -> courses::Model {
    courses::ActiveModel {
        id: Set(Uuid::new_v4()),
        code: Set(code.to_string()),
        name: Set(name.to_string()),
        department_id: Set(department.id),
        description: Set(format!("An introduction to {name}")),
        credit_hours: Set("3.0".to_string()),
    }
    .insert(db)
    .await
    .expect("Failed to insert course")
}

pub async fn insert_section(
    db: &DatabaseConnection,
    course: &courses::Model,
    instructor: &faculty::Model,
    semester: &str,
    capacity: i32,
    enrolled: i32,
) -> class_sections::Model {
    class_sections::ActiveModel {
        id: Set(Uuid::new_v4()),
        course_id: Set(course.id),
        section_number: Set("001".to_string()),
        semester: Set(semester.to_string()),
        instructor_id: Set(instructor.id),
        location: Set("Room 1".to_string()),
        capacity: Set(capacity),
        enrolled: Set(enrolled),
    }
    .insert(db)
    .await
    .expect("Failed to insert section")
}

pub async fn insert_slot(
    db: &DatabaseConnection,
    section: &class_sections::Model,
    day: DayOfWeek,
    start: NaiveTime,
    end: NaiveTime,
) -> class_schedules::Model {
    class_schedules::ActiveModel {
        id: Set(Uuid::new_v4()),
        section_id: Set(section.id),
        day: Set(day),
        start_time: Set(start),
        end_time: Set(end),
    }
    .insert(db)
    .await
    .expect("Failed to insert schedule slot")
}

pub async fn insert_assignment(
    db: &DatabaseConnection,
    section: &class_sections::Model,
    title: &str,
    due_date: DateTime<Utc>,
) -> assignments::Model {
    assignments::ActiveModel {
        id: Set(Uuid::new_v4()),
        section_id: Set(section.id),
        title: Set(title.to_string()),
        description: Set(String::new()),
        due_date: Set(due_date),
        points_possible: Set(100),
    }
    .insert(db)
    .await
    .expect("Failed to insert assignment")
}

pub async fn insert_exam(
    db: &DatabaseConnection,
    section: &class_sections::Model,
    title: &str,
    date: DateTime<Utc>,
) -> exams::Model {
    exams::ActiveModel {
        id: Set(Uuid::new_v4()),
        section_id: Set(section.id),
        title: Set(title.to_string()),
        date: Set(date),
        location: Set("Gym".to_string()),
        duration_minutes: Set(120),
    }
    .insert(db)
    .await
    .expect("Failed to insert exam")
}

/// One department with a single instructor, ready to hang courses off
pub struct Campus {
    pub department: departments::Model,
    pub instructor_user: users::Model,
    pub instructor: faculty::Model,
}

impl Campus {
    pub async fn seed(db: &DatabaseConnection) -> Self {
        let department = insert_department(db, "CS").await;
        let instructor_user = insert_user(db, "turing", Role::Faculty).await;
        let instructor = insert_faculty(db, &instructor_user, &department, "Professor").await;

        Self {
            department,
            instructor_user,
            instructor,
        }
    }

    /// A course with one section in `SEMESTER`
    pub async fn section(
        &self,
        db: &DatabaseConnection,
        code: &str,
        capacity: i32,
        enrolled: i32,
    ) -> (courses::Model, class_sections::Model) {
        let course = insert_course(db, &self.department, code, &format!("Course {code}")).await;
        let section =
            insert_section(db, &course, &self.instructor, SEMESTER, capacity, enrolled).await;
        (course, section)
    }
}
