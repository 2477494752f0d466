//! Loading a catalog document

mod common;

use common::{insert_user, setup_test_db};
use database::{
    entities::{class_schedules, class_sections, courses, departments, faculty, users},
    error::ServiceError,
    services::import::ImportService,
};
use models::{catalog_data::CatalogDocument, role::Role};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

fn catalog() -> CatalogDocument {
    let json = serde_json::json!({
        "departments": [
            {
                "code": "CS",
                "name": "Computer Science",
                "faculty": [{
                    "subject": "oidc|turing",
                    "username": "turing",
                    "first_name": "Alan",
                    "last_name": "Turing",
                    "email": "turing@campus.edu",
                    "title": "Professor"
                }],
                "courses": [{
                    "code": "CS101",
                    "name": "Intro to Programming",
                    "credit_hours": "3.0",
                    "sections": [{
                        "section_number": "001",
                        "semester": "Spring 2025",
                        "instructor": "turing",
                        "capacity": 30,
                        "schedules": [
                            { "day": "MON", "start_time": "09:00:00", "end_time": "10:15:00" },
                            { "day": "WED", "start_time": "09:00:00", "end_time": "10:15:00" }
                        ],
                        "assignments": [{
                            "title": "HW1",
                            "due_date": "2025-02-01T23:59:00Z",
                            "points_possible": 100
                        }],
                        "exams": [{
                            "title": "Midterm",
                            "date": "2025-03-10T14:00:00Z",
                            "duration_minutes": 90
                        }]
                    }]
                }]
            },
            {
                "code": "MATH",
                "name": "Mathematics",
                "faculty": [{
                    "subject": "oidc|noether",
                    "username": "noether",
                    "first_name": "Emmy",
                    "last_name": "Noether",
                    "email": "noether@campus.edu",
                    "title": "Associate Professor"
                }],
                "courses": [{
                    "code": "MATH120",
                    "name": "Logic",
                    "credit_hours": "4",
                    "sections": [{
                        "section_number": "001",
                        "semester": "Spring 2025",
                        "instructor": "turing",
                        "capacity": 25
                    }]
                }]
            }
        ]
    });

    serde_json::from_value(json).unwrap()
}

#[tokio::test]
async fn test_import_catalog() {
    let db = setup_test_db().await;

    let report = ImportService::import_catalog(&db, catalog()).await.unwrap();

    assert_eq!(report.departments_created, 2);
    assert_eq!(report.faculty_created, 2);
    assert_eq!(report.courses_created, 2);
    assert_eq!(report.sections_created, 2);
    assert_eq!(report.sections_skipped, 0);

    let turing = users::Entity::find()
        .filter(users::Column::Username.eq("turing"))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(turing.role, Role::Faculty);
    assert_eq!(turing.subject, "oidc|turing");

    // A MATH section may be taught by a CS instructor
    let turing_faculty = faculty::Entity::find()
        .filter(faculty::Column::UserId.eq(turing.id))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let taught = class_sections::Entity::find()
        .filter(class_sections::Column::InstructorId.eq(turing_faculty.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(taught, 2);

    let sections = class_sections::Entity::find().all(&db).await.unwrap();
    assert!(sections.iter().all(|s| s.enrolled == 0));
    assert_eq!(class_schedules::Entity::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn test_reimport_skips_existing_rows() {
    let db = setup_test_db().await;

    ImportService::import_catalog(&db, catalog()).await.unwrap();
    let report = ImportService::import_catalog(&db, catalog()).await.unwrap();

    assert_eq!(report.departments_created, 0);
    assert_eq!(report.faculty_created, 0);
    assert_eq!(report.courses_created, 0);
    assert_eq!(report.sections_created, 0);
    assert_eq!(report.sections_skipped, 2);
    assert_eq!(class_sections::Entity::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn test_invalid_catalog_writes_nothing() {
    let db = setup_test_db().await;
    let mut document = catalog();
    document.departments[1].courses[0].sections[0].instructor = "nobody".to_string();

    let result = ImportService::import_catalog(&db, document).await;

    assert!(matches!(result, Err(ServiceError::Validation(msg)) if msg.contains("nobody")));
    assert_eq!(users::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_instructor_from_later_department() {
    let db = setup_test_db().await;
    let mut document = catalog();
    // MATH now comes first but its section is taught by turing from CS
    document.departments.reverse();

    let report = ImportService::import_catalog(&db, document).await.unwrap();

    assert_eq!(report.departments_created, 2);
    assert_eq!(report.faculty_created, 2);
    assert_eq!(report.sections_created, 2);

    let cs = departments::Entity::find()
        .filter(departments::Column::Code.eq("CS"))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let turing = users::Entity::find()
        .filter(users::Column::Username.eq("turing"))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let turing_faculty = faculty::Entity::find()
        .filter(faculty::Column::UserId.eq(turing.id))
        .one(&db)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(turing_faculty.department_id, cs.id);
    assert_eq!(faculty::Entity::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn test_failed_department_rolls_back_alone() {
    let db = setup_test_db().await;
    // Owns the subject the MATH faculty member is about to claim
    insert_user(&db, "ada", Role::Student).await;
    let mut document = catalog();
    document.departments[1].faculty[0].subject = "sub-ada".to_string();

    let result = ImportService::import_catalog(&db, document).await;

    assert!(matches!(result, Err(ServiceError::Database(_))));

    // CS was committed in full, nothing from MATH was
    let codes: Vec<String> = departments::Entity::find()
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.code)
        .collect();
    assert_eq!(codes, vec!["CS".to_string()]);
    assert_eq!(courses::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(class_sections::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(faculty::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(users::Entity::find().count(&db).await.unwrap(), 2);
}
