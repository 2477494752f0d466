//! Catalog browsing and profile updates

mod common;

use chrono::Duration;
use common::{
    Campus, SEMESTER, insert_assignment, insert_course, insert_department, insert_exam,
    insert_faculty, insert_section, insert_slot, insert_user, now, setup_test_db, time,
};
use database::{
    error::ServiceError,
    services::{
        accounts::{AccountService, ProfileUpdate},
        catalog::CatalogService,
    },
};
use models::{days::DayOfWeek, role::Role, semester::Semester};
use sea_orm::{ActiveModelTrait, IntoActiveModel, Set};
use uuid::Uuid;

#[tokio::test]
async fn test_departments_listed_by_code() {
    let db = setup_test_db().await;
    insert_department(&db, "MATH").await;
    insert_department(&db, "BIO").await;
    insert_department(&db, "CS").await;

    let departments = CatalogService::list_departments(&db).await.unwrap();
    let codes: Vec<&str> = departments.iter().map(|d| d.code.as_str()).collect();

    assert_eq!(codes, vec!["BIO", "CS", "MATH"]);
}

#[tokio::test]
async fn test_department_detail() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    campus.section(&db, "CS201", 30, 0).await;
    campus.section(&db, "CS101", 30, 0).await;

    let detail = CatalogService::get_department(&db, campus.department.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(detail.faculty.len(), 1);
    assert_eq!(detail.courses[0].code, "CS101");
    assert_eq!(detail.courses[1].code, "CS201");

    assert!(
        CatalogService::get_department(&db, Uuid::new_v4())
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_faculty_search_is_case_insensitive() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    let math = insert_department(&db, "MATH").await;
    let noether = insert_user(&db, "emmy", Role::Faculty).await;
    insert_faculty(&db, &noether, &math, "Associate Professor").await;

    let by_name = CatalogService::list_faculty(&db, None, Some("TURING".to_string()))
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].1.username, "turing");

    let by_title = CatalogService::list_faculty(&db, None, Some("associate".to_string()))
        .await
        .unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].1.username, "emmy");

    let in_department = CatalogService::list_faculty(&db, Some(campus.department.id), None)
        .await
        .unwrap();
    assert_eq!(in_department.len(), 1);

    // Blank search is no search
    let everyone = CatalogService::list_faculty(&db, None, Some("   ".to_string()))
        .await
        .unwrap();
    assert_eq!(everyone.len(), 2);
}

#[tokio::test]
async fn test_course_search() {
    let db = setup_test_db().await;
    let department = insert_department(&db, "CS").await;
    insert_course(&db, &department, "CS101", "Programming Fundamentals").await;
    insert_course(&db, &department, "CS250", "Data Structures").await;

    let found = CatalogService::list_courses(&db, None, Some("data".to_string()))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].code, "CS250");

    let by_code = CatalogService::list_courses(&db, Some(department.id), Some("cs1".to_string()))
        .await
        .unwrap();
    assert_eq!(by_code.len(), 1);
    assert_eq!(by_code[0].code, "CS101");
}

#[tokio::test]
async fn test_search_wildcards_match_literally() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    insert_course(&db, &campus.department, "CS101", "Programming Fundamentals").await;
    insert_course(&db, &campus.department, "CS_LAB", "Lab Skills").await;

    let percent = CatalogService::list_courses(&db, None, Some("%".to_string()))
        .await
        .unwrap();
    assert!(percent.is_empty(), "matched {percent:?}");

    let underscore = CatalogService::list_courses(&db, None, Some("_".to_string()))
        .await
        .unwrap();
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].code, "CS_LAB");

    let faculty = CatalogService::list_faculty(&db, None, Some("%".to_string()))
        .await
        .unwrap();
    assert!(faculty.is_empty());
}

#[tokio::test]
async fn test_course_detail_lists_current_sections() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    let (course, _) = campus.section(&db, "CS101", 30, 0).await;
    insert_section(&db, &course, &campus.instructor, "Fall 2024", 30, 0).await;

    let detail = CatalogService::get_course(&db, course.id, &Semester::new(SEMESTER))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(detail.department.unwrap().code, "CS");
    assert_eq!(detail.sections.len(), 1);
    assert_eq!(detail.sections[0].1.as_deref(), Some("turing Tester"));
}

#[tokio::test]
async fn test_faculty_detail_lists_classes() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    campus.section(&db, "CS101", 30, 0).await;

    let detail = CatalogService::get_faculty(&db, campus.instructor.id, &Semester::new(SEMESTER))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(detail.user.username, "turing");
    assert_eq!(detail.classes.len(), 1);
    assert_eq!(detail.classes[0].1.code, "CS101");
}

#[tokio::test]
async fn test_section_detail() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    let (_, section) = campus.section(&db, "CS101", 30, 0).await;
    insert_slot(&db, &section, DayOfWeek::Wednesday, time(9, 0), time(10, 0)).await;
    insert_slot(&db, &section, DayOfWeek::Monday, time(9, 0), time(10, 0)).await;
    insert_assignment(&db, &section, "HW2", now() + Duration::days(2)).await;
    insert_assignment(&db, &section, "HW1", now() + Duration::days(1)).await;
    insert_exam(&db, &section, "Final", now() + Duration::days(50)).await;

    let detail = CatalogService::get_section(&db, section.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(detail.course.code, "CS101");
    assert_eq!(detail.instructor.unwrap().1.username, "turing");
    assert_eq!(detail.schedules[0].day, DayOfWeek::Monday);
    assert_eq!(detail.schedules[1].day, DayOfWeek::Wednesday);
    assert_eq!(detail.assignments[0].title, "HW1");
    assert_eq!(detail.exams.len(), 1);
}

#[tokio::test]
async fn test_find_by_subject_skips_inactive_users() {
    let db = setup_test_db().await;
    let user = insert_user(&db, "ada", Role::Student).await;

    let found = AccountService::find_by_subject(&db, "sub-ada")
        .await
        .unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));

    let mut inactive = user.into_active_model();
    inactive.is_active = Set(false);
    inactive.update(&db).await.unwrap();

    assert!(
        AccountService::find_by_subject(&db, "sub-ada")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_update_profile() {
    let db = setup_test_db().await;
    let user = insert_user(&db, "ada", Role::Student).await;

    let updated = AccountService::update_profile(
        &db,
        user.id,
        ProfileUpdate {
            first_name: Some("Ada".to_string()),
            last_name: Some(" Lovelace ".to_string()),
            email: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.full_name(), "Ada Lovelace");
    assert_eq!(updated.email, "ada@campus.edu");
    assert_eq!(updated.role, Role::Student);

    let rejected = AccountService::update_profile(
        &db,
        user.id,
        ProfileUpdate {
            email: Some("not-an-address".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(rejected, Err(ServiceError::Validation(_))));

    let missing =
        AccountService::update_profile(&db, Uuid::new_v4(), ProfileUpdate::default()).await;
    assert!(matches!(missing, Err(ServiceError::NotFound(_))));
}
