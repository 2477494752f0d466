//! Enroll and drop against a real SQLite database

mod common;

use common::{Campus, insert_user, setup_pooled_test_db, setup_test_db, today};
use database::{
    entities::{class_sections, enrollments},
    error::ServiceError,
    services::enrollment::{Enrolled, EnrollmentService},
};
use futures::future::join_all;
use models::role::Role;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

async fn enrolled_count(db: &DatabaseConnection, section_id: Uuid) -> i32 {
    class_sections::Entity::find_by_id(section_id)
        .one(db)
        .await
        .unwrap()
        .unwrap()
        .enrolled
}

async fn enrollment_rows(db: &DatabaseConnection, section_id: Uuid) -> u64 {
    enrollments::Entity::find()
        .filter(enrollments::Column::SectionId.eq(section_id))
        .count(db)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_enroll_claims_a_seat() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    let (course, section) = campus.section(&db, "CS101", 30, 12).await;
    let student = insert_user(&db, "ada", Role::Student).await;

    let enrolled = EnrollmentService::enroll(&db, student.id, section.id, today())
        .await
        .unwrap();

    assert_eq!(enrolled.section.enrolled, 13);
    assert_eq!(enrolled.course.id, course.id);
    assert_eq!(enrolled.enrollment.student_id, student.id);
    assert_eq!(enrolled.enrollment.date_enrolled, today());
    assert_eq!(enrolled_count(&db, section.id).await, 13);
    assert!(
        EnrollmentService::is_enrolled(&db, student.id, section.id)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_enroll_twice_is_rejected() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    let (_, section) = campus.section(&db, "CS101", 30, 0).await;
    let student = insert_user(&db, "ada", Role::Student).await;

    EnrollmentService::enroll(&db, student.id, section.id, today())
        .await
        .unwrap();
    let second = EnrollmentService::enroll(&db, student.id, section.id, today()).await;

    assert!(matches!(second, Err(ServiceError::AlreadyEnrolled)));
    assert_eq!(enrolled_count(&db, section.id).await, 1);
    assert_eq!(enrollment_rows(&db, section.id).await, 1);
}

#[tokio::test]
async fn test_enroll_in_full_section_is_rejected() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    let (_, section) = campus.section(&db, "CS101", 30, 30).await;
    let student = insert_user(&db, "ada", Role::Student).await;

    let result = EnrollmentService::enroll(&db, student.id, section.id, today()).await;

    assert!(matches!(result, Err(ServiceError::SectionFull)));
    assert_eq!(enrolled_count(&db, section.id).await, 30);
    assert_eq!(enrollment_rows(&db, section.id).await, 0);
}

#[tokio::test]
async fn test_enroll_in_missing_section() {
    let db = setup_test_db().await;
    let student = insert_user(&db, "ada", Role::Student).await;

    let result = EnrollmentService::enroll(&db, student.id, Uuid::new_v4(), today()).await;

    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_drop_without_enrollment_is_rejected() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    let (_, section) = campus.section(&db, "CS101", 30, 5).await;
    let student = insert_user(&db, "ada", Role::Student).await;

    let result = EnrollmentService::drop(&db, student.id, section.id).await;

    assert!(matches!(result, Err(ServiceError::NotEnrolled)));
    assert_eq!(enrolled_count(&db, section.id).await, 5);
}

#[tokio::test]
async fn test_enroll_then_drop_restores_counter() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    let (_, section) = campus.section(&db, "CS101", 30, 7).await;
    let student = insert_user(&db, "ada", Role::Student).await;

    EnrollmentService::enroll(&db, student.id, section.id, today())
        .await
        .unwrap();
    let dropped = EnrollmentService::drop(&db, student.id, section.id)
        .await
        .unwrap();

    assert_eq!(dropped.section.enrolled, 7);
    assert_eq!(enrolled_count(&db, section.id).await, 7);
    assert_eq!(enrollment_rows(&db, section.id).await, 0);
    assert!(
        !EnrollmentService::is_enrolled(&db, student.id, section.id)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_drop_frees_seat_in_full_section() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    let (_, section) = campus.section(&db, "CS101", 1, 0).await;
    let first = insert_user(&db, "ada", Role::Student).await;
    let second = insert_user(&db, "grace", Role::Student).await;

    EnrollmentService::enroll(&db, first.id, section.id, today())
        .await
        .unwrap();
    assert!(matches!(
        EnrollmentService::enroll(&db, second.id, section.id, today()).await,
        Err(ServiceError::SectionFull)
    ));

    EnrollmentService::drop(&db, first.id, section.id)
        .await
        .unwrap();
    let enrolled = EnrollmentService::enroll(&db, second.id, section.id, today())
        .await
        .unwrap();

    assert_eq!(enrolled.section.enrolled, 1);
}

#[tokio::test]
async fn test_drop_never_takes_counter_below_zero() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    let (_, section) = campus.section(&db, "CS101", 30, 0).await;
    let student = insert_user(&db, "ada", Role::Student).await;

    // Row exists but the counter was never bumped
    enrollments::Entity::insert(enrollments::ActiveModel {
        id: sea_orm::Set(Uuid::new_v4()),
        student_id: sea_orm::Set(student.id),
        section_id: sea_orm::Set(section.id),
        date_enrolled: sea_orm::Set(today()),
    })
    .exec(&db)
    .await
    .unwrap();

    let dropped = EnrollmentService::drop(&db, student.id, section.id)
        .await
        .unwrap();

    assert_eq!(dropped.section.enrolled, 0);
    assert_eq!(enrollment_rows(&db, section.id).await, 0);
}

#[tokio::test]
async fn test_enroll_twice_in_full_section_reports_already_enrolled() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    let (_, section) = campus.section(&db, "CS101", 1, 0).await;
    let student = insert_user(&db, "ada", Role::Student).await;

    EnrollmentService::enroll(&db, student.id, section.id, today())
        .await
        .unwrap();
    let second = EnrollmentService::enroll(&db, student.id, section.id, today()).await;

    assert!(matches!(second, Err(ServiceError::AlreadyEnrolled)));
    assert_eq!(enrolled_count(&db, section.id).await, 1);
}

#[tokio::test]
async fn test_drop_from_missing_section() {
    let db = setup_test_db().await;
    let student = insert_user(&db, "ada", Role::Student).await;

    let result = EnrollmentService::drop(&db, student.id, Uuid::new_v4()).await;

    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

/// Runs one enroll per student on its own task against a pooled database
async fn enroll_concurrently(
    db: &DatabaseConnection,
    student_ids: Vec<Uuid>,
    section_id: Uuid,
) -> Vec<Result<Enrolled, ServiceError>> {
    let handles = student_ids.into_iter().map(|student_id| {
        let db = db.clone();
        tokio::spawn(async move {
            EnrollmentService::enroll(&db, student_id, section_id, today()).await
        })
    });

    join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("enroll task panicked"))
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_enrolls_never_exceed_capacity() {
    let (_dir, db) = setup_pooled_test_db().await;
    let campus = Campus::seed(&db).await;
    let (_, section) = campus.section(&db, "CS101", 3, 0).await;

    let mut student_ids = Vec::new();
    for i in 0..8 {
        student_ids.push(insert_user(&db, &format!("student{i}"), Role::Student).await.id);
    }

    let results = enroll_concurrently(&db, student_ids, section.id).await;

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let full = results
        .iter()
        .filter(|r| matches!(r, Err(ServiceError::SectionFull)))
        .count();

    assert_eq!(succeeded, 3, "unexpected results: {results:?}");
    assert_eq!(full, 5, "unexpected results: {results:?}");
    assert_eq!(enrolled_count(&db, section.id).await, 3);
    assert_eq!(enrollment_rows(&db, section.id).await, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_enrolls_claim_one_seat() {
    let (_dir, db) = setup_pooled_test_db().await;
    let campus = Campus::seed(&db).await;
    let (_, section) = campus.section(&db, "CS101", 30, 0).await;
    let student = insert_user(&db, "ada", Role::Student).await;

    let results = enroll_concurrently(&db, vec![student.id; 6], section.id).await;

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(ServiceError::AlreadyEnrolled)))
        .count();

    assert_eq!(succeeded, 1, "unexpected results: {results:?}");
    assert_eq!(duplicates, 5, "unexpected results: {results:?}");
    assert_eq!(enrolled_count(&db, section.id).await, 1);
    assert_eq!(enrollment_rows(&db, section.id).await, 1);
}
