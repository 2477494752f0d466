//! Role based dashboards

mod common;

use chrono::Duration;
use common::{
    Campus, SEMESTER, insert_assignment, insert_exam, insert_user, now, setup_test_db, today,
};
use database::services::{
    dashboard::{Dashboard, DashboardService},
    enrollment::EnrollmentService,
};
use models::{coursework::UPCOMING_LIMIT, role::Role, semester::Semester};

#[tokio::test]
async fn test_student_dashboard() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    let (_, section) = campus.section(&db, "CS101", 30, 0).await;
    let student = insert_user(&db, "ada", Role::Student).await;
    EnrollmentService::enroll(&db, student.id, section.id, today())
        .await
        .unwrap();

    insert_assignment(&db, &section, "HW1", now() + Duration::days(2)).await;
    insert_assignment(&db, &section, "HW0", now() - Duration::days(2)).await;
    insert_exam(&db, &section, "Midterm", now() + Duration::days(10)).await;

    let dashboard = DashboardService::for_user(
        &db,
        &student,
        &Semester::new(SEMESTER),
        now(),
        UPCOMING_LIMIT,
    )
    .await
    .unwrap();

    assert_eq!(dashboard.role(), Role::Student);
    let Dashboard::Student(dashboard) = dashboard else {
        panic!("expected a student dashboard");
    };
    assert_eq!(dashboard.enrolled_sections, 1);
    assert_eq!(dashboard.upcoming_assignments.len(), 1);
    assert_eq!(dashboard.upcoming_assignments[0].title, "HW1");
    assert_eq!(dashboard.upcoming_exams.len(), 1);
}

#[tokio::test]
async fn test_faculty_dashboard_counts_students() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    let (_, first) = campus.section(&db, "CS101", 30, 12).await;
    let (_, _second) = campus.section(&db, "CS102", 40, 8).await;
    insert_exam(&db, &first, "Final", now() + Duration::days(40)).await;

    let dashboard = DashboardService::for_user(
        &db,
        &campus.instructor_user,
        &Semester::new(SEMESTER),
        now(),
        UPCOMING_LIMIT,
    )
    .await
    .unwrap();

    let Dashboard::Faculty(dashboard) = dashboard else {
        panic!("expected a faculty dashboard");
    };
    assert_eq!(dashboard.sections.len(), 2);
    assert_eq!(dashboard.total_students, 20);
    assert_eq!(dashboard.upcoming_exams.len(), 1);
}

#[tokio::test]
async fn test_faculty_role_without_faculty_record() {
    let db = setup_test_db().await;
    let user = insert_user(&db, "visiting", Role::Faculty).await;

    let dashboard = DashboardService::for_user(
        &db,
        &user,
        &Semester::new(SEMESTER),
        now(),
        UPCOMING_LIMIT,
    )
    .await
    .unwrap();

    let Dashboard::Faculty(dashboard) = dashboard else {
        panic!("expected a faculty dashboard");
    };
    assert!(dashboard.sections.is_empty());
    assert_eq!(dashboard.total_students, 0);
}

#[tokio::test]
async fn test_staff_and_admin_dashboards() {
    let db = setup_test_db().await;
    let campus = Campus::seed(&db).await;
    let (_, section) = campus.section(&db, "CS101", 30, 0).await;
    let student = insert_user(&db, "ada", Role::Student).await;
    let staff = insert_user(&db, "registrar", Role::Staff).await;
    let admin = insert_user(&db, "root", Role::Admin).await;
    EnrollmentService::enroll(&db, student.id, section.id, today())
        .await
        .unwrap();

    let semester = Semester::new(SEMESTER);

    let Dashboard::Staff(staff_view) =
        DashboardService::for_user(&db, &staff, &semester, now(), UPCOMING_LIMIT)
            .await
            .unwrap()
    else {
        panic!("expected a staff dashboard");
    };
    assert_eq!(staff_view.departments, 1);
    assert_eq!(staff_view.courses, 1);
    assert_eq!(staff_view.sections, 1);

    let Dashboard::Admin(admin_view) =
        DashboardService::for_user(&db, &admin, &semester, now(), UPCOMING_LIMIT)
            .await
            .unwrap()
    else {
        panic!("expected an admin dashboard");
    };
    // turing, ada, registrar, root
    assert_eq!(admin_view.users, 4);
    assert_eq!(admin_view.active_users, 4);
    assert_eq!(admin_view.enrollments, 1);
}
