use crate::{
    entities::{
        assignments, class_schedules, class_sections, courses, departments, exams, faculty, users,
    },
    error::ServiceError,
};
use chrono::Utc;
use log::{debug, info, warn};
use models::{
    catalog_data::{CatalogDocument, CourseData, DepartmentData, FacultyData, SectionData},
    role::Role,
};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

/// Counts of what an import wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub departments_created: usize,
    pub faculty_created: usize,
    pub courses_created: usize,
    pub sections_created: usize,
    /// Sections that already existed and were left untouched
    pub sections_skipped: usize,
}

impl ImportReport {
    fn absorb(&mut self, other: ImportReport) {
        self.departments_created += other.departments_created;
        self.faculty_created += other.faculty_created;
        self.courses_created += other.courses_created;
        self.sections_created += other.sections_created;
        self.sections_skipped += other.sections_skipped;
    }
}

pub struct ImportService;

/// Where each listed faculty member belongs, keyed by username
type FacultyIndex<'a> = HashMap<&'a str, (&'a DepartmentData, &'a FacultyData)>;

impl ImportService {
    /// Loads a catalog document.
    ///
    /// Each department is written in its own transaction together with its
    /// faculty, courses, and sections, in document order. A section taught by
    /// someone from a department not written yet brings that instructor (and
    /// their department) into the current transaction. Existing rows are
    /// matched by department code, username, course code, and (section
    /// number, semester) and are never overwritten.
    pub async fn import_catalog(
        db: &DatabaseConnection,
        document: CatalogDocument,
    ) -> Result<ImportReport, ServiceError> {
        document.validate().map_err(ServiceError::Validation)?;

        info!(
            "Starting to import {} departments",
            document.departments.len()
        );

        let faculty_index: FacultyIndex = document
            .departments
            .iter()
            .flat_map(|department| {
                department
                    .faculty
                    .iter()
                    .map(move |member| (member.username.as_str(), (department, member)))
            })
            .collect();

        let mut report = ImportReport::default();
        let mut cache: HashMap<String, Uuid> = HashMap::new();

        for department in &document.departments {
            let txn = db.begin().await?;
            let saved = Self::save_department(&txn, department, &faculty_index, &mut cache).await?;
            txn.commit().await?;

            debug!(
                "Completed department {}, {} sections created",
                department.code, saved.sections_created
            );
            report.absorb(saved);
        }

        info!("Import finished: {report:?}");
        Ok(report)
    }

    async fn save_department(
        txn: &DatabaseTransaction,
        department: &DepartmentData,
        faculty_index: &FacultyIndex<'_>,
        instructor_cache: &mut HashMap<String, Uuid>,
    ) -> Result<ImportReport, DbErr> {
        let mut report = ImportReport::default();

        let (department_id, created) = Self::upsert_department(txn, department).await?;
        report.departments_created += usize::from(created);

        for member in &department.faculty {
            let (faculty_id, created) = Self::upsert_faculty(txn, department_id, member).await?;
            report.faculty_created += usize::from(created);
            instructor_cache.insert(member.username.clone(), faculty_id);
        }

        for course in &department.courses {
            let course_id = Self::upsert_course(txn, department_id, course, &mut report).await?;

            for section in &course.sections {
                let instructor_id = match instructor_cache.get(&section.instructor) {
                    Some(&id) => id,
                    None => {
                        // Validated up front, so every instructor is in the index
                        let Some(&(home, member)) = faculty_index.get(section.instructor.as_str())
                        else {
                            continue;
                        };
                        let id = Self::resolve_instructor(txn, home, member, &mut report).await?;
                        instructor_cache.insert(member.username.clone(), id);
                        id
                    }
                };

                if Self::save_section(txn, course_id, instructor_id, section).await? {
                    report.sections_created += 1;
                } else {
                    report.sections_skipped += 1;
                }
            }
        }

        Ok(report)
    }

    /// Writes an instructor listed under a department that has not been imported yet
    async fn resolve_instructor(
        txn: &DatabaseTransaction,
        home: &DepartmentData,
        member: &FacultyData,
        report: &mut ImportReport,
    ) -> Result<Uuid, DbErr> {
        let (department_id, created) = Self::upsert_department(txn, home).await?;
        report.departments_created += usize::from(created);

        let (faculty_id, created) = Self::upsert_faculty(txn, department_id, member).await?;
        report.faculty_created += usize::from(created);

        Ok(faculty_id)
    }

    async fn upsert_department(
        txn: &DatabaseTransaction,
        department: &DepartmentData,
    ) -> Result<(Uuid, bool), DbErr> {
        if let Some(existing) = departments::Entity::find()
            .filter(departments::Column::Code.eq(department.code.as_str()))
            .one(txn)
            .await?
        {
            return Ok((existing.id, false));
        }

        let id = Uuid::new_v4();
        departments::Entity::insert(departments::ActiveModel {
            id: Set(id),
            name: Set(department.name.clone()),
            code: Set(department.code.clone()),
            description: Set(department.description.clone()),
        })
        .exec(txn)
        .await?;

        Ok((id, true))
    }

    /// Finds or creates the user and faculty rows for a faculty member
    async fn upsert_faculty(
        txn: &DatabaseTransaction,
        department_id: Uuid,
        member: &FacultyData,
    ) -> Result<(Uuid, bool), DbErr> {
        let user_id = match users::Entity::find()
            .filter(users::Column::Username.eq(member.username.as_str()))
            .one(txn)
            .await?
        {
            Some(user) => {
                if user.role != Role::Faculty {
                    warn!(
                        "User {} is listed as faculty but has role {}",
                        user.username, user.role
                    );
                }
                user.id
            }
            None => {
                let id = Uuid::new_v4();
                users::Entity::insert(users::ActiveModel {
                    id: Set(id),
                    subject: Set(member.subject.clone()),
                    username: Set(member.username.clone()),
                    first_name: Set(member.first_name.clone()),
                    last_name: Set(member.last_name.clone()),
                    email: Set(member.email.clone()),
                    role: Set(Role::Faculty),
                    is_active: Set(true),
                    created_at: Set(Utc::now()),
                })
                .exec(txn)
                .await?;
                id
            }
        };

        if let Some(existing) = faculty::Entity::find()
            .filter(faculty::Column::UserId.eq(user_id))
            .one(txn)
            .await?
        {
            return Ok((existing.id, false));
        }

        let id = Uuid::new_v4();
        faculty::Entity::insert(faculty::ActiveModel {
            id: Set(id),
            user_id: Set(user_id),
            department_id: Set(department_id),
            title: Set(member.title.clone()),
            office_location: Set(member.office_location.clone()),
            office_hours: Set(member.office_hours.clone()),
            research_interests: Set(member.research_interests.clone()),
        })
        .exec(txn)
        .await?;

        Ok((id, true))
    }

    async fn upsert_course(
        txn: &DatabaseTransaction,
        department_id: Uuid,
        course: &CourseData,
        report: &mut ImportReport,
    ) -> Result<Uuid, DbErr> {
        if let Some(existing) = courses::Entity::find()
            .filter(courses::Column::DepartmentId.eq(department_id))
            .filter(courses::Column::Code.eq(course.code.as_str()))
            .one(txn)
            .await?
        {
            return Ok(existing.id);
        }

        let id = Uuid::new_v4();
        courses::Entity::insert(courses::ActiveModel {
            id: Set(id),
            code: Set(course.code.clone()),
            name: Set(course.name.clone()),
            department_id: Set(department_id),
            description: Set(course.description.clone()),
            credit_hours: Set(course.credit_hours.to_string()),
        })
        .exec(txn)
        .await?;
        report.courses_created += 1;

        Ok(id)
    }

    /// Inserts a section with its slots and coursework; returns false if it already existed
    async fn save_section(
        txn: &DatabaseTransaction,
        course_id: Uuid,
        instructor_id: Uuid,
        section: &SectionData,
    ) -> Result<bool, DbErr> {
        let existing = class_sections::Entity::find()
            .filter(class_sections::Column::CourseId.eq(course_id))
            .filter(class_sections::Column::SectionNumber.eq(section.section_number.as_str()))
            .filter(class_sections::Column::Semester.eq(section.semester.as_str()))
            .one(txn)
            .await?;

        if existing.is_some() {
            return Ok(false);
        }

        let section_id = Uuid::new_v4();
        class_sections::Entity::insert(class_sections::ActiveModel {
            id: Set(section_id),
            course_id: Set(course_id),
            section_number: Set(section.section_number.clone()),
            semester: Set(section.semester.to_string()),
            instructor_id: Set(instructor_id),
            location: Set(section.location.clone()),
            capacity: Set(section.capacity),
            enrolled: Set(0),
        })
        .exec(txn)
        .await?;

        // Bulk insert the section's children
        if !section.schedules.is_empty() {
            class_schedules::Entity::insert_many(section.schedules.iter().map(|slot| {
                class_schedules::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    section_id: Set(section_id),
                    day: Set(slot.day),
                    start_time: Set(slot.start_time),
                    end_time: Set(slot.end_time),
                }
            }))
            .exec(txn)
            .await?;
        }

        if !section.assignments.is_empty() {
            assignments::Entity::insert_many(section.assignments.iter().map(|assignment| {
                assignments::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    section_id: Set(section_id),
                    title: Set(assignment.title.clone()),
                    description: Set(assignment.description.clone()),
                    due_date: Set(assignment.due_date),
                    points_possible: Set(assignment.points_possible),
                }
            }))
            .exec(txn)
            .await?;
        }

        if !section.exams.is_empty() {
            exams::Entity::insert_many(section.exams.iter().map(|exam| exams::ActiveModel {
                id: Set(Uuid::new_v4()),
                section_id: Set(section_id),
                title: Set(exam.title.clone()),
                date: Set(exam.date),
                location: Set(exam.location.clone()),
                duration_minutes: Set(exam.duration_minutes),
            }))
            .exec(txn)
            .await?;
        }

        Ok(true)
    }
}
