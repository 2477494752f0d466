use crate::entities::{
    assignments, class_schedules, class_sections, courses, departments, exams, faculty, users,
};
use models::semester::Semester;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
};
use std::collections::HashMap;
use uuid::Uuid;

/// A faculty member together with their user account
pub type FacultyMember = (faculty::Model, users::Model);

#[derive(Debug, Clone)]
pub struct DepartmentDetail {
    pub department: departments::Model,
    pub faculty: Vec<FacultyMember>,
    pub courses: Vec<courses::Model>,
}

#[derive(Debug, Clone)]
pub struct FacultyDetail {
    pub faculty: faculty::Model,
    pub user: users::Model,
    pub department: Option<departments::Model>,
    /// Sections taught in the requested semester
    pub classes: Vec<(class_sections::Model, courses::Model)>,
}

#[derive(Debug, Clone)]
pub struct CourseDetail {
    pub course: courses::Model,
    pub department: Option<departments::Model>,
    /// Sections offered in the requested semester, with the instructor's name
    pub sections: Vec<(class_sections::Model, Option<String>)>,
}

#[derive(Debug, Clone)]
pub struct SectionDetail {
    pub section: class_sections::Model,
    pub course: courses::Model,
    pub instructor: Option<FacultyMember>,
    pub schedules: Vec<class_schedules::Model>,
    pub assignments: Vec<assignments::Model>,
    pub exams: Vec<exams::Model>,
}

/// Case-insensitive literal substring match on a column
fn icontains<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));

    Expr::expr(Func::lower(Expr::col((column.entity_name(), column))))
        .like(LikeExpr::new(pattern).escape('\\'))
}

/// Escapes `LIKE` wildcards so they match themselves
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Treats a blank search box the same as no search at all
fn search_term(search: Option<String>) -> Option<String> {
    search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub struct CatalogService;

impl CatalogService {
    pub async fn list_departments(
        db: &DatabaseConnection,
    ) -> Result<Vec<departments::Model>, DbErr> {
        departments::Entity::find()
            .order_by_asc(departments::Column::Code)
            .all(db)
            .await
    }

    /// Get a department with its faculty and courses
    pub async fn get_department(
        db: &DatabaseConnection,
        department_id: Uuid,
    ) -> Result<Option<DepartmentDetail>, DbErr> {
        let Some(department) = departments::Entity::find_by_id(department_id)
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        let faculty = Self::list_faculty(db, Some(department_id), None).await?;

        let courses = courses::Entity::find()
            .filter(courses::Column::DepartmentId.eq(department_id))
            .order_by_asc(courses::Column::Code)
            .all(db)
            .await?;

        Ok(Some(DepartmentDetail {
            department,
            faculty,
            courses,
        }))
    }

    /// List faculty, optionally within one department and matching a search
    /// over first name, last name, or title
    pub async fn list_faculty(
        db: &DatabaseConnection,
        department_id: Option<Uuid>,
        search: Option<String>,
    ) -> Result<Vec<FacultyMember>, DbErr> {
        let mut condition = Condition::all();

        if let Some(department_id) = department_id {
            condition = condition.add(faculty::Column::DepartmentId.eq(department_id));
        }

        if let Some(search) = search_term(search) {
            condition = condition.add(
                Condition::any()
                    .add(icontains(users::Column::FirstName, &search))
                    .add(icontains(users::Column::LastName, &search))
                    .add(icontains(faculty::Column::Title, &search)),
            );
        }

        let rows = faculty::Entity::find()
            .find_also_related(users::Entity)
            .filter(condition)
            .order_by_asc(users::Column::LastName)
            .order_by_asc(users::Column::FirstName)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(member, user)| user.map(|u| (member, u)))
            .collect())
    }

    /// Get a faculty member and the classes they teach in `semester`
    pub async fn get_faculty(
        db: &DatabaseConnection,
        faculty_id: Uuid,
        semester: &Semester,
    ) -> Result<Option<FacultyDetail>, DbErr> {
        let Some((member, Some(user))) = faculty::Entity::find_by_id(faculty_id)
            .find_also_related(users::Entity)
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        let department = departments::Entity::find_by_id(member.department_id)
            .one(db)
            .await?;

        let classes = class_sections::Entity::find()
            .filter(class_sections::Column::InstructorId.eq(faculty_id))
            .filter(class_sections::Column::Semester.eq(semester.as_str()))
            .find_also_related(courses::Entity)
            .order_by_asc(courses::Column::Code)
            .order_by_asc(class_sections::Column::SectionNumber)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(section, course)| course.map(|c| (section, c)))
            .collect();

        Ok(Some(FacultyDetail {
            faculty: member,
            user,
            department,
            classes,
        }))
    }

    /// List courses, optionally within one department and matching a search
    /// over name, code, or description
    pub async fn list_courses(
        db: &DatabaseConnection,
        department_id: Option<Uuid>,
        search: Option<String>,
    ) -> Result<Vec<courses::Model>, DbErr> {
        let mut condition = Condition::all();

        if let Some(department_id) = department_id {
            condition = condition.add(courses::Column::DepartmentId.eq(department_id));
        }

        if let Some(search) = search_term(search) {
            condition = condition.add(
                Condition::any()
                    .add(icontains(courses::Column::Name, &search))
                    .add(icontains(courses::Column::Code, &search))
                    .add(icontains(courses::Column::Description, &search)),
            );
        }

        courses::Entity::find()
            .filter(condition)
            .order_by_asc(courses::Column::Code)
            .all(db)
            .await
    }

    /// Get a course and its sections offered in `semester`
    pub async fn get_course(
        db: &DatabaseConnection,
        course_id: Uuid,
        semester: &Semester,
    ) -> Result<Option<CourseDetail>, DbErr> {
        let Some((course, department)) = courses::Entity::find_by_id(course_id)
            .find_also_related(departments::Entity)
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        let sections = class_sections::Entity::find()
            .filter(class_sections::Column::CourseId.eq(course_id))
            .filter(class_sections::Column::Semester.eq(semester.as_str()))
            .order_by_asc(class_sections::Column::SectionNumber)
            .all(db)
            .await?;

        let instructor_ids: Vec<Uuid> = sections.iter().map(|s| s.instructor_id).collect();
        let instructor_names: HashMap<Uuid, String> = faculty::Entity::find()
            .filter(faculty::Column::Id.is_in(instructor_ids))
            .find_also_related(users::Entity)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(member, user)| user.map(|u| (member.id, u.full_name())))
            .collect();

        let sections = sections
            .into_iter()
            .map(|section| {
                let name = instructor_names.get(&section.instructor_id).cloned();
                (section, name)
            })
            .collect();

        Ok(Some(CourseDetail {
            course,
            department,
            sections,
        }))
    }

    /// Get a section with its meeting slots, assignments, and exams
    pub async fn get_section(
        db: &DatabaseConnection,
        section_id: Uuid,
    ) -> Result<Option<SectionDetail>, DbErr> {
        let Some((section, Some(course))) = class_sections::Entity::find_by_id(section_id)
            .find_also_related(courses::Entity)
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        let instructor = faculty::Entity::find_by_id(section.instructor_id)
            .find_also_related(users::Entity)
            .one(db)
            .await?
            .and_then(|(member, user)| user.map(|u| (member, u)));

        let mut schedules = class_schedules::Entity::find()
            .filter(class_schedules::Column::SectionId.eq(section_id))
            .all(db)
            .await?;
        schedules.sort_by_key(|slot| (slot.day, slot.start_time));

        let assignments = assignments::Entity::find()
            .filter(assignments::Column::SectionId.eq(section_id))
            .order_by_asc(assignments::Column::DueDate)
            .all(db)
            .await?;

        let exams = exams::Entity::find()
            .filter(exams::Column::SectionId.eq(section_id))
            .order_by_asc(exams::Column::Date)
            .all(db)
            .await?;

        Ok(Some(SectionDetail {
            section,
            course,
            instructor,
            schedules,
            assignments,
            exams,
        }))
    }
}
