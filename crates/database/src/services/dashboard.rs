use crate::{
    entities::{
        assignments, class_sections, courses, departments, enrollments, exams, faculty, users,
    },
    services::{coursework::CourseworkService, schedule::ScheduleService},
};
use chrono::{DateTime, Utc};
use log::debug;
use models::{role::Role, semester::Semester};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct StudentDashboard {
    pub enrolled_sections: u64,
    pub upcoming_assignments: Vec<assignments::Model>,
    pub upcoming_exams: Vec<exams::Model>,
}

#[derive(Debug, Clone)]
pub struct FacultyDashboard {
    pub sections: Vec<(class_sections::Model, Option<courses::Model>)>,
    pub total_students: i64,
    pub upcoming_exams: Vec<exams::Model>,
}

#[derive(Debug, Clone)]
pub struct StaffDashboard {
    pub departments: u64,
    pub courses: u64,
    pub sections: u64,
}

#[derive(Debug, Clone)]
pub struct AdminDashboard {
    pub users: u64,
    pub active_users: u64,
    pub departments: u64,
    pub courses: u64,
    pub sections: u64,
    pub enrollments: u64,
}

/// Dashboard contents, one shape per role
#[derive(Debug, Clone)]
pub enum Dashboard {
    Student(StudentDashboard),
    Faculty(FacultyDashboard),
    Staff(StaffDashboard),
    Admin(AdminDashboard),
}

impl Dashboard {
    pub fn role(&self) -> Role {
        match self {
            Self::Student(_) => Role::Student,
            Self::Faculty(_) => Role::Faculty,
            Self::Staff(_) => Role::Staff,
            Self::Admin(_) => Role::Admin,
        }
    }
}

pub struct DashboardService;

impl DashboardService {
    /// Builds the dashboard for `user` according to their role
    pub async fn for_user(
        db: &DatabaseConnection,
        user: &users::Model,
        semester: &Semester,
        now: DateTime<Utc>,
        upcoming_limit: u64,
    ) -> Result<Dashboard, DbErr> {
        debug!("Building {} dashboard for {}", user.role, user.username);

        let dashboard = match user.role {
            Role::Student => {
                let student = Self::student(db, user.id, semester, now, upcoming_limit).await?;
                Dashboard::Student(student)
            }
            Role::Faculty => {
                let faculty = Self::faculty(db, user.id, semester, now, upcoming_limit).await?;
                Dashboard::Faculty(faculty)
            }
            Role::Staff => Dashboard::Staff(Self::staff(db, semester).await?),
            Role::Admin => Dashboard::Admin(Self::admin(db).await?),
        };

        Ok(dashboard)
    }

    async fn student(
        db: &DatabaseConnection,
        student_id: Uuid,
        semester: &Semester,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<StudentDashboard, DbErr> {
        let schedule = ScheduleService::weekly_schedule(db, student_id, semester).await?;
        let section_ids = schedule.section_ids();

        let upcoming_assignments =
            CourseworkService::upcoming_assignments(db, &section_ids, now, limit).await?;
        let upcoming_exams = CourseworkService::upcoming_exams(db, &section_ids, now, limit).await?;

        Ok(StudentDashboard {
            enrolled_sections: section_ids.len() as u64,
            upcoming_assignments,
            upcoming_exams,
        })
    }

    async fn faculty(
        db: &DatabaseConnection,
        user_id: Uuid,
        semester: &Semester,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<FacultyDashboard, DbErr> {
        let Some(member) = faculty::Entity::find()
            .filter(faculty::Column::UserId.eq(user_id))
            .one(db)
            .await?
        else {
            return Ok(FacultyDashboard {
                sections: vec![],
                total_students: 0,
                upcoming_exams: vec![],
            });
        };

        let sections = class_sections::Entity::find()
            .filter(class_sections::Column::InstructorId.eq(member.id))
            .filter(class_sections::Column::Semester.eq(semester.as_str()))
            .find_also_related(courses::Entity)
            .order_by_asc(courses::Column::Code)
            .order_by_asc(class_sections::Column::SectionNumber)
            .all(db)
            .await?;

        let section_ids: Vec<Uuid> = sections.iter().map(|(s, _)| s.id).collect();
        let total_students: i64 = sections.iter().map(|(s, _)| i64::from(s.enrolled)).sum();
        let upcoming_exams = CourseworkService::upcoming_exams(db, &section_ids, now, limit).await?;

        Ok(FacultyDashboard {
            sections,
            total_students,
            upcoming_exams,
        })
    }

    async fn staff(db: &DatabaseConnection, semester: &Semester) -> Result<StaffDashboard, DbErr> {
        Ok(StaffDashboard {
            departments: departments::Entity::find().count(db).await?,
            courses: courses::Entity::find().count(db).await?,
            sections: class_sections::Entity::find()
                .filter(class_sections::Column::Semester.eq(semester.as_str()))
                .count(db)
                .await?,
        })
    }

    async fn admin(db: &DatabaseConnection) -> Result<AdminDashboard, DbErr> {
        Ok(AdminDashboard {
            users: users::Entity::find().count(db).await?,
            active_users: users::Entity::find()
                .filter(users::Column::IsActive.eq(true))
                .count(db)
                .await?,
            departments: departments::Entity::find().count(db).await?,
            courses: courses::Entity::find().count(db).await?,
            sections: class_sections::Entity::find().count(db).await?,
            enrollments: enrollments::Entity::find().count(db).await?,
        })
    }
}
