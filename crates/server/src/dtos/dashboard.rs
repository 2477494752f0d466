use crate::dtos::{
    catalog::SectionResponse,
    coursework::{AssignmentResponse, ExamResponse},
};
use database::services::dashboard::Dashboard;
use serde::Serialize;
use utoipa::ToSchema;

/// One shape per role, tagged by `role`
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum DashboardResponse {
    Student {
        enrolled_sections: u64,
        upcoming_assignments: Vec<AssignmentResponse>,
        upcoming_exams: Vec<ExamResponse>,
    },
    Faculty {
        sections: Vec<SectionResponse>,
        total_students: i64,
        upcoming_exams: Vec<ExamResponse>,
    },
    Staff {
        departments: u64,
        courses: u64,
        sections: u64,
    },
    Admin {
        users: u64,
        active_users: u64,
        departments: u64,
        courses: u64,
        sections: u64,
        enrollments: u64,
    },
}

impl From<Dashboard> for DashboardResponse {
    fn from(dashboard: Dashboard) -> Self {
        match dashboard {
            Dashboard::Student(student) => Self::Student {
                enrolled_sections: student.enrolled_sections,
                upcoming_assignments: student
                    .upcoming_assignments
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                upcoming_exams: student.upcoming_exams.into_iter().map(Into::into).collect(),
            },
            Dashboard::Faculty(faculty) => Self::Faculty {
                sections: faculty
                    .sections
                    .into_iter()
                    .map(|(section, course)| SectionResponse::new(section, course.as_ref(), None))
                    .collect(),
                total_students: faculty.total_students,
                upcoming_exams: faculty.upcoming_exams.into_iter().map(Into::into).collect(),
            },
            Dashboard::Staff(staff) => Self::Staff {
                departments: staff.departments,
                courses: staff.courses,
                sections: staff.sections,
            },
            Dashboard::Admin(admin) => Self::Admin {
                users: admin.users,
                active_users: admin.active_users,
                departments: admin.departments,
                courses: admin.courses,
                sections: admin.sections,
                enrollments: admin.enrollments,
            },
        }
    }
}
