use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Subject)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .text()
                            .not_null()
                            .default("student"),
                    )
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create departments table
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Name).string().not_null())
                    .col(
                        ColumnDef::new(Departments::Code)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Departments::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        // Create faculty table, one row per faculty user
        manager
            .create_table(
                Table::create()
                    .table(Faculty::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Faculty::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Faculty::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Faculty::DepartmentId).uuid().not_null())
                    .col(ColumnDef::new(Faculty::Title).string().not_null())
                    .col(ColumnDef::new(Faculty::OfficeLocation).string().not_null())
                    .col(ColumnDef::new(Faculty::OfficeHours).text().not_null())
                    .col(
                        ColumnDef::new(Faculty::ResearchInterests)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-faculty-user_id")
                            .from(Faculty::Table, Faculty::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-faculty-department_id")
                            .from(Faculty::Table, Faculty::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::Code).string_len(20).not_null())
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::DepartmentId).uuid().not_null())
                    .col(ColumnDef::new(Courses::Description).text().not_null())
                    .col(ColumnDef::new(Courses::CreditHours).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-courses-department_id")
                            .from(Courses::Table, Courses::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create class_sections table, the counters are guarded by a check constraint
        manager
            .create_table(
                Table::create()
                    .table(ClassSections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassSections::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClassSections::CourseId).uuid().not_null())
                    .col(
                        ColumnDef::new(ClassSections::SectionNumber)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassSections::Semester)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassSections::InstructorId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClassSections::Location).string().not_null())
                    .col(ColumnDef::new(ClassSections::Capacity).integer().not_null())
                    .col(
                        ColumnDef::new(ClassSections::Enrolled)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .check(
                        Expr::col(ClassSections::Enrolled)
                            .between(Expr::val(0), Expr::col(ClassSections::Capacity)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-class_sections-course_id")
                            .from(ClassSections::Table, ClassSections::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-class_sections-instructor_id")
                            .from(ClassSections::Table, ClassSections::InstructorId)
                            .to(Faculty::Table, Faculty::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create class_schedules table
        manager
            .create_table(
                Table::create()
                    .table(ClassSchedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassSchedules::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClassSchedules::SectionId).uuid().not_null())
                    .col(ColumnDef::new(ClassSchedules::Day).text().not_null())
                    .col(ColumnDef::new(ClassSchedules::StartTime).time().not_null())
                    .col(ColumnDef::new(ClassSchedules::EndTime).time().not_null())
                    .check(
                        Expr::col(ClassSchedules::StartTime).lt(Expr::col(ClassSchedules::EndTime)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-class_schedules-section_id")
                            .from(ClassSchedules::Table, ClassSchedules::SectionId)
                            .to(ClassSections::Table, ClassSections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create enrollments junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Enrollments::SectionId).uuid().not_null())
                    .col(ColumnDef::new(Enrollments::DateEnrolled).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-student_id")
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-section_id")
                            .from(Enrollments::Table, Enrollments::SectionId)
                            .to(ClassSections::Table, ClassSections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create assignments table
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::SectionId).uuid().not_null())
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Description).text().not_null())
                    .col(
                        ColumnDef::new(Assignments::DueDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::PointsPossible)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-assignments-section_id")
                            .from(Assignments::Table, Assignments::SectionId)
                            .to(ClassSections::Table, ClassSections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create exams table
        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Exams::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Exams::SectionId).uuid().not_null())
                    .col(ColumnDef::new(Exams::Title).string().not_null())
                    .col(
                        ColumnDef::new(Exams::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Exams::Location).string().not_null())
                    .col(ColumnDef::new(Exams::DurationMinutes).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-exams-section_id")
                            .from(Exams::Table, Exams::SectionId)
                            .to(ClassSections::Table, ClassSections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Exams::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ClassSchedules::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ClassSections::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Faculty::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Subject,
    Username,
    FirstName,
    LastName,
    Email,
    Role,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
    Name,
    Code,
    Description,
}

#[derive(Iden)]
enum Faculty {
    Table,
    Id,
    UserId,
    DepartmentId,
    Title,
    OfficeLocation,
    OfficeHours,
    ResearchInterests,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Code,
    Name,
    DepartmentId,
    Description,
    CreditHours,
}

#[derive(Iden)]
enum ClassSections {
    Table,
    Id,
    CourseId,
    SectionNumber,
    Semester,
    InstructorId,
    Location,
    Capacity,
    Enrolled,
}

#[derive(Iden)]
enum ClassSchedules {
    Table,
    Id,
    SectionId,
    Day,
    StartTime,
    EndTime,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    Id,
    StudentId,
    SectionId,
    DateEnrolled,
}

#[derive(Iden)]
enum Assignments {
    Table,
    Id,
    SectionId,
    Title,
    Description,
    DueDate,
    PointsPossible,
}

#[derive(Iden)]
enum Exams {
    Table,
    Id,
    SectionId,
    Title,
    Date,
    Location,
    DurationMinutes,
}
