use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Foreign-key lookup indexes, `(table, column)`
const LOOKUP_INDEXES: [(&str, &str); 10] = [
    ("faculty", "department_id"),
    ("courses", "department_id"),
    ("class_sections", "course_id"),
    ("class_sections", "instructor_id"),
    ("class_sections", "semester"),
    ("class_schedules", "section_id"),
    ("enrollments", "section_id"),
    ("assignments", "section_id"),
    ("exams", "section_id"),
    ("assignments", "due_date"),
];

fn index_name(table: &str, column: &str) -> String {
    format!("idx_{table}_{column}")
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // A student holds at most one enrollment per section
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_student_section")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .col(Enrollments::SectionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        for (table, column) in LOOKUP_INDEXES {
            manager
                .create_index(
                    Index::create()
                        .name(index_name(table, column))
                        .table(Alias::new(table))
                        .col(Alias::new(column))
                        .to_owned(),
                )
                .await?;
        }

        // Index on exams.date for upcoming-exam queries
        manager
            .create_index(
                Index::create()
                    .name("idx_exams_date")
                    .table(Exams::Table)
                    .col(Exams::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        manager
            .drop_index(Index::drop().name("idx_exams_date").to_owned())
            .await?;

        for (table, column) in LOOKUP_INDEXES.iter().rev() {
            manager
                .drop_index(Index::drop().name(index_name(table, column)).to_owned())
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name("idx_enrollments_student_section")
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Enrollments {
    Table,
    StudentId,
    SectionId,
}

#[derive(Iden)]
enum Exams {
    Table,
    Date,
}
