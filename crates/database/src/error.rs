use sea_orm::DbErr;
use thiserror::Error;

/// Failures a service can report back to the person who asked for the change
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("You are already enrolled in this class.")]
    AlreadyEnrolled,

    #[error("This class is full.")]
    SectionFull,

    #[error("You are not enrolled in this class.")]
    NotEnrolled,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] DbErr),
}
