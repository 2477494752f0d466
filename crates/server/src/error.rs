use crate::dtos::notice::{Notice, NoticeLevel};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::ServiceError;
use log::{error, warn};
use sea_orm::DbErr;
use thiserror::Error;

const UNAUTHORIZED_MESSAGE: &str = "Please sign in to continue.";
const INTERNAL_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Anything a handler can fail with, rendered as a [`Notice`]
#[derive(Debug, Error)]
pub enum ApiError {
    /// No bearer token subject, or no active user behind it
    #[error("request has no known user")]
    Unauthorized,

    #[error("{source}")]
    Service {
        source: ServiceError,
        redirect_to: Option<String>,
    },
}

impl ApiError {
    /// Where the client should land after seeing the notice
    pub fn with_redirect(self, path: impl Into<String>) -> Self {
        match self {
            Self::Service { source, .. } => Self::Service {
                source,
                redirect_to: Some(path.into()),
            },
            other => other,
        }
    }

    pub fn not_found(entity: &'static str) -> Self {
        ServiceError::NotFound(entity).into()
    }

    pub fn status_and_notice(&self) -> (StatusCode, Notice) {
        let (status, level, message, redirect_to) = match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                NoticeLevel::Error,
                UNAUTHORIZED_MESSAGE.to_string(),
                None,
            ),
            Self::Service {
                source,
                redirect_to,
            } => {
                let (status, level) = match source {
                    ServiceError::AlreadyEnrolled | ServiceError::NotEnrolled => {
                        (StatusCode::CONFLICT, NoticeLevel::Warning)
                    }
                    ServiceError::SectionFull => (StatusCode::CONFLICT, NoticeLevel::Error),
                    ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, NoticeLevel::Error),
                    ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, NoticeLevel::Error),
                    ServiceError::Database(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, NoticeLevel::Error)
                    }
                };

                let message = match source {
                    ServiceError::Database(_) => INTERNAL_MESSAGE.to_string(),
                    other => other.to_string(),
                };

                (status, level, message, redirect_to.clone())
            }
        };

        let mut notice = Notice::new(level, message);
        notice.redirect_to = redirect_to;
        (status, notice)
    }
}

impl From<ServiceError> for ApiError {
    fn from(source: ServiceError) -> Self {
        Self::Service {
            source,
            redirect_to: None,
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        ServiceError::Database(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Service {
                source: ServiceError::Database(err),
                ..
            } => error!("Database error while handling request: {err}"),
            Self::Unauthorized => warn!("Rejected request: {self}"),
            _ => {}
        }

        let (status, notice) = self.status_and_notice();
        (status, Json(notice)).into_response()
    }
}
