use crate::dtos::{catalog::SectionResponse, notice::Notice};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Outcome of an enroll or drop, with the section's updated seat counts
#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentActionResponse {
    pub notice: Notice,
    pub section: SectionResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentStatusResponse {
    pub section_id: Uuid,
    pub enrolled: bool,
}
