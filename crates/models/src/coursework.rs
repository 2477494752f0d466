use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How many upcoming assignments or exams are shown by default
pub const UPCOMING_LIMIT: u64 = 5;

/// Which deliverables a listing should include, relative to now
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineStatus {
    /// Due now or later
    Upcoming,
    /// Already due
    Past,
    #[default]
    #[serde(other)]
    All,
}

impl DeadlineStatus {
    /// Parses a query value; anything unrecognized means every deliverable
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("upcoming") => Self::Upcoming,
            Some("past") => Self::Past,
            _ => Self::All,
        }
    }
}
