use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// A day of the week on which a class meets
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[cfg_attr(
    feature = "database",
    derive(sea_orm::EnumIter, sea_orm::DeriveActiveEnum),
    sea_orm(rs_type = "String", db_type = "Text")
)]
pub enum DayOfWeek {
    #[serde(rename = "MON")]
    #[cfg_attr(feature = "database", sea_orm(string_value = "MON"))]
    Monday,
    #[serde(rename = "TUE")]
    #[cfg_attr(feature = "database", sea_orm(string_value = "TUE"))]
    Tuesday,
    #[serde(rename = "WED")]
    #[cfg_attr(feature = "database", sea_orm(string_value = "WED"))]
    Wednesday,
    #[serde(rename = "THU")]
    #[cfg_attr(feature = "database", sea_orm(string_value = "THU"))]
    Thursday,
    #[serde(rename = "FRI")]
    #[cfg_attr(feature = "database", sea_orm(string_value = "FRI"))]
    Friday,
    #[serde(rename = "SAT")]
    #[cfg_attr(feature = "database", sea_orm(string_value = "SAT"))]
    Saturday,
    #[serde(rename = "SUN")]
    #[cfg_attr(feature = "database", sea_orm(string_value = "SUN"))]
    Sunday,
}

impl DayOfWeek {
    /// Every day, Monday first
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Three-letter code, e.g. `"MON"`
    pub fn code(self) -> &'static str {
        match self {
            Self::Monday => "MON",
            Self::Tuesday => "TUE",
            Self::Wednesday => "WED",
            Self::Thursday => "THU",
            Self::Friday => "FRI",
            Self::Saturday => "SAT",
            Self::Sunday => "SUN",
        }
    }
}

impl Display for DayOfWeek {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.code())
    }
}
