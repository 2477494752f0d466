use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::Deref,
    str::FromStr,
};

/// The semester used when no other term is configured
pub const DEFAULT_SEMESTER: &str = "Spring 2025";

/// An opaque academic term token, e.g. `"Spring 2025"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Semester(String);

impl Semester {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Semester {
    fn default() -> Self {
        Self::new(DEFAULT_SEMESTER)
    }
}

impl Deref for Semester {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for Semester {
    type Err = String;

    /// Trims surrounding whitespace and rejects empty tokens
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err("semester token must not be empty".to_string());
        }

        Ok(Self::new(token))
    }
}

impl Display for Semester {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_from_str_trims() {
        let semester = Semester::from_str("  Fall 2024 ").unwrap();
        assert_eq!(semester.as_str(), "Fall 2024");
    }

    #[test]
    fn test_semester_rejects_blank() {
        assert!(Semester::from_str("   ").is_err());
    }

    #[test]
    fn test_semester_default() {
        assert_eq!(Semester::default().to_string(), DEFAULT_SEMESTER);
    }
}
