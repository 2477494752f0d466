use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Custom error type for parsing credit hours
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum ParseCreditHoursError {
    EmptyInput,
    NotANumber,
    TooPrecise,
    OutOfRange,
}

impl Display for ParseCreditHoursError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::EmptyInput => write!(f, "Empty input string"),
            Self::NotANumber => write!(f, "Credit hours must be a decimal number"),
            Self::TooPrecise => write!(f, "Credit hours allow at most one decimal place"),
            Self::OutOfRange => write!(f, "Credit hours must be between 0.0 and 99.9"),
        }
    }
}

impl std::error::Error for ParseCreditHoursError {}

/// Credit hours a course is worth, stored in tenths of an hour.
///
/// At most three digits with one decimal place, so `0.0..=99.9`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CreditHours(u16);

impl CreditHours {
    pub const MAX_TENTHS: u16 = 999;

    pub fn from_tenths(tenths: u16) -> Option<Self> {
        (tenths <= Self::MAX_TENTHS).then_some(Self(tenths))
    }

    pub fn tenths(self) -> u16 {
        self.0
    }

    pub fn as_f32(self) -> f32 {
        f32::from(self.0) / 10.0
    }
}

impl PartialOrd for CreditHours {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CreditHours {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl FromStr for CreditHours {
    type Err = ParseCreditHoursError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseCreditHoursError::EmptyInput);
        }

        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };

        if fraction.len() > 1 {
            return Err(ParseCreditHoursError::TooPrecise);
        }

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(ParseCreditHoursError::NotANumber);
        }

        let whole: u16 = whole
            .parse()
            .map_err(|_| ParseCreditHoursError::OutOfRange)?;
        let tenth: u16 = fraction.parse().unwrap_or(0);

        whole
            .checked_mul(10)
            .and_then(|tenths| tenths.checked_add(tenth))
            .and_then(Self::from_tenths)
            .ok_or(ParseCreditHoursError::OutOfRange)
    }
}

impl TryFrom<String> for CreditHours {
    type Error = ParseCreditHoursError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str(&s)
    }
}

impl From<CreditHours> for String {
    fn from(hours: CreditHours) -> Self {
        hours.to_string()
    }
}

impl Display for CreditHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}
