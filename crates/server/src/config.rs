use models::{coursework::UPCOMING_LIMIT, semester::Semester};
use std::{net::SocketAddr, str::FromStr};
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Server settings, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub oidc_issuer_url: String,
    pub bind_addr: SocketAddr,
    /// Term used by the schedule, dashboards, and catalog detail pages
    pub current_semester: Semester,
    /// Cap on upcoming assignments and exams
    pub upcoming_limit: u64,
    pub run_migrations: bool,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            oidc_issuer_url: required("OIDC_ISSUER_URL")?,
            bind_addr: parse_or("BIND_ADDR", get("BIND_ADDR"), DEFAULT_BIND_ADDR.parse())?,
            current_semester: parse_or(
                "CURRENT_SEMESTER",
                get("CURRENT_SEMESTER"),
                Ok(Semester::default()),
            )?,
            upcoming_limit: parse_or("UPCOMING_LIMIT", get("UPCOMING_LIMIT"), Ok(UPCOMING_LIMIT))?,
            run_migrations: match get("RUN_MIGRATIONS") {
                Some(value) => parse_bool("RUN_MIGRATIONS", &value)?,
                None => true,
            },
        })
    }
}

fn parse_or<T>(
    key: &'static str,
    value: Option<String>,
    default: Result<T, T::Err>,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    let (raw, parsed) = match value {
        Some(value) => {
            let parsed = value.trim().parse();
            (value, parsed)
        }
        None => (String::new(), default),
    };

    parsed.map_err(|err| ConfigError::Invalid {
        key,
        value: raw,
        reason: err.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
