pub mod accounts;
pub mod catalog;
pub mod coursework;
pub mod dashboard;
pub mod enrollment;
pub mod import;
pub mod schedule;
