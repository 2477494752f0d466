pub mod catalog;
pub mod coursework;
pub mod dashboard;
pub mod enrollment;
pub mod notice;
pub mod profile;
pub mod schedule;
