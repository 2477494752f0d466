pub mod catalog_data;
pub mod coursework;
pub mod credit_hours;
pub mod days;
pub mod role;
pub mod schedule;
pub mod semester;
