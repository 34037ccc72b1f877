pub mod config;
pub mod subjects;
