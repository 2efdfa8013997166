pub mod backup;
pub mod log;
pub mod project;
pub mod records;
pub mod tracking;
