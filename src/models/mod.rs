pub mod project;
pub mod record;
pub mod time_entry;
