pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod formats;
pub mod init;
pub mod list;
pub mod log;
pub mod new;
pub mod projects;
pub mod start;
pub mod status;
pub mod stop;
