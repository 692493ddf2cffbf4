pub mod config;
pub mod init;
pub mod query;
pub mod quarterise;
pub mod show;
