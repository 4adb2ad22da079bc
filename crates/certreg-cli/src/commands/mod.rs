pub mod admin;
pub mod init;
pub mod mint;
pub mod query;
pub mod update;
