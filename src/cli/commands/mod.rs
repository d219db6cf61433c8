pub mod add;
pub mod capture;
pub mod config;
pub mod extract;
pub mod init;
pub mod migrate;
pub mod tasks;
