pub mod dashboard;
pub mod init;
pub mod teams;
