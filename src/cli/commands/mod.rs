//! Command implementations

pub mod init;
pub mod rebuild;
pub mod run;
pub mod status;
