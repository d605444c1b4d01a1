pub mod command;
pub mod error_messages;
pub mod files;
pub mod git;
pub mod log;
