pub mod init;
pub mod templates;
