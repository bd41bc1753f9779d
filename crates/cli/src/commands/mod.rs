pub mod catalog;
pub mod chat;
pub mod config;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}
