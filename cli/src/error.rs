use thiserror::Error;
use unloader_core::error::ConfigError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    // 0: success
    // 1: scenario ended in a failure state (returned as a normal exit code)
    // 11: config error
    // 20: logging / IO error
    // 50: internal/uncategorized
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 11,
            CliError::Logging(_) | CliError::Io(_) => 20,
            CliError::Command(_) => 50,
        }
    }
}
