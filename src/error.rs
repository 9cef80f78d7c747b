use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
