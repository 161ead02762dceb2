use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config in {}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },

    #[error("No config file found in {} or any parent directory", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Project '{name}' not found. Available projects: {}", available.join(", "))]
    ProjectNotFound {
        name: String,
        available: Vec<String>,
    },
}
