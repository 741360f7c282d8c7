use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No billable tasks found for project {0}")]
    EmptyInput(u32),

    #[error("Failed to render report: {0}")]
    Render(#[source] std::io::Error),

    #[error("Invalid project id '{0}'. Must be a positive number.")]
    InvalidProjectId(String),

    #[error("Tasks file not found: {0}")]
    TasksFileNotFound(PathBuf),

    #[error("Failed to parse tasks file {path}: {source}")]
    TaskParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid task '{name}': {reason}")]
    InvalidTask { name: String, reason: String },

    #[error("File already exists: {0}")]
    OutputExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
