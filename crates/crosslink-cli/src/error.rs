use crosslink::engine::error::EngineError;
use crosslink::workflows::assign::AssignmentError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    #[error("Failed to parse file '{path}': {message}", path = path.display())]
    FileParsing { path: PathBuf, message: String },

    #[error("Failed to serialize report: {0}")]
    ReportSerialization(#[from] toml::ser::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
