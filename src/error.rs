//! Error types shared by the description pipeline

use std::path::PathBuf;

/// Result type for description pipeline operations
pub type Result<T> = std::result::Result<T, DescriptionError>;

/// Error types for description pipeline operations
#[derive(thiserror::Error, Debug)]
pub enum DescriptionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
