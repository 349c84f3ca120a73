use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, editing or saving a mapped table
#[derive(Error, Debug)]
pub enum MapperError {
    #[error("IO error on {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("Row index out of bounds: {index} (table has {count} rows)")]
    RowIndexOutOfBounds { index: usize, count: usize },

    #[error("Unknown field: {name}")]
    UnknownField { name: String },

    #[error("Data length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("No save destination: {0}")]
    MissingDestination(String),

    #[error("File {} already exists. Enable overwrite to replace it", path.display())]
    AlreadyExists { path: PathBuf },
}

impl MapperError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        MapperError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn unknown_field(name: &str) -> Self {
        MapperError::UnknownField {
            name: name.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MapperError>;
