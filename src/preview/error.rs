//! Photo preview errors

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PreviewError {
    #[error("could not read {path}: {message}")]
    Read { path: String, message: String },

    #[error("could not decode image: {0}")]
    Decode(String),

    #[error("preview task failed: {0}")]
    Task(String),
}
