//! Cookie jar errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CookieError {
    #[error("cookie string has no name=value pair: {0:?}")]
    Malformed(String),

    #[error("cookie name is empty")]
    EmptyName,

    #[error("invalid expires attribute {value:?}: {source}")]
    InvalidExpiry {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid max-age attribute {0:?}")]
    InvalidMaxAge(String),

    #[error("cookie jar I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cookie jar file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
