use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid purchase time (expected HH:MM, 24-hour): {0}")]
    InvalidTimeFormat(String),

    #[error("invalid purchase date (expected YYYY-MM-DD): {0}")]
    InvalidDateFormat(String),

    #[error("invalid amount in {field}: {value}")]
    InvalidAmount { field: String, value: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the parse failures that a malformed receipt can produce.
    /// The transport maps these to 400, everything else to 404/500.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidTimeFormat(_) | Error::InvalidDateFormat(_) | Error::InvalidAmount { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
