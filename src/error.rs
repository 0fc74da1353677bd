use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgroError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing required fields")]
    MissingFields,
}

impl AgroError {
    /// Whether the error was caused by the caller's input rather than the service
    pub fn is_validation(&self) -> bool {
        matches!(self, AgroError::InvalidInput(_) | AgroError::MissingFields)
    }
}

pub type Result<T> = std::result::Result<T, AgroError>;
