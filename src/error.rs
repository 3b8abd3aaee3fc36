use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeedyError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to (de)serialize config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("stdin must be a tty")]
    NotATty,
}

pub type Result<T, E = SpeedyError> = std::result::Result<T, E>;
