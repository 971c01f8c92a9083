use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
