use thiserror::Error;

#[derive(Error, Debug)]
pub enum CandlelabError {
    #[error("Fetch transport error: {0}")]
    FetchTransport(String),

    #[error("Venue returned no candles for the requested range")]
    EmptyHistory,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CandlelabError>;
