use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("feed returned HTTP {0}")]
    Status(u16),
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error("feed returned no records")]
    EmptyPayload,
}
