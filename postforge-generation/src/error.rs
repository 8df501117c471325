use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("transport error: {0}")]
    Transport(String),
}
