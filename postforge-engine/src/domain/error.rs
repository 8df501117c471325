use postforge_generation::GenerationError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("post not found: {0}")]
    PostNotFound(Uuid),
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(reason: impl Into<String>) -> Self {
        DomainError::Validation(reason.into())
    }
}
