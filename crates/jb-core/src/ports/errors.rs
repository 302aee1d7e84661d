use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlobRepositoryError {
    /// The id is already taken. Ids are server-generated, so callers retry
    /// with a fresh one.
    #[error("blob id already exists: {0}")]
    DuplicateKey(String),

    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum BotVerificationError {
    #[error("verification request timed out")]
    Timeout,

    #[error("verification transport error: {0}")]
    Transport(String),

    #[error("invalid verification response: {0}")]
    InvalidResponse(String),
}
