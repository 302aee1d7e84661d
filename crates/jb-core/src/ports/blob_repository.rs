use async_trait::async_trait;
use std::sync::Arc;

use crate::ports::errors::BlobRepositoryError;
use crate::{Blob, BlobId, BlobMetadata, JsonDocument};

/// Durable mapping from [`BlobId`] to document and creation time.
#[async_trait]
pub trait BlobRepositoryPort: Send + Sync {
    /// Insert a new row stamped with the current time.
    ///
    /// Must be durable before returning. Fails with
    /// [`BlobRepositoryError::DuplicateKey`] if `id` is taken.
    async fn put(&self, id: &BlobId, document: &JsonDocument) -> Result<Blob, BlobRepositoryError>;

    /// Point lookup. Absence is `Ok(None)`, not an error.
    async fn get(&self, id: &BlobId) -> Result<Option<Blob>, BlobRepositoryError>;

    /// Returns whether a row was actually removed.
    async fn delete(&self, id: &BlobId) -> Result<bool, BlobRepositoryError>;

    /// All blobs without bodies, newest first.
    async fn list_metadata(&self) -> Result<Vec<BlobMetadata>, BlobRepositoryError>;
}

#[async_trait]
impl<T: BlobRepositoryPort + ?Sized> BlobRepositoryPort for Arc<T> {
    async fn put(&self, id: &BlobId, document: &JsonDocument) -> Result<Blob, BlobRepositoryError> {
        (**self).put(id, document).await
    }

    async fn get(&self, id: &BlobId) -> Result<Option<Blob>, BlobRepositoryError> {
        (**self).get(id).await
    }

    async fn delete(&self, id: &BlobId) -> Result<bool, BlobRepositoryError> {
        (**self).delete(id).await
    }

    async fn list_metadata(&self) -> Result<Vec<BlobMetadata>, BlobRepositoryError> {
        (**self).list_metadata().await
    }
}
