use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use jb_core::ports::BlobRepositoryPort;
use jb_core::BlobId;
use tracing::debug;

use crate::error::BlobServiceError;
use crate::models::BlobView;

/// Answer for any id that cannot name a blob
pub const INVALID_BLOB_ID: &str = "Invalid blob ID format";
const RETRIEVE_FAILED: &str = "Failed to retrieve blob";

/// Use case for reading a blob back by id.
/// 按 id 读取 blob 的用例。
pub struct GetBlob {
    blob_repo: Arc<dyn BlobRepositoryPort>,
    id_length: usize,
}

impl GetBlob {
    pub fn from_ports(blob_repo: Arc<dyn BlobRepositoryPort>, id_length: usize) -> Self {
        Self {
            blob_repo,
            id_length,
        }
    }

    /// The id shape is checked before the store is queried. Absence is
    /// `NotFound`, never an internal error.
    #[tracing::instrument(name = "usecase.get_blob.execute", skip(self))]
    pub async fn execute(&self, raw_id: &str) -> Result<BlobView, BlobServiceError> {
        let id = BlobId::parse(raw_id, self.id_length).map_err(|e| {
            debug!(error = %e, "Rejected blob id");
            BlobServiceError::bad_request(INVALID_BLOB_ID)
        })?;

        let blob = self
            .blob_repo
            .get(&id)
            .await
            .map_err(|e| BlobServiceError::internal(RETRIEVE_FAILED, e))?
            .ok_or_else(|| BlobServiceError::NotFound("Blob not found".to_string()))?;

        let created_at = format_timestamp(blob.created_at_ms).ok_or_else(|| {
            BlobServiceError::internal(
                RETRIEVE_FAILED,
                format!("created_at out of range: {}", blob.created_at_ms),
            )
        })?;

        Ok(BlobView {
            id: blob.id.into_inner(),
            json: blob.document.into_value(),
            created_at,
        })
    }
}

/// Epoch milliseconds to `YYYY-MM-DDTHH:MM:SS.sssZ`
fn format_timestamp(ms: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::InMemoryBlobRepository;
    use jb_core::{Blob, JsonDocument};
    use serde_json::json;
    use std::sync::atomic::Ordering;

    fn seeded_repo() -> Arc<InMemoryBlobRepository> {
        let repo = Arc::new(InMemoryBlobRepository::new());
        repo.seed(Blob::new(
            BlobId::from_trusted("aaaaaaaaaa".to_string()),
            JsonDocument::new(json!({"a": 1, "b": [1, 2, 3]})),
            1_700_000_000_000,
        ));
        repo
    }

    #[tokio::test]
    async fn test_get_returns_document_and_iso_timestamp() {
        let uc = GetBlob::from_ports(seeded_repo(), 10);

        let view = uc.execute("aaaaaaaaaa").await.unwrap();

        assert_eq!(view.id, "aaaaaaaaaa");
        assert_eq!(view.json, json!({"a": 1, "b": [1, 2, 3]}));
        assert_eq!(view.created_at, "2023-11-14T22:13:20.000Z");
    }

    #[tokio::test]
    async fn test_absent_id_is_not_found() {
        let uc = GetBlob::from_ports(seeded_repo(), 10);

        match uc.execute("bbbbbbbbbb").await {
            Err(BlobServiceError::NotFound(msg)) => assert_eq!(msg, "Blob not found"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_id_never_reaches_store() {
        let repo = seeded_repo();
        let uc = GetBlob::from_ports(repo.clone(), 10);

        for raw in ["nonexistent", "short", "aaaa.aaaaa", "", "aaaaaaaaa/"] {
            let err = uc.execute(raw).await.unwrap_err();
            assert!(matches!(err, BlobServiceError::BadRequest(_)), "{raw}");
        }
        assert_eq!(repo.get_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_is_internal() {
        let uc = GetBlob::from_ports(Arc::new(InMemoryBlobRepository::failing()), 10);

        let err = uc.execute("aaaaaaaaaa").await.unwrap_err();
        assert_eq!(err.public_message(), RETRIEVE_FAILED);
    }

    #[test]
    fn test_format_timestamp_matches_iso_8601() {
        assert_eq!(format_timestamp(0).unwrap(), "1970-01-01T00:00:00.000Z");
        assert_eq!(
            format_timestamp(1_700_000_000_123).unwrap(),
            "2023-11-14T22:13:20.123Z"
        );
        assert!(format_timestamp(i64::MAX).is_none());
    }
}
