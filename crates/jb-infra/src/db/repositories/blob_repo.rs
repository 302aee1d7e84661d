use std::sync::Arc;

use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};
use diesel::SqliteConnection;
use jb_core::ports::{BlobRepositoryError, BlobRepositoryPort, ClockPort};
use jb_core::{Blob, BlobId, BlobMetadata, JsonDocument};
use tracing::debug;

use crate::db::models::{BlobMetadataRow, BlobRow, NewBlobRow};
use crate::db::ports::{DbExecutor, InsertMapper, RowMapper};
use crate::db::schema::blobs;

/// SQLite-backed blob store.
///
/// Diesel calls are blocking, so each operation runs on the blocking pool.
/// Concurrency control is left to SQLite (WAL: one writer, many readers).
pub struct DieselBlobRepository<E, M> {
    executor: E,
    mapper: M,
    clock: Arc<dyn ClockPort>,
}

impl<E, M> DieselBlobRepository<E, M> {
    pub fn new(executor: E, mapper: M, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            executor,
            mapper,
            clock,
        }
    }
}

impl<E, M> DieselBlobRepository<E, M>
where
    E: DbExecutor + Clone + 'static,
{
    async fn run_blocking<T, F>(&self, f: F) -> Result<T, BlobRepositoryError>
    where
        F: FnOnce(&mut SqliteConnection) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let executor = self.executor.clone();

        tokio::task::spawn_blocking(move || executor.run(f))
            .await
            .map_err(|e| BlobRepositoryError::Storage(format!("blocking task failed: {e}")))?
            .map_err(map_storage_error)
    }
}

fn map_storage_error(err: anyhow::Error) -> BlobRepositoryError {
    match err.downcast_ref::<DieselError>() {
        Some(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)) => {
            BlobRepositoryError::DuplicateKey(info.message().to_string())
        }
        _ => BlobRepositoryError::Storage(format!("{err:#}")),
    }
}

fn map_row_error(err: anyhow::Error) -> BlobRepositoryError {
    BlobRepositoryError::Storage(format!("{err:#}"))
}

#[async_trait]
impl<E, M> BlobRepositoryPort for DieselBlobRepository<E, M>
where
    E: DbExecutor + Clone + 'static,
    M: InsertMapper<Blob, NewBlobRow>
        + RowMapper<BlobRow, Blob>
        + RowMapper<BlobMetadataRow, BlobMetadata>,
{
    async fn put(&self, id: &BlobId, document: &JsonDocument) -> Result<Blob, BlobRepositoryError> {
        let blob = Blob::new(id.clone(), document.clone(), self.clock.now_ms());
        let row = self.mapper.to_row(&blob).map_err(map_row_error)?;

        self.run_blocking(move |conn| {
            diesel::insert_into(blobs::table)
                .values(&row)
                .execute(conn)?;
            Ok(())
        })
        .await
        .map_err(|e| match e {
            BlobRepositoryError::DuplicateKey(_) => BlobRepositoryError::DuplicateKey(id.to_string()),
            other => other,
        })?;

        debug!(blob_id = %blob.id, "Inserted blob row");
        Ok(blob)
    }

    async fn get(&self, id: &BlobId) -> Result<Option<Blob>, BlobRepositoryError> {
        let key = id.as_str().to_string();

        let row = self
            .run_blocking(move |conn| {
                let row = blobs::table
                    .filter(blobs::id.eq(&key))
                    .select(BlobRow::as_select())
                    .first::<BlobRow>(conn)
                    .optional()?;
                Ok(row)
            })
            .await?;

        row.map(|row| RowMapper::<BlobRow, Blob>::to_domain(&self.mapper, &row))
            .transpose()
            .map_err(map_row_error)
    }

    async fn delete(&self, id: &BlobId) -> Result<bool, BlobRepositoryError> {
        let key = id.as_str().to_string();

        let removed = self
            .run_blocking(move |conn| {
                let affected =
                    diesel::delete(blobs::table.filter(blobs::id.eq(&key))).execute(conn)?;
                Ok(affected)
            })
            .await?;

        Ok(removed > 0)
    }

    async fn list_metadata(&self) -> Result<Vec<BlobMetadata>, BlobRepositoryError> {
        let rows = self
            .run_blocking(|conn| {
                let rows = blobs::table
                    .select(BlobMetadataRow::as_select())
                    .order((blobs::created_at.desc(), blobs::id.asc()))
                    .load::<BlobMetadataRow>(conn)?;
                Ok(rows)
            })
            .await?;

        rows.iter()
            .map(|row| RowMapper::<BlobMetadataRow, BlobMetadata>::to_domain(&self.mapper, row))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(map_row_error)
    }
}
