use anyhow::Result;
use jb_core::{Blob, BlobId, BlobMetadata, JsonDocument};

use crate::db::models::{BlobMetadataRow, BlobRow, NewBlobRow};
use crate::db::ports::{InsertMapper, RowMapper};

/// Documents are stored as compact JSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobRowMapper;

impl InsertMapper<Blob, NewBlobRow> for BlobRowMapper {
    fn to_row(&self, domain: &Blob) -> Result<NewBlobRow> {
        Ok(NewBlobRow {
            id: domain.id.as_str().to_string(),
            json: domain.document.to_json_string()?,
            created_at: domain.created_at_ms,
        })
    }
}

impl RowMapper<BlobRow, Blob> for BlobRowMapper {
    fn to_domain(&self, row: &BlobRow) -> Result<Blob> {
        Ok(Blob::new(
            BlobId::from_trusted(row.id.clone()),
            JsonDocument::from_json_str(&row.json)?,
            row.created_at,
        ))
    }
}

impl RowMapper<BlobMetadataRow, BlobMetadata> for BlobRowMapper {
    fn to_domain(&self, row: &BlobMetadataRow) -> Result<BlobMetadata> {
        Ok(BlobMetadata {
            id: BlobId::from_trusted(row.id.clone()),
            created_at_ms: row.created_at,
        })
    }
}
