//! Blob domain model.
//!
//! A blob is one stored JSON document plus its identifier and creation time.
//! It is created once and never mutated afterwards.

mod document;

pub use document::{DocumentError, JsonDocument};

use crate::ids::BlobId;

#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub id: BlobId,
    pub document: JsonDocument,
    /// Milliseconds since the Unix epoch, assigned at write time.
    pub created_at_ms: i64,
}

impl Blob {
    pub fn new(id: BlobId, document: JsonDocument, created_at_ms: i64) -> Self {
        Self {
            id,
            document,
            created_at_ms,
        }
    }
}

/// Blob listing entry without the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobMetadata {
    pub id: BlobId,
    pub created_at_ms: i64,
}
