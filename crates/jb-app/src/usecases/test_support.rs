//! In-memory fakes shared by the use case tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use jb_core::ports::{BlobIdGeneratorPort, BlobRepositoryError, BlobRepositoryPort};
use jb_core::{Blob, BlobId, BlobMetadata, JsonDocument};

#[derive(Default)]
pub struct InMemoryBlobRepository {
    rows: Mutex<HashMap<String, Blob>>,
    clock: AtomicI64,
    pub get_calls: AtomicUsize,
    pub put_calls: AtomicUsize,
    pub fail_with_storage_error: bool,
}

impl InMemoryBlobRepository {
    pub fn new() -> Self {
        Self {
            clock: AtomicI64::new(1_700_000_000_000),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_with_storage_error: true,
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn seed(&self, blob: Blob) {
        self.rows
            .lock()
            .unwrap()
            .insert(blob.id.as_str().to_string(), blob);
    }
}

#[async_trait]
impl BlobRepositoryPort for InMemoryBlobRepository {
    async fn put(&self, id: &BlobId, document: &JsonDocument) -> Result<Blob, BlobRepositoryError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_with_storage_error {
            return Err(BlobRepositoryError::Storage("disk full".to_string()));
        }

        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(id.as_str()) {
            return Err(BlobRepositoryError::DuplicateKey(id.to_string()));
        }

        let blob = Blob::new(
            id.clone(),
            document.clone(),
            self.clock.fetch_add(1, Ordering::SeqCst),
        );
        rows.insert(id.as_str().to_string(), blob.clone());
        Ok(blob)
    }

    async fn get(&self, id: &BlobId) -> Result<Option<Blob>, BlobRepositoryError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_with_storage_error {
            return Err(BlobRepositoryError::Storage("disk full".to_string()));
        }
        Ok(self.rows.lock().unwrap().get(id.as_str()).cloned())
    }

    async fn delete(&self, id: &BlobId) -> Result<bool, BlobRepositoryError> {
        Ok(self.rows.lock().unwrap().remove(id.as_str()).is_some())
    }

    async fn list_metadata(&self) -> Result<Vec<BlobMetadata>, BlobRepositoryError> {
        let mut rows: Vec<BlobMetadata> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .map(|blob| BlobMetadata {
                id: blob.id.clone(),
                created_at_ms: blob.created_at_ms,
            })
            .collect();
        rows.sort_by(|a, b| b.created_at_ms.cmp(&a.created_at_ms));
        Ok(rows)
    }
}

/// Hands out a scripted sequence of ids, then falls back to a counter.
#[derive(Default)]
pub struct ScriptedIdGenerator {
    script: Mutex<VecDeque<String>>,
    counter: AtomicUsize,
}

impl ScriptedIdGenerator {
    pub fn with_script(ids: &[&str]) -> Self {
        Self {
            script: Mutex::new(ids.iter().map(|s| s.to_string()).collect()),
            counter: AtomicUsize::new(0),
        }
    }
}

impl BlobIdGeneratorPort for ScriptedIdGenerator {
    fn generate(&self, length: usize) -> BlobId {
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            return BlobId::from_trusted(next);
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        BlobId::from_trusted(format!("{:0>width$}", n, width = length))
    }
}
