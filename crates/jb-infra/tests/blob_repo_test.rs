//! Blob Repository Tests
//! Blob 仓库测试

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use jb_core::ports::{BlobRepositoryError, BlobRepositoryPort, ClockPort};
use jb_core::{BlobId, JsonDocument};
use jb_infra::db::executor::DieselSqliteExecutor;
use jb_infra::db::mappers::BlobRowMapper;
use jb_infra::db::pool::init_db_pool;
use jb_infra::db::repositories::DieselBlobRepository;
use serde_json::json;
use tempfile::TempDir;

/// Clock that advances one millisecond per reading
struct SteppingClock {
    next: AtomicI64,
}

impl SteppingClock {
    fn starting_at(ms: i64) -> Arc<Self> {
        Arc::new(Self {
            next: AtomicI64::new(ms),
        })
    }
}

impl ClockPort for SteppingClock {
    fn now_ms(&self) -> i64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

type Repo = DieselBlobRepository<DieselSqliteExecutor, BlobRowMapper>;

fn open_repo(dir: &TempDir) -> (Repo, DieselSqliteExecutor) {
    let db_path = dir.path().join("jbin-test.db");
    let pool = init_db_pool(db_path.to_str().expect("utf-8 temp path"))
        .expect("Failed to create test DB pool");
    let executor = DieselSqliteExecutor::new(pool);
    let repo = DieselBlobRepository::new(
        executor.clone(),
        BlobRowMapper,
        SteppingClock::starting_at(1_704_067_200_000),
    );
    (repo, executor)
}

fn id(raw: &str) -> BlobId {
    BlobId::from_trusted(raw.to_string())
}

#[tokio::test]
async fn test_put_then_get_returns_same_document() {
    let dir = TempDir::new().unwrap();
    let (repo, _) = open_repo(&dir);

    let document = JsonDocument::new(json!({"a": 1, "nested": {"list": [1, 2.5, null, "x"]}}));
    let stored = repo
        .put(&id("aB3_x-9Qz1"), &document)
        .await
        .expect("Failed to put blob");

    assert_eq!(stored.created_at_ms, 1_704_067_200_000);

    let found = repo
        .get(&id("aB3_x-9Qz1"))
        .await
        .expect("Failed to get blob")
        .expect("Blob should exist");

    assert_eq!(found.id.as_str(), "aB3_x-9Qz1");
    assert_eq!(found.document, document);
    assert_eq!(found.created_at_ms, stored.created_at_ms);
}

#[tokio::test]
async fn test_get_missing_returns_none() {
    let dir = TempDir::new().unwrap();
    let (repo, _) = open_repo(&dir);

    let found = repo.get(&id("aaaaaaaaaa")).await.expect("get should not fail");
    assert!(found.is_none());
}

#[tokio::test]
async fn test_put_duplicate_key_is_rejected_and_keeps_original() {
    let dir = TempDir::new().unwrap();
    let (repo, _) = open_repo(&dir);

    repo.put(&id("dup0000000"), &JsonDocument::new(json!("first")))
        .await
        .expect("first put should succeed");

    let err = repo
        .put(&id("dup0000000"), &JsonDocument::new(json!("second")))
        .await
        .expect_err("second put should fail");

    match err {
        BlobRepositoryError::DuplicateKey(key) => assert_eq!(key, "dup0000000"),
        other => panic!("expected DuplicateKey, got {other:?}"),
    }

    let found = repo.get(&id("dup0000000")).await.unwrap().unwrap();
    assert_eq!(found.document, JsonDocument::new(json!("first")));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let (repo, _) = open_repo(&dir);

    repo.put(&id("gone000000"), &JsonDocument::new(json!([1, 2, 3])))
        .await
        .unwrap();

    assert!(repo.delete(&id("gone000000")).await.unwrap());
    assert!(!repo.delete(&id("gone000000")).await.unwrap());
    assert!(repo.get(&id("gone000000")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_metadata_orders_newest_first() {
    let dir = TempDir::new().unwrap();
    let (repo, _) = open_repo(&dir);

    for raw in ["first00000", "second0000", "third00000"] {
        repo.put(&id(raw), &JsonDocument::new(json!({"id": raw})))
            .await
            .unwrap();
    }

    let listed = repo.list_metadata().await.expect("list should succeed");
    let ids: Vec<&str> = listed.iter().map(|m| m.id.as_str()).collect();

    assert_eq!(ids, vec!["third00000", "second0000", "first00000"]);
    assert!(listed[0].created_at_ms > listed[2].created_at_ms);
}

#[tokio::test]
async fn test_concurrent_puts_all_persist() {
    let dir = TempDir::new().unwrap();
    let (repo, _) = open_repo(&dir);
    let repo = Arc::new(repo);

    let mut handles = Vec::new();
    for i in 0..16 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            let key = format!("conc{i:06}");
            repo.put(&BlobId::from_trusted(key.clone()), &JsonDocument::new(json!({"n": i})))
                .await
                .map(|_| key)
        }));
    }

    for handle in handles {
        let key = handle.await.unwrap().expect("concurrent put should succeed");
        let found = repo.get(&BlobId::from_trusted(key)).await.unwrap();
        assert!(found.is_some());
    }

    assert_eq!(repo.list_metadata().await.unwrap().len(), 16);
}

#[tokio::test]
async fn test_blobs_survive_reopen_after_checkpoint() {
    let dir = TempDir::new().unwrap();

    {
        let (repo, executor) = open_repo(&dir);
        repo.put(&id("keep000000"), &JsonDocument::new(json!({"kept": true})))
            .await
            .unwrap();
        executor.checkpoint().expect("checkpoint should succeed");
    }

    let (repo, _) = open_repo(&dir);
    let found = repo.get(&id("keep000000")).await.unwrap().unwrap();
    assert_eq!(found.document, JsonDocument::new(json!({"kept": true})));
}
