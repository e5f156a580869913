//! PostgreSQL store tests. Run with a reachable `DATABASE_URL`:
//! `cargo test --test repository_mapping -- --ignored`

use sqlx::PgPool;
use std::sync::Arc;
use short_url_service::domain::entities::NewMapping;
use short_url_service::domain::repositories::{MappingStore, StoreVariant};
use short_url_service::error::StoreError;
use short_url_service::infrastructure::persistence::PgMappingStore;

fn store(pool: PgPool) -> PgMappingStore {
    PgMappingStore::new(Arc::new(pool))
}

fn mapping(code: &str, long_url: &str) -> NewMapping {
    NewMapping::durable(code.to_string(), long_url.to_string())
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_insert_and_find_by_short_code(pool: PgPool) {
    let repo = store(pool);

    let created = repo
        .insert(mapping("abc123", "https://example.com"))
        .await
        .unwrap();
    assert_eq!(created.short_code, "abc123");
    assert!(created.expires_at.is_none());

    let found = repo.find_by_short_code("abc123").await.unwrap().unwrap();
    assert_eq!(found.long_url, "https://example.com");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_find_by_long_url(pool: PgPool) {
    let repo = store(pool);
    repo.insert(mapping("abc123", "https://example.com/x"))
        .await
        .unwrap();

    let found = repo
        .find_by_long_url("https://example.com/x")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.short_code, "abc123");

    assert!(
        repo.find_by_long_url("https://example.com/y")
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_find_unknown_code(pool: PgPool) {
    let repo = store(pool);

    assert!(repo.find_by_short_code("missing").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_code_is_rejected(pool: PgPool) {
    let repo = store(pool);
    repo.insert(mapping("dup", "https://example.com/1"))
        .await
        .unwrap();

    let result = repo.insert(mapping("dup", "https://example.com/2")).await;

    assert_eq!(result, Err(StoreError::DuplicateCode("dup".to_string())));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_long_url_is_rejected_by_plain_insert(pool: PgPool) {
    let repo = store(pool);
    repo.insert(mapping("one", "https://example.com/same"))
        .await
        .unwrap();

    let result = repo.insert(mapping("two", "https://example.com/same")).await;

    assert!(matches!(result, Err(StoreError::LongUrlExists(_))));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_insert_if_absent_returns_existing(pool: PgPool) {
    let repo = store(pool);

    let first = repo
        .insert_if_absent(mapping("first", "https://example.com/same"))
        .await
        .unwrap();
    let second = repo
        .insert_if_absent(mapping("second", "https://example.com/same"))
        .await
        .unwrap();

    assert_eq!(first.short_code, "first");
    assert_eq!(second.short_code, "first");
    assert!(repo.find_by_short_code("second").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_concurrent_insert_if_absent_single_winner(pool: PgPool) {
    let repo = Arc::new(store(pool));

    let mut handles = Vec::new();
    for i in 0..8 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.insert_if_absent(mapping(&format!("code{i}"), "https://example.com/race"))
                .await
                .unwrap()
                .short_code
        }));
    }

    let mut codes = Vec::new();
    for handle in handles {
        codes.push(handle.await.unwrap());
    }
    codes.dedup();
    assert_eq!(codes.len(), 1);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_variant_and_ping(pool: PgPool) {
    let repo = store(pool);

    assert_eq!(repo.variant(), StoreVariant::Durable);
    assert!(repo.ping().await.is_ok());
}
