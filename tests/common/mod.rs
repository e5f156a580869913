#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use short_url_service::domain::entities::{NewMapping, UrlMapping};
use short_url_service::domain::repositories::{MappingStore, StoreVariant};
use short_url_service::error::StoreError;
use short_url_service::infrastructure::persistence::MemoryMappingStore;
use short_url_service::routes::api_router;
use short_url_service::state::AppState;
use std::sync::Arc;

pub const BASE_URL: &str = "http://localhost:3000";

pub fn create_test_state(store: Arc<dyn MappingStore>) -> AppState {
    AppState::new(store, BASE_URL, 10, 3600)
}

pub fn create_test_server(store: Arc<dyn MappingStore>) -> TestServer {
    TestServer::new(api_router(create_test_state(store))).unwrap()
}

pub fn durable_server() -> (TestServer, Arc<MemoryMappingStore>) {
    let store = Arc::new(MemoryMappingStore::durable());
    (create_test_server(store.clone()), store)
}

pub fn expiring_server() -> (TestServer, Arc<MemoryMappingStore>) {
    let store = Arc::new(MemoryMappingStore::expiring(3600));
    (create_test_server(store.clone()), store)
}

/// Extracts the short code from a composed short URL.
pub fn code_of(short_url: &str) -> String {
    short_url
        .strip_prefix(BASE_URL)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap()
        .to_string()
}

/// Store whose backend is always unreachable.
pub struct UnavailableStore(pub StoreVariant);

#[async_trait]
impl MappingStore for UnavailableStore {
    fn variant(&self) -> StoreVariant {
        self.0
    }

    async fn find_by_long_url(&self, _long_url: &str) -> Result<Option<UrlMapping>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_by_short_code(
        &self,
        _short_code: &str,
    ) -> Result<Option<UrlMapping>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn insert(&self, _new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn insert_if_absent(&self, _new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn close(&self) {}
}
