//! Shared helpers for web API integration tests.

use std::sync::Arc;

use axum_test::TestServer;
use stash::web::handlers::AppState;
use stash::web::router::{create_health_router, create_router};
use stash::BlobStore;
use tempfile::TempDir;

/// A test server over a throwaway blob store.
pub struct TestApp {
    pub server: TestServer,
    pub store: BlobStore,
    _temp_dir: TempDir,
}

/// Create a test server with default settings.
pub fn create_test_app() -> TestApp {
    create_test_app_with(|state| state)
}

/// Create a test server, letting the caller adjust the application state.
pub fn create_test_app_with(configure: impl FnOnce(AppState) -> AppState) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = BlobStore::new(temp_dir.path()).expect("Failed to create blob store");

    let app_state = Arc::new(configure(AppState::new(store.clone())));
    let router = create_router(app_state, &[]).merge(create_health_router());

    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        store,
        _temp_dir: temp_dir,
    }
}

/// Store a blob directly, bypassing the upload endpoint.
pub async fn put_blob(store: &BlobStore, name: &str, content: &[u8]) {
    store
        .save_with_name(content, name)
        .await
        .expect("Failed to store test blob");
}
