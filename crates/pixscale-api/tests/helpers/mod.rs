#![allow(dead_code)]

pub mod fixtures;
pub mod storage;

use axum_test::TestServer;
use pixscale_api::setup::routes::create_router;
use pixscale_api::AppState;
use pixscale_storage::{ensure_bucket, LocalStorage, Storage};
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_BUCKET: &str = "lab-2";

const TEST_UPLOAD_LIMIT: usize = 16 * 1024 * 1024;

/// Test application state
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<dyn Storage>,
    pub _temp_dir: Option<TempDir>,
}

impl TestApp {
    /// Get the HTTP test client
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Read a stored object back
    pub async fn stored_object(&self, name: &str) -> Vec<u8> {
        self.storage
            .get_object(name)
            .await
            .unwrap_or_else(|e| panic!("object {name} should exist: {e}"))
    }
}

/// Setup a test application backed by local storage in a fresh directory
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_limit(TEST_UPLOAD_LIMIT).await
}

pub async fn setup_test_app_with_limit(max_upload_size_bytes: usize) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage = LocalStorage::new(temp_dir.path(), TEST_BUCKET)
        .await
        .expect("Failed to create local storage");
    ensure_bucket(&storage)
        .await
        .expect("Failed to create bucket");

    let mut app = setup_test_app_with_storage(Arc::new(storage), max_upload_size_bytes);
    app._temp_dir = Some(temp_dir);
    app
}

/// Setup a test application around any storage backend
pub fn setup_test_app_with_storage(
    storage: Arc<dyn Storage>,
    max_upload_size_bytes: usize,
) -> TestApp {
    let state = Arc::new(AppState::new(storage.clone()));
    let app = create_router(state, max_upload_size_bytes);
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp {
        server,
        storage,
        _temp_dir: None,
    }
}
