//! Test helpers: build the application against temporary directories.
//!
//! Run from workspace root: `cargo test -p imagelab-api`.

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use imagelab_api::constants;
use imagelab_api::setup::initialize_app;
use imagelab_core::Config;
use tempfile::TempDir;

/// API path prefix for tests (`/api`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server and the directory backing both stores.
pub struct TestApp {
    pub server: TestServer,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Setup test app with isolated upload and processed directories.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config {
        upload_dir: temp_dir.path().join("uploads"),
        processed_dir: temp_dir.path().join("processed"),
        max_files_per_upload: 3,
        ..Config::default()
    };

    let (_state, app) = initialize_app(config)
        .await
        .expect("Failed to initialize app");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        _temp_dir: temp_dir,
    }
}

pub fn file_part(data: Vec<u8>, filename: &str, mime: &str) -> Part {
    Part::bytes(bytes::Bytes::from(data))
        .file_name(filename.to_string())
        .mime_type(mime.to_string())
}

/// Upload one PNG and return its generated gallery name.
pub async fn upload_png(client: &TestServer, data: Vec<u8>, filename: &str) -> String {
    let form = MultipartForm::new().add_part("files", file_part(data, filename, "image/png"));
    let response = client.post(&api_path("/upload")).multipart(form).await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    body["successful_uploads"][0]["filename"]
        .as_str()
        .expect("Expected generated filename in upload response")
        .to_string()
}
