//! Download API integration tests.
//!
//! Run with: `cargo test -p imagelab-api --test download_test`

mod helpers;

use axum_test::TestServer;
use helpers::fixtures::red_png;
use helpers::{api_path, setup_test_app, upload_png};
use serde_json::{json, Value};
use std::io::{Cursor, Read};
use zip::ZipArchive;

async fn processed_grayscale(client: &TestServer) -> String {
    let filename = upload_png(client, red_png(), "red.png").await;
    let response = client
        .post(&api_path("/process"))
        .json(&json!({ "filename": filename, "operation": "grayscale" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    body["output_file"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_download_single_is_attachment() {
    let app = setup_test_app().await;
    let client = app.client();
    let output = processed_grayscale(client).await;

    let response = client
        .get(&api_path(&format!("/download/single/{}", output)))
        .await;
    assert_eq!(response.status_code(), 200);
    let disposition = response.headers()["content-disposition"].to_str().unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains(&output));

    let missing = client.get(&api_path("/download/single/ghost.png")).await;
    assert_eq!(missing.status_code(), 404);
}

#[tokio::test]
async fn test_download_batch_zips_found_files() {
    let app = setup_test_app().await;
    let client = app.client();
    let output = processed_grayscale(client).await;

    let response = client
        .get(&api_path(&format!(
            "/download/batch?files={},%20,ghost.png",
            output
        )))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.headers()["content-type"], "application/zip");
    assert_eq!(response.headers()["x-missing-files"], "ghost.png");

    let mut archive = ZipArchive::new(Cursor::new(response.as_bytes().to_vec())).unwrap();
    assert_eq!(archive.len(), 1);
    let mut entry = archive.by_name(&output).unwrap();
    let mut content = Vec::new();
    entry.read_to_end(&mut content).unwrap();
    assert!(image::load_from_memory(&content).is_ok());
}

#[tokio::test]
async fn test_download_batch_errors() {
    let app = setup_test_app().await;
    let client = app.client();

    let no_param = client.get(&api_path("/download/batch")).await;
    assert_eq!(no_param.status_code(), 400);

    let only_commas = client.get(&api_path("/download/batch?files=,,")).await;
    assert_eq!(only_commas.status_code(), 400);

    let none_found = client
        .get(&api_path("/download/batch?files=a.png,b.png"))
        .await;
    assert_eq!(none_found.status_code(), 404);
    let body: Value = none_found.json();
    assert_eq!(body["missing"], json!(["a.png", "b.png"]));
}
