//! Gallery API integration tests.
//!
//! Run with: `cargo test -p imagelab-api --test gallery_test`

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::fixtures::{red_png, solid_image};
use helpers::{api_path, file_part, setup_test_app, upload_png};
use image::ImageFormat;
use serde_json::Value;

#[tokio::test]
async fn test_index_and_health() {
    let app = setup_test_app().await;
    let client = app.client();

    let index = client.get("/").await;
    assert_eq!(index.status_code(), 200);
    let body: Value = index.json();
    assert!(body["endpoints"].is_object());
    assert!(body["version"].is_string());

    let health = client.get("/health").await;
    assert_eq!(health.status_code(), 200);
    let body: Value = health.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["face_detection"], false);
}

#[tokio::test]
async fn test_upload_red_png_appears_in_gallery() {
    let app = setup_test_app().await;
    let client = app.client();

    let filename = upload_png(client, red_png(), "red.png").await;
    assert!(filename.starts_with("red_"));
    assert!(filename.ends_with(".png"));

    let response = client.get(&api_path("/gallery")).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["total"], 1);

    let image = &body["images"][0];
    assert_eq!(image["filename"], filename.as_str());
    assert_eq!(image["metadata"]["width"], 100);
    assert_eq!(image["metadata"]["height"], 100);
    assert_eq!(image["metadata"]["format"], "PNG");
    assert_eq!(image["metadata"]["mode"], "RGB");
}

#[tokio::test]
async fn test_upload_keeps_valid_files_and_reports_invalid_ones() {
    let app = setup_test_app().await;
    let client = app.client();

    let form = MultipartForm::new()
        .add_part("files", file_part(red_png(), "red.png", "image/png"))
        .add_part(
            "files",
            file_part(
                solid_image(10, 10, [0, 0, 255], ImageFormat::Jpeg),
                "blue.jpg",
                "image/jpeg",
            ),
        )
        .add_part("files", file_part(b"hello".to_vec(), "notes.txt", "text/plain"));
    let response = client.post(&api_path("/upload")).multipart(form).await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["total_uploaded"], 2);
    assert_eq!(body["failed_uploads"].as_array().unwrap().len(), 1);
    assert_eq!(body["failed_uploads"][0]["filename"], "notes.txt");
    assert!(!body["failed_uploads"][0]["errors"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_upload_without_files_is_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let form = MultipartForm::new().add_text("comment", "no files here");
    let response = client.post(&api_path("/upload")).multipart(form).await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_upload_over_file_limit_is_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let mut form = MultipartForm::new();
    for i in 0..4 {
        form = form.add_part(
            "files",
            file_part(red_png(), &format!("{}.png", i), "image/png"),
        );
    }
    let response = client.post(&api_path("/upload")).multipart(form).await;
    assert_eq!(response.status_code(), 400);

    let gallery: Value = client.get(&api_path("/gallery")).await.json();
    assert_eq!(gallery["total"], 0);
}

#[tokio::test]
async fn test_get_info_and_delete_image() {
    let app = setup_test_app().await;
    let client = app.client();
    let filename = upload_png(client, solid_image(200, 100, [9, 9, 9], ImageFormat::Png), "wide.png").await;

    let response = client.get(&api_path(&format!("/image/{}", filename))).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.headers()["content-type"], "image/png");
    assert!(image::load_from_memory(response.as_bytes()).is_ok());

    let info: Value = client
        .get(&api_path(&format!("/image/{}/info", filename)))
        .await
        .json();
    assert_eq!(info["width"], 200);
    assert_eq!(info["aspect_ratio"], 2.0);
    assert_eq!(info["has_transparency"], false);

    let deleted = client.delete(&api_path(&format!("/image/{}", filename))).await;
    assert_eq!(deleted.status_code(), 200);

    let again = client.delete(&api_path(&format!("/image/{}", filename))).await;
    assert_eq!(again.status_code(), 404);
    let missing = client.get(&api_path(&format!("/image/{}", filename))).await;
    assert_eq!(missing.status_code(), 404);
    let body: Value = missing.json();
    assert_eq!(body["code"], "NOT_FOUND");
}
