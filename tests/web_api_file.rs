//! Web API File Tests
//!
//! Integration tests for upload, download and health endpoints.

mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use common::{create_test_app, create_test_app_with, put_blob};
use serde_json::Value;

fn file_form(name: &str, content: &[u8]) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(content.to_vec()).file_name(name.to_string()),
    )
}

// ============================================================================
// Upload Tests
// ============================================================================

#[tokio::test]
async fn test_upload_then_download() {
    let app = create_test_app();

    let response = app
        .server
        .post("/upload")
        .multipart(file_form("notes.txt", b"hello world"))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    let stored_name = body["filename"].as_str().unwrap().to_string();
    assert!(stored_name.ends_with(".txt"));
    assert_eq!(body["original_name"], "notes.txt");
    assert_eq!(body["size"], 11);

    let response = app.server.get(&format!("/download/{stored_name}")).await;

    response.assert_status_ok();
    assert_eq!(response.text(), "hello world");
    assert!(response
        .header("content-type")
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    assert_eq!(
        response.header("content-disposition"),
        format!("attachment; filename=\"{stored_name}\"").as_str()
    );
}

#[tokio::test]
async fn test_upload_then_preview() {
    let app = create_test_app();

    let body: Value = app
        .server
        .post("/upload")
        .multipart(file_form("README.md", b"# Title"))
        .await
        .json();
    let stored_name = body["filename"].as_str().unwrap().to_string();

    let preview: Value = app
        .server
        .get("/preview")
        .add_query_param("files", &stored_name)
        .await
        .json();

    assert_eq!(preview[0]["filename"], stored_name.as_str());
    assert_eq!(preview[0]["type"], "text");
    assert_eq!(preview[0]["snippet"], "# Title");
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let app = create_test_app();

    let form = MultipartForm::new().add_text("description", "no file here");
    let response = app.server.post("/upload").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "No file uploaded.");
}

#[tokio::test]
async fn test_upload_too_large() {
    let app = create_test_app_with(|state| state.with_max_upload_size(1024));

    let response = app
        .server
        .post("/upload")
        .multipart(file_form("big.bin", &[0u8; 2048]))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}

// ============================================================================
// Download Tests
// ============================================================================

#[tokio::test]
async fn test_download_binary() {
    let app = create_test_app();
    let content: Vec<u8> = (0..=255).cycle().take(10_000).collect();
    put_blob(&app.store, "archive.zip", &content).await;

    let response = app.server.get("/download/archive.zip").await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "application/zip");
    assert_eq!(response.header("content-length"), "10000");
    assert_eq!(response.as_bytes().as_ref(), content.as_slice());
}

#[tokio::test]
async fn test_download_not_found() {
    let app = create_test_app();

    let response = app.server.get("/download/missing.doc").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "File not found");
}

// ============================================================================
// Health Tests
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = create_test_app();

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
}
