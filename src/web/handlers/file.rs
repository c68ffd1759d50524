//! Upload and download handlers.

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::storage::BlobStore;
use crate::web::dto::UploadResponse;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::StashError;

/// Multipart field carrying the uploaded file.
const FILE_FIELD: &str = "file";

/// Generate a safe Content-Disposition header value for file downloads.
///
/// Control characters (CR and LF included) are stripped so the header cannot
/// be split. Names that are not plain ASCII get an ASCII-only fallback in
/// `filename` plus the exact name in an RFC 5987 `filename*` parameter.
fn content_disposition_header(filename: &str) -> String {
    let needs_encoding = !filename.is_ascii()
        || filename
            .chars()
            .any(|c| c.is_control() || c == '"' || c == '\\');

    if !needs_encoding {
        return format!("attachment; filename=\"{filename}\"");
    }

    let fallback: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| {
            if !c.is_ascii() || c == '"' || c == '\\' {
                '_'
            } else {
                c
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(filename)
    )
}

/// Open a blob for streaming, mapping failures to plain-text API errors.
pub(crate) async fn open_blob(
    store: &BlobStore,
    name: &str,
) -> Result<(Body, u64), ApiError> {
    match store.open_read(name).await {
        Ok((stream, size)) => Ok((Body::from_stream(stream), size)),
        Err(StashError::NotFound(_)) => Err(ApiError::not_found("File not found").plain()),
        Err(e) => {
            tracing::error!(name, error = %e, "Failed to open blob");
            Err(ApiError::internal("Failed to read file").plain())
        }
    }
}

/// POST /upload - Upload a file.
///
/// Request body: multipart/form-data with a "file" field.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!(error = %e, "Failed to read multipart field");
        multipart_error(e.status())
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content = field.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read file content");
            multipart_error(e.status())
        })?;

        upload = Some((filename, content.to_vec()));
    }

    let (original_name, content) =
        upload.ok_or_else(|| ApiError::bad_request("No file uploaded."))?;

    if content.len() as u64 > state.max_upload_size {
        let max_mb = state.max_upload_size / 1024 / 1024;
        return Err(ApiError::payload_too_large(format!(
            "File too large (max {max_mb}MB)"
        )));
    }

    let stored_name = state.store.save(&content, &original_name).await?;
    tracing::info!(
        stored_name = %stored_name,
        original_name = %original_name,
        size = content.len(),
        "File uploaded"
    );

    Ok(Json(UploadResponse {
        filename: stored_name,
        original_name,
        size: content.len() as u64,
    }))
}

fn multipart_error(status: StatusCode) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large("File too large")
    } else {
        ApiError::bad_request("Invalid multipart data")
    }
}

/// GET /download/:filename - Download a file.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let (body, size) = open_blob(&state.store, &filename).await?;

    let content_type = mime_guess::from_path(&filename)
        .first_or_octet_stream()
        .to_string();

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&filename),
        )
        .header(header::CONTENT_LENGTH, size)
        .body(body)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            ApiError::internal("Failed to build response").plain()
        })
}
