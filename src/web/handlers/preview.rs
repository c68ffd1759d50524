//! Preview handlers.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::header,
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::preview::{image_mime_type, PreviewDescriptor};
use crate::web::dto::PreviewQuery;
use crate::web::error::ApiError;
use crate::web::handlers::{open_blob, AppState};

/// GET /preview?files=a,b - Preview a batch of files.
///
/// Always 200 once names are present; per-file failures are reported inside
/// the array, one element per requested name, in request order.
pub async fn preview_files(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<PreviewDescriptor>>, ApiError> {
    let query =
        PreviewQuery::from_pairs(&pairs).ok_or_else(|| ApiError::bad_request("No files specified."))?;

    let previews = state.renderer.render_batch(&query.files).await?;

    Ok(Json(previews))
}

/// GET /preview/image/:filename - Stream the raw bytes of an image.
pub async fn preview_image(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let (body, size) = open_blob(&state.store, &filename).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, image_mime_type(&filename))
        .header(header::CONTENT_LENGTH, size)
        .body(body)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            ApiError::internal("Failed to build response").plain()
        })
}
