//! Response DTOs for the web API.

use serde::Serialize;

/// Response of `POST /upload`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Name the blob was stored under; use it for download and preview.
    pub filename: String,
    /// Filename supplied by the client.
    pub original_name: String,
    /// Size in bytes.
    pub size: u64,
}

/// Response of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"OK"`.
    pub status: &'static str,
    /// Time of the check, RFC 3339.
    pub timestamp: String,
}
