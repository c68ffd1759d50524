//! Web API module for stash.
//!
//! This module exposes the blob store and the preview subsystem over HTTP:
//! upload, download, batch preview and the image byte-stream endpoint.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
