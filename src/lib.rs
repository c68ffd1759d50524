//! stash - a minimal network file service.
//!
//! Clients upload files, download them by name, and ask for lightweight
//! previews: image references, text snippets or bare metadata.

pub mod config;
pub mod datetime;
pub mod error;
pub mod logging;
pub mod preview;
pub mod storage;
pub mod web;

pub use config::Config;
pub use error::{Result, StashError};
pub use preview::{
    classify, ContentClass, PreviewDescriptor, PreviewKind, PreviewOptions,
    PreviewRenderer,
};
pub use storage::{BlobMetadata, BlobStore};
pub use web::WebServer;
