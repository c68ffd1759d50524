//! Blob storage module for stash.
//!
//! Provides the on-disk store behind uploads, downloads and previews.

mod blob;

pub use blob::{BlobMetadata, BlobStore};
