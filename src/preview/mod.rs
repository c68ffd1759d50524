//! File preview module for stash.
//!
//! This module turns blob names into lightweight previews:
//! - Extension-based classification into image, text or other
//! - Image previews by reference to a separate byte-stream endpoint
//! - Bounded text snippets
//! - Per-name failure isolation inside a batch

mod classify;
mod descriptor;
mod render;

pub use classify::{classify, image_mime_type, ContentClass, PreviewKind, FALLBACK_MIME_TYPE};
pub use descriptor::{
    PreviewDescriptor, NOT_FOUND_MESSAGE, NO_PREVIEW_MESSAGE, READ_ERROR_MESSAGE,
};
pub use render::{
    PreviewOptions, PreviewRenderer, DEFAULT_IMAGE_URL_PREFIX, DEFAULT_SNIPPET_LIMIT,
};
