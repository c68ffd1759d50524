//! Shared application state for handlers.

use crate::config::Config;
use crate::preview::{PreviewOptions, PreviewRenderer};
use crate::storage::BlobStore;
use crate::Result;

/// Default maximum upload size (10MB).
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 10 * 1024 * 1024;

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Blob store backing uploads, downloads and previews.
    pub store: BlobStore,
    /// Preview renderer over the same store.
    pub renderer: PreviewRenderer,
    /// Maximum upload size in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Create a new application state with default preview options.
    pub fn new(store: BlobStore) -> Self {
        Self {
            renderer: PreviewRenderer::new(store.clone()),
            store,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }

    /// Build the state from configuration, creating the storage directory.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = BlobStore::new(&config.storage.path)?;
        tracing::info!(path = %config.storage.path, "Blob storage initialized");

        Ok(Self::new(store)
            .with_preview_options(PreviewOptions::from(&config.preview))
            .with_max_upload_size(config.storage.max_upload_bytes()))
    }

    /// Set the preview options.
    pub fn with_preview_options(mut self, options: PreviewOptions) -> Self {
        self.renderer = self.renderer.with_options(options);
        self
    }

    /// Set the maximum upload size in bytes.
    pub fn with_max_upload_size(mut self, max_upload_size: u64) -> Self {
        self.max_upload_size = max_upload_size;
        self
    }

    /// Route path of the image byte-stream endpoint.
    pub fn image_route(&self) -> String {
        format!("{}/:filename", self.renderer.options().image_url_prefix)
    }
}
