//! Rendering of preview descriptors against the blob store.

use futures::future::join_all;

use super::{classify, ContentClass, PreviewDescriptor, PreviewKind};
use crate::config::PreviewConfig;
use crate::storage::{BlobMetadata, BlobStore};
use crate::{Result, StashError};

/// Default number of characters kept in a text snippet.
pub const DEFAULT_SNIPPET_LIMIT: usize = 500;

/// Default path prefix of the image byte-stream endpoint.
pub const DEFAULT_IMAGE_URL_PREFIX: &str = "/preview/image";

/// Tunables for preview rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Maximum number of characters in a text snippet.
    pub snippet_limit: usize,
    /// Path prefix that image URLs are built on.
    pub image_url_prefix: String,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            snippet_limit: DEFAULT_SNIPPET_LIMIT,
            image_url_prefix: DEFAULT_IMAGE_URL_PREFIX.to_string(),
        }
    }
}

impl From<&PreviewConfig> for PreviewOptions {
    fn from(config: &PreviewConfig) -> Self {
        Self {
            snippet_limit: config.snippet_limit,
            image_url_prefix: config.image_url_prefix.trim_end_matches('/').to_string(),
        }
    }
}

/// Produces preview descriptors for stored blobs.
///
/// Read-only with respect to the store. Each render owns nothing but the
/// descriptor it returns, so renders of any names may run concurrently.
#[derive(Debug, Clone)]
pub struct PreviewRenderer {
    store: BlobStore,
    options: PreviewOptions,
}

impl PreviewRenderer {
    /// Create a renderer with default options.
    pub fn new(store: BlobStore) -> Self {
        Self {
            store,
            options: PreviewOptions::default(),
        }
    }

    /// Replace the rendering options.
    pub fn with_options(mut self, options: PreviewOptions) -> Self {
        self.options = options;
        self
    }

    /// Current rendering options.
    pub fn options(&self) -> &PreviewOptions {
        &self.options
    }

    /// URL under which the image endpoint serves `name`.
    pub fn image_url(&self, name: &str) -> String {
        format!(
            "{}/{}",
            self.options.image_url_prefix,
            urlencoding::encode(name)
        )
    }

    /// Render the preview of a single name.
    ///
    /// Never fails: a missing blob becomes `NotFound` and any I/O or decode
    /// failure becomes `ReadError`.
    pub async fn render(&self, name: &str) -> PreviewDescriptor {
        if !self.store.exists(name).await {
            tracing::debug!(name, "Preview requested for missing blob");
            return PreviewDescriptor::NotFound {
                name: name.to_string(),
            };
        }

        let stat = self.store.stat(name).await;
        self.render_stat(name, stat).await
    }

    /// Render a blob known to exist, given the outcome of its stat.
    async fn render_stat(&self, name: &str, stat: Result<BlobMetadata>) -> PreviewDescriptor {
        let meta = match stat {
            Ok(meta) => meta,
            Err(e) => {
                tracing::warn!(name, error = %e, "Failed to stat blob");
                return PreviewDescriptor::ReadError {
                    name: name.to_string(),
                };
            }
        };

        match classify(name) {
            ContentClass::Image => PreviewDescriptor::Image {
                url: self.image_url(name),
                meta,
            },
            ContentClass::Text => match self.read_snippet(name).await {
                Ok(snippet) => PreviewDescriptor::Text { meta, snippet },
                Err(e) => {
                    tracing::warn!(name, error = %e, "Failed to read text preview");
                    PreviewDescriptor::ReadError {
                        name: name.to_string(),
                    }
                }
            },
            ContentClass::Other => PreviewDescriptor::Other { meta },
        }
    }

    /// Render previews for a batch of names.
    ///
    /// All names are rendered concurrently; the result holds one descriptor
    /// per input name, in input order. Only an empty batch is an error.
    pub async fn render_batch(&self, names: &[String]) -> Result<Vec<PreviewDescriptor>> {
        if names.is_empty() {
            return Err(StashError::RequestMalformed(
                "No files specified.".to_string(),
            ));
        }

        // join_all yields results by input position, not completion order.
        let previews = join_all(names.iter().map(|name| self.render(name))).await;

        tracing::debug!(
            requested = names.len(),
            not_found = previews
                .iter()
                .filter(|p| p.kind() == PreviewKind::NotFound)
                .count(),
            "Rendered preview batch"
        );

        Ok(previews)
    }

    /// Read the blob as UTF-8 and cut it down to the snippet limit.
    async fn read_snippet(&self, name: &str) -> Result<String> {
        let content = self.store.load(name).await?;
        let text = String::from_utf8(content)
            .map_err(|e| StashError::Validation(format!("{name} is not valid UTF-8: {e}")))?;

        Ok(truncate_chars(&text, self.options.snippet_limit).to_string())
    }
}

/// Longest prefix of `text` with at most `limit` characters.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
