//! Preview descriptors and their JSON shape.

use serde::{Serialize, Serializer};

use super::PreviewKind;
use crate::datetime::to_rfc3339;
use crate::storage::BlobMetadata;

/// Note attached to blobs that have no content preview.
pub const NO_PREVIEW_MESSAGE: &str = "Preview not available for this file type";

/// Error text for names without a blob.
pub const NOT_FOUND_MESSAGE: &str = "File not found";

/// Error text for blobs whose content could not be read.
pub const READ_ERROR_MESSAGE: &str = "Error reading file content";

/// Preview of a single requested name.
///
/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewDescriptor {
    /// Image blob; bytes are fetched separately from `url`.
    Image { meta: BlobMetadata, url: String },
    /// Text blob with a bounded prefix of its content.
    Text { meta: BlobMetadata, snippet: String },
    /// Any other blob; metadata only.
    Other { meta: BlobMetadata },
    /// No blob under the requested name.
    NotFound { name: String },
    /// The blob exists but could not be read or decoded.
    ReadError { name: String },
}

impl PreviewDescriptor {
    /// Name the descriptor was rendered for.
    pub fn name(&self) -> &str {
        match self {
            PreviewDescriptor::Image { meta, .. }
            | PreviewDescriptor::Text { meta, .. }
            | PreviewDescriptor::Other { meta } => &meta.name,
            PreviewDescriptor::NotFound { name } | PreviewDescriptor::ReadError { name } => name,
        }
    }

    /// Kind of this descriptor.
    pub fn kind(&self) -> PreviewKind {
        match self {
            PreviewDescriptor::Image { .. } => PreviewKind::Image,
            PreviewDescriptor::Text { .. } => PreviewKind::Text,
            PreviewDescriptor::Other { .. } => PreviewKind::Other,
            PreviewDescriptor::NotFound { .. } => PreviewKind::NotFound,
            PreviewDescriptor::ReadError { .. } => PreviewKind::ReadError,
        }
    }

    /// Blob metadata, if the blob was found and stat'ed.
    pub fn metadata(&self) -> Option<&BlobMetadata> {
        match self {
            PreviewDescriptor::Image { meta, .. }
            | PreviewDescriptor::Text { meta, .. }
            | PreviewDescriptor::Other { meta } => Some(meta),
            PreviewDescriptor::NotFound { .. } | PreviewDescriptor::ReadError { .. } => None,
        }
    }
}

/// Wire form of a descriptor.
#[derive(Serialize)]
#[serde(untagged)]
enum PreviewBody<'a> {
    Found {
        filename: &'a str,
        #[serde(rename = "type")]
        kind: &'static str,
        size: u64,
        #[serde(rename = "lastModified")]
        last_modified: String,
        #[serde(flatten)]
        detail: FoundDetail<'a>,
    },
    Failed {
        filename: &'a str,
        error: &'static str,
    },
}

/// Kind-specific field of a found blob, flattened next to the metadata.
#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum FoundDetail<'a> {
    Url(&'a str),
    Snippet(&'a str),
    Message(&'static str),
}

impl<'a> PreviewBody<'a> {
    fn found(meta: &'a BlobMetadata, kind: PreviewKind, detail: FoundDetail<'a>) -> Self {
        PreviewBody::Found {
            filename: &meta.name,
            kind: kind.as_str(),
            size: meta.size,
            last_modified: to_rfc3339(&meta.last_modified),
            detail,
        }
    }
}

impl Serialize for PreviewDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        let body = match self {
            PreviewDescriptor::Image { meta, url } => {
                PreviewBody::found(meta, kind, FoundDetail::Url(url))
            }
            PreviewDescriptor::Text { meta, snippet } => {
                PreviewBody::found(meta, kind, FoundDetail::Snippet(snippet))
            }
            PreviewDescriptor::Other { meta } => {
                PreviewBody::found(meta, kind, FoundDetail::Message(NO_PREVIEW_MESSAGE))
            }
            PreviewDescriptor::NotFound { name } => PreviewBody::Failed {
                filename: name,
                error: NOT_FOUND_MESSAGE,
            },
            PreviewDescriptor::ReadError { name } => PreviewBody::Failed {
                filename: name,
                error: READ_ERROR_MESSAGE,
            },
        };

        body.serialize(serializer)
    }
}
