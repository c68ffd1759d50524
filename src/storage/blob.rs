//! Blob storage for stash.
//!
//! Blobs live in a single flat namespace of names, laid out on disk in
//! shard directories keyed by the first two characters of the name.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::fs::{self, File};
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use crate::{Result, StashError};

/// Metadata of a stored blob, read fresh from the file system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobMetadata {
    /// Blob name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub last_modified: DateTime<Utc>,
}

/// File-system backed blob store.
///
/// Files are stored in a sharded directory structure:
/// ```text
/// {base_path}/
/// ├── ph/
/// │   └── photo.png
/// ├── no/
/// │   └── notes.txt
/// └── ...
/// ```
#[derive(Debug, Clone)]
pub struct BlobStore {
    /// Base directory for blob storage.
    base_path: PathBuf,
}

impl BlobStore {
    /// Create a new BlobStore rooted at the given path.
    ///
    /// The base directory will be created if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the base path of this store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Check whether `name` is usable as a blob name.
    ///
    /// Names are a single path component: no separators, no NUL, and not
    /// `.` or `..`.
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0'])
    }

    /// Save content under a freshly generated name.
    ///
    /// The stored name is `{uuid}.{ext}`, keeping the extension of
    /// `original_name` so previews classify the blob the same way.
    pub async fn save(&self, content: &[u8], original_name: &str) -> Result<String> {
        let stored_name = Self::generate_stored_name(original_name);
        self.save_with_name(content, &stored_name).await?;
        Ok(stored_name)
    }

    /// Save content under a specific name, overwriting any existing blob.
    pub async fn save_with_name(&self, content: &[u8], name: &str) -> Result<()> {
        let file_path = self.path_for_write(name)?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&file_path, content).await?;
        tracing::debug!(name, size = content.len(), "Stored blob");

        Ok(())
    }

    /// Load the whole blob into memory.
    pub async fn load(&self, name: &str) -> Result<Vec<u8>> {
        let file_path = self.path_for_read(name)?;

        fs::read(&file_path).await.map_err(|e| not_found_or_io(e, name))
    }

    /// Open a blob as a byte stream.
    ///
    /// Returns the stream together with the blob size.
    pub async fn open_read(&self, name: &str) -> Result<(ReaderStream<File>, u64)> {
        let file_path = self.path_for_read(name)?;

        let file = File::open(&file_path)
            .await
            .map_err(|e| not_found_or_io(e, name))?;
        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(blob_not_found(name));
        }

        Ok((ReaderStream::new(file), metadata.len()))
    }

    /// Read size and modification time of a blob.
    pub async fn stat(&self, name: &str) -> Result<BlobMetadata> {
        let file_path = self.path_for_read(name)?;

        let metadata = fs::metadata(&file_path)
            .await
            .map_err(|e| not_found_or_io(e, name))?;
        if !metadata.is_file() {
            return Err(blob_not_found(name));
        }

        Ok(BlobMetadata {
            name: name.to_string(),
            size: metadata.len(),
            last_modified: DateTime::<Utc>::from(metadata.modified()?),
        })
    }

    /// Check if a blob exists.
    ///
    /// Invalid names never exist.
    pub async fn exists(&self, name: &str) -> bool {
        let Ok(file_path) = self.path_for_read(name) else {
            return false;
        };

        fs::metadata(&file_path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    /// Delete a blob.
    ///
    /// Returns `true` if the blob was deleted, `false` if it didn't exist.
    pub async fn delete(&self, name: &str) -> Result<bool> {
        let Ok(file_path) = self.path_for_read(name) else {
            return Ok(false);
        };

        match fs::remove_file(&file_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the full file path for a blob name.
    ///
    /// The path is constructed as: {base_path}/{shard}/{name}.
    /// The name must already be valid.
    fn file_path(&self, name: &str) -> PathBuf {
        self.base_path.join(Self::get_shard(name)).join(name)
    }

    fn path_for_read(&self, name: &str) -> Result<PathBuf> {
        if Self::is_valid_name(name) {
            Ok(self.file_path(name))
        } else {
            Err(blob_not_found(name))
        }
    }

    fn path_for_write(&self, name: &str) -> Result<PathBuf> {
        if Self::is_valid_name(name) {
            Ok(self.file_path(name))
        } else {
            Err(StashError::Validation(format!("invalid blob name: {name:?}")))
        }
    }

    /// Get the shard directory name for a blob name.
    ///
    /// The first two characters of the name, with `.` replaced by `_` so a
    /// shard can never be `.` or `..`.
    fn get_shard(name: &str) -> String {
        name.chars()
            .take(2)
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }

    /// Extract the file extension from a filename.
    ///
    /// Returns "bin" if no extension is found.
    fn extract_extension(filename: &str) -> &str {
        Path::new(filename)
            .extension()
            .and_then(|s| s.to_str())
            .filter(|ext| Self::is_valid_name(ext))
            .unwrap_or("bin")
    }

    /// Generate a new UUID-based stored name with the extension of `original_name`.
    pub fn generate_stored_name(original_name: &str) -> String {
        let uuid = Uuid::new_v4();
        let ext = Self::extract_extension(original_name);
        format!("{uuid}.{ext}")
    }
}

fn blob_not_found(name: &str) -> StashError {
    StashError::NotFound(format!("Blob: {name}"))
}

fn not_found_or_io(e: io::Error, name: &str) -> StashError {
    if e.kind() == io::ErrorKind::NotFound {
        blob_not_found(name)
    } else {
        e.into()
    }
}
