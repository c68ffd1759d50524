//! API handlers for stash.

pub mod file;
pub mod preview;
pub mod state;

pub(crate) use file::open_blob;
pub use file::{download_file, upload_file};
pub use preview::{preview_files, preview_image};
pub use state::{AppState, DEFAULT_MAX_UPLOAD_SIZE};
