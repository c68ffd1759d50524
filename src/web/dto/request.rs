//! Request DTOs for the web API.

/// Name of the query parameter listing files to preview.
pub const FILES_PARAM: &str = "files";

/// Names requested by `GET /preview`.
///
/// Accepts both `?files=a,b` and `?files=a&files=b` (and mixes of the two).
/// Segments are trimmed and empty segments are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewQuery {
    /// Requested names, in request order.
    pub files: Vec<String>,
}

impl PreviewQuery {
    /// Collect the requested names from raw query pairs.
    ///
    /// Returns `None` when no non-empty name is present.
    pub fn from_pairs(pairs: &[(String, String)]) -> Option<Self> {
        let files: Vec<String> = pairs
            .iter()
            .filter(|(key, _)| key == FILES_PARAM)
            .flat_map(|(_, value)| value.split(','))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        if files.is_empty() {
            None
        } else {
            Some(Self { files })
        }
    }
}
