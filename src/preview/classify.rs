//! Extension-based classification of blob names.

use std::path::Path;

/// Outcome category of a preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewKind {
    /// Previewed by reference to the image byte-stream endpoint.
    Image,
    /// Previewed by a snippet of decoded text.
    Text,
    /// Metadata only.
    Other,
    /// No blob under that name.
    NotFound,
    /// Blob exists but its content could not be read or decoded.
    ReadError,
}

impl PreviewKind {
    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewKind::Image => "image",
            PreviewKind::Text => "text",
            PreviewKind::Other => "other",
            PreviewKind::NotFound => "not_found",
            PreviewKind::ReadError => "read_error",
        }
    }
}

/// Rendering strategy picked from a blob name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentClass {
    Image,
    Text,
    Other,
}

impl From<ContentClass> for PreviewKind {
    fn from(class: ContentClass) -> Self {
        match class {
            ContentClass::Image => PreviewKind::Image,
            ContentClass::Text => PreviewKind::Text,
            ContentClass::Other => PreviewKind::Other,
        }
    }
}

/// Image extensions and the MIME type each is served with.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
];

/// Extensions previewed as text.
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "json", "js", "css", "html", "htm", "xml", "csv", "log", "yaml", "yml", "toml",
    "rs", "py", "ts", "c", "h", "cpp", "java", "go", "sh", "ini",
];

/// MIME type for image extensions missing from the table.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Extension of `name`, without the dot.
///
/// Dot-files such as `.txt` have no extension.
fn extension(name: &str) -> Option<&str> {
    Path::new(name).extension().and_then(|ext| ext.to_str())
}

/// Pick the rendering strategy for a blob name.
///
/// Purely name based; the content is never inspected.
pub fn classify(name: &str) -> ContentClass {
    let Some(ext) = extension(name) else {
        return ContentClass::Other;
    };

    if IMAGE_TYPES
        .iter()
        .any(|(image_ext, _)| image_ext.eq_ignore_ascii_case(ext))
    {
        ContentClass::Image
    } else if TEXT_EXTENSIONS
        .iter()
        .any(|text_ext| text_ext.eq_ignore_ascii_case(ext))
    {
        ContentClass::Text
    } else {
        ContentClass::Other
    }
}

/// Content type the image byte-stream endpoint serves `name` with.
pub fn image_mime_type(name: &str) -> &'static str {
    extension(name)
        .and_then(|ext| {
            IMAGE_TYPES
                .iter()
                .find(|(image_ext, _)| image_ext.eq_ignore_ascii_case(ext))
        })
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK_MIME_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_images() {
        for name in ["a.jpg", "a.jpeg", "a.png", "a.gif", "a.bmp", "a.webp"] {
            assert_eq!(classify(name), ContentClass::Image, "{name}");
        }
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("HOLIDAY.JPG"), ContentClass::Image);
        assert_eq!(classify("photo.Png"), ContentClass::Image);
        assert_eq!(classify("README.MD"), ContentClass::Text);
    }

    #[test]
    fn test_classify_text() {
        for name in ["notes.txt", "README.md", "data.json", "app.js", "site.css", "index.html"] {
            assert_eq!(classify(name), ContentClass::Text, "{name}");
        }
        assert_eq!(classify("main.rs"), ContentClass::Text);
        assert_eq!(classify("config.toml"), ContentClass::Text);
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(classify("archive.zip"), ContentClass::Other);
        assert_eq!(classify("missing.doc"), ContentClass::Other);
        assert_eq!(classify("no_extension"), ContentClass::Other);
        assert_eq!(classify(".txt"), ContentClass::Other);
        assert_eq!(classify("trailing."), ContentClass::Other);
    }

    #[test]
    fn test_classify_uses_last_extension() {
        assert_eq!(classify("photo.png.zip"), ContentClass::Other);
        assert_eq!(classify("backup.tar.txt"), ContentClass::Text);
    }

    #[test]
    fn test_image_mime_type() {
        assert_eq!(image_mime_type("a.jpg"), "image/jpeg");
        assert_eq!(image_mime_type("a.JPEG"), "image/jpeg");
        assert_eq!(image_mime_type("a.png"), "image/png");
        assert_eq!(image_mime_type("a.gif"), "image/gif");
        assert_eq!(image_mime_type("a.bmp"), "image/bmp");
        assert_eq!(image_mime_type("a.webp"), "image/webp");
    }

    #[test]
    fn test_image_mime_type_fallback() {
        assert_eq!(image_mime_type("a.tiff"), FALLBACK_MIME_TYPE);
        assert_eq!(image_mime_type("notes.txt"), FALLBACK_MIME_TYPE);
        assert_eq!(image_mime_type("noext"), FALLBACK_MIME_TYPE);
    }

    #[test]
    fn test_content_class_into_kind() {
        assert_eq!(PreviewKind::from(ContentClass::Image), PreviewKind::Image);
        assert_eq!(PreviewKind::from(ContentClass::Text), PreviewKind::Text);
        assert_eq!(PreviewKind::from(ContentClass::Other), PreviewKind::Other);
    }

    #[test]
    fn test_kind_as_str() {
        assert_eq!(ContentClass::Image.as_str(), "image");
        assert_eq!(PreviewKind::ReadError.as_str(), "read_error");
    }
}
