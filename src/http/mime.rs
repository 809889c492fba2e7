use std::path::Path;

/// Extension → MIME type table for servable resources. Immutable; an
/// extension outside this table is a build failure upstream, never a
/// silent default.
const CONTENT_TYPES: &[(&str, &str)] = &[
    // Image
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("ico", "image/x-icon"),
    // Text
    ("css", "text/css"),
    ("html", "text/html"),
    ("txt", "text/plain"),
    // Application
    ("pdf", "application/pdf"),
    ("json", "application/json"),
    ("js", "application/javascript"),
];

pub fn from_extension(extension: &str) -> Option<&'static str> {
    CONTENT_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

pub fn for_path(path: &Path) -> Option<&'static str> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(from_extension)
}
