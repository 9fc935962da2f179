//! Content type detection by file extension.

use std::path::Path;

use crate::defaults::FALLBACK_CONTENT_TYPE;

/// Content type of API responses.
pub const JSON: &str = "application/json";

/// Returns the MIME type for a file path based on its extension.
///
/// Unknown or missing extensions map to `application/octet-stream`.
///
/// # Example
///
/// ```
/// use frontgate_core::content_type::content_type_for;
/// use std::path::Path;
///
/// assert_eq!(content_type_for(Path::new("index.html")), "text/html");
/// assert_eq!(content_type_for(Path::new("blob.bin")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return FALLBACK_CONTENT_TYPE;
    };

    match extension.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" | "mjs" | "cjs" => "application/javascript",
        "json" | "map" => JSON,
        "webmanifest" => "application/manifest+json",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "xml" => "text/xml",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "ico" => "image/vnd.microsoft.icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "pdf" => "application/pdf",
        "wasm" => "application/wasm",
        "zip" => "application/zip",
        _ => FALLBACK_CONTENT_TYPE,
    }
}

/// Returns true if responses of this type may be gzip-compressed.
///
/// Textual types, JSON and JavaScript qualify.
pub fn is_compressible(content_type: &str) -> bool {
    content_type.starts_with("text/")
        || content_type.starts_with("application/json")
        || content_type.starts_with("application/javascript")
}
