//! Static path resolution for the frontend bundle.
//!
//! Maps a request path onto a file under the bundle root:
//! - `/` maps to `index.html`
//! - a path naming an existing file maps to that file
//! - anything else maps to `index.html` so the client-side router can
//!   handle deep links (SPA fallback)
//!
//! Request paths are percent-decoded and normalized first. `.`, `..` and
//! empty segments are dropped, so the result always stays under the root.

use std::path::{Component, Path, PathBuf};

use crate::types::StaticConfig;

/// Resolves the file that should answer a static request.
///
/// The returned path is not guaranteed to exist: a missing `index.html`
/// surfaces later as a not-found error from the content cache.
pub async fn resolve_static_path(request_path: &str, config: &StaticConfig) -> PathBuf {
    let relative = sanitize_request_path(request_path);
    if relative.as_os_str().is_empty() {
        return config.index_path();
    }

    let candidate = config.bundle_root().join(&relative);
    match tokio::fs::metadata(&candidate).await {
        Ok(metadata) if metadata.is_file() => candidate,
        _ => config.index_path(),
    }
}

/// Turns a URL path into a relative filesystem path with no traversal.
///
/// # Example
///
/// ```
/// use frontgate_core::static_files::sanitize_request_path;
/// use std::path::PathBuf;
///
/// assert_eq!(sanitize_request_path("/static/js/app.js"), PathBuf::from("static/js/app.js"));
/// assert_eq!(sanitize_request_path("/../../etc/passwd"), PathBuf::from("etc/passwd"));
/// assert_eq!(sanitize_request_path("/"), PathBuf::new());
/// ```
pub fn sanitize_request_path(request_path: &str) -> PathBuf {
    let path = request_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let decoded = url_decode(path);

    decoded
        .split(['/', '\\'])
        .flat_map(|segment| Path::new(segment).components())
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

/// Decode URL-encoded string (percent-encoding)
/// Properly handles multi-byte UTF-8 sequences.
fn url_decode(input: &str) -> String {
    let mut bytes = Vec::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            // Try to read two hex digits
            let hex: String = chars.by_ref().take(2).collect();
            if hex.len() == 2
                && hex.bytes().all(|b| b.is_ascii_hexdigit())
                && let Ok(byte) = u8::from_str_radix(&hex, 16)
            {
                bytes.push(byte);
                continue;
            }
            // If decoding failed, keep original characters
            bytes.extend_from_slice(b"%");
            bytes.extend_from_slice(hex.as_bytes());
        } else {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}
