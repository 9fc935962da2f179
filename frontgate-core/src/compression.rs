//! Gzip response compression.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;

use crate::error::{FrontGateError, Result};

/// Gzip-compresses a response body with the default compression level.
pub fn gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| FrontGateError::Compression(format!("Gzip compression failed: {e}")))?;
    encoder
        .finish()
        .map_err(|e| FrontGateError::Compression(format!("Gzip compression finish failed: {e}")))
}

/// Returns true if a body should be gzip-compressed.
///
/// All three conditions must hold: compression is enabled, the client
/// accepts gzip, and the content type is compressible.
pub fn should_compress(enabled: bool, client_accepts_gzip: bool, content_type: &str) -> bool {
    enabled && client_accepts_gzip && crate::content_type::is_compressible(content_type)
}
