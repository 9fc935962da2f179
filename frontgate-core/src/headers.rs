//! HTTP header names and values for FrontGate.
//!
//! This module centralizes the header names used by the pipeline and the
//! fixed CORS policy attached to every response.

use hyper::HeaderMap;
use hyper::header::{self, HeaderValue};

/// Accept-Encoding request header.
pub const ACCEPT_ENCODING: &str = "accept-encoding";

/// Content-Encoding response header.
pub const CONTENT_ENCODING: &str = "content-encoding";

/// Content-Type header.
pub const CONTENT_TYPE: &str = "content-type";

/// Content-Length header.
pub const CONTENT_LENGTH: &str = "content-length";

/// X-Forwarded-For header - contains the originating client IP.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Access-Control-Allow-Origin response header.
pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "access-control-allow-origin";

/// Access-Control-Allow-Methods response header.
pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "access-control-allow-methods";

/// Access-Control-Allow-Headers response header.
pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "access-control-allow-headers";

/// Allowed origins advertised to browsers.
pub const CORS_ALLOW_ORIGIN: &str = "*";

/// Allowed methods advertised to browsers.
pub const CORS_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Allowed request headers advertised to browsers.
pub const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization, X-Requested-With";

/// Value of the `Server` header.
pub const SERVER_NAME: &str = concat!("FrontGate/", env!("CARGO_PKG_VERSION"));

/// All CORS headers as (name, value) pairs.
pub const CORS_HEADERS: &[(&str, &str)] = &[
    (ACCESS_CONTROL_ALLOW_ORIGIN, CORS_ALLOW_ORIGIN),
    (ACCESS_CONTROL_ALLOW_METHODS, CORS_ALLOW_METHODS),
    (ACCESS_CONTROL_ALLOW_HEADERS, CORS_ALLOW_HEADERS),
];

/// Inserts the CORS policy and the `Server` header into a response header map.
///
/// # Example
///
/// ```
/// use frontgate_core::headers::{apply_common_headers, ACCESS_CONTROL_ALLOW_ORIGIN};
/// use hyper::HeaderMap;
///
/// let mut headers = HeaderMap::new();
/// apply_common_headers(&mut headers);
/// assert_eq!(headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
/// ```
pub fn apply_common_headers(headers: &mut HeaderMap) {
    for (name, value) in CORS_HEADERS {
        headers.insert(*name, HeaderValue::from_static(*value));
    }
    headers.insert(header::SERVER, HeaderValue::from_static(SERVER_NAME));
}

/// Returns true if the `Accept-Encoding` header lists gzip.
///
/// Matching is a case-insensitive substring check, so `gzip;q=0.5` and
/// `x-gzip` both count.
pub fn accepts_gzip(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT_ENCODING)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_lowercase().contains("gzip"))
}
