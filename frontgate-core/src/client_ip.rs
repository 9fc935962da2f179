//! Client identity for rate limiting.
//!
//! The identity is the textual IP address of the peer socket. When the
//! server sits behind a trusted reverse proxy, the rightmost valid address in
//! `X-Forwarded-For` is used instead, since that is the one appended by the
//! nearest proxy.

use hyper::HeaderMap;
use std::net::{IpAddr, SocketAddr};

use crate::headers;

/// Returns the rate limiting key for a request.
///
/// # Example
///
/// ```
/// use frontgate_core::client_ip::client_identity;
/// use hyper::HeaderMap;
///
/// let peer = "203.0.113.7:51234".parse().unwrap();
/// assert_eq!(client_identity(&HeaderMap::new(), peer, false), "203.0.113.7");
/// ```
pub fn client_identity(headers: &HeaderMap, peer: SocketAddr, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for
        && let Some(ip) = headers
            .get(headers::X_FORWARDED_FOR)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_client_ip_from_xff)
    {
        return ip;
    }

    peer_ip(peer)
}

/// Textual IP of the peer, with IPv4-mapped IPv6 addresses shown as IPv4.
fn peer_ip(peer: SocketAddr) -> String {
    match peer.ip() {
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => v4.to_string(),
            None => v6.to_string(),
        },
        ip => ip.to_string(),
    }
}

/// Extract client IP from x-forwarded-for header (last valid IP)
fn extract_client_ip_from_xff(xff: &str) -> Option<String> {
    xff.split(',')
        .map(|ip| ip.trim())
        .filter(|ip| !ip.is_empty())
        .rfind(|ip| is_valid_ip_format(ip))
        .map(|ip| ip.trim_start_matches('[').trim_end_matches(']').to_string())
}

/// Validates IP address format, accepting bracketed IPv6 (e.g., [::1])
fn is_valid_ip_format(ip: &str) -> bool {
    if ip.is_empty() {
        return false;
    }

    let ip_to_parse = ip.trim_start_matches('[').trim_end_matches(']');
    ip_to_parse.parse::<IpAddr>().is_ok()
}
