//! JSON API served under `/api/`.
//!
//! Paths are split on `/` after trimming slashes. The first segment must be
//! `api` and the second names the endpoint; any further segments are ignored.

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{FrontGateError, Result};
use crate::metrics::MetricsCollector;

/// Sample catalogue returned by `/api/mock-data` for frontend development.
static MOCK_DATA: Lazy<Value> = Lazy::new(|| {
    json!({
        "albums": [
            {"id": 1, "title": "Blurryface", "year": 2015, "cover": "/images/blurryface.jpg"},
            {"id": 2, "title": "Trench", "year": 2018, "cover": "/images/trench.jpg"},
            {"id": 3, "title": "Scaled and Icy", "year": 2021, "cover": "/images/scaled.jpg"}
        ],
        "playlists": [
            {"id": 1, "name": "TOP Hits", "songs": 15, "duration": "45min"},
            {"id": 2, "name": "Fan Favorites", "songs": 23, "duration": "1h 12min"}
        ]
    })
});

/// Known API endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiEndpoint {
    Health,
    Stats,
    MockData,
}

impl ApiEndpoint {
    /// Resolves a request path such as `/api/health` to an endpoint.
    ///
    /// # Errors
    ///
    /// - [`FrontGateError::InvalidApiPath`] when the path has fewer than two
    ///   segments or does not start with `api`
    /// - [`FrontGateError::RouteNotFound`] naming an unknown endpoint
    ///
    /// # Example
    ///
    /// ```
    /// use frontgate_core::api::ApiEndpoint;
    ///
    /// assert_eq!(ApiEndpoint::parse("/api/health/").unwrap(), ApiEndpoint::Health);
    /// assert!(ApiEndpoint::parse("/api/").is_err());
    /// ```
    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        match segments.as_slice() {
            ["api", endpoint, ..] => match *endpoint {
                "health" => Ok(Self::Health),
                "stats" => Ok(Self::Stats),
                "mock-data" => Ok(Self::MockData),
                other => Err(FrontGateError::RouteNotFound(other.to_string())),
            },
            _ => Err(FrontGateError::InvalidApiPath(path.to_string())),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

/// Returns true if the request path belongs to the API branch.
pub fn is_api_path(path: &str) -> bool {
    path.starts_with("/api/")
}

/// Produces the pretty-printed JSON body for an API path.
pub async fn respond(path: &str, metrics: &MetricsCollector) -> Result<Vec<u8>> {
    let body = match ApiEndpoint::parse(path)? {
        ApiEndpoint::Health => serde_json::to_vec_pretty(&HealthResponse {
            status: "ok",
            timestamp: chrono::Local::now().to_rfc3339(),
        })?,
        ApiEndpoint::Stats => serde_json::to_vec_pretty(&metrics.snapshot().await)?,
        ApiEndpoint::MockData => serde_json::to_vec_pretty(&*MOCK_DATA)?,
    };
    Ok(body)
}

/// Serializes an API error as `{"error": ..., "status": ...}`.
pub fn error_body(err: &FrontGateError) -> Vec<u8> {
    let body = json!({
        "error": err.user_message(),
        "status": err.status_code().as_u16(),
    });
    serde_json::to_vec_pretty(&body).unwrap_or_else(|_| err.user_message().into_bytes())
}
