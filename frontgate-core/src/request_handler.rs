//! HTTP request handling.
//!
//! This module contains the per-request pipeline of the frontend server.
//!
//! # Architecture
//!
//! The request handling flow:
//! 1. Derive the client identity (peer IP, or trusted `X-Forwarded-For`)
//! 2. Apply rate limiting; rejected requests get 429 and are not recorded
//! 3. Dispatch on the method: `OPTIONS` preflight, `GET`/`HEAD`, `POST`
//! 4. Route `/api/*` to the JSON API and everything else to the bundle
//! 5. Gzip the body when enabled, accepted and worthwhile
//! 6. Attach CORS and `Server` headers, log, and record metrics

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::HeaderValue;
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::context::ServerContext;
use crate::error::{FrontGateError, Result};
use crate::types::ConfigProvider;
use crate::{api, client_ip, compression, content_type, headers, static_files};

/// Handles an incoming HTTP request.
///
/// The body type is left generic: request bodies are never read, since no
/// endpoint takes input.
///
/// # Returns
///
/// Always returns `Ok`. Failures are turned into 404, 429, 500 or 501
/// responses and never abort the connection.
pub async fn handle_request<C, B>(
    req: Request<B>,
    peer: SocketAddr,
    ctx: Arc<ServerContext<C>>,
) -> std::result::Result<Response<Full<Bytes>>, Infallible>
where
    C: ConfigProvider,
{
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let client = client_ip::client_identity(
        req.headers(),
        peer,
        ctx.config().trust_forwarded_for(),
    );
    let accepts_gzip = headers::accepts_gzip(req.headers());

    if !ctx.limiter().admit(&client).await {
        let err = FrontGateError::RateLimitExceeded(client.clone());
        warn!(client = %client, method = %method, path = %path, "{}", err);
        let mut response = create_error_response(err.status_code(), &err.user_message());
        headers::apply_common_headers(response.headers_mut());
        return Ok(response);
    }

    let mut response = match dispatch(&method, &path, accepts_gzip, &ctx).await {
        Ok(response) => response,
        Err(err) => {
            if err.is_server_error() {
                error!(client = %client, method = %method, path = %path, error = %err, "Request failed");
            } else {
                warn!(client = %client, method = %method, path = %path, error = %err, "Request failed");
            }
            error_response_for(&err, api::is_api_path(&path))
        }
    };

    if method == Method::HEAD {
        let (parts, _) = response.into_parts();
        response = Response::from_parts(parts, Full::new(Bytes::new()));
    }
    headers::apply_common_headers(response.headers_mut());

    let elapsed = started.elapsed();
    info!(
        client = %client,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "Request handled"
    );
    ctx.metrics().record(&path, elapsed).await;

    Ok(response)
}

/// Routes an admitted request on method and path.
async fn dispatch<C: ConfigProvider>(
    method: &Method,
    path: &str,
    accepts_gzip: bool,
    ctx: &ServerContext<C>,
) -> Result<Response<Full<Bytes>>> {
    match *method {
        Method::OPTIONS => empty_response(StatusCode::NO_CONTENT),
        Method::GET | Method::HEAD => {
            if api::is_api_path(path) {
                serve_api(path, accepts_gzip, ctx).await
            } else {
                serve_static(path, accepts_gzip, ctx).await
            }
        }
        Method::POST if api::is_api_path(path) => serve_api(path, accepts_gzip, ctx).await,
        Method::POST => Err(FrontGateError::FileNotFound(path.to_string())),
        _ => Ok(create_error_response(
            StatusCode::NOT_IMPLEMENTED,
            "Method not implemented",
        )),
    }
}

async fn serve_api<C: ConfigProvider>(
    path: &str,
    accepts_gzip: bool,
    ctx: &ServerContext<C>,
) -> Result<Response<Full<Bytes>>> {
    let body = api::respond(path, ctx.metrics()).await?;
    let gzip = compression::should_compress(
        ctx.config().gzip_enabled(),
        accepts_gzip,
        content_type::JSON,
    );
    encoded_response(StatusCode::OK, content_type::JSON, Bytes::from(body), gzip)
}

async fn serve_static<C: ConfigProvider>(
    path: &str,
    accepts_gzip: bool,
    ctx: &ServerContext<C>,
) -> Result<Response<Full<Bytes>>> {
    let file = static_files::resolve_static_path(path, ctx.config().static_config()).await;
    let content = ctx.cache().get_or_load(&file).await?;
    let mime = content_type::content_type_for(&file);
    let gzip = compression::should_compress(ctx.config().gzip_enabled(), accepts_gzip, mime);

    debug!(path = %path, file = %file.display(), content_type = mime, gzip, "Serving static file");
    encoded_response(StatusCode::OK, mime, content, gzip)
}

/// Builds a response with `Content-Type` and a `Content-Length` matching the
/// bytes actually sent, gzipping first when `gzip` is set.
fn encoded_response(
    status: StatusCode,
    content_type: &str,
    body: Bytes,
    gzip: bool,
) -> Result<Response<Full<Bytes>>> {
    let mut builder = Response::builder()
        .status(status)
        .header(headers::CONTENT_TYPE, content_type);

    let body = if gzip {
        builder = builder.header(headers::CONTENT_ENCODING, "gzip");
        Bytes::from(compression::gzip(&body)?)
    } else {
        body
    };

    builder
        .header(headers::CONTENT_LENGTH, body.len())
        .body(Full::new(body))
        .map_err(|err| FrontGateError::HandlerFailure(err.to_string()))
}

fn empty_response(status: StatusCode) -> Result<Response<Full<Bytes>>> {
    Response::builder()
        .status(status)
        .body(Full::new(Bytes::new()))
        .map_err(|err| FrontGateError::HandlerFailure(err.to_string()))
}

/// Maps a pipeline error onto a response. API errors carry a JSON body.
fn error_response_for(err: &FrontGateError, is_api: bool) -> Response<Full<Bytes>> {
    if is_api {
        json_error_response(err)
    } else {
        create_error_response(err.status_code(), &err.user_message())
    }
}

/// Creates a JSON error response `{"error": ..., "status": ...}`.
pub fn json_error_response(err: &FrontGateError) -> Response<Full<Bytes>> {
    let body = api::error_body(err);
    let length = body.len();
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = err.status_code();
    response.headers_mut().insert(
        headers::CONTENT_TYPE,
        HeaderValue::from_static(content_type::JSON),
    );
    response
        .headers_mut()
        .insert(headers::CONTENT_LENGTH, HeaderValue::from(length));
    response
}

/// Creates a standardized error response.
///
/// Builds an HTTP response with the given status code and plain text message.
/// Falls back to a minimal 500 response if building fails (should never happen
/// with valid StatusCode).
///
/// # Example
///
/// ```
/// use frontgate_core::request_handler::create_error_response;
/// use hyper::StatusCode;
///
/// let response = create_error_response(StatusCode::NOT_FOUND, "File not found");
/// assert_eq!(response.status(), StatusCode::NOT_FOUND);
/// ```
pub fn create_error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(headers::CONTENT_TYPE, "text/plain")
        .body(Full::new(Bytes::from(message.to_string())))
        .unwrap_or_else(|_| fallback_error_response())
}

fn fallback_error_response() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from("Internal Server Error")));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}
