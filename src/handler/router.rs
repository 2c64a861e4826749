//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: hands every request to the
//! favicon responder and turns its outcome into a response.

use crate::config::AppState;
use crate::favicon::{FaviconError, IconReader};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, REFERER, USER_AGENT};
use hyper::{Request, Response, StatusCode, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// Request bodies are never read, so they are dropped up front.
pub async fn handle_request<B, R: IconReader>(
    req: Request<B>,
    state: Arc<AppState<R>>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _) = req.into_parts();
    let req = Request::from_parts(parts, ());

    let response = match state.favicon.handle(&req).await {
        Ok(Some(resp)) => resp,
        Ok(None) => http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!("{} {}: {e}", req.method(), req.uri()));
            http::build_error_response(error_status(&e), &e.to_string())
        }
    };

    if state.config.logging.access_log {
        let entry = access_entry(&req, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Map a responder error to the status sent to the client
pub const fn error_status(err: &FaviconError) -> StatusCode {
    match err {
        // Icon file could not be read for this request
        FaviconError::Read { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        // Construction errors; they abort startup and never reach a request
        FaviconError::Config(_) | FaviconError::NotFound { .. } | FaviconError::IsDirectory { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn access_entry(
    req: &Request<()>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
