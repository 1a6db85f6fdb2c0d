//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: body size validation, body
//! collection, dispatch to the currency routes and access logging.

use crate::config::AppState;
use crate::handler::dispatch::CapturedResponse;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Outcome of reading a request body
enum BodyRead {
    Complete(Option<String>),
    TooLarge,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let mut entry = access_entry(&req, peer_addr);
    let server_name = state.config.http.server_name.as_str();
    let max_body_size = state.config.http.max_body_size;

    let (parts, body) = req.into_parts();
    logger::log_headers_count(parts.headers.len(), state.config.logging.show_headers);

    // 1. Reject oversized declared bodies before reading anything
    let response = if declared_too_large(&parts.headers, max_body_size) {
        http::build_413_response(server_name)
    } else {
        // 2. Collect the body, enforcing the limit for chunked uploads too
        match read_body(body, max_body_size).await {
            BodyRead::TooLarge => http::build_413_response(server_name),
            BodyRead::Complete(body) => {
                // 3. Dispatch
                let mut captured = CapturedResponse::default();
                state.dispatcher.dispatch(
                    parts.method.as_str(),
                    parts.uri.path(),
                    body.as_deref(),
                    &mut captured,
                );
                http::build_json_response(&captured, server_name)
            }
        }
    };

    if state.config.logging.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Build the access log entry from the request head
fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
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

/// Check the Content-Length header against the configured maximum
fn declared_too_large(headers: &hyper::HeaderMap, max_body_size: u64) -> bool {
    let Some(content_length) = headers.get("content-length") else {
        return false;
    };
    match content_length.to_str().map(str::parse::<u64>) {
        Ok(Ok(size)) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            true
        }
        Ok(Ok(_)) => false,
        _ => {
            logger::log_warning("Invalid Content-Length header, skipping size check");
            false
        }
    }
}

/// Collect the request body as text
///
/// An empty or unreadable body is reported as absent.
async fn read_body<B>(body: B, max_body_size: u64) -> BodyRead
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => {
            let bytes = collected.to_bytes();
            if bytes.is_empty() {
                BodyRead::Complete(None)
            } else {
                BodyRead::Complete(Some(String::from_utf8_lossy(&bytes).into_owned()))
            }
        }
        Err(e) if e.is::<LengthLimitError>() => {
            logger::log_warning(&format!(
                "Request body exceeded limit of {max_body_size} bytes"
            ));
            BodyRead::TooLarge
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            BodyRead::Complete(None)
        }
    }
}
