//! HTTP response building module
//!
//! Turns dispatcher output into hyper responses, decoupled from routing.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::handler::dispatch::{CapturedResponse, CONTENT_TYPE_JSON};

const PAYLOAD_TOO_LARGE_BODY: &str = r#"{"status":413,"message":"Payload too large"}"#;
const INTERNAL_ERROR_BODY: &str = r#"{"status":500,"message":"Internal server error"}"#;

/// Build a response from a captured dispatcher reply
pub fn build_json_response(captured: &CapturedResponse, server_name: &str) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(captured.status)
        .header("Server", server_name);
    for (name, value) in &captured.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    builder
        .body(Full::new(Bytes::from(captured.body.clone())))
        .unwrap_or_else(|e| {
            log_build_error(&captured.status.to_string(), &e);
            build_500_response()
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response(server_name: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", CONTENT_TYPE_JSON)
        .header("Server", server_name)
        .body(Full::new(Bytes::from_static(PAYLOAD_TOO_LARGE_BODY.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            build_500_response()
        })
}

/// Bare 500 used when a response cannot be assembled
fn build_500_response() -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(Bytes::from_static(INTERNAL_ERROR_BODY.as_bytes())));
    *resp.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
    resp.headers_mut().insert(
        hyper::header::CONTENT_TYPE,
        hyper::header::HeaderValue::from_static(CONTENT_TYPE_JSON),
    );
    resp
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_json_response() {
        let captured = CapturedResponse {
            status: 404,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: r#"{"status":404,"message":"Record not found"}"#.to_string(),
        };
        let resp = build_json_response(&captured, "currency-server");
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["content-type"], "application/json");
        assert_eq!(resp.headers()["server"], "currency-server");
    }

    #[test]
    fn test_invalid_status_falls_back_to_500() {
        let captured = CapturedResponse {
            status: 42,
            headers: Vec::new(),
            body: String::new(),
        };
        let resp = build_json_response(&captured, "currency-server");
        assert_eq!(resp.status(), 500);
        assert_eq!(resp.headers()["content-type"], "application/json");
    }

    #[test]
    fn test_build_413_response() {
        let resp = build_413_response("currency-server");
        assert_eq!(resp.status(), 413);
        assert_eq!(resp.headers()["content-type"], "application/json");
    }
}
