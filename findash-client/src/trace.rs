//! Wire-level debug tracing
//!
//! Side-effect-only logging of outgoing requests and incoming responses.
//! Emitting a trace never alters or blocks a dispatch resolution.

use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::{Request, StatusCode};
use serde_json::Value;
use tracing::debug;

/// Log an outgoing request: verb, URL, headers, and body when present
pub fn request(request: &Request) {
    debug!("[wire] {} {}", request.method(), request.url());
    log_headers(request.headers());
    if let Some(bytes) = request.body().and_then(|b| b.as_bytes()) {
        debug!("[wire]   body: {}", String::from_utf8_lossy(bytes));
    }
}

/// Log a resolved response: status, headers, and the parsed body if any
pub fn response(status: StatusCode, headers: &HeaderMap, payload: Option<&Value>) {
    debug!("[wire] <- {}", status);
    log_headers(headers);
    if let Some(body) = payload {
        debug!("[wire]   body: {}", body);
    }
}

fn log_headers(headers: &HeaderMap) {
    for (name, value) in headers {
        if name == AUTHORIZATION {
            // never log the bearer credential itself
            debug!("[wire]   {}: Bearer [REDACTED]", name);
        } else {
            debug!("[wire]   {}: {}", name, value.to_str().unwrap_or("<binary>"));
        }
    }
}
