//! services/api/src/web/middleware.rs
//!
//! Request-id middleware: tags every request with an id and logs its outcome.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Reuses an inbound `x-request-id` or assigns a fresh UUID, echoes it on the
/// response, and logs method, path, status and latency inside a span carrying it.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        req.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let span = info_span!("request", id = %request_id, %method, %path);

    let start = Instant::now();
    let mut response = next.run(req).instrument(span.clone()).await;

    span.in_scope(|| {
        info!(
            status = response.status().as_u16(),
            "{} {} finished in {:?}",
            method,
            path,
            start.elapsed()
        );
    });

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
