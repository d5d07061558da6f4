//! Request middleware: correlation ids and request metrics

use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use wordfam_monitoring::ServerMetrics;

/// Header carrying the correlation id
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Get correlation ID from headers or generate a new one
pub fn get_correlation_id(headers: &HeaderMap) -> String {
    headers
        .get(CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Runs the request inside a span carrying its correlation id and echoes the
/// id on the response.
pub async fn correlation_id_middleware(req: Request, next: Next) -> Response {
    let correlation_id = get_correlation_id(req.headers());
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let span = info_span!(
        "request",
        correlation_id = %correlation_id,
        method = %method,
        uri = %req.uri(),
    );

    let started = Instant::now();
    let mut response = next.run(req).instrument(span).await;
    ServerMetrics::record_http_request(
        &path,
        &method,
        response.status().as_u16(),
        started.elapsed().as_secs_f64() * 1000.0,
    );

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    response
}
