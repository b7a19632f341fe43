//! Per-request correlation ids.
//!
//! Clients present their guest token as a bearer header; it is a random
//! correlation identifier, not a credential, so it is logged and echoed but
//! never verified. Requests without one get a fresh UUID.

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::info;
use uuid::Uuid;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

pub async fn correlation_middleware(request: Request, next: Next) -> Response {
    let correlation_id = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|token| token.starts_with("guest_"))
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    info!(
        correlation_id = %correlation_id,
        method = %request.method(),
        path = %request.uri().path(),
        "request received"
    );

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response
            .headers_mut()
            .insert(CORRELATION_ID_HEADER, value);
    }
    response
}
