use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::middleware::auth::AuthUser;

/// Audit logging middleware.
///
/// Logs every API request as a structured event. The subject is taken from
/// the response, where the auth middleware leaves it for authenticated
/// routes.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let sub = response
        .extensions()
        .get::<AuthUser>()
        .and_then(|user| user.sub.clone());
    tracing::info!(
        method = %method,
        path = %uri,
        status = status,
        latency_ms = started.elapsed().as_millis() as u64,
        sub = sub.as_deref(),
        "api_request"
    );

    response
}
