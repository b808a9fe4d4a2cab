//! Request timing middleware.
//!
//! Every request is logged with its method, matched route, status and
//! duration. Routes are logged by their template (`/matches`), never the raw
//! URI, so query strings stay out of the logs.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};

/// Requests slower than this are logged as warnings.
pub const SLOW_REQUEST: Duration = Duration::from_millis(100);

/// Route label for requests that did not match any route.
const UNMATCHED: &str = "<unmatched>";

/// Middleware that logs request timing.
///
/// Must be added with `Router::layer` so the matched route is known.
pub async fn request_timing(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED.to_owned());
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed = start.elapsed();
    let status = response.status().as_u16();
    let duration_ms = elapsed.as_millis() as u64;

    if is_slow(elapsed) {
        tracing::warn!(%method, %route, status, duration_ms, "Slow request");
    } else {
        tracing::debug!(%method, %route, status, duration_ms, "Request completed");
    }

    response
}

fn is_slow(elapsed: Duration) -> bool {
    elapsed > SLOW_REQUEST
}
