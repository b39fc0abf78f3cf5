//! Capture middleware.
//!
//! Runs the capture step before the wrapped handler so every non-ignored
//! page view refreshes the session's return target. Mount it with
//! `axum::middleware::from_fn_with_state`.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::tracker::ReturnToTracker;

/// Middleware function recording the return target for tracked requests.
///
/// Never short-circuits: ignored requests and store failures both pass the
/// request through to the downstream handler unchanged.
pub async fn return_to_middleware(
    State(tracker): State<Arc<ReturnToTracker>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let (parts, body) = req.into_parts();

    let capture = tracker.capture(&parts).await;
    if let Some(url) = &capture.return_to {
        tracing::debug!(return_to = %url, "captured return target");
    }

    next.run(Request::from_parts(parts, body)).await
}
