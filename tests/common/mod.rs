//! Shared utilities for integration testing.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;

use redirect_back::{return_to_middleware, ReturnToTracker, TrackerConfig};

/// Spawn a login-flow app wired with the tracker on an ephemeral port.
///
/// Returns the base URL to point a client at.
pub async fn spawn_app(config: TrackerConfig) -> String {
    let tracker = Arc::new(ReturnToTracker::in_memory(config));

    let app = Router::new()
        .route("/login", get(login_page).post(login))
        .route("/", get(page))
        .route("/{*path}", get(page))
        .with_state(tracker.clone())
        .layer(middleware::from_fn_with_state(tracker, return_to_middleware));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn login_page() -> &'static str {
    "login page"
}

async fn login(State(tracker): State<Arc<ReturnToTracker>>, req: Request<Body>) -> Response {
    let (parts, _body) = req.into_parts();
    tracker.redirect_back(&parts).await
}

async fn page(req: Request<Body>) -> String {
    format!("page: {}", req.uri().path())
}
