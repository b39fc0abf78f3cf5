//! Demo login-flow service.
//!
//! Wires the return-to tracker into a small axum application:
//! every page view refreshes the session's return target, `/login` is
//! exempt, and completing a login redirects back to the last page visited.
//!
//! ```text
//! GET /dashboard        → 200, return target recorded
//! GET /login            → 200, login page (ignored path)
//! POST /login           → 303 back to /dashboard
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use redirect_back::config::{load_config, AppConfig};
use redirect_back::observability::metrics;
use redirect_back::{return_to_middleware, ReturnToTracker};

#[derive(Parser, Debug)]
#[command(name = "redirect-back", about = "Return-to tracking demo service")]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[derive(Clone)]
struct AppState {
    tracker: Arc<ReturnToTracker>,
    session_cookie: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redirect_back=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        fallback_path = %config.tracker.fallback_path,
        ignored_paths = ?config.tracker.ignored_paths,
        ignored_prefixes = ?config.tracker.ignored_prefixes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let session_cookie = config.tracker.session_cookie.clone();
    let tracker = Arc::new(ReturnToTracker::in_memory(config.tracker.clone()));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let app = build_router(tracker, session_cookie);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Build the axum router with the capture middleware layered in.
fn build_router(tracker: Arc<ReturnToTracker>, session_cookie: String) -> Router {
    let state = AppState {
        tracker: tracker.clone(),
        session_cookie,
    };

    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/", get(page))
        .route("/{*path}", get(page))
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(tracker, return_to_middleware))
        .layer(middleware::from_fn_with_state(
            state,
            session_cookie_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

async fn login_page() -> &'static str {
    "login page — POST /login to sign in\n"
}

/// Flow-completion handler: consumes the stored return target.
async fn login(State(state): State<AppState>, req: Request<Body>) -> Response {
    tracing::info!("login complete, redirecting back");
    let (parts, _body) = req.into_parts();
    state.tracker.redirect_back(&parts).await
}

async fn page(req: Request<Body>) -> String {
    format!("page: {}\n", req.uri().path())
}

/// Mint a session cookie for first-time visitors so the in-memory store can
/// scope their return targets.
async fn session_cookie_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let prefix = format!("{}=", state.session_cookie);
    let has_session = req
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|h| h.split(';'))
        .any(|pair| pair.trim_start().starts_with(&prefix));

    let mut response = next.run(req).await;

    if !has_session {
        let cookie = format!("{}{}; Path=/; HttpOnly", prefix, Uuid::new_v4());
        if let Ok(value) = header::HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
