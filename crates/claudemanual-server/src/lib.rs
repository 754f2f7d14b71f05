//! ClaudeManual Server
//!
//! Self-hosted documentation browser API: catalog, search, document trees,
//! and user preferences. This is a library crate — the server is started via
//! `start_server()`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Response, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use rust_embed::Embed;
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use claudemanual_core::paths;
use claudemanual_core::storage::PreferenceStore;
use claudemanual_core::watcher::DocWatcher;

pub mod error;
pub mod routes;
pub mod types;
pub mod utils;

/// Embedded explorer UI assets.
///
/// At compile time, rust-embed includes all files from the UI build directory.
/// When the build directory is absent, this is empty and the server gracefully
/// falls back to API-only mode.
#[derive(Embed)]
#[folder = "../../ui/build"]
#[prefix = ""]
#[allow_missing = true]
struct UiAssets;

/// Configuration for starting the server.
pub struct ServerConfig {
    /// Port to listen on (default: 3000).
    pub port: u16,
    /// Documentation root containing skills/, commands/, agents/, etc.
    pub docs_root: PathBuf,
    /// Preference database location.
    pub db_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            docs_root: paths::resolve_docs_root(),
            db_path: paths::preferences_db_path(),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Root of the documentation tree. Catalog scans re-read it per request.
    pub docs_root: Arc<PathBuf>,
    /// Preference persistence service, constructed once per process.
    pub preferences: Arc<PreferenceStore>,
}

/// Build the Axum router with all routes and embedded UI assets.
pub fn build_router(config: &ServerConfig) -> anyhow::Result<(Router, AppState)> {
    let preferences = PreferenceStore::open(&config.db_path)?;

    let state = AppState {
        docs_root: Arc::new(config.docs_root.clone()),
        preferences: Arc::new(preferences),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api", routes::api_router())
        .fallback(serve_ui)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    Ok((app, state))
}

/// Start the ClaudeManual server and block until shutdown.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let (app, _state) = build_router(&config)?;

    // Placeholder watcher: catalog scans re-read disk per request, so this
    // only keeps the wiring point alive. It performs no I/O.
    let _watcher = DocWatcher::spawn(Duration::from_secs(60));

    tracing::info!(
        "ClaudeManual server listening on http://{} (docs root {:?})",
        addr,
        config.docs_root
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Serve embedded UI assets with SPA fallback.
async fn serve_ui(uri: Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');

    // Try exact file match first
    if let Some(file) = UiAssets::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        return Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime.as_ref())
            .header(header::CACHE_CONTROL, cache_control(path))
            .body(Body::from(file.data.to_vec()))
            .expect("static response builder");
    }

    // SPA fallback: serve index.html for all non-file routes
    match UiAssets::get("index.html") {
        Some(index) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
            .header(header::CACHE_CONTROL, "no-cache")
            .body(Body::from(index.data.to_vec()))
            .expect("static response builder"),
        None => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from(
                "ClaudeManual API server running. Explorer UI not embedded in this build.",
            ))
            .expect("static response builder"),
    }
}

/// Cache-control header value based on file type.
fn cache_control(path: &str) -> &'static str {
    if path.contains("/assets/") {
        // Bundled assets carry a hash in the filename, cache forever
        "public, max-age=31536000, immutable"
    } else if path.ends_with(".html") {
        "no-cache"
    } else {
        "public, max-age=3600"
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
