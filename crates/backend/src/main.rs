mod config;
mod dataset;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use config::Config;

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Build the full application router.
fn build_app(config: Arc<Config>) -> Router {
    // Static file routers are stateless, merge them before adding app state
    let static_files = Router::new()
        .nest("/data", cached_static_router(&config.data_dir, CACHE_1DAY))
        .nest("/dist", cached_static_router(&config.dist_dir, CACHE_IMMUTABLE))
        .nest(
            "/assets",
            cached_static_router(&config.dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    Router::new()
        .route("/", get(serve_index))
        .with_state(config)
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    // A bad dataset is served anyway; the page treats it as an empty map.
    if let Err(e) = dataset::check(&config.data_dir) {
        tracing::warn!(error = %e, "Velocity dataset failed validation");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = build_app(config.clone());

    tracing::info!("Server running at http://localhost:{}", config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn serve_index(State(config): State<Arc<Config>>) -> Html<String> {
    // Try to serve the built frontend, fall back to a simple message
    match tokio::fs::read_to_string(config.dist_dir.join("index.html")).await {
        Ok(html) => Html(html),
        Err(_) => Html(
            r#"<!DOCTYPE html>
<html>
<head><title>Velocity Map</title></head>
<body>
<h1>Velocity Map</h1>
<p>Frontend not built yet. The dataset is available at <a href="/data/velocity.geojson">/data/velocity.geojson</a>.</p>
</body>
</html>"#
                .to_string(),
        ),
    }
}
