//! Boundaries Service - HTTP microservice for boundary download links.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `BOUNDARIES_FILES_BASE_URL` | Host serving boundary archives | `https://files.99boundaries.com` |
//! | `BOUNDARIES_OSM_BASE_URL` | OpenStreetMap host | `https://www.openstreetmap.org` |
//! | `BOUNDARIES_CATALOG` | Catalog JSON served by `/boundaries` | None |
//! | `BOUNDARIES_PORT` | HTTP server port | 8080 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /links?iso_code=&admin_level=&relation_id=&slug=&type=` - Links for one boundary
//! - `POST /enhance` - Links for an array of boundary records
//! - `GET /overpass?alpha2=&land_only=` - Overpass-QL query text
//! - `GET /boundaries?iso_code=&admin_level=&type=` - Catalog entries with links
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use boundaries::{load_catalog, Links};
use boundaries_service::{router, AppState};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boundaries_service=info,boundaries=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load port from environment (service-specific config)
    let port: u16 = std::env::var("BOUNDARIES_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let links = Links::from_env();

    let catalog = match std::env::var("BOUNDARIES_CATALOG") {
        Ok(path) => {
            let catalog = load_catalog(&path)?;
            tracing::info!(path = %path, entries = catalog.len(), "Loaded boundary catalog");
            catalog
        }
        Err(_) => {
            tracing::warn!("BOUNDARIES_CATALOG not set, /boundaries will be empty");
            Vec::new()
        }
    };

    tracing::info!(
        files_base_url = %links.config().files_base_url,
        osm_base_url = %links.config().osm_base_url,
        port = port,
        "Starting boundaries service"
    );

    let state = Arc::new(AppState { links, catalog });

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
