//! Boundaries Service Library
//!
//! HTTP handlers, router and OpenAPI document for the boundary link service.
//! This library is used by both the boundaries-service binary and integration tests.

pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use boundaries::{BoundaryDescriptor, Links};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers.
pub struct AppState {
    /// Link deriver built from the configured base URLs.
    pub links: Links,
    /// Catalog served by `/boundaries`; empty when none was loaded.
    pub catalog: Vec<BoundaryDescriptor>,
}

/// OpenAPI documentation for the boundaries service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Boundaries Service",
        version = "0.1.0",
        description = "Download links and Overpass queries for administrative boundary files.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        handlers::get_links,
        handlers::post_enhance,
        handlers::get_overpass,
        handlers::list_boundaries,
        handlers::health_check,
    ),
    components(schemas(handlers::OverpassResponse, handlers::HealthResponse)),
    tags(
        (name = "links", description = "Download link endpoints"),
        (name = "overpass", description = "Overpass query endpoints"),
        (name = "system", description = "System and health endpoints")
    )
)]
pub struct ApiDoc;

/// Build the application router, Swagger UI included.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/links", get(handlers::get_links))
        .route("/enhance", post(handlers::post_enhance))
        .route("/overpass", get(handlers::get_overpass))
        .route("/boundaries", get(handlers::list_boundaries))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use handlers::{BoundaryFilter, HealthResponse, LinksQuery, OverpassParams, OverpassResponse};
