//! HTTP request handlers for the boundary service.

use axum::{
    extract::{Query, State},
    Json,
};
use boundaries::{
    overpass_query, overpass_query_land_only, BoundaryDescriptor, EnhancedBoundary, PolygonType,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::AppState;

/// Query parameters for the links endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LinksQuery {
    /// ISO 3166-1 alpha-2 country code.
    pub iso_code: String,
    /// OSM administrative level.
    pub admin_level: u32,
    /// OSM relation id.
    pub relation_id: String,
    /// URL-safe name token.
    pub slug: String,
    /// Polygon tag: "l" for land, anything else for maritime.
    #[serde(rename = "type", default)]
    pub polygon_tag: String,
}

/// Query parameters for the Overpass endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OverpassParams {
    /// ISO 3166-1 alpha-2 country code.
    pub alpha2: String,
    /// Requested administrative level. The query always targets level 2.
    pub admin_level: Option<u32>,
    /// Restrict to the land part (non-maritime ways plus coastline).
    #[serde(default)]
    pub land_only: bool,
}

/// Filters for the catalog listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BoundaryFilter {
    /// ISO 3166-1 alpha-2 country code (case-insensitive).
    pub iso_code: Option<String>,
    /// OSM administrative level.
    pub admin_level: Option<u32>,
    /// Polygon tag: "l" for land, anything else for maritime.
    #[serde(rename = "type")]
    pub polygon_tag: Option<String>,
}

impl BoundaryFilter {
    /// Whether a catalog entry passes every filter that is set.
    pub fn matches(&self, boundary: &BoundaryDescriptor) -> bool {
        self.iso_code
            .as_deref()
            .map_or(true, |iso| boundary.iso_code.eq_ignore_ascii_case(iso))
            && self
                .admin_level
                .map_or(true, |level| boundary.admin_level == level)
            && self
                .polygon_tag
                .as_deref()
                .map_or(true, |tag| PolygonType::from_tag(tag) == boundary.polygon_type())
    }
}

/// Overpass query response.
#[derive(Debug, Serialize, ToSchema)]
pub struct OverpassResponse {
    /// Country code the query selects.
    pub alpha2: String,
    /// Administrative level the query selects.
    pub admin_level: u32,
    /// Whether the query is the land-only variant.
    pub land_only: bool,
    /// Overpass-QL text.
    pub query: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Number of entries in the loaded catalog.
    pub catalog_entries: usize,
}

/// Derive every link for a single boundary.
#[utoipa::path(
    get,
    path = "/links",
    tag = "links",
    params(LinksQuery),
    responses(
        (status = 200, description = "Boundary with derived links"),
        (status = 400, description = "Missing or malformed query parameters")
    )
)]
pub async fn get_links(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LinksQuery>,
) -> Json<EnhancedBoundary> {
    tracing::debug!(
        iso_code = %query.iso_code,
        admin_level = query.admin_level,
        relation_id = %query.relation_id,
        "Links query"
    );

    let boundary = BoundaryDescriptor::new(
        query.iso_code,
        query.admin_level,
        query.relation_id,
        query.slug,
        query.polygon_tag,
    );

    Json(state.links.enhance(&boundary))
}

/// Derive links for a batch of boundary records.
///
/// Records are returned in request order with every original field kept.
#[utoipa::path(
    post,
    path = "/enhance",
    tag = "links",
    request_body(description = "Array of boundary records"),
    responses(
        (status = 200, description = "Boundaries with derived links"),
        (status = 422, description = "Body is not an array of boundary records")
    )
)]
pub async fn post_enhance(
    State(state): State<Arc<AppState>>,
    Json(boundaries): Json<Vec<BoundaryDescriptor>>,
) -> Json<Vec<EnhancedBoundary>> {
    tracing::info!(count = boundaries.len(), "Enhancing boundaries");
    Json(state.links.enhance_all(&boundaries))
}

/// Build an Overpass-QL query for a country boundary.
#[utoipa::path(
    get,
    path = "/overpass",
    tag = "overpass",
    params(OverpassParams),
    responses(
        (status = 200, description = "Overpass query", body = OverpassResponse),
        (status = 400, description = "Missing or malformed query parameters")
    )
)]
pub async fn get_overpass(Query(params): Query<OverpassParams>) -> Json<OverpassResponse> {
    if let Some(level) = params.admin_level.filter(|&l| l != 2) {
        tracing::warn!(
            alpha2 = %params.alpha2,
            requested = level,
            "Overpass queries always target admin_level=2"
        );
    }

    let query = if params.land_only {
        overpass_query_land_only(params.admin_level.unwrap_or(2), &params.alpha2)
    } else {
        overpass_query(params.admin_level.unwrap_or(2), &params.alpha2)
    };

    Json(OverpassResponse {
        alpha2: params.alpha2,
        admin_level: 2,
        land_only: params.land_only,
        query,
    })
}

/// List catalog entries with derived links.
///
/// Returns an empty list when the service was started without a catalog.
#[utoipa::path(
    get,
    path = "/boundaries",
    tag = "links",
    params(BoundaryFilter),
    responses(
        (status = 200, description = "Matching catalog entries with derived links")
    )
)]
pub async fn list_boundaries(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<BoundaryFilter>,
) -> Json<Vec<EnhancedBoundary>> {
    let matched = state.links.enhance_all(state.catalog.iter().filter(|b| filter.matches(b)));
    tracing::debug!(matched = matched.len(), ?filter, "Catalog listing");
    Json(matched)
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_entries: state.catalog.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_query_deserialize() {
        let json = r#"{"iso_code": "AD", "admin_level": 2, "relation_id": "9407", "slug": "andorra", "type": "l"}"#;
        let query: LinksQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.iso_code, "AD");
        assert_eq!(query.polygon_tag, "l");
    }

    #[test]
    fn test_filter_matches() {
        let land = BoundaryDescriptor::new("AD", 2, "9407", "andorra", "l");
        let sea = BoundaryDescriptor::new("AD", 2, "9407", "andorra", "m");

        assert!(BoundaryFilter::default().matches(&land));

        let filter = BoundaryFilter {
            iso_code: Some("ad".to_string()),
            admin_level: Some(2),
            polygon_tag: Some("l".to_string()),
        };
        assert!(filter.matches(&land));
        assert!(!filter.matches(&sea));

        let filter = BoundaryFilter {
            admin_level: Some(4),
            ..Default::default()
        };
        assert!(!filter.matches(&land));
    }

    #[test]
    fn test_health_response_serialize() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            catalog_entries: 3,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("\"catalog_entries\":3"));
    }
}
