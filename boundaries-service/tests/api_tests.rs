//! Integration tests for the HTTP API.

use axum_test::TestServer;
use boundaries::{BoundaryDescriptor, CatalogScanner, LinkConfig, Links};
use boundaries_service::{router, AppState};
use serde_json::{json, Value};
use std::fs::{self, File};
use std::sync::Arc;
use tempfile::TempDir;

const FILES_BASE: &str = "https://files.99boundaries.com";
const OSM_BASE: &str = "https://www.openstreetmap.org";

/// Create a test server over the given catalog.
fn create_test_server(catalog: Vec<BoundaryDescriptor>) -> TestServer {
    let state = Arc::new(AppState {
        links: Links::new(LinkConfig::new(FILES_BASE, OSM_BASE)),
        catalog,
    });

    TestServer::new(router(state)).unwrap()
}

/// Catalog scanned from a small export tree.
fn scanned_catalog(temp_dir: &TempDir) -> Vec<BoundaryDescriptor> {
    let root = temp_dir.path();
    for (iso, level, folder, file) in [
        ("AD", "2", "relation_9407_andorra", "relation_9407_andorra.geojson.zip"),
        ("AD", "2", "relation_9407_andorra", "relation_9407_andorra_land.geojson.zip"),
        ("LU", "6", "relation_407489_esch", "relation_407489_esch.shp.zip"),
    ] {
        let dir = root.join(iso).join(level).join(folder);
        fs::create_dir_all(&dir).unwrap();
        File::create(dir.join(file)).unwrap();
    }
    CatalogScanner::new().scan(root).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(vec![BoundaryDescriptor::new("AD", 2, "9407", "andorra", "l")]);

    let response = server.get("/health").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["catalog_entries"], 1);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_get_links_land() {
    let server = create_test_server(Vec::new());

    let response = server
        .get("/links")
        .add_query_param("iso_code", "AD")
        .add_query_param("admin_level", 2)
        .add_query_param("relation_id", "9407")
        .add_query_param("slug", "andorra")
        .add_query_param("type", "l")
        .await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["polygon_type"], "land");
    assert_eq!(json["type"], "l");
    assert_eq!(
        json["geojson_dl_link"],
        "https://files.99boundaries.com/AD/2/relation_9407_andorra/relation_9407_andorra_land.geojson.zip"
    );
    assert_eq!(
        json["mapinfo_dl_link"],
        "https://files.99boundaries.com/AD/2/relation_9407_andorra/relation_9407_andorra_land.tab.zip"
    );
    assert_eq!(
        json["osm_relation_link_id"],
        "https://www.openstreetmap.org/relation/9407"
    );
}

#[tokio::test]
async fn test_get_links_defaults_to_maritime() {
    let server = create_test_server(Vec::new());

    let response = server
        .get("/links")
        .add_query_param("iso_code", "DK")
        .add_query_param("admin_level", 2)
        .add_query_param("relation_id", "50046")
        .add_query_param("slug", "denmark")
        .await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["polygon_type"], "maritime");
    let link = json["shp_dl_link"].as_str().unwrap();
    assert!(link.ends_with("/relation_50046_denmark.shp.zip"));
    assert!(!link.contains("_land"));
}

#[tokio::test]
async fn test_get_links_missing_params() {
    let server = create_test_server(Vec::new());

    let response = server
        .get("/links")
        .add_query_param("iso_code", "AD")
        .expect_failure()
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_post_enhance() {
    let server = create_test_server(Vec::new());

    let body = json!([
        {"parent": "Andorra", "iso_code": "AD", "admin_level": 2, "name": "Andorra",
         "relation_id": "9407", "slug": "andorra", "type": "l", "has_gpkg": false},
        {"iso_code": "DK", "admin_level": 2, "relation_id": 50046, "slug": "denmark", "type": "m",
         "population": 5900000}
    ]);

    let response = server.post("/enhance").json(&body).await;
    response.assert_status_ok();

    let json: Value = response.json();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);

    // Original fields preserved
    assert_eq!(items[0]["parent"], "Andorra");
    assert_eq!(items[0]["name"], "Andorra");
    assert_eq!(items[0]["has_gpkg"], false);
    assert_eq!(items[0]["geopackage_dl_link"], Value::Null);
    assert!(items[0]["geojson_dl_link"].is_string());

    assert_eq!(items[1]["population"], 5900000);
    assert_eq!(items[1]["relation_id"], "50046");
    assert_eq!(items[1]["polygon_type"], "maritime");
}

#[tokio::test]
async fn test_post_enhance_tolerates_bad_records() {
    let server = create_test_server(Vec::new());

    let body = json!([
        {"iso_code": "AD", "relation_id": "9407", "slug": "andorra", "type": "l"},
        {"iso_code": "DK", "admin_level": "2", "relation_id": null, "slug": null, "type": null},
        {"iso_code": "LU", "admin_level": 6, "relation_id": 407489, "slug": "esch", "type": "m"}
    ]);

    let response = server.post("/enhance").json(&body).await;
    response.assert_status_ok();

    let json: Value = response.json();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 3);

    // Missing admin_level reads as 0
    assert_eq!(items[0]["admin_level"], 0);
    assert_eq!(
        items[0]["geojson_dl_link"],
        "https://files.99boundaries.com/AD/0/relation_9407_andorra/relation_9407_andorra_land.geojson.zip"
    );

    // Null text fields read as empty strings
    assert_eq!(items[1]["admin_level"], 2);
    assert_eq!(items[1]["relation_id"], "");
    assert_eq!(items[1]["polygon_type"], "maritime");
    assert_eq!(
        items[1]["shp_dl_link"],
        "https://files.99boundaries.com/DK/2/relation__/relation__.shp.zip"
    );
    assert_eq!(
        items[1]["osm_relation_link_id"],
        "https://www.openstreetmap.org/relation/"
    );

    assert_eq!(items[2]["relation_id"], "407489");
}

#[tokio::test]
async fn test_post_enhance_invalid_body() {
    let server = create_test_server(Vec::new());

    let response = server
        .post("/enhance")
        .json(&json!({"iso_code": "AD"}))
        .expect_failure()
        .await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_overpass() {
    let server = create_test_server(Vec::new());

    let response = server
        .get("/overpass")
        .add_query_param("alpha2", "AD")
        .await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["alpha2"], "AD");
    assert_eq!(json["admin_level"], 2);
    assert_eq!(json["land_only"], false);
    let query = json["query"].as_str().unwrap();
    assert!(query.contains(r#"["ISO3166-1"=AD]"#));
    assert!(query.contains(r#"["admin_level"="2"]"#));
}

#[tokio::test]
async fn test_get_overpass_land_only_ignores_level() {
    let server = create_test_server(Vec::new());

    let response = server
        .get("/overpass")
        .add_query_param("alpha2", "AD")
        .add_query_param("admin_level", 6)
        .add_query_param("land_only", true)
        .await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["admin_level"], 2);
    assert_eq!(json["land_only"], true);
    let query = json["query"].as_str().unwrap();
    assert!(query.starts_with("[timeout:600][out:json];"));
    assert!(query.contains(r#"area["ISO3166-1"="AD"]"#));
    assert!(query.contains(r#"natural"="coastline"#));
}

#[tokio::test]
async fn test_list_boundaries_filters() {
    let temp_dir = TempDir::new().unwrap();
    let server = create_test_server(scanned_catalog(&temp_dir));

    let all: Value = server.get("/boundaries").await.json();
    assert_eq!(all.as_array().unwrap().len(), 3);

    let response = server
        .get("/boundaries")
        .add_query_param("iso_code", "ad")
        .add_query_param("type", "l")
        .await;
    response.assert_status_ok();
    let json: Value = response.json();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["parent"], "Andorra");
    assert_eq!(items[0]["polygon_type"], "land");

    let json: Value = server
        .get("/boundaries")
        .add_query_param("admin_level", 6)
        .await
        .json();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Esch");
    // No availability flags in the catalog: every format gets a link
    assert_eq!(
        items[0]["geopackage_dl_link"],
        "https://files.99boundaries.com/LU/6/relation_407489_esch/relation_407489_esch.gpkg.zip"
    );
}

#[tokio::test]
async fn test_list_boundaries_without_catalog() {
    let server = create_test_server(Vec::new());

    let json: Value = server.get("/boundaries").await.json();
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn test_openapi_document() {
    let server = create_test_server(Vec::new());

    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert!(json["paths"]["/links"].is_object());
    assert!(json["paths"]["/overpass"].is_object());
    assert!(json["paths"]["/health"].is_object());
}
