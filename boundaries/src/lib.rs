//! # Boundaries - Boundary Download Links
//!
//! Derives download links for administrative boundary archives and builds
//! Overpass-QL queries for fetching the underlying OpenStreetMap relations.
//!
//! ## Features
//!
//! - **Pure**: Every derivation is a string template over the descriptor fields
//! - **Explicit configuration**: Base URLs live in a [`LinkConfig`] handed to the deriver
//! - **Catalog generation**: Scan an export tree and emit the minimal boundary catalog
//!
//! ## Quick Start
//!
//! ```
//! use boundaries::{BoundaryDescriptor, LinkConfig, Links};
//!
//! let links = Links::new(LinkConfig::default());
//! let andorra = BoundaryDescriptor::new("AD", 2, "9407", "andorra", "l");
//!
//! assert_eq!(
//!     links.geojson_link(&andorra).as_deref(),
//!     Some("https://files.99boundaries.com/AD/2/relation_9407_andorra/relation_9407_andorra_land.geojson.zip"),
//! );
//! assert_eq!(
//!     links.osm_relation_link(&andorra),
//!     "https://www.openstreetmap.org/relation/9407",
//! );
//! ```
//!
//! ## Link Format
//!
//! Archives are published under a folder per OSM relation:
//!
//! ```text
//! {files_base}/{iso}/{level}/relation_{id}_{slug}/relation_{id}_{slug}[_land].{ext}.zip
//! ```
//!
//! where `ext` is one of `geojson`, `shp`, `gpkg` or `tab` (MapInfo). Land-only
//! polygons (coastline-clipped) carry the `_land` suffix.

pub mod boundary;
pub mod catalog;
pub mod config;
pub mod countries;
pub mod error;
pub mod links;
pub mod overpass;

// Re-export main types at crate root for convenience
pub use boundary::{BoundaryDescriptor, EnhancedBoundary, FileFormat, PolygonType};
pub use catalog::{load_catalog, write_catalog, CatalogScanner};
pub use config::{LinkConfig, DEFAULT_FILES_BASE_URL, DEFAULT_OSM_BASE_URL};
pub use error::{BoundaryError, Result};
pub use links::Links;
pub use overpass::{overpass_query, overpass_query_land_only};
