//! Overpass-QL query builders for country boundaries.
//!
//! # Admin level
//!
//! Both builders accept an `admin_level` argument but always select
//! `admin_level=2`. Downstream fetch pipelines rely on this country-only
//! behavior, so the argument is kept for signature compatibility and is not
//! interpolated into the query.

/// Timeout, in seconds, of the land-only query.
pub const LAND_ONLY_TIMEOUT_SECS: u32 = 600;

/// Query for a country's administrative relation and all its members.
///
/// The ISO code is inserted unquoted, exactly as the fetch pipeline expects.
/// `_admin_level` is ignored; the query always targets level 2.
///
/// ```
/// use boundaries::overpass_query;
///
/// let query = overpass_query(2, "AD");
/// assert!(query.contains(r#"["ISO3166-1"=AD]"#));
/// assert!(query.contains(r#"["admin_level"="2"]"#));
/// ```
pub fn overpass_query(_admin_level: u32, alpha2: &str) -> String {
    format!(
        "[out:json];\n    \
         relation[\"boundary\"=\"administrative\"][\"admin_level\"=\"2\"][\"ISO3166-1\"={alpha2}];\n    \
         (._;>;);\n    \
         out;"
    )
}

/// Query for the land part of a country: the relation's non-maritime ways
/// plus every coastline way inside the country area.
///
/// `_admin_level` is ignored; the query always targets level 2.
///
/// ```
/// use boundaries::overpass_query_land_only;
///
/// let query = overpass_query_land_only(2, "AD");
/// assert!(query.starts_with("[timeout:600][out:json];"));
/// assert!(query.contains(r#"area["ISO3166-1"="AD"]"#));
/// assert!(query.contains(r#"natural"="coastline"#));
/// ```
pub fn overpass_query_land_only(_admin_level: u32, alpha2: &str) -> String {
    format!(
        "[timeout:{LAND_ONLY_TIMEOUT_SECS}][out:json];\n    \
         area[\"ISO3166-1\"=\"{alpha2}\"]->.country;\n    \
         rel[\"ISO3166-1\"=\"{alpha2}\"][\"type\"=\"boundary\"][\"admin_level\"=\"2\"];\n    \
         (\n        \
         way(r)[\"maritime\" != \"yes\"];\n        \
         way(area.country)[\"natural\"=\"coastline\"];\n    \
         );\n    \
         (._;>;);\n    \
         out;"
    )
}
