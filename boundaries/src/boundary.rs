//! Boundary descriptor types.
//!
//! A [`BoundaryDescriptor`] is the minimal record stored in the boundary
//! catalog. [`EnhancedBoundary`] is the same record with every derived link
//! attached, in the shape consumed by the download page.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Polygon tag marking a land-only (coastline-clipped) boundary.
pub const LAND_TAG: &str = "l";

/// Polygon tag written by the catalog scanner for maritime boundaries.
pub const MARITIME_TAG: &str = "m";

/// Keys added by enhancement. Stale copies are dropped from pass-through fields.
pub(crate) const DERIVED_FIELDS: [&str; 6] = [
    "polygon_type",
    "geojson_dl_link",
    "shp_dl_link",
    "geopackage_dl_link",
    "mapinfo_dl_link",
    "osm_relation_link_id",
];

/// Whether a boundary polygon follows the coastline or includes territorial waters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolygonType {
    /// Clipped to the coastline.
    Land,
    /// Includes maritime area.
    Maritime,
}

impl PolygonType {
    /// Expand a one-character catalog tag.
    ///
    /// Only `"l"` means land; any other value, including empty, is maritime.
    ///
    /// ```
    /// use boundaries::PolygonType;
    ///
    /// assert_eq!(PolygonType::from_tag("l"), PolygonType::Land);
    /// assert_eq!(PolygonType::from_tag("m"), PolygonType::Maritime);
    /// assert_eq!(PolygonType::from_tag("L"), PolygonType::Maritime);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        if tag == LAND_TAG {
            PolygonType::Land
        } else {
            PolygonType::Maritime
        }
    }

    /// The one-character catalog tag for this type.
    pub fn tag(self) -> &'static str {
        match self {
            PolygonType::Land => LAND_TAG,
            PolygonType::Maritime => MARITIME_TAG,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PolygonType::Land => "land",
            PolygonType::Maritime => "maritime",
        }
    }
}

impl fmt::Display for PolygonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Downloadable archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// GeoJSON (`.geojson.zip`)
    GeoJson,
    /// ESRI Shapefile (`.shp.zip`)
    Shapefile,
    /// OGC GeoPackage (`.gpkg.zip`)
    GeoPackage,
    /// MapInfo TAB (`.tab.zip`)
    MapInfo,
}

impl FileFormat {
    /// All formats, in the order links are listed.
    pub const ALL: [FileFormat; 4] = [
        FileFormat::GeoJson,
        FileFormat::Shapefile,
        FileFormat::GeoPackage,
        FileFormat::MapInfo,
    ];

    /// Archive suffix appended to the base path.
    pub fn suffix(self) -> &'static str {
        match self {
            FileFormat::GeoJson => ".geojson.zip",
            FileFormat::Shapefile => ".shp.zip",
            FileFormat::GeoPackage => ".gpkg.zip",
            FileFormat::MapInfo => ".tab.zip",
        }
    }

    /// Name of the link field in an [`EnhancedBoundary`].
    pub fn link_field(self) -> &'static str {
        match self {
            FileFormat::GeoJson => "geojson_dl_link",
            FileFormat::Shapefile => "shp_dl_link",
            FileFormat::GeoPackage => "geopackage_dl_link",
            FileFormat::MapInfo => "mapinfo_dl_link",
        }
    }

    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            FileFormat::GeoJson => "GeoJSON",
            FileFormat::Shapefile => "Shapefile",
            FileFormat::GeoPackage => "GeoPackage",
            FileFormat::MapInfo => "MapInfo",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FileFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "geojson" => Ok(FileFormat::GeoJson),
            "shp" | "shapefile" => Ok(FileFormat::Shapefile),
            "gpkg" | "geopackage" => Ok(FileFormat::GeoPackage),
            "tab" | "mapinfo" => Ok(FileFormat::MapInfo),
            other => Err(format!(
                "unknown format '{}', expected geojson, shp, gpkg or mapinfo",
                other
            )),
        }
    }
}

/// Minimal boundary record as stored in the catalog.
///
/// Fields are taken as-is: nothing is validated, and malformed values end up
/// verbatim in the derived links. A missing or `null` text field reads as an
/// empty string and an unusable `admin_level` reads as 0, so one bad record
/// never fails a whole batch. Unknown JSON fields are kept in
/// [`extra`](Self::extra) so that enhancing a record never drops data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryDescriptor {
    /// Display name of the parent country.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// ISO 3166-1 alpha-2 code (e.g. "AD").
    #[serde(default, deserialize_with = "lenient_string")]
    pub iso_code: String,
    /// OSM administrative level (2 = country).
    #[serde(default, deserialize_with = "lenient_level")]
    pub admin_level: u32,
    /// Human readable boundary name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// OSM relation id.
    #[serde(default, deserialize_with = "lenient_string")]
    pub relation_id: String,
    /// URL-safe name token.
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: String,
    /// One-character polygon tag, see [`PolygonType::from_tag`].
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub polygon_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_geojson: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_shp: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_gpkg: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_mapinfo: Option<bool>,
    /// Any other fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BoundaryDescriptor {
    /// Create a descriptor with the fields links are derived from.
    pub fn new(
        iso_code: impl Into<String>,
        admin_level: u32,
        relation_id: impl Into<String>,
        slug: impl Into<String>,
        polygon_tag: impl Into<String>,
    ) -> Self {
        Self {
            parent: None,
            iso_code: iso_code.into(),
            admin_level,
            name: None,
            relation_id: relation_id.into(),
            slug: slug.into(),
            polygon_tag: polygon_tag.into(),
            has_geojson: None,
            has_shp: None,
            has_gpkg: None,
            has_mapinfo: None,
            extra: Map::new(),
        }
    }

    /// Polygon type expanded from the one-character tag.
    pub fn polygon_type(&self) -> PolygonType {
        PolygonType::from_tag(&self.polygon_tag)
    }

    pub fn is_land(&self) -> bool {
        self.polygon_type() == PolygonType::Land
    }

    /// The declared availability flag for a format, if any.
    pub fn availability(&self, format: FileFormat) -> Option<bool> {
        match format {
            FileFormat::GeoJson => self.has_geojson,
            FileFormat::Shapefile => self.has_shp,
            FileFormat::GeoPackage => self.has_gpkg,
            FileFormat::MapInfo => self.has_mapinfo,
        }
    }

    /// Set the availability flag for a format.
    pub fn with_availability(mut self, format: FileFormat, available: bool) -> Self {
        let flag = match format {
            FileFormat::GeoJson => &mut self.has_geojson,
            FileFormat::Shapefile => &mut self.has_shp,
            FileFormat::GeoPackage => &mut self.has_gpkg,
            FileFormat::MapInfo => &mut self.has_mapinfo,
        };
        *flag = Some(available);
        self
    }

    /// Whether a link should be generated for `format`.
    ///
    /// A missing flag counts as available; only an explicit `false` gates.
    pub fn offers(&self, format: FileFormat) -> bool {
        self.availability(format).unwrap_or(true)
    }
}

/// A descriptor with every derived link attached.
///
/// Serializes flat: the original descriptor fields followed by the derived ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancedBoundary {
    #[serde(flatten)]
    pub boundary: BoundaryDescriptor,
    pub polygon_type: PolygonType,
    pub geojson_dl_link: Option<String>,
    pub shp_dl_link: Option<String>,
    pub geopackage_dl_link: Option<String>,
    pub mapinfo_dl_link: Option<String>,
    pub osm_relation_link_id: String,
}

impl EnhancedBoundary {
    /// Download link for a given format.
    pub fn link(&self, format: FileFormat) -> Option<&str> {
        match format {
            FileFormat::GeoJson => self.geojson_dl_link.as_deref(),
            FileFormat::Shapefile => self.shp_dl_link.as_deref(),
            FileFormat::GeoPackage => self.geopackage_dl_link.as_deref(),
            FileFormat::MapInfo => self.mapinfo_dl_link.as_deref(),
        }
    }
}

/// Text field that also takes numbers (hand-written relation ids), booleans
/// and `null`. Null becomes an empty string; anything else keeps its JSON text.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Admin level as a number or numeric string; anything unusable reads as 0.
fn lenient_level<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_type_from_tag() {
        assert_eq!(PolygonType::from_tag("l"), PolygonType::Land);
        assert_eq!(PolygonType::from_tag("m"), PolygonType::Maritime);
        assert_eq!(PolygonType::from_tag(""), PolygonType::Maritime);
        assert_eq!(PolygonType::from_tag("land"), PolygonType::Maritime);
        assert_eq!(PolygonType::Land.tag(), "l");
        assert_eq!(PolygonType::Maritime.to_string(), "maritime");
    }

    #[test]
    fn test_format_suffixes() {
        let suffixes: Vec<_> = FileFormat::ALL.iter().map(|f| f.suffix()).collect();
        assert_eq!(
            suffixes,
            [".geojson.zip", ".shp.zip", ".gpkg.zip", ".tab.zip"]
        );
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("GeoJSON".parse::<FileFormat>(), Ok(FileFormat::GeoJson));
        assert_eq!("shp".parse::<FileFormat>(), Ok(FileFormat::Shapefile));
        assert_eq!("gpkg".parse::<FileFormat>(), Ok(FileFormat::GeoPackage));
        assert_eq!("tab".parse::<FileFormat>(), Ok(FileFormat::MapInfo));
        assert_eq!("mapinfo".parse::<FileFormat>(), Ok(FileFormat::MapInfo));
        assert!("kml".parse::<FileFormat>().is_err());
    }

    #[test]
    fn test_deserialize_catalog_entry() {
        let json = r#"{"parent":"Andorra","iso_code":"AD","admin_level":2,"name":"Andorra","relation_id":"9407","slug":"andorra","type":"l"}"#;
        let boundary: BoundaryDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(boundary.parent.as_deref(), Some("Andorra"));
        assert_eq!(boundary.relation_id, "9407");
        assert_eq!(boundary.polygon_tag, "l");
        assert!(boundary.is_land());
        assert!(boundary.extra.is_empty());
        assert_eq!(boundary.availability(FileFormat::GeoJson), None);
    }

    #[test]
    fn test_deserialize_numeric_relation_id() {
        let json = r#"{"iso_code":"DK","admin_level":2,"relation_id":50046,"slug":"denmark","type":"m"}"#;
        let boundary: BoundaryDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(boundary.relation_id, "50046");
        assert_eq!(boundary.polygon_type(), PolygonType::Maritime);
    }

    #[test]
    fn test_deserialize_missing_admin_level() {
        let json = r#"{"iso_code":"AD","relation_id":"9407","slug":"andorra","type":"l"}"#;
        let boundary: BoundaryDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(boundary.admin_level, 0);
        assert_eq!(boundary.slug, "andorra");
    }

    #[test]
    fn test_deserialize_string_admin_level() {
        let json = r#"{"iso_code":"AD","admin_level":"2","relation_id":"9407","slug":"andorra"}"#;
        let boundary: BoundaryDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(boundary.admin_level, 2);

        let json = r#"{"iso_code":"AD","admin_level":"two","relation_id":"9407"}"#;
        let boundary: BoundaryDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(boundary.admin_level, 0);

        let json = r#"{"iso_code":"AD","admin_level":null,"relation_id":"9407"}"#;
        let boundary: BoundaryDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(boundary.admin_level, 0);
    }

    #[test]
    fn test_deserialize_null_fields() {
        let json = r#"{"iso_code":null,"admin_level":2,"relation_id":null,"slug":null,"type":null,"name":null,"has_shp":null}"#;
        let boundary: BoundaryDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(boundary.iso_code, "");
        assert_eq!(boundary.relation_id, "");
        assert_eq!(boundary.slug, "");
        assert_eq!(boundary.polygon_tag, "");
        assert_eq!(boundary.name, None);
        assert_eq!(boundary.polygon_type(), PolygonType::Maritime);
        assert!(boundary.offers(FileFormat::Shapefile));
    }

    #[test]
    fn test_deserialize_other_scalar_fields() {
        let json = r#"{"iso_code":"AD","admin_level":2,"relation_id":true,"slug":42,"type":"l"}"#;
        let boundary: BoundaryDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(boundary.relation_id, "true");
        assert_eq!(boundary.slug, "42");
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let json = r#"{"iso_code":"AD","admin_level":2,"relation_id":"9407","slug":"andorra","type":"l","area_km2":468}"#;
        let boundary: BoundaryDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(boundary.extra.get("area_km2"), Some(&Value::from(468)));

        let back = serde_json::to_value(&boundary).unwrap();
        assert_eq!(back["area_km2"], 468);
        assert_eq!(back["type"], "l");
        assert!(back.get("has_geojson").is_none());
    }

    #[test]
    fn test_availability_flags() {
        let boundary = BoundaryDescriptor::new("AD", 2, "9407", "andorra", "m")
            .with_availability(FileFormat::Shapefile, false)
            .with_availability(FileFormat::GeoJson, true);

        assert!(boundary.offers(FileFormat::GeoJson));
        assert!(!boundary.offers(FileFormat::Shapefile));
        // Missing flag counts as available
        assert!(boundary.offers(FileFormat::GeoPackage));
        assert_eq!(boundary.availability(FileFormat::Shapefile), Some(false));
        assert_eq!(boundary.has_shp, Some(false));
    }
}
