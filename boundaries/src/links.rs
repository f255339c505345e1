//! Download and OpenStreetMap link derivation.
//!
//! All functions here are total: they never validate their input, so a
//! malformed descriptor yields a malformed link rather than an error.
//!
//! # Link Format
//!
//! ```text
//! {files_base}/{iso}/{level}/relation_{id}_{slug}/relation_{id}_{slug}[_land].{ext}.zip
//! {osm_base}/relation/{id}
//! ```

use crate::boundary::{BoundaryDescriptor, EnhancedBoundary, FileFormat, DERIVED_FIELDS};
use crate::config::LinkConfig;

/// Suffix inserted before the extension for land-only polygons.
pub const LAND_SUFFIX: &str = "_land";

/// Derives every link for a boundary from a fixed [`LinkConfig`].
///
/// # Example
///
/// ```
/// use boundaries::{BoundaryDescriptor, FileFormat, LinkConfig, Links};
///
/// let links = Links::new(LinkConfig::new("https://files.example.com", "https://osm.example.com"));
/// let boundary = BoundaryDescriptor::new("DK", 2, "50046", "denmark", "m");
///
/// assert_eq!(
///     links.format_link(&boundary, FileFormat::Shapefile).as_deref(),
///     Some("https://files.example.com/DK/2/relation_50046_denmark/relation_50046_denmark.shp.zip"),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Links {
    config: LinkConfig,
}

impl Links {
    /// Create a deriver over the given base URLs.
    pub fn new(config: LinkConfig) -> Self {
        Self { config }
    }

    /// Create a deriver configured from the environment.
    ///
    /// See [`LinkConfig::from_env`].
    pub fn from_env() -> Self {
        Self::new(LinkConfig::from_env())
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Path shared by every archive of a boundary, without extension.
    ///
    /// ```
    /// use boundaries::Links;
    ///
    /// let links = Links::default();
    /// assert_eq!(
    ///     links.base_path("AD", 2, "9407", "andorra"),
    ///     "https://files.99boundaries.com/AD/2/relation_9407_andorra/relation_9407_andorra",
    /// );
    /// ```
    pub fn base_path(
        &self,
        iso_code: &str,
        admin_level: u32,
        relation_id: &str,
        slug: &str,
    ) -> String {
        let folder = folder_name(relation_id, slug);
        format!(
            "{}/{}/{}/{}/{}",
            self.config.files_base_url, iso_code, admin_level, folder, folder
        )
    }

    /// Download link for one archive format.
    ///
    /// Returns `None` only when the descriptor explicitly marks the format as
    /// unavailable; descriptors without availability flags always get a link.
    pub fn format_link(&self, boundary: &BoundaryDescriptor, format: FileFormat) -> Option<String> {
        if !boundary.offers(format) {
            return None;
        }

        let base = self.base_path(
            &boundary.iso_code,
            boundary.admin_level,
            &boundary.relation_id,
            &boundary.slug,
        );
        let land = if boundary.is_land() { LAND_SUFFIX } else { "" };

        Some(format!("{}{}{}", base, land, format.suffix()))
    }

    pub fn geojson_link(&self, boundary: &BoundaryDescriptor) -> Option<String> {
        self.format_link(boundary, FileFormat::GeoJson)
    }

    pub fn shp_link(&self, boundary: &BoundaryDescriptor) -> Option<String> {
        self.format_link(boundary, FileFormat::Shapefile)
    }

    pub fn gpkg_link(&self, boundary: &BoundaryDescriptor) -> Option<String> {
        self.format_link(boundary, FileFormat::GeoPackage)
    }

    pub fn mapinfo_link(&self, boundary: &BoundaryDescriptor) -> Option<String> {
        self.format_link(boundary, FileFormat::MapInfo)
    }

    /// Link to the relation page on OpenStreetMap.
    pub fn osm_relation_link(&self, boundary: &BoundaryDescriptor) -> String {
        format!("{}/relation/{}", self.config.osm_base_url, boundary.relation_id)
    }

    /// Copy `boundary` and attach every derived field.
    ///
    /// The input is left untouched. Pass-through fields that collide with a
    /// derived field name are replaced by the freshly derived value.
    pub fn enhance(&self, boundary: &BoundaryDescriptor) -> EnhancedBoundary {
        let mut copy = boundary.clone();
        for key in DERIVED_FIELDS {
            copy.extra.remove(key);
        }

        EnhancedBoundary {
            polygon_type: boundary.polygon_type(),
            geojson_dl_link: self.geojson_link(boundary),
            shp_dl_link: self.shp_link(boundary),
            geopackage_dl_link: self.gpkg_link(boundary),
            mapinfo_dl_link: self.mapinfo_link(boundary),
            osm_relation_link_id: self.osm_relation_link(boundary),
            boundary: copy,
        }
    }

    /// Enhance every boundary, preserving order.
    pub fn enhance_all<'a, I>(&self, boundaries: I) -> Vec<EnhancedBoundary>
    where
        I: IntoIterator<Item = &'a BoundaryDescriptor>,
    {
        boundaries.into_iter().map(|b| self.enhance(b)).collect()
    }
}

/// Folder (and file stem) name for a relation: `relation_{id}_{slug}`.
pub fn folder_name(relation_id: &str, slug: &str) -> String {
    format!("relation_{}_{}", relation_id, slug)
}
