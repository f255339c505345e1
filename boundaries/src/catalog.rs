//! Boundary catalog generation.
//!
//! Scans an export tree and produces the minimal catalog the download page
//! is built from. Links are not stored; they are derived at read time with
//! [`Links::enhance`](crate::Links::enhance).
//!
//! # Folder Layout
//!
//! ```text
//! <root>/
//!   <ISO_CODE>/
//!     <admin_level>/
//!       relation_<id>_<name>/
//!         relation_<id>_<name>.geojson.zip
//!         relation_<id>_<name>.shp.zip
//!         relation_<id>_<name>.gpkg.zip
//!         relation_<id>_<name>.tab.zip
//!         relation_<id>_<name>_land.geojson.zip   (optional)
//!         ...
//! ```
//!
//! Each relation folder yields up to two entries: a maritime one (`"m"`) when
//! any plain archive exists, then a land one (`"l"`) when any `_land` archive
//! exists.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::boundary::{BoundaryDescriptor, FileFormat, LAND_TAG, MARITIME_TAG};
use crate::countries::parent_name;
use crate::error::{BoundaryError, Result};
use crate::links::LAND_SUFFIX;

/// Legacy MapInfo archive suffix still found in older exports.
const LEGACY_MAPINFO_SUFFIX: &str = ".mapinfo.zip";

/// Components of a `relation_<id>_<name>` folder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderName {
    /// Numeric OSM relation id, kept as text.
    pub relation_id: String,
    /// Raw name part, used as the URL slug.
    pub slug: String,
    /// Display name: underscores to spaces, title-cased.
    pub name: String,
}

/// Parse a relation folder name.
///
/// # Examples
///
/// ```
/// use boundaries::catalog::parse_folder_name;
///
/// let parsed = parse_folder_name("relation_50046_denmark").unwrap();
/// assert_eq!(parsed.relation_id, "50046");
/// assert_eq!(parsed.slug, "denmark");
/// assert_eq!(parsed.name, "Denmark");
///
/// assert!(parse_folder_name("way_123_road").is_none());
/// assert!(parse_folder_name("relation_abc_x").is_none());
/// ```
pub fn parse_folder_name(folder_name: &str) -> Option<FolderName> {
    let rest = folder_name.strip_prefix("relation_")?;
    let (relation_id, slug) = rest.split_once('_')?;

    if relation_id.is_empty() || !relation_id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if slug.is_empty() {
        return None;
    }

    Some(FolderName {
        relation_id: relation_id.to_string(),
        slug: slug.to_string(),
        name: title_case(&slug.replace('_', " ")),
    })
}

/// Upper-case the first letter of every word and lower-case the rest.
///
/// A word starts at any letter not preceded by another letter, so
/// `"côte d'ivoire"` becomes `"Côte D'Ivoire"`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Walks an export tree and builds catalog entries.
///
/// # Example
///
/// ```ignore
/// use boundaries::CatalogScanner;
///
/// let catalog = CatalogScanner::new().scan("misc")?;
/// boundaries::write_catalog("src/boundary_catalog.json", &catalog)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogScanner {
    record_availability: bool,
}

impl CatalogScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `has_*` flags on every entry.
    ///
    /// Off by default to keep the catalog small; without flags every format
    /// is assumed available.
    pub fn with_availability(mut self, record: bool) -> Self {
        self.record_availability = record;
        self
    }

    /// Scan `root` and return the catalog entries in folder order.
    ///
    /// A missing root yields an empty catalog. Entries that don't follow the
    /// layout are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory inside the tree cannot be read.
    pub fn scan<P: AsRef<Path>>(&self, root: P) -> Result<Vec<BoundaryDescriptor>> {
        let root = root.as_ref();
        let mut catalog = Vec::new();

        if !root.exists() {
            tracing::warn!(root = %root.display(), "Scan folder does not exist");
            return Ok(catalog);
        }

        for iso_dir in sorted_subdirs(root)? {
            let Some(iso_code) = dir_name(&iso_dir) else {
                continue;
            };
            let parent = parent_name(iso_code);

            for level_dir in sorted_subdirs(&iso_dir)? {
                let Some(admin_level) = dir_name(&level_dir).and_then(|n| n.parse::<u32>().ok())
                else {
                    tracing::debug!(path = %level_dir.display(), "Skipping non-numeric admin level");
                    continue;
                };

                for relation_dir in sorted_subdirs(&level_dir)? {
                    let Some(folder) = dir_name(&relation_dir) else {
                        continue;
                    };
                    let Some(parsed) = parse_folder_name(folder) else {
                        tracing::debug!(path = %relation_dir.display(), "Skipping unrecognized folder");
                        continue;
                    };

                    for (stem, tag) in [
                        (folder.to_string(), MARITIME_TAG),
                        (format!("{}{}", folder, LAND_SUFFIX), LAND_TAG),
                    ] {
                        let available = FileFormat::ALL
                            .map(|format| archive_exists(&relation_dir, &stem, format));
                        if !available.contains(&true) {
                            continue;
                        }

                        let mut entry = BoundaryDescriptor::new(
                            iso_code,
                            admin_level,
                            parsed.relation_id.as_str(),
                            parsed.slug.as_str(),
                            tag,
                        );
                        entry.parent = Some(parent.clone());
                        entry.name = Some(parsed.name.clone());

                        if self.record_availability {
                            for (format, exists) in FileFormat::ALL.into_iter().zip(available) {
                                entry = entry.with_availability(format, exists);
                            }
                        }

                        catalog.push(entry);
                    }
                }
            }
        }

        tracing::debug!(entries = catalog.len(), root = %root.display(), "Catalog scan complete");
        Ok(catalog)
    }
}

fn archive_exists(dir: &Path, stem: &str, format: FileFormat) -> bool {
    if dir.join(format!("{}{}", stem, format.suffix())).is_file() {
        return true;
    }
    format == FileFormat::MapInfo
        && dir
            .join(format!("{}{}", stem, LEGACY_MAPINFO_SUFFIX))
            .is_file()
}

/// Immediate subdirectories of `dir`, sorted by name.
fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn dir_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// Load a catalog JSON file.
///
/// # Errors
///
/// Returns [`BoundaryError::CatalogNotFound`] if the file does not exist, or
/// a JSON error if it is not an array of boundary records.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<BoundaryDescriptor>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(BoundaryError::CatalogNotFound {
            path: path.to_path_buf(),
        });
    }

    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Write a catalog as minified JSON, creating parent directories as needed.
pub fn write_catalog<P: AsRef<Path>>(path: P, catalog: &[BoundaryDescriptor]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, catalog)?;
    writer.flush()?;
    Ok(())
}
