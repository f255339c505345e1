//! Base URL configuration for link derivation.

/// Default host serving the boundary archives.
pub const DEFAULT_FILES_BASE_URL: &str = "https://files.99boundaries.com";

/// Default OpenStreetMap host used for relation links.
pub const DEFAULT_OSM_BASE_URL: &str = "https://www.openstreetmap.org";

/// Environment variable overriding [`DEFAULT_FILES_BASE_URL`].
pub const FILES_BASE_URL_ENV: &str = "BOUNDARIES_FILES_BASE_URL";

/// Environment variable overriding [`DEFAULT_OSM_BASE_URL`].
pub const OSM_BASE_URL_ENV: &str = "BOUNDARIES_OSM_BASE_URL";

/// The two base URLs every derived link is built from.
///
/// Values are used verbatim: a trailing slash ends up doubled in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// Host serving the zipped boundary files.
    pub files_base_url: String,
    /// OpenStreetMap host for relation pages.
    pub osm_base_url: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            files_base_url: DEFAULT_FILES_BASE_URL.to_string(),
            osm_base_url: DEFAULT_OSM_BASE_URL.to_string(),
        }
    }
}

impl LinkConfig {
    /// Create a configuration with explicit base URLs.
    pub fn new(files_base_url: impl Into<String>, osm_base_url: impl Into<String>) -> Self {
        Self {
            files_base_url: files_base_url.into(),
            osm_base_url: osm_base_url.into(),
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `BOUNDARIES_FILES_BASE_URL` | Host serving boundary archives | `https://files.99boundaries.com` |
    /// | `BOUNDARIES_OSM_BASE_URL` | OpenStreetMap host | `https://www.openstreetmap.org` |
    ///
    /// Unset or empty variables fall back to the default.
    pub fn from_env() -> Self {
        Self {
            files_base_url: env_or(FILES_BASE_URL_ENV, DEFAULT_FILES_BASE_URL),
            osm_base_url: env_or(OSM_BASE_URL_ENV, DEFAULT_OSM_BASE_URL),
        }
    }

    /// Set the files host.
    pub fn with_files_base_url(mut self, url: impl Into<String>) -> Self {
        self.files_base_url = url.into();
        self
    }

    /// Set the OpenStreetMap host.
    pub fn with_osm_base_url(mut self, url: impl Into<String>) -> Self {
        self.osm_base_url = url.into();
        self
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
