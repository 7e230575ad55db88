//! Configuration loaded from `config.json`.
//!
//! The file is read once at startup and the resulting [`Config`] is passed by
//! reference to everything that needs it. Expected layout:
//!
//! ```json
//! {
//!   "geoserver": {
//!     "host": "geoserver.hel.fi",
//!     "prefix": "/geoserver/rest",
//!     "auth": "Basic xxxxxxxxxxxxxxxxxxxxxxxxxx=="
//!   },
//!   "workspaces": ["ltj-virka", "ltj-avoin", "ltj-dev"],
//!   "name_title_map": {
//!     "arvo_kaapakohteet": "Valuable conks"
//!   }
//! }
//! ```

use crate::error::AppError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Name of the configuration file, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Connection settings for the GeoServer REST API.
#[derive(Deserialize, Clone)]
pub struct GeoServerConfig {
    /// Host name without scheme, e.g. `geoserver.hel.fi`.
    pub host: String,
    /// Path prefix of the REST API, e.g. `/geoserver/rest`.
    pub prefix: String,
    /// Complete `Authorization` header value, e.g. `Basic <base64>`.
    pub auth: String,
}

impl fmt::Debug for GeoServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoServerConfig")
            .field("host", &self.host)
            .field("prefix", &self.prefix)
            .field("auth", &"<redacted>")
            .finish()
    }
}

/// Top-level configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub geoserver: GeoServerConfig,
    /// Workspaces to scan, in processing order.
    pub workspaces: Vec<String>,
    /// Layer name to display title.
    #[serde(default)]
    pub name_title_map: HashMap<String, String>,
}

impl Config {
    /// Returns the display title for a layer, falling back to the layer name.
    ///
    /// # Examples
    ///
    /// ```
    /// use geopub_core::config::Config;
    ///
    /// let config: Config = serde_json::from_str(r#"{
    ///     "geoserver": {"host": "h", "prefix": "/p", "auth": "Basic x"},
    ///     "workspaces": ["ltj-dev"],
    ///     "name_title_map": {"arvo_kaapakohteet": "Valuable conks"}
    /// }"#).unwrap();
    ///
    /// assert_eq!(config.resolve_title("arvo_kaapakohteet"), "Valuable conks");
    /// assert_eq!(config.resolve_title("unmapped_layer"), "unmapped_layer");
    /// ```
    pub fn resolve_title<'a>(&'a self, layer_name: &'a str) -> &'a str {
        self.name_title_map
            .get(layer_name)
            .map(String::as_str)
            .unwrap_or(layer_name)
    }
}

/// Reads and parses the configuration file at `path`.
///
/// # Errors
///
/// Returns `AppError::ConfigNotFound` if the file cannot be read and
/// `AppError::ConfigParse` if it is not valid JSON or a required field
/// (`workspaces` or anything under `geoserver`) is missing.
pub fn load_config(path: &Path) -> Result<Config, AppError> {
    let contents = fs::read_to_string(path).map_err(|source| AppError::ConfigNotFound {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| AppError::ConfigParse {
        path: path.display().to_string(),
        source,
    })
}
