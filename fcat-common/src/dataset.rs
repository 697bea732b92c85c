//! Dataset loading
//!
//! The catalog is read once per session from a URL, a local file or the
//! dataset compiled into the binary. Loading never fails outright: when the
//! configured source is unusable the embedded data is used instead (if
//! allowed), and as a last resort the catalog is empty. The outcome is
//! reported through [`LoadStatus`].

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::model::Filament;
use crate::{Error, Result};

/// Dataset compiled into the binary
pub const EMBEDDED_DATASET: &str = include_str!("../data/filaments.json");

/// Status shown when the embedded dataset is in use
pub const EMBEDDED_STATUS: &str = "Loaded local embedded data (open with a server to enable live JSON).";

/// Status shown when no data could be loaded
pub const FAILED_STATUS: &str = "Could not load data.";

/// Where the dataset lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetLocation {
    Embedded,
    Url(String),
    File(PathBuf),
}

impl DatasetLocation {
    /// `http(s)://...` is a URL, `embedded` the built-in data, anything else
    /// a file path
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            DatasetLocation::Url(value.to_string())
        } else if value.eq_ignore_ascii_case("embedded") {
            DatasetLocation::Embedded
        } else {
            DatasetLocation::File(PathBuf::from(value))
        }
    }
}

impl fmt::Display for DatasetLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetLocation::Embedded => f.write_str("embedded"),
            DatasetLocation::Url(url) => f.write_str(url),
            DatasetLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    pub location: DatasetLocation,
    /// Use the embedded dataset when the location cannot be loaded
    pub embedded_fallback: bool,
}

impl DatasetSource {
    pub fn embedded() -> Self {
        Self {
            location: DatasetLocation::Embedded,
            embedded_fallback: true,
        }
    }
}

/// How the catalog was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Loaded from the configured URL or file
    Live,
    Embedded,
    Failed,
}

impl LoadStatus {
    /// User-facing status line; live data needs none
    pub fn message(&self) -> Option<&'static str> {
        match self {
            LoadStatus::Live => None,
            LoadStatus::Embedded => Some(EMBEDDED_STATUS),
            LoadStatus::Failed => Some(FAILED_STATUS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub filaments: Vec<Filament>,
    pub status: LoadStatus,
}

/// Parse a JSON array of filament records
pub fn parse_catalog(text: &str) -> Result<Vec<Filament>> {
    Ok(serde_json::from_str(text)?)
}

pub fn embedded_catalog() -> Result<Vec<Filament>> {
    parse_catalog(EMBEDDED_DATASET)
}

async fn fetch_url(url: &str) -> Result<Vec<Filament>> {
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Http(format!("HTTP {}", status.as_u16())));
    }
    let body = response.text().await?;
    parse_catalog(&body)
}

async fn read_file(path: &Path) -> Result<Vec<Filament>> {
    let body = tokio::fs::read_to_string(path).await?;
    parse_catalog(&body)
}

/// Load the catalog from `source`
///
/// One attempt, no retry. Errors are logged and absorbed.
pub async fn load_catalog(source: &DatasetSource) -> LoadedCatalog {
    let attempt = match &source.location {
        DatasetLocation::Embedded => None,
        DatasetLocation::Url(url) => Some(fetch_url(url).await),
        DatasetLocation::File(path) => Some(read_file(path).await),
    };

    match attempt {
        Some(Ok(filaments)) => {
            info!("Loaded {} filaments from {}", filaments.len(), source.location);
            return LoadedCatalog {
                filaments,
                status: LoadStatus::Live,
            };
        }
        Some(Err(e)) if source.embedded_fallback => {
            warn!("Could not load dataset from {}: {}; using embedded data", source.location, e);
        }
        Some(Err(e)) => {
            error!("Data load failed from {}: {}", source.location, e);
            return LoadedCatalog {
                filaments: Vec::new(),
                status: LoadStatus::Failed,
            };
        }
        None => {}
    }

    match embedded_catalog() {
        Ok(filaments) => {
            info!("Loaded {} filaments from embedded data", filaments.len());
            LoadedCatalog {
                filaments,
                status: LoadStatus::Embedded,
            }
        }
        Err(e) => {
            error!("Data load failed: embedded dataset is invalid: {}", e);
            LoadedCatalog {
                filaments: Vec::new(),
                status: LoadStatus::Failed,
            }
        }
    }
}
