//! Configuration loading and path resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file (`~/.config/fcat/config.toml`)
//! 4. Compiled default (fallback)
//!
//! A missing or unreadable config file never stops the program: it is
//! logged and the compiled defaults apply.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::dataset::{DatasetLocation, DatasetSource};
use crate::{Error, Result};

/// Environment variable overriding the dataset location
pub const ENV_DATASET: &str = "FCAT_DATASET";

/// Environment variable overriding the state directory
pub const ENV_STATE_DIR: &str = "FCAT_STATE_DIR";

/// Environment variable overriding the config file path
pub const ENV_CONFIG: &str = "FCAT_CONFIG";

const APP_DIR: &str = "fcat";
const CONFIG_FILE: &str = "config.toml";

/// Contents of `config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Dataset URL, file path or `embedded`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,

    /// Directory holding persisted session state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,

    /// Fall back to the embedded dataset when loading fails
    #[serde(default = "default_embedded_fallback")]
    pub embedded_fallback: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            state_dir: None,
            embedded_fallback: default_embedded_fallback(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` overrides it
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_embedded_fallback() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Compiled-in defaults for the current platform
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub state_dir: PathBuf,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            state_dir: default_state_dir(),
        }
    }
}

/// OS-dependent default state directory
///
/// ~/.local/share/fcat on Linux, ~/Library/Application Support/fcat on
/// macOS, %LOCALAPPDATA%\fcat on Windows
fn default_state_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("./fcat_data"))
}

/// Location of the config file: `FCAT_CONFIG`, else the user config dir
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(ENV_CONFIG) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load the user's config, falling back to defaults
pub fn load_config() -> TomlConfig {
    let Some(path) = config_file_path() else {
        debug!("No config directory on this platform, using defaults");
        return TomlConfig::default();
    };

    if !path.exists() {
        debug!("Config file {} not found, using defaults", path.display());
        return TomlConfig::default();
    }

    match load_toml_config(&path) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Ignoring config file {}: {}", path.display(), e);
            TomlConfig::default()
        }
    }
}

/// Write a config file atomically (temp file + rename)
///
/// Parent directories are created as needed. Readers never observe a
/// partially written file.
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content =
        toml::to_string_pretty(config).map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
    write_atomic(path, content.as_bytes())
}

/// Write `bytes` to `path` via a sibling `.tmp` file and a rename
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    std::fs::write(&tmp_path, bytes)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

/// Resolve where the dataset comes from
///
/// Priority: CLI argument, `FCAT_DATASET`, config file, embedded data.
pub fn resolve_dataset(cli_arg: Option<&str>, config: &TomlConfig) -> DatasetSource {
    let location = cli_arg
        .map(str::to_string)
        .or_else(|| std::env::var(ENV_DATASET).ok())
        .or_else(|| config.dataset.clone())
        .map(|s| DatasetLocation::parse(&s))
        .unwrap_or(DatasetLocation::Embedded);

    DatasetSource {
        location,
        embedded_fallback: config.embedded_fallback,
    }
}

/// Resolve the state directory
///
/// Priority: CLI argument, `FCAT_STATE_DIR`, config file, platform default.
pub fn resolve_state_dir(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ENV_STATE_DIR) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.state_dir {
        return path.clone();
    }

    // Priority 4: Compiled default
    CompiledDefaults::for_current_platform().state_dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert!(config.embedded_fallback);
        assert_eq!(config.logging.level, "info");
        assert!(config.dataset.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: TomlConfig = toml::from_str("dataset = \"https://example.com/filaments.json\"").unwrap();
        assert_eq!(config.dataset.as_deref(), Some("https://example.com/filaments.json"));
        assert!(config.embedded_fallback);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_logging_section() {
        let config: TomlConfig = toml::from_str("embedded_fallback = false\n[logging]\nlevel = \"debug\"\n").unwrap();
        assert!(!config.embedded_fallback);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_cli_arg_wins() {
        let config = TomlConfig {
            state_dir: Some(PathBuf::from("/from/toml")),
            ..TomlConfig::default()
        };
        assert_eq!(
            resolve_state_dir(Some(Path::new("/from/cli")), &config),
            PathBuf::from("/from/cli")
        );
        let source = resolve_dataset(Some("local.json"), &config);
        assert_eq!(source.location, DatasetLocation::File(PathBuf::from("local.json")));
    }
}
