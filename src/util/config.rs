//! Configuration file support for jdkscout.
//!
//! jdkscout supports two configuration file locations:
//! - Global: `~/.jdkscout/config.toml` - User-wide defaults
//! - Project: `.jdkscout/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::comparator::{DISPLAY_COMPARATOR, GENERATE_COMPARATOR};
use crate::ops::select::JdkMode;

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR_NAME: &str = ".jdkscout";

/// File name of the discovery cache inside the user configuration directory.
pub const CACHE_FILE_NAME: &str = "discovered-toolchains-cache.toml";

/// File name of the user's toolchain definitions.
pub const TOOLCHAINS_FILE_NAME: &str = "toolchains.toml";

/// jdkscout configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discovery settings
    pub discovery: DiscoveryConfig,

    /// Selection settings
    pub select: SelectConfig,

    /// Toolchain definitions settings
    pub toolchains: ToolchainsConfig,
}

/// Discovery-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DiscoveryConfig {
    /// Whether selection may fall back to discovery (default: true)
    pub enabled: Option<bool>,

    /// Ranking used for display and selection
    pub comparator: Option<String>,

    /// Ranking used when generating definitions files
    pub generate_comparator: Option<String>,

    /// Whether to persist probe results across runs (default: true)
    pub cache: Option<bool>,
}

/// Selection-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// How the currently active JDK may satisfy a requirement
    pub mode: Option<JdkMode>,
}

/// Toolchain definitions configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainsConfig {
    /// Path of the toolchain definitions file
    pub file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.discovery.enabled.is_some() {
            self.discovery.enabled = other.discovery.enabled;
        }
        if other.discovery.comparator.is_some() {
            self.discovery.comparator = other.discovery.comparator;
        }
        if other.discovery.generate_comparator.is_some() {
            self.discovery.generate_comparator = other.discovery.generate_comparator;
        }
        if other.discovery.cache.is_some() {
            self.discovery.cache = other.discovery.cache;
        }
        if other.select.mode.is_some() {
            self.select.mode = other.select.mode;
        }
        if other.toolchains.file.is_some() {
            self.toolchains.file = other.toolchains.file;
        }
    }

    /// Whether selection may run discovery.
    pub fn discovery_enabled(&self) -> bool {
        self.discovery.enabled.unwrap_or(true)
    }

    /// Whether the discovery cache is persisted.
    pub fn cache_enabled(&self) -> bool {
        self.discovery.cache.unwrap_or(true)
    }

    /// Comparator spec for display and selection.
    pub fn comparator(&self) -> &str {
        self.discovery
            .comparator
            .as_deref()
            .unwrap_or(DISPLAY_COMPARATOR)
    }

    /// Comparator spec for generated definitions.
    pub fn generate_comparator(&self) -> &str {
        self.discovery
            .generate_comparator
            .as_deref()
            .unwrap_or(GENERATE_COMPARATOR)
    }

    /// Usage mode for the currently active JDK.
    pub fn mode(&self) -> JdkMode {
        self.select.mode.unwrap_or_default()
    }

    /// Path of the toolchain definitions file, if one can be located.
    pub fn toolchains_file(&self) -> Option<PathBuf> {
        self.toolchains
            .file
            .clone()
            .or_else(global_toolchains_path)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.jdkscout/config.toml)
/// 2. Global config (~/.jdkscout/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Load configuration for the current directory.
pub fn load_default_config() -> Config {
    let cwd = std::env::current_dir().unwrap_or_default();
    let project = project_config_path(&cwd);
    match global_config_path() {
        Some(global) => load_config(&global, &project),
        None => load_config(&PathBuf::new(), &project),
    }
}

/// Get the user's home directory.
pub fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().to_path_buf())
}

/// Get the global jdkscout directory (~/.jdkscout).
pub fn global_config_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(CONFIG_DIR_NAME))
}

/// Get the global config path (~/.jdkscout/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.jdkscout/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR_NAME).join("config.toml")
}

/// Get the discovery cache path (~/.jdkscout/discovered-toolchains-cache.toml).
pub fn cache_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(CACHE_FILE_NAME))
}

/// Get the default toolchain definitions path (~/.jdkscout/toolchains.toml).
pub fn global_toolchains_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(TOOLCHAINS_FILE_NAME))
}
