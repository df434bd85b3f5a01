//! Toolchain model and the persisted toolchains document.
//!
//! The same TOML shape is used for the discovery cache, for generated
//! definitions files and for the user's configured toolchains:
//!
//! ```toml
//! [[toolchain]]
//! type = "jdk"
//!
//! [toolchain.provides]
//! version = "17.0.9"
//! vendor = "Eclipse Adoptium"
//!
//! [toolchain.configuration]
//! jdk-home = "/usr/lib/jvm/temurin-17-jdk"
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Toolchain type for JDK installations.
pub const TOOLCHAIN_TYPE_JDK: &str = "jdk";

/// Provide key: `java.version`.
pub const VERSION: &str = "version";
/// Provide key: `java.runtime.name`.
pub const RUNTIME_NAME: &str = "runtime.name";
/// Provide key: `java.runtime.version`.
pub const RUNTIME_VERSION: &str = "runtime.version";
/// Provide key: `java.vendor`.
pub const VENDOR: &str = "vendor";
/// Provide key: `java.vendor.version`.
pub const VENDOR_VERSION: &str = "vendor.version";
/// Transient provide key: the toolchain is the currently active JDK.
pub const CURRENT: &str = "current";
/// Transient provide key: the toolchain is a long-term-support release.
pub const LTS: &str = "lts";
/// Transient provide key: names of `JAVA*_HOME` variables pointing at the toolchain.
pub const ENV: &str = "env";
/// Provide key for hand-declared toolchain identifiers.
pub const ID: &str = "id";

/// Provide keys that are recomputed on every discovery pass and never persisted.
pub const TRANSIENT_PROVIDES: [&str; 3] = [CURRENT, LTS, ENV];

/// Display order for provide keys. Unknown keys are shown last.
pub const SORTED_PROVIDES: [&str; 9] = [
    ID,
    VERSION,
    RUNTIME_NAME,
    RUNTIME_VERSION,
    VENDOR,
    VENDOR_VERSION,
    CURRENT,
    LTS,
    ENV,
];

/// Attribute bag describing a toolchain.
pub type Provides = BTreeMap<String, String>;

/// Toolchain-specific configuration block.
///
/// Only `jdk-home` is understood. Keys belonging to other toolchain types
/// are ignored when reading a definitions file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainConfiguration {
    /// Installation directory of the JDK.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jdk_home: Option<PathBuf>,
}

/// A discovered or declared toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainModel {
    /// Toolchain type (always `jdk` for discovered toolchains)
    #[serde(rename = "type")]
    pub kind: String,

    /// Attributes matched against requirements
    #[serde(default)]
    pub provides: Provides,

    /// Configuration carrying the install path
    #[serde(default)]
    pub configuration: ToolchainConfiguration,
}

impl ToolchainModel {
    /// Create a JDK toolchain model.
    pub fn jdk(jdk_home: impl Into<PathBuf>, provides: Provides) -> Self {
        ToolchainModel {
            kind: TOOLCHAIN_TYPE_JDK.to_string(),
            provides,
            configuration: ToolchainConfiguration {
                jdk_home: Some(jdk_home.into()),
            },
        }
    }

    /// The installation path; this is the cache key.
    ///
    /// Empty when the configuration has no `jdk-home`.
    pub fn install_path(&self) -> &Path {
        self.configuration
            .jdk_home
            .as_deref()
            .unwrap_or_else(|| Path::new(""))
    }

    /// Whether this is a JDK toolchain.
    pub fn is_jdk(&self) -> bool {
        self.kind == TOOLCHAIN_TYPE_JDK
    }

    /// Whether this is a JDK toolchain with a declared home.
    pub fn is_usable_jdk(&self) -> bool {
        self.is_jdk() && self.configuration.jdk_home.is_some()
    }

    /// Look up a provided attribute.
    pub fn provide(&self, key: &str) -> Option<&str> {
        self.provides.get(key).map(String::as_str)
    }

    /// Whether a flag-style attribute is present.
    pub fn has_flag(&self, key: &str) -> bool {
        self.provides.contains_key(key)
    }

    /// The `version` attribute.
    pub fn version(&self) -> Option<&str> {
        self.provide(VERSION)
    }

    /// The `vendor` attribute.
    pub fn vendor(&self) -> Option<&str> {
        self.provide(VENDOR)
    }

    /// Copy of this model without transient attributes.
    pub fn without_transient(&self) -> Self {
        let mut model = self.clone();
        model.strip_transient();
        model
    }

    /// Remove transient attributes in place.
    pub fn strip_transient(&mut self) {
        for key in TRANSIENT_PROVIDES {
            self.provides.remove(key);
        }
    }

    /// Provides in display order.
    pub fn sorted_provides(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .provides
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_by_key(|(k, _)| {
            SORTED_PROVIDES
                .iter()
                .position(|known| known == k)
                .unwrap_or(SORTED_PROVIDES.len())
        });
        entries
    }
}

impl fmt::Display for ToolchainModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JDK[{}]", self.install_path().display())
    }
}

/// A list of toolchains as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedToolchains {
    /// Toolchain entries
    #[serde(default, rename = "toolchain")]
    pub toolchains: Vec<ToolchainModel>,
}

impl PersistedToolchains {
    /// Create a document from a list of toolchains.
    pub fn new(toolchains: Vec<ToolchainModel>) -> Self {
        PersistedToolchains { toolchains }
    }

    /// Parse a document from TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse toolchains document")
    }

    /// Serialize the document to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize toolchains document")
    }

    /// Load a document from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = crate::util::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse toolchains file: {}", path.display()))
    }

    /// Load a document, or an empty one if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the document to a file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;
        crate::util::fs::write_string(path, &contents)
    }
}
