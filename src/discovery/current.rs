//! The currently active JDK.
//!
//! The active JDK is the one `JAVA_HOME` points at, or else the one whose
//! `javac` is first on `PATH`. Its attributes are read from the `release`
//! file shipped in every JDK since 9 (and most 8 builds), so no process is
//! spawned.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::model::{Provides, RUNTIME_VERSION, VENDOR, VENDOR_VERSION, VERSION};
use crate::util::fs::{canonicalize, parse_release_file, read_to_string};
use crate::util::process::find_executable;

/// Name of the properties file at the root of a JDK.
pub const RELEASE_FILE: &str = "release";

/// `release` keys and the provide keys they map to.
const RELEASE_PROVIDES: [(&str, &str); 4] = [
    ("JAVA_VERSION", VERSION),
    ("JAVA_RUNTIME_VERSION", RUNTIME_VERSION),
    ("IMPLEMENTOR", VENDOR),
    ("IMPLEMENTOR_VERSION", VENDOR_VERSION),
];

/// Locate the home of the active JDK.
pub fn detect_current_home(vars: &BTreeMap<String, String>) -> Option<PathBuf> {
    if let Some(java_home) = vars.get("JAVA_HOME").filter(|v| !v.trim().is_empty()) {
        return Some(canonicalize(Path::new(java_home)));
    }

    let javac = find_executable("javac")?;
    let home = canonicalize(&javac).parent()?.parent()?.to_path_buf();
    tracing::debug!("Active JDK from PATH: {}", home.display());
    Some(home)
}

/// Read all properties of a JDK's `release` file.
pub fn release_properties(jdk_home: &Path) -> Result<BTreeMap<String, String>> {
    let path = jdk_home.join(RELEASE_FILE);
    let contents = read_to_string(&path)
        .with_context(|| format!("no release file in JDK {}", jdk_home.display()))?;
    Ok(parse_release_file(&contents).into_iter().collect())
}

/// Provides derived from a JDK's `release` file, if it declares a version.
pub fn release_provides(jdk_home: &Path) -> Option<Provides> {
    let properties = match release_properties(jdk_home) {
        Ok(properties) => properties,
        Err(e) => {
            tracing::debug!("{:#}", e);
            return None;
        }
    };

    let provides: Provides = RELEASE_PROVIDES
        .iter()
        .filter_map(|(property, key)| {
            properties
                .get(*property)
                .filter(|v| !v.is_empty())
                .map(|v| (key.to_string(), v.clone()))
        })
        .collect();

    provides.contains_key(VERSION).then_some(provides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_fake_jdk, JdkFixture};
    use tempfile::TempDir;

    #[test]
    fn test_release_provides() {
        let tmp = TempDir::new().unwrap();
        let jdk = create_fake_jdk(&tmp.path().join("jdk-17"), "17.0.9", "Eclipse Adoptium");

        let provides = release_provides(&jdk).unwrap();
        assert_eq!(provides.get(VERSION).map(String::as_str), Some("17.0.9"));
        assert_eq!(
            provides.get(VENDOR).map(String::as_str),
            Some("Eclipse Adoptium")
        );
        assert_eq!(
            provides.get(RUNTIME_VERSION).map(String::as_str),
            Some("17.0.9+9")
        );
    }

    #[test]
    fn test_release_without_version() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(RELEASE_FILE), "IMPLEMENTOR=\"Acme\"\n").unwrap();
        assert!(release_provides(tmp.path()).is_none());
        assert!(release_provides(&tmp.path().join("missing")).is_none());

        let jdk = JdkFixture::new("21", "Acme")
            .without_release()
            .write_to(&tmp.path().join("jdk"))
            .unwrap();
        assert!(release_properties(&jdk).is_err());
    }

    #[test]
    fn test_current_home_from_java_home() {
        let tmp = TempDir::new().unwrap();
        let jdk = create_fake_jdk(&tmp.path().join("jdk"), "21", "Acme");
        let vars = BTreeMap::from([("JAVA_HOME".to_string(), jdk.display().to_string())]);

        assert_eq!(detect_current_home(&vars), Some(canonicalize(&jdk)));
    }
}
