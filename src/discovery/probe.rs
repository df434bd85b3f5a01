//! Runtime introspection.
//!
//! A JDK is characterized by running its launcher with
//! `-XshowSettings:properties -version`, which dumps the system properties to
//! stderr before printing the version banner. Spawning the JVM is the most
//! expensive step of discovery, which is why results are cached.

use std::path::{Path, PathBuf};

use crate::core::model::{Provides, ToolchainModel, VERSION};
use crate::util::fs::is_executable;
use crate::util::process::ProcessBuilder;

/// System properties extracted from the launcher, without their `java.` prefix.
pub const TRACKED_PROPERTIES: [&str; 5] = [
    "version",
    "runtime.name",
    "runtime.version",
    "vendor",
    "vendor.version",
];

/// Environment variables that make the launcher print extra noise or change
/// the reported settings.
const JVM_OPTION_VARS: [&str; 3] = ["JAVA_TOOL_OPTIONS", "_JAVA_OPTIONS", "JDK_JAVA_OPTIONS"];

/// Extracts attributes from a JDK installation.
pub trait Probe: Send + Sync {
    /// Probe the JDK at `jdk_home`. Returns `None` if it cannot be characterized.
    fn probe(&self, jdk_home: &Path) -> Option<Provides>;
}

/// Probe that runs the JDK's own `java` launcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct LauncherProbe;

impl Probe for LauncherProbe {
    fn probe(&self, jdk_home: &Path) -> Option<Provides> {
        let Some(java) = find_launcher(jdk_home) else {
            tracing::debug!(
                "JDK toolchain discovered at {} will be ignored: unable to find java executable",
                jdk_home.display()
            );
            return None;
        };

        let mut cmd = ProcessBuilder::new(&java).args(["-XshowSettings:properties", "-version"]);
        for var in JVM_OPTION_VARS {
            cmd = cmd.env_remove(var);
        }

        tracing::debug!("Probing {}", cmd.display_command());
        let output = match cmd.exec() {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(
                    "JDK toolchain discovered at {} will be ignored: unable to execute java: {:#}",
                    jdk_home.display(),
                    e
                );
                return None;
            }
        };

        let mut text = String::from_utf8_lossy(&output.stderr).into_owned();
        text.push('\n');
        text.push_str(&String::from_utf8_lossy(&output.stdout));

        Some(parse_properties(&text))
    }
}

/// Locate the `java` launcher of a JDK.
pub fn find_launcher(jdk_home: &Path) -> Option<PathBuf> {
    let bin = jdk_home.join("bin");
    ["java", "java.exe"]
        .into_iter()
        .map(|name| bin.join(name))
        .find(|path| is_executable(path))
}

/// Extract tracked properties from `key = value` lines. The first occurrence
/// of each key wins; lines without `=` (multi-line value continuations, the
/// version banner) are skipped.
pub fn parse_properties(output: &str) -> Provides {
    let mut provides = Provides::new();

    for line in output.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let Some(name) = key.trim().strip_prefix("java.") else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() || !TRACKED_PROPERTIES.contains(&name) {
            continue;
        }
        provides
            .entry(name.to_string())
            .or_insert_with(|| value.to_string());
    }

    provides
}

/// Probe a JDK and build its model. JDKs that don't report a version are
/// discarded.
pub fn introspect(probe: &dyn Probe, jdk_home: &Path) -> Option<ToolchainModel> {
    tracing::debug!("Computing model for {}", jdk_home.display());

    let provides = probe.probe(jdk_home)?;
    if !provides.contains_key(VERSION) {
        tracing::debug!(
            "JDK toolchain discovered at {} will be ignored: could not obtain java.version",
            jdk_home.display()
        );
        return None;
    }

    Some(ToolchainModel::jdk(jdk_home, provides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{RUNTIME_NAME, VENDOR};
    use crate::test_support::{create_fake_jdk, FakeProbe, JdkFixture};
    use tempfile::TempDir;

    const SETTINGS: &str = "\
Property settings:
    file.encoding = UTF-8
    java.class.path =
    java.home = /usr/lib/jvm/temurin-17-jdk
    java.library.path = /usr/java/packages/lib
        /usr/lib64
        /lib64
    java.runtime.name = OpenJDK Runtime Environment
    java.runtime.version = 17.0.9+9
    java.vendor = Eclipse Adoptium
    java.vendor.url = https://adoptium.net/
    java.vendor.version = Temurin-17.0.9+9
    java.version = 17.0.9
    java.version.date = 2023-10-17
    java.vm.version = 17.0.9+9

openjdk version \"17.0.9\" 2023-10-17
";

    #[test]
    fn test_parse_properties() {
        let provides = parse_properties(SETTINGS);
        assert_eq!(provides.len(), 5);
        assert_eq!(provides.get(VERSION).map(String::as_str), Some("17.0.9"));
        assert_eq!(
            provides.get(RUNTIME_NAME).map(String::as_str),
            Some("OpenJDK Runtime Environment")
        );
        assert_eq!(
            provides.get("vendor.version").map(String::as_str),
            Some("Temurin-17.0.9+9")
        );
        assert_eq!(provides.get(VENDOR).map(String::as_str), Some("Eclipse Adoptium"));
    }

    #[test]
    fn test_parse_first_match_wins() {
        let provides = parse_properties("java.version = 11.0.2\njava.version = 99\n");
        assert_eq!(provides.get(VERSION).map(String::as_str), Some("11.0.2"));
    }

    #[test]
    fn test_introspect_requires_version() {
        let probe = FakeProbe::new();
        probe.respond("/opt/jdk", &[(VENDOR, "Acme")]);

        assert!(introspect(&probe, Path::new("/opt/jdk")).is_none());
        assert!(introspect(&probe, Path::new("/opt/unknown")).is_none());
        assert_eq!(probe.calls(), 2);
    }

    #[test]
    fn test_introspect_builds_model() {
        let probe = FakeProbe::new();
        probe.respond("/opt/jdk", &[(VERSION, "21.0.1"), (VENDOR, "Acme")]);

        let model = introspect(&probe, Path::new("/opt/jdk")).unwrap();
        assert!(model.is_jdk());
        assert_eq!(model.install_path(), Path::new("/opt/jdk"));
        assert_eq!(model.version(), Some("21.0.1"));
    }

    #[test]
    fn test_launcher_probe_without_launcher() {
        let tmp = TempDir::new().unwrap();
        let jdk = JdkFixture::new("21.0.1", "Acme")
            .without_launcher()
            .write_to(&tmp.path().join("jre-less"))
            .unwrap();
        assert!(find_launcher(&jdk).is_none());
        assert!(LauncherProbe.probe(&jdk).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_launcher_probe_runs_java() {
        let tmp = TempDir::new().unwrap();
        let jdk = create_fake_jdk(&tmp.path().join("jdk-21"), "21.0.1", "Acme Corp");

        let provides = LauncherProbe.probe(&jdk).unwrap();
        assert_eq!(provides.get(VERSION).map(String::as_str), Some("21.0.1"));
        assert_eq!(provides.get(VENDOR).map(String::as_str), Some("Acme Corp"));
        assert_eq!(
            provides.get(RUNTIME_NAME).map(String::as_str),
            Some("OpenJDK Runtime Environment")
        );
    }
}
