//! Location scanning for JDK installations.
//!
//! Candidates come from three places:
//! 1. The currently active JDK
//! 2. Environment variables named `JAVA*_HOME` (`JAVA_HOME`, `JAVA17_HOME`, ...)
//! 3. Subdirectories of well-known install roots used by tool managers
//!    (SDKMAN, Gradle, jenv, ...) and by the operating system
//!
//! Only candidates containing a `javac` are kept.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::util::fs::{canonicalize, list_subdirs};

use super::current::detect_current_home;

/// Install roots relative to the user's home directory.
const TOOL_MANAGER_ROOTS: &[&str] = &[
    ".jdks",
    ".m2/jdks",
    ".sdkman/candidates/java",
    ".gradle/jdks",
    ".jenv/versions",
    ".jbang/cache/jdks",
    ".asdf/installs",
    ".asdf/installs/java",
    ".jabba/jdk",
];

/// Nested JDK home inside a macOS `.jdk` bundle.
const BUNDLE_HOME: &str = "Contents/Home";

/// Operating system family, which decides the system install roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    MacOs,
    Windows,
    Unix,
}

impl OsFamily {
    /// The family of the host this binary runs on.
    pub fn host() -> Self {
        if cfg!(target_os = "macos") {
            OsFamily::MacOs
        } else if cfg!(windows) {
            OsFamily::Windows
        } else {
            OsFamily::Unix
        }
    }
}

/// Everything the scanner reads from the host, captured once.
#[derive(Debug, Clone)]
pub struct HostEnvironment {
    /// Process environment variables
    pub vars: BTreeMap<String, String>,
    /// The user's home directory
    pub home_dir: Option<PathBuf>,
    /// Operating system family
    pub os: OsFamily,
    /// Canonical home of the currently active JDK
    pub current_home: Option<PathBuf>,
}

impl HostEnvironment {
    /// Capture the environment of the running process.
    pub fn detect() -> Self {
        let vars: BTreeMap<String, String> = std::env::vars().collect();
        let current_home = detect_current_home(&vars);
        HostEnvironment {
            vars,
            home_dir: crate::util::config::home_dir(),
            os: OsFamily::host(),
            current_home,
        }
    }

    /// An empty environment, mostly useful as a starting point in tests.
    pub fn empty(os: OsFamily) -> Self {
        HostEnvironment {
            vars: BTreeMap::new(),
            home_dir: None,
            os,
            current_home: None,
        }
    }

    /// Environment variables named `JAVA*_HOME` with non-empty values.
    pub fn java_home_vars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars
            .iter()
            .filter(|(name, value)| is_java_home_var(name) && !value.trim().is_empty())
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Whether `name` looks like `JAVA*_HOME`.
pub fn is_java_home_var(name: &str) -> bool {
    name.starts_with("JAVA") && name.ends_with("_HOME") && name.len() >= "JAVA_HOME".len()
}

/// Whether `dir` contains a Java compiler.
pub fn has_compiler(dir: &Path) -> bool {
    let bin = dir.join("bin");
    bin.join("javac").is_file() || bin.join("javac.exe").is_file()
}

/// Install roots to enumerate on this host.
pub fn install_roots(host: &HostEnvironment) -> Vec<PathBuf> {
    let mut roots = Vec::new();

    if let Some(home) = &host.home_dir {
        roots.extend(TOOL_MANAGER_ROOTS.iter().map(|root| home.join(root)));
    }

    match host.os {
        OsFamily::MacOs => {
            roots.push(PathBuf::from("/Library/Java/JavaVirtualMachines"));
            if let Some(home) = &host.home_dir {
                roots.push(home.join("Library/Java/JavaVirtualMachines"));
            }
        }
        OsFamily::Windows => {
            roots.push(PathBuf::from("C:\\Program Files\\Java"));
        }
        OsFamily::Unix => {
            roots.extend(
                ["/usr/jdk", "/usr/java", "/opt/java", "/usr/lib/jvm"]
                    .into_iter()
                    .map(PathBuf::from),
            );
        }
    }

    roots
}

/// Enumerate candidate JDK homes: canonical, deduplicated, each with a `javac`.
pub fn scan(host: &HostEnvironment) -> BTreeSet<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();

    if let Some(current) = &host.current_home {
        candidates.push(current.clone());
    }

    candidates.extend(host.java_home_vars().map(|(_, value)| PathBuf::from(value)));

    for root in install_roots(host) {
        if !root.is_dir() {
            continue;
        }
        for dir in list_subdirs(&root) {
            candidates.push(dir.join(BUNDLE_HOME));
            candidates.push(dir);
        }
    }

    let found: BTreeSet<PathBuf> = candidates
        .iter()
        .filter(|dir| has_compiler(dir))
        .map(|dir| canonicalize(dir))
        .collect();

    tracing::debug!("Scanned {} locations, {} JDKs found", candidates.len(), found.len());
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_fake_jdk;
    use tempfile::TempDir;

    fn host_with_home(home: &Path) -> HostEnvironment {
        let mut host = HostEnvironment::empty(OsFamily::Windows);
        host.home_dir = Some(home.to_path_buf());
        host
    }

    #[test]
    fn test_java_home_var_pattern() {
        assert!(is_java_home_var("JAVA_HOME"));
        assert!(is_java_home_var("JAVA17_HOME"));
        assert!(is_java_home_var("JAVA_21_HOME"));
        assert!(!is_java_home_var("JAVA_OPTS"));
        assert!(!is_java_home_var("MY_JAVA_HOME"));
        assert!(!is_java_home_var("JAVAHOME"));
    }

    #[test]
    fn test_install_roots_per_os() {
        let mut host = HostEnvironment::empty(OsFamily::Unix);
        assert!(install_roots(&host).contains(&PathBuf::from("/usr/lib/jvm")));

        host.os = OsFamily::MacOs;
        host.home_dir = Some(PathBuf::from("/Users/dev"));
        let roots = install_roots(&host);
        assert!(roots.contains(&PathBuf::from("/Library/Java/JavaVirtualMachines")));
        assert!(roots.contains(&PathBuf::from("/Users/dev").join(".sdkman/candidates/java")));
        assert!(!roots.contains(&PathBuf::from("/usr/lib/jvm")));
    }

    #[test]
    fn test_scan_tool_manager_roots() {
        let tmp = TempDir::new().unwrap();
        let sdkman = tmp.path().join(".sdkman/candidates/java");
        let jdk17 = create_fake_jdk(&sdkman.join("17.0.9-tem"), "17.0.9", "Eclipse Adoptium");
        // directories without javac are ignored
        std::fs::create_dir_all(sdkman.join("broken")).unwrap();

        let found = scan(&host_with_home(tmp.path()));
        assert_eq!(found.len(), 1);
        assert!(found.contains(&canonicalize(&jdk17)));
    }

    #[test]
    fn test_scan_bundle_layout() {
        let tmp = TempDir::new().unwrap();
        let bundle = tmp.path().join(".jdks/temurin-21.jdk");
        let home = create_fake_jdk(&bundle.join("Contents/Home"), "21.0.1", "Eclipse Adoptium");

        let found = scan(&host_with_home(tmp.path()));
        assert_eq!(found, BTreeSet::from([canonicalize(&home)]));
    }

    #[test]
    fn test_scan_env_vars_and_dedup() {
        let tmp = TempDir::new().unwrap();
        let jdk = create_fake_jdk(&tmp.path().join(".gradle/jdks/jdk-11"), "11.0.21", "Acme");

        let mut host = host_with_home(tmp.path());
        host.vars
            .insert("JAVA11_HOME".into(), jdk.display().to_string());
        host.vars
            .insert("JAVA_HOME".into(), jdk.join("bin/..").display().to_string());
        host.current_home = Some(jdk.clone());

        let found = scan(&host);
        assert_eq!(found, BTreeSet::from([canonicalize(&jdk)]));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_resolves_symlinks() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join(".sdkman/candidates/java");
        let jdk = create_fake_jdk(&root.join("21.0.1-tem"), "21.0.1", "Acme");
        std::os::unix::fs::symlink(&jdk, root.join("current")).unwrap();

        let found = scan(&host_with_home(tmp.path()));
        assert_eq!(found, BTreeSet::from([canonicalize(&jdk)]));
    }

    #[test]
    fn test_scan_missing_roots_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(scan(&host_with_home(&tmp.path().join("nobody"))).is_empty());
    }
}
