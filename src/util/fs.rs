//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Resolve symlinks in `path`.
///
/// When `path` does not exist, the nearest existing ancestor is resolved and
/// the remaining components are appended unchanged.
pub fn canonicalize(path: &Path) -> PathBuf {
    if let Ok(real) = path.canonicalize() {
        return real;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            canonicalize(parent).join(name)
        }
        _ => path.to_path_buf(),
    }
}

/// Immediate subdirectories of `dir`, sorted. Unreadable or missing
/// directories yield an empty list.
pub fn list_subdirs(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}

/// Whether `path` is a file the current user may execute.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Parse a Java-style `release` file (`KEY="value"` lines).
pub fn parse_release_file(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_string_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("dir").join("file.toml");

        write_string(&path, "content").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_canonicalize_missing_tail() {
        let tmp = TempDir::new().unwrap();
        let real = tmp.path().canonicalize().unwrap();

        let missing = tmp.path().join("does").join("not-exist");
        assert_eq!(canonicalize(&missing), real.join("does").join("not-exist"));
    }

    #[cfg(unix)]
    #[test]
    fn test_canonicalize_resolves_symlinks() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("jdk-17");
        fs::create_dir(&target).unwrap();
        let link = tmp.path().join("current");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert_eq!(canonicalize(&link), target.canonicalize().unwrap());
    }

    #[test]
    fn test_list_subdirs_skips_files_and_missing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("b")).unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        fs::write(tmp.path().join("file.txt"), "x").unwrap();

        let dirs = list_subdirs(tmp.path());
        assert_eq!(dirs, vec![tmp.path().join("a"), tmp.path().join("b")]);
        assert!(list_subdirs(&tmp.path().join("missing")).is_empty());
    }

    #[test]
    fn test_parse_release_file() {
        let contents = "IMPLEMENTOR=\"Eclipse Adoptium\"\n\
                        # comment\n\
                        JAVA_VERSION=\"17.0.9\"\n\
                        MODULES=\"java.base java.logging\"\n";
        let props = parse_release_file(contents);
        assert_eq!(
            props,
            vec![
                ("IMPLEMENTOR".to_string(), "Eclipse Adoptium".to_string()),
                ("JAVA_VERSION".to_string(), "17.0.9".to_string()),
                ("MODULES".to_string(), "java.base java.logging".to_string()),
            ]
        );
    }
}
