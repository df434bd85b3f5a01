//! Implementation of `jdkscout add`.
//!
//! Declares a JDK by hand in the toolchain definitions file. The file is
//! edited in place so existing entries and comments survive.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use toml_edit::{value, ArrayOfTables, DocumentMut, Item, Table};

use crate::core::model::{ToolchainModel, ID, TOOLCHAIN_TYPE_JDK, VENDOR, VERSION};
use crate::discovery::current::release_properties;
use crate::util::fs;

/// Options for adding a toolchain definition.
#[derive(Debug, Clone)]
pub struct AddOptions {
    /// Home directory of the JDK
    pub jdk_home: PathBuf,

    /// Identifier recorded as the `id` provide
    pub id: String,

    /// Vendor override (defaults to the `IMPLEMENTOR` release property)
    pub vendor: Option<String>,
}

/// Build the model for a hand-declared JDK from its `release` file.
pub fn declared_toolchain(opts: &AddOptions) -> Result<ToolchainModel> {
    if !opts.jdk_home.is_dir() {
        bail!("JDK home `{}` is not a directory", opts.jdk_home.display());
    }
    let jdk_home = std::path::absolute(&opts.jdk_home)
        .with_context(|| format!("failed to resolve {}", opts.jdk_home.display()))?;

    let properties = release_properties(&jdk_home)?;
    let Some(version) = properties.get("JAVA_VERSION").filter(|v| !v.is_empty()) else {
        bail!(
            "release file of JDK `{}` does not declare JAVA_VERSION",
            jdk_home.display()
        );
    };

    let mut model = ToolchainModel::jdk(jdk_home, Default::default());
    model.provides.insert(ID.to_string(), opts.id.clone());
    model.provides.insert(VERSION.to_string(), version.clone());
    let vendor = opts
        .vendor
        .clone()
        .or_else(|| properties.get("IMPLEMENTOR").cloned())
        .filter(|v| !v.is_empty());
    if let Some(vendor) = vendor {
        model.provides.insert(VENDOR.to_string(), vendor);
    }

    Ok(model)
}

/// Append a toolchain definition to `file`, creating the file if needed.
pub fn add_toolchain(file: &Path, opts: &AddOptions) -> Result<ToolchainModel> {
    let model = declared_toolchain(opts)?;

    let content = if file.exists() {
        fs::read_to_string(file)?
    } else {
        String::new()
    };
    let mut doc: DocumentMut = content
        .parse()
        .with_context(|| format!("failed to parse toolchains file: {}", file.display()))?;

    if !doc.contains_key("toolchain") {
        doc["toolchain"] = Item::ArrayOfTables(ArrayOfTables::new());
    }
    let Some(toolchains) = doc["toolchain"].as_array_of_tables_mut() else {
        bail!(
            "`toolchain` in {} is not an array of tables",
            file.display()
        );
    };

    let duplicate = toolchains.iter().any(|t| {
        t.get("provides")
            .and_then(|p| p.get(ID))
            .and_then(|id| id.as_str())
            == Some(opts.id.as_str())
    });
    if duplicate {
        bail!(
            "a toolchain with id `{}` already exists in {}",
            opts.id,
            file.display()
        );
    }

    toolchains.push(definition_table(&model));
    fs::write_string(file, &doc.to_string())?;

    tracing::info!("Added {} to {}", model, file.display());
    Ok(model)
}

fn definition_table(model: &ToolchainModel) -> Table {
    let mut provides = Table::new();
    for (key, val) in model.sorted_provides() {
        provides[key] = value(val);
    }

    let mut configuration = Table::new();
    configuration["jdk-home"] = value(model.install_path().display().to_string());

    let mut table = Table::new();
    table["type"] = value(TOOLCHAIN_TYPE_JDK);
    table["provides"] = Item::Table(provides);
    table["configuration"] = Item::Table(configuration);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::PersistedToolchains;
    use crate::test_support::{create_fake_jdk, JdkFixture};
    use tempfile::TempDir;

    fn opts(jdk_home: &Path, id: &str) -> AddOptions {
        AddOptions {
            jdk_home: jdk_home.to_path_buf(),
            id: id.to_string(),
            vendor: None,
        }
    }

    #[test]
    fn test_add_creates_file() {
        let tmp = TempDir::new().unwrap();
        let jdk = create_fake_jdk(&tmp.path().join("jdk-17"), "17.0.9", "Eclipse Adoptium");
        let file = tmp.path().join("conf/toolchains.toml");

        let model = add_toolchain(&file, &opts(&jdk, "temurin-17")).unwrap();
        assert_eq!(model.provide(ID), Some("temurin-17"));
        assert_eq!(model.vendor(), Some("Eclipse Adoptium"));

        let loaded = PersistedToolchains::load(&file).unwrap();
        assert_eq!(loaded.toolchains, vec![model]);
    }

    #[test]
    fn test_add_appends_and_keeps_comments() {
        let tmp = TempDir::new().unwrap();
        let jdk17 = create_fake_jdk(&tmp.path().join("jdk-17"), "17.0.9", "Acme");
        let jdk21 = create_fake_jdk(&tmp.path().join("jdk-21"), "21.0.1", "Acme");
        let file = tmp.path().join("toolchains.toml");
        std::fs::write(
            &file,
            r#"# managed by hand
[[toolchain]]
type = "jdk"

[toolchain.provides]
id = "legacy"
version = "11.0.2"

[toolchain.configuration]
jdk-home = "/opt/jdk-11"
"#,
        )
        .unwrap();

        add_toolchain(&file, &opts(&jdk17, "jdk17")).unwrap();
        let mut second = opts(&jdk21, "jdk21");
        second.vendor = Some("Custom".into());
        add_toolchain(&file, &second).unwrap();

        let content = std::fs::read_to_string(&file).unwrap();
        assert!(content.starts_with("# managed by hand"));

        let loaded = PersistedToolchains::load(&file).unwrap();
        assert_eq!(loaded.toolchains.len(), 3);
        assert_eq!(loaded.toolchains[0].provide(ID), Some("legacy"));
        assert_eq!(loaded.toolchains[1].provide(ID), Some("jdk17"));
        assert_eq!(loaded.toolchains[2].vendor(), Some("Custom"));
        assert_eq!(loaded.toolchains[2].version(), Some("21.0.1"));
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let tmp = TempDir::new().unwrap();
        let jdk = create_fake_jdk(&tmp.path().join("jdk"), "21", "Acme");
        let file = tmp.path().join("toolchains.toml");

        add_toolchain(&file, &opts(&jdk, "jdk21")).unwrap();
        let err = add_toolchain(&file, &opts(&jdk, "jdk21")).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_add_requires_release_version() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("toolchains.toml");

        let err = add_toolchain(&file, &opts(&tmp.path().join("missing"), "x")).unwrap_err();
        assert!(err.to_string().contains("not a directory"));

        let bare = JdkFixture::new("21", "Acme")
            .without_release()
            .write_to(&tmp.path().join("bare"))
            .unwrap();
        assert!(add_toolchain(&file, &opts(&bare, "x")).is_err());

        std::fs::write(bare.join("release"), "IMPLEMENTOR=\"Acme\"\n").unwrap();
        let err = add_toolchain(&file, &opts(&bare, "x")).unwrap_err();
        assert!(err.to_string().contains("JAVA_VERSION"));
        assert!(!file.exists());
    }
}
