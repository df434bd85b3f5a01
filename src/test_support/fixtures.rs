//! Fake JDK installations on disk.

use std::path::{Path, PathBuf};

/// Layout of a fake JDK.
///
/// The launcher is a shell script that prints a `-XshowSettings:properties`
/// style dump to stderr, so it can be probed like a real JDK on unix hosts.
#[derive(Debug, Clone)]
pub struct JdkFixture {
    /// `java.version` and `JAVA_VERSION`
    pub version: String,
    /// `java.vendor` and `IMPLEMENTOR`
    pub vendor: String,
    /// Whether to write a `release` file.
    pub release: bool,
    /// Whether to write a `bin/java` launcher.
    pub launcher: bool,
}

impl JdkFixture {
    pub fn new(version: impl Into<String>, vendor: impl Into<String>) -> Self {
        JdkFixture {
            version: version.into(),
            vendor: vendor.into(),
            release: true,
            launcher: true,
        }
    }

    /// Skip the `release` file.
    pub fn without_release(mut self) -> Self {
        self.release = false;
        self
    }

    /// Skip the `bin/java` launcher.
    pub fn without_launcher(mut self) -> Self {
        self.launcher = false;
        self
    }

    fn settings_script(&self) -> String {
        format!(
            r#"#!/bin/sh
cat >&2 <<'EOF'
Property settings:
    file.encoding = UTF-8
    java.runtime.name = OpenJDK Runtime Environment
    java.runtime.version = {version}+9
    java.vendor = {vendor}
    java.vendor.url = https://example.invalid/
    java.version = {version}
    java.vm.name = OpenJDK 64-Bit Server VM

openjdk version "{version}"
EOF
"#,
            version = self.version,
            vendor = self.vendor,
        )
    }

    fn release_file(&self) -> String {
        format!(
            "IMPLEMENTOR=\"{vendor}\"\nJAVA_RUNTIME_VERSION=\"{version}+9\"\nJAVA_VERSION=\"{version}\"\n",
            version = self.version,
            vendor = self.vendor,
        )
    }

    /// Write the JDK layout at `home`.
    pub fn write_to(&self, home: &Path) -> std::io::Result<PathBuf> {
        let bin = home.join("bin");
        std::fs::create_dir_all(&bin)?;

        write_executable(&bin.join("javac"), "#!/bin/sh\nexit 0\n")?;
        if self.launcher {
            write_executable(&bin.join("java"), &self.settings_script())?;
        }
        if self.release {
            std::fs::write(home.join("release"), self.release_file())?;
        }

        Ok(home.to_path_buf())
    }
}

fn write_executable(path: &Path, contents: &str) -> std::io::Result<()> {
    std::fs::write(path, contents)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}

/// Create a complete fake JDK at `home` and return its path.
pub fn create_fake_jdk(home: &Path, version: &str, vendor: &str) -> PathBuf {
    JdkFixture::new(version, vendor)
        .write_to(home)
        .expect("failed to write fake JDK")
}
