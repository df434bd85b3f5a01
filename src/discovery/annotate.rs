//! Transient ranking attributes.
//!
//! `current`, `env` and `lts` depend on the state of the host rather than on
//! the JDK itself, so they are recomputed on every pass and never persisted.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::model::{ToolchainModel, CURRENT, ENV, LTS};
use crate::core::version::is_dotted_prefix;
use crate::util::fs::canonicalize;

use super::scan::HostEnvironment;

/// Feature releases with long-term support.
pub const LTS_VERSIONS: [&str; 5] = ["1.8", "11", "17", "21", "25"];

/// Whether `version` belongs to a long-term support release line.
pub fn is_lts(version: &str) -> bool {
    LTS_VERSIONS
        .iter()
        .any(|lts| version == *lts || is_dotted_prefix(lts, version))
}

/// Adds host-dependent flags to toolchain models.
#[derive(Debug, Clone, Default)]
pub struct FlagAnnotator {
    current_home: Option<PathBuf>,
    /// `JAVA*_HOME` variable names by canonical path
    env_homes: BTreeMap<PathBuf, Vec<String>>,
}

impl FlagAnnotator {
    pub fn new(host: &HostEnvironment) -> Self {
        let mut env_homes: BTreeMap<PathBuf, Vec<String>> = BTreeMap::new();
        for (name, value) in host.java_home_vars() {
            env_homes
                .entry(canonicalize(&PathBuf::from(value)))
                .or_default()
                .push(name.to_string());
        }
        for names in env_homes.values_mut() {
            names.sort();
        }

        FlagAnnotator {
            current_home: host.current_home.as_deref().map(canonicalize),
            env_homes,
        }
    }

    /// Set the transient flags on `model`, replacing any stale ones.
    pub fn annotate(&self, model: &mut ToolchainModel) {
        model.strip_transient();

        let path = model.install_path().to_path_buf();
        if self.current_home.as_ref() == Some(&path) {
            model.provides.insert(CURRENT.to_string(), "true".to_string());
        }
        if let Some(names) = self.env_homes.get(&path) {
            model.provides.insert(ENV.to_string(), names.join(","));
        }
        if model.version().is_some_and(is_lts) {
            model.provides.insert(LTS.to_string(), "true".to_string());
        }
    }

    /// Annotated copy of `model`.
    pub fn annotated(&self, model: &ToolchainModel) -> ToolchainModel {
        let mut model = model.clone();
        self.annotate(&mut model);
        model
    }
}
