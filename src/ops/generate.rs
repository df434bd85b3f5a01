//! Implementation of `jdkscout generate`.

use std::path::Path;

use anyhow::Result;

use crate::core::comparator::ToolchainComparator;
use crate::core::model::{PersistedToolchains, ToolchainModel};
use crate::discovery::Discoverer;

/// Discover toolchains and build a definitions document from them.
///
/// Host-dependent flags are stripped; `lts` still decides the order.
pub fn generate(discoverer: &Discoverer, comparator: &ToolchainComparator) -> PersistedToolchains {
    let toolchains = discoverer
        .discover(comparator)
        .iter()
        .map(ToolchainModel::without_transient)
        .collect();
    PersistedToolchains::new(toolchains)
}

/// Write a definitions document to `file`, or return it as text when no file
/// is given.
pub fn write_definitions(
    definitions: &PersistedToolchains,
    file: Option<&Path>,
) -> Result<Option<String>> {
    match file {
        Some(path) => {
            definitions.save(path)?;
            tracing::info!(
                "Wrote {} toolchains to {}",
                definitions.toolchains.len(),
                path.display()
            );
            Ok(None)
        }
        None => definitions.to_toml().map(Some),
    }
}
