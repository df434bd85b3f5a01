//! Implementation of `jdkscout select`.
//!
//! Picks at most one JDK satisfying a set of constraints. Configured
//! toolchains are considered before discovered ones, and the currently active
//! JDK can short-circuit the whole search.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::comparator::ToolchainComparator;
use crate::core::model::ToolchainModel;
use crate::core::requirement::{Constraints, RequirementSet};
use crate::discovery::Discoverer;

/// How the currently active JDK may be used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JdkMode {
    /// Always select a toolchain, even if it is the active JDK.
    Never,
    /// Report the active JDK when the selected toolchain is the active JDK.
    IfSame,
    /// Use the active JDK whenever it satisfies the requirements.
    #[default]
    IfMatch,
}

impl JdkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            JdkMode::Never => "Never",
            JdkMode::IfSame => "IfSame",
            JdkMode::IfMatch => "IfMatch",
        }
    }
}

impl fmt::Display for JdkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JdkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(|c: char| c == '-' || c == '_', "").as_str() {
            "never" => Ok(JdkMode::Never),
            "ifsame" => Ok(JdkMode::IfSame),
            "ifmatch" => Ok(JdkMode::IfMatch),
            _ => Err(format!(
                "unknown JDK mode `{}` (expected Never, IfSame or IfMatch)",
                s
            )),
        }
    }
}

/// Options for selecting a toolchain.
#[derive(Debug, Clone)]
pub struct SelectRequest {
    /// Constraints the toolchain must satisfy
    pub constraints: Constraints,

    /// Usage of the currently active JDK
    pub mode: JdkMode,

    /// Fall back to discovery when no configured toolchain matches
    pub discover: bool,

    /// Ranking of discovered toolchains
    pub comparator: ToolchainComparator,
}

/// Result of a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// No constraints were supplied.
    NothingToSelect,
    /// The currently active JDK is suitable.
    UseCurrent(ToolchainModel),
    /// A toolchain other than the active JDK was selected.
    Selected(ToolchainModel),
}

impl SelectOutcome {
    /// The chosen toolchain, if any.
    pub fn toolchain(&self) -> Option<&ToolchainModel> {
        match self {
            SelectOutcome::NothingToSelect => None,
            SelectOutcome::UseCurrent(model) | SelectOutcome::Selected(model) => Some(model),
        }
    }
}

/// Error returned when selection fails.
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    #[error(
        "cannot find matching toolchain definitions for the following toolchain types:\n  {requirements}\n\
         Declare one with `jdkscout add --jdk-home <path> --id <id>`, list it in the toolchains file, \
         or enable discovery"
    )]
    NoMatch { requirements: RequirementSet },
}

/// Select a toolchain for `request`.
///
/// `configured` are the user's declared toolchains, searched in order before
/// discovery runs.
pub fn select_toolchain(
    request: &SelectRequest,
    discoverer: &Discoverer,
    configured: &[ToolchainModel],
) -> Result<SelectOutcome, SelectError> {
    if request.constraints.is_empty() {
        tracing::debug!("No toolchain requirements, nothing to select");
        return Ok(SelectOutcome::NothingToSelect);
    }

    let requirements = RequirementSet::from_constraints(&request.constraints);
    tracing::debug!("Selecting toolchain for {}", requirements);

    let current = discoverer.current_toolchain();
    if request.mode == JdkMode::IfMatch {
        if let Some(current) = current.as_ref().filter(|c| requirements.matches(c)) {
            tracing::info!("Using current JDK {}", current.install_path().display());
            return Ok(SelectOutcome::UseCurrent(current.clone()));
        }
    }

    let configured_match = configured
        .iter()
        .filter(|t| t.is_usable_jdk())
        .find(|t| requirements.matches(t))
        .cloned();

    let selected = match configured_match {
        Some(toolchain) => {
            tracing::debug!("Found configured toolchain {}", toolchain);
            toolchain
        }
        None if request.discover => {
            tracing::debug!("No configured toolchain matches, discovering");
            discoverer
                .discover(&request.comparator)
                .into_iter()
                .find(|t| requirements.matches(t))
                .ok_or_else(|| SelectError::NoMatch {
                    requirements: requirements.clone(),
                })?
        }
        None => return Err(SelectError::NoMatch { requirements }),
    };

    if request.mode == JdkMode::IfSame {
        if let Some(current) = current.filter(|c| c.install_path() == selected.install_path()) {
            tracing::info!("Toolchain matches current JDK {}", current.install_path().display());
            return Ok(SelectOutcome::UseCurrent(current));
        }
    }

    tracing::info!("Selected toolchain {}", selected.install_path().display());
    Ok(SelectOutcome::Selected(selected))
}
