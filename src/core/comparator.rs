//! Ranking of toolchains.
//!
//! A comparator is built from a comma separated list of criteria, applied
//! left to right, each one only breaking ties left by the previous ones:
//!
//! - `lts`: prefer long-term-support releases
//! - `current`: prefer the currently active JDK
//! - `env`: prefer JDKs referenced by a `JAVA*_HOME` variable
//! - `version`: prefer higher versions
//! - `vendor`: order by vendor name (usually last, to get a stable order)

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::model::{ToolchainModel, CURRENT, ENV, LTS};
use super::version::compare_versions;

/// Comparator used when generating definitions files.
pub const GENERATE_COMPARATOR: &str = "lts,version,vendor";

/// Comparator used when displaying and selecting toolchains.
pub const DISPLAY_COMPARATOR: &str = "lts,current,env,version,vendor";

/// Error building a comparator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComparatorError {
    #[error("unsupported comparator `{name}` (supported: lts, current, env, version, vendor)")]
    UnsupportedCriterion { name: String },
}

/// A single ranking criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Lts,
    Current,
    Env,
    Version,
    Vendor,
}

impl Criterion {
    /// All criteria, in the order of [`DISPLAY_COMPARATOR`].
    pub const ALL: [Criterion; 5] = [
        Criterion::Lts,
        Criterion::Current,
        Criterion::Env,
        Criterion::Version,
        Criterion::Vendor,
    ];

    /// Name used in comparator specs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Lts => "lts",
            Criterion::Current => "current",
            Criterion::Env => "env",
            Criterion::Version => "version",
            Criterion::Vendor => "vendor",
        }
    }

    /// Compare two toolchains under this criterion. `Less` ranks first.
    pub fn compare(&self, a: &ToolchainModel, b: &ToolchainModel) -> Ordering {
        match self {
            Criterion::Lts => flag_first(a, b, LTS),
            Criterion::Current => flag_first(a, b, CURRENT),
            Criterion::Env => flag_first(a, b, ENV),
            Criterion::Version => {
                let va = a.version().unwrap_or_default();
                let vb = b.version().unwrap_or_default();
                compare_versions(va, vb).reverse()
            }
            Criterion::Vendor => match (a.vendor(), b.vendor()) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

/// Toolchains carrying `key` sort before those lacking it.
fn flag_first(a: &ToolchainModel, b: &ToolchainModel, key: &str) -> Ordering {
    b.has_flag(key).cmp(&a.has_flag(key))
}

impl FromStr for Criterion {
    type Err = ComparatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Criterion::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ComparatorError::UnsupportedCriterion {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered chain of criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainComparator {
    criteria: Vec<Criterion>,
}

impl ToolchainComparator {
    /// Create a comparator from explicit criteria.
    pub fn new(criteria: Vec<Criterion>) -> Self {
        ToolchainComparator { criteria }
    }

    /// The criteria, primary first.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Compare two toolchains. `Less` ranks first.
    pub fn compare(&self, a: &ToolchainModel, b: &ToolchainModel) -> Ordering {
        self.criteria
            .iter()
            .map(|c| c.compare(a, b))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    /// Sort toolchains in ranking order, falling back to install path so the
    /// result never depends on the input order.
    pub fn sort(&self, toolchains: &mut [ToolchainModel]) {
        toolchains.sort_by(|a, b| {
            self.compare(a, b)
                .then_with(|| a.install_path().cmp(b.install_path()))
        });
    }
}

impl FromStr for ToolchainComparator {
    type Err = ComparatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        build_comparator(s)
    }
}

impl fmt::Display for ToolchainComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.criteria.iter().map(Criterion::as_str).collect();
        f.write_str(&names.join(","))
    }
}

/// Build a comparator from a comma separated list of criteria names.
///
/// Blank entries are ignored; unknown names fail immediately.
pub fn build_comparator(spec: &str) -> Result<ToolchainComparator, ComparatorError> {
    let criteria = spec
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.parse::<Criterion>())
        .collect::<Result<Vec<Criterion>, _>>()?;
    Ok(ToolchainComparator::new(criteria))
}
