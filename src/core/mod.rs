//! Core data structures for jdkscout.
//!
//! This module contains the foundational types used throughout jdkscout:
//! - Toolchain models and their persisted form
//! - Version ordering and version ranges
//! - Requirement sets and matching
//! - Ranking comparators

pub mod comparator;
pub mod model;
pub mod requirement;
pub mod version;

pub use comparator::{build_comparator, ComparatorError, Criterion, ToolchainComparator};
pub use model::{PersistedToolchains, Provides, ToolchainModel};
pub use requirement::{Constraints, RequirementSet};
pub use version::{compare_versions, VersionRange, VersionRequirement};
