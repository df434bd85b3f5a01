//! jdkscout - Discover, rank and select installed JDKs
//!
//! This crate provides the core library functionality for jdkscout,
//! including JDK discovery, probe caching, ranking and selection.

pub mod core;
pub mod discovery;
pub mod ops;
pub mod util;

/// Test utilities for jdkscout unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a scripted probe and fake JDK layouts.
#[cfg(test)]
pub mod test_support;

pub use self::core::{
    build_comparator, ComparatorError, Constraints, RequirementSet, ToolchainComparator,
    ToolchainModel,
};
pub use discovery::Discoverer;
pub use util::config::Config;
