//! Command implementations

pub mod add;
pub mod cache;
pub mod completions;
pub mod discover;
pub mod generate;
pub mod select;

use anyhow::{Context, Result};
use jdkscout::core::comparator::build_comparator;
use jdkscout::util::config::Config;
use jdkscout::{Discoverer, ToolchainComparator};

use crate::cli::DiscoveryArgs;

/// Comparator from the command line, falling back to `default`.
pub fn comparator(args: &DiscoveryArgs, default: &str) -> Result<ToolchainComparator> {
    let spec = args.comparator.as_deref().unwrap_or(default);
    build_comparator(spec).with_context(|| format!("invalid comparator `{}`", spec))
}

/// Discoverer honoring the cache settings of the command line and config.
pub fn discoverer(args: &DiscoveryArgs, config: &Config) -> Discoverer {
    Discoverer::with_defaults(config.cache_enabled() && !args.no_cache)
}
