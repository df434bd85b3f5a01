//! JDK discovery.
//!
//! Discovery runs in four stages:
//! 1. Scan well-known locations for candidate JDK homes
//! 2. Characterize each candidate, from the cache or by probing it
//! 3. Annotate the models with host-dependent flags
//! 4. Rank them with a comparator
//!
//! A [`Discoverer`] memoizes the scan and owns the cache, so repeated passes
//! within one process never probe the same JDK twice.

pub mod annotate;
pub mod cache;
pub mod current;
pub mod probe;
pub mod scan;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use anyhow::Result;

use crate::core::comparator::{build_comparator, ComparatorError, ToolchainComparator};
use crate::core::model::ToolchainModel;
use crate::util::config;
use crate::util::fs::canonicalize;

pub use annotate::FlagAnnotator;
pub use cache::{CacheStore, FileCacheStore, MemoryCacheStore, MetadataCache};
pub use probe::{LauncherProbe, Probe};
pub use scan::{HostEnvironment, OsFamily};

/// Discovery engine bound to one host environment.
pub struct Discoverer {
    host: HostEnvironment,
    probe: Arc<dyn Probe>,
    cache: MetadataCache,
    candidates: OnceLock<BTreeSet<PathBuf>>,
}

impl Discoverer {
    pub fn new(host: HostEnvironment, probe: Arc<dyn Probe>, store: Arc<dyn CacheStore>) -> Self {
        Discoverer {
            host,
            probe,
            cache: MetadataCache::new(store),
            candidates: OnceLock::new(),
        }
    }

    /// A discoverer for the running process, probing with the JDK launchers.
    ///
    /// With `persist_cache`, probe results are kept in the user's cache file;
    /// otherwise they live only as long as this value.
    pub fn with_defaults(persist_cache: bool) -> Self {
        let store: Arc<dyn CacheStore> = match config::cache_path() {
            Some(path) if persist_cache => Arc::new(FileCacheStore::new(path)),
            _ => Arc::new(MemoryCacheStore::new()),
        };
        Discoverer::new(HostEnvironment::detect(), Arc::new(LauncherProbe), store)
    }

    pub fn host(&self) -> &HostEnvironment {
        &self.host
    }

    /// Candidate JDK homes, scanned once per discoverer.
    pub fn candidates(&self) -> &BTreeSet<PathBuf> {
        self.candidates.get_or_init(|| scan::scan(&self.host))
    }

    /// Discover toolchains, ranked by `comparator`.
    ///
    /// Failures degrade to an empty list.
    pub fn discover(&self, comparator: &ToolchainComparator) -> Vec<ToolchainModel> {
        match self.try_discover(comparator) {
            Ok(toolchains) => toolchains,
            Err(e) => {
                tracing::warn!("Toolchain discovery failed: {:#}", e);
                Vec::new()
            }
        }
    }

    /// Discover toolchains ranked by a comparator spec such as
    /// `lts,current,env,version,vendor`.
    pub fn discover_with(&self, spec: &str) -> Result<Vec<ToolchainModel>, ComparatorError> {
        let comparator = build_comparator(spec)?;
        Ok(self.discover(&comparator))
    }

    fn try_discover(&self, comparator: &ToolchainComparator) -> Result<Vec<ToolchainModel>> {
        tracing::debug!("Discovering JDK toolchains");

        let candidates = self.candidates();
        let resolved = self.cache.resolve_all(candidates, self.probe.as_ref())?;
        self.cache.flush()?;

        let annotator = FlagAnnotator::new(&self.host);
        let mut toolchains: Vec<ToolchainModel> =
            resolved.iter().map(|m| annotator.annotated(m)).collect();
        comparator.sort(&mut toolchains);

        tracing::info!("Discovered {} JDK toolchains", toolchains.len());
        Ok(toolchains)
    }

    /// The currently active JDK, read without spawning a process.
    ///
    /// The cached probe entry is used first, and the JDK's `release` file
    /// fills in any keys it lacks. With neither, the current JDK is unknown.
    /// The model always carries the `current` flag.
    pub fn current_toolchain(&self) -> Option<ToolchainModel> {
        let home = canonicalize(self.host.current_home.as_ref()?);
        let home = home.as_path();
        if !scan::has_compiler(home) {
            tracing::debug!("Current JDK {} has no compiler", home.display());
            return None;
        }

        let cached = self.cache.get(home).unwrap_or_else(|e| {
            tracing::warn!("Toolchain cache unavailable: {:#}", e);
            None
        });
        let model = match (cached, current::release_provides(home)) {
            (Some(mut model), Some(release)) => {
                for (key, value) in release {
                    model.provides.entry(key).or_insert(value);
                }
                model
            }
            (Some(model), None) => model,
            (None, Some(provides)) => ToolchainModel::jdk(home, provides),
            (None, None) => {
                tracing::debug!("Could not characterize current JDK {}", home.display());
                return None;
            }
        };

        Some(FlagAnnotator::new(&self.host).annotated(&model))
    }
}

impl std::fmt::Debug for Discoverer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Discoverer")
            .field("host", &self.host)
            .field("cache", &self.cache)
            .finish()
    }
}
