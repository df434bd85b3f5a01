//! Persistent cache of probe results.
//!
//! Probing spawns a JVM per candidate, so results are kept in
//! `~/.jdkscout/discovered-toolchains-cache.toml`, keyed by canonical install
//! path. The file is written back only when an entry was added or removed.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;

use crate::core::comparator::{Criterion, ToolchainComparator};
use crate::core::model::{PersistedToolchains, ToolchainModel};

use super::probe::{introspect, Probe};
use super::scan::has_compiler;

/// Backing storage for the cache.
pub trait CacheStore: Send + Sync {
    /// Load all persisted entries.
    fn load(&self) -> Result<Vec<ToolchainModel>>;

    /// Replace the persisted entries.
    fn save(&self, toolchains: &[ToolchainModel]) -> Result<()>;
}

/// Cache stored as a TOML file.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    path: PathBuf,
}

impl FileCacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCacheStore { path: path.into() }
    }

    /// Location of the cache file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the cache file. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)
            .with_context(|| format!("failed to remove cache file: {}", self.path.display()))?;
        Ok(true)
    }
}

impl CacheStore for FileCacheStore {
    fn load(&self) -> Result<Vec<ToolchainModel>> {
        Ok(PersistedToolchains::load_or_default(&self.path)?.toolchains)
    }

    fn save(&self, toolchains: &[ToolchainModel]) -> Result<()> {
        PersistedToolchains::new(toolchains.to_vec()).save(&self.path)
    }
}

/// Cache kept in memory only.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<Vec<ToolchainModel>>,
    saves: AtomicUsize,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with entries, as if loaded from disk.
    pub fn with_entries(entries: Vec<ToolchainModel>) -> Self {
        MemoryCacheStore {
            entries: Mutex::new(entries),
            saves: AtomicUsize::new(0),
        }
    }

    /// The entries currently stored.
    pub fn snapshot(&self) -> Vec<ToolchainModel> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Number of times `save` was called.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl CacheStore for MemoryCacheStore {
    fn load(&self) -> Result<Vec<ToolchainModel>> {
        Ok(self.snapshot())
    }

    fn save(&self, toolchains: &[ToolchainModel]) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("memory cache lock poisoned"))?;
        *entries = toolchains.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: BTreeMap<PathBuf, ToolchainModel>,
    dirty: bool,
}

/// Probe results indexed by install path, loaded lazily from a store.
pub struct MetadataCache {
    store: Arc<dyn CacheStore>,
    state: OnceLock<Mutex<CacheState>>,
}

impl MetadataCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        MetadataCache {
            store,
            state: OnceLock::new(),
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, CacheState>> {
        self.state
            .get_or_init(|| Mutex::new(self.load_state()))
            .lock()
            .map_err(|_| anyhow!("toolchain cache lock poisoned"))
    }

    fn load_state(&self) -> CacheState {
        let loaded = match self.store.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::warn!("Failed to load discovered toolchains cache: {:#}", e);
                Vec::new()
            }
        };

        let mut state = CacheState::default();
        for mut model in loaded {
            if !has_compiler(model.install_path()) {
                tracing::debug!("Dropping stale cache entry {}", model);
                state.dirty = true;
                continue;
            }
            model.strip_transient();
            state
                .entries
                .insert(model.install_path().to_path_buf(), model);
        }

        tracing::debug!("Loaded {} cached toolchains", state.entries.len());
        state
    }

    /// The cached model for `path`, without probing.
    pub fn get(&self, path: &Path) -> Result<Option<ToolchainModel>> {
        Ok(self.state()?.entries.get(path).cloned())
    }

    /// The cached model for `path`, probing and recording it on a miss.
    pub fn get_or_compute(&self, path: &Path, probe: &dyn Probe) -> Result<Option<ToolchainModel>> {
        if let Some(model) = self.get(path)? {
            return Ok(Some(model));
        }

        let Some(model) = introspect(probe, path) else {
            return Ok(None);
        };

        let mut state = self.state()?;
        let entry = state
            .entries
            .entry(path.to_path_buf())
            .or_insert_with(|| model.clone())
            .clone();
        state.dirty = true;
        Ok(Some(entry))
    }

    /// Resolve every candidate, probing uncached ones in parallel.
    ///
    /// The result follows the order of `candidates`; candidates that could
    /// not be characterized are left out.
    pub fn resolve_all(
        &self,
        candidates: &BTreeSet<PathBuf>,
        probe: &dyn Probe,
    ) -> Result<Vec<ToolchainModel>> {
        let candidates: Vec<&PathBuf> = candidates.iter().collect();
        let resolved = candidates
            .par_iter()
            .map(|path| self.get_or_compute(path, probe))
            .collect::<Result<Vec<_>>>()?;
        Ok(resolved.into_iter().flatten().collect())
    }

    /// Whether entries changed since the last load or flush.
    pub fn is_dirty(&self) -> bool {
        self.state().map(|state| state.dirty).unwrap_or(false)
    }

    /// Write entries back to the store if they changed.
    ///
    /// Entries are sorted newest version first, then by vendor. A failed write
    /// is logged and leaves the cache dirty.
    pub fn flush(&self) -> Result<()> {
        let mut state = self.state()?;
        if !state.dirty {
            return Ok(());
        }

        let mut toolchains: Vec<ToolchainModel> = state
            .entries
            .values()
            .map(ToolchainModel::without_transient)
            .collect();
        ToolchainComparator::new(vec![Criterion::Version, Criterion::Vendor]).sort(&mut toolchains);

        match self.store.save(&toolchains) {
            Ok(()) => {
                tracing::debug!("Saved {} toolchains to cache", toolchains.len());
                state.dirty = false;
            }
            Err(e) => tracing::warn!("Failed to save discovered toolchains cache: {:#}", e),
        }
        Ok(())
    }
}

impl std::fmt::Debug for MetadataCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataCache")
            .field("loaded", &self.state.get().is_some())
            .finish()
    }
}
