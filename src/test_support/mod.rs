//! Test utilities for jdkscout unit tests.
//!
//! Provides a scripted [`Probe`] that never spawns a process, and fixtures
//! that lay out fake JDK installations on disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use jdkscout::test_support::{create_fake_jdk, FakeProbe};
//!
//! #[test]
//! fn test_example() {
//!     let tmp = tempfile::TempDir::new().unwrap();
//!     let jdk = create_fake_jdk(&tmp.path().join("jdk-17"), "17.0.9", "Acme");
//!
//!     let probe = FakeProbe::new();
//!     probe.respond(&jdk, &[("version", "17.0.9")]);
//! }
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::core::model::Provides;
use crate::discovery::probe::Probe;

pub use fixtures::*;

/// Probe answering from a table, counting every call.
#[derive(Debug, Default)]
pub struct FakeProbe {
    responses: Mutex<HashMap<PathBuf, Provides>>,
    calls: AtomicUsize,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer probes of `path` with `provides`.
    pub fn respond(&self, path: impl AsRef<Path>, provides: &[(&str, &str)]) {
        let provides = provides
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.responses
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), provides);
    }

    /// Number of probes run so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Probe for FakeProbe {
    fn probe(&self, jdk_home: &Path) -> Option<Provides> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses.lock().unwrap().get(jdk_home).cloned()
    }
}
