//! `jdkscout cache` command
//!
//! Manage the discovery cache.

use anyhow::{Context, Result};

use crate::cli::{CacheArgs, CacheCommands};
use jdkscout::discovery::FileCacheStore;
use jdkscout::util::config;

pub fn execute(args: CacheArgs) -> Result<()> {
    let path = config::cache_path().context("could not determine home directory")?;
    let store = FileCacheStore::new(path);

    match args.command {
        CacheCommands::Path => println!("{}", store.path().display()),
        CacheCommands::Clear => {
            if store.clear()? {
                tracing::info!("Removed {}", store.path().display());
            } else {
                tracing::info!("Cache is already empty");
            }
        }
    }

    Ok(())
}
