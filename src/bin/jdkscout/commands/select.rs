//! `jdkscout select` command

use anyhow::{Context, Result};
use serde_json::json;

use crate::cli::{OutputFormat, SelectArgs};
use jdkscout::core::model::PersistedToolchains;
use jdkscout::ops::{select_toolchain, SelectOutcome, SelectRequest};
use jdkscout::util::config::load_default_config;
use jdkscout::Constraints;

pub fn execute(args: SelectArgs) -> Result<()> {
    let config = load_default_config();
    let comparator = super::comparator(&args.discovery, config.comparator())?;

    let request = SelectRequest {
        constraints: Constraints {
            version: args.version,
            runtime_name: args.runtime_name,
            runtime_version: args.runtime_version,
            vendor: args.vendor,
            env: args.env,
        },
        mode: args.mode.unwrap_or_else(|| config.mode()),
        discover: config.discovery_enabled() && !args.no_discovery,
        comparator,
    };

    // nothing to select means the toolchains file is never read
    let toolchains_file = args.toolchains.or_else(|| config.toolchains_file());
    let configured = match toolchains_file {
        Some(path) if !request.constraints.is_empty() => {
            PersistedToolchains::load_or_default(&path)
                .with_context(|| format!("failed to load toolchains from {}", path.display()))?
                .toolchains
        }
        _ => Vec::new(),
    };

    let discoverer = super::discoverer(&args.discovery, &config);
    let outcome = select_toolchain(&request, &discoverer, &configured)?;

    match args.format {
        OutputFormat::Env => {
            if let Some(toolchain) = outcome.toolchain() {
                println!("JAVA_HOME={}", toolchain.install_path().display());
            }
        }
        OutputFormat::Json => {
            let (kind, toolchain) = match &outcome {
                SelectOutcome::NothingToSelect => ("nothing", None),
                SelectOutcome::UseCurrent(t) => ("current", Some(t)),
                SelectOutcome::Selected(t) => ("selected", Some(t)),
            };
            let value = json!({ "outcome": kind, "toolchain": toolchain });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Human => match &outcome {
            SelectOutcome::NothingToSelect => println!("No toolchain requirements given"),
            SelectOutcome::UseCurrent(t) => {
                println!("Using current JDK {}", t.install_path().display())
            }
            SelectOutcome::Selected(t) => {
                println!("Selected JDK {}", t.install_path().display());
                for (key, value) in t.sorted_provides() {
                    println!("    {}: {}", key, value);
                }
            }
        },
    }

    Ok(())
}
