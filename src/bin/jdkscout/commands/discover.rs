//! `jdkscout discover` command

use anyhow::Result;

use crate::cli::{DiscoverArgs, ListFormat};
use jdkscout::util::config::load_default_config;
use jdkscout::ToolchainModel;

pub fn execute(args: DiscoverArgs) -> Result<()> {
    let config = load_default_config();
    let comparator = super::comparator(&args.discovery, config.comparator())?;
    let discoverer = super::discoverer(&args.discovery, &config);

    let toolchains = discoverer.discover(&comparator);

    match args.format {
        ListFormat::Json => println!("{}", serde_json::to_string_pretty(&toolchains)?),
        ListFormat::Human => print_toolchains(&toolchains),
    }

    Ok(())
}

fn print_toolchains(toolchains: &[ToolchainModel]) {
    if toolchains.is_empty() {
        println!("No JDK toolchains found");
        return;
    }

    for toolchain in toolchains {
        println!("{}", toolchain.install_path().display());
        for (key, value) in toolchain.sorted_provides() {
            println!("    {}: {}", key, value);
        }
    }
}
