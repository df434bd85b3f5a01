//! `jdkscout add` command

use anyhow::{Context, Result};

use crate::cli::AddArgs;
use jdkscout::ops::{add_toolchain, AddOptions};
use jdkscout::util::config::load_default_config;

pub fn execute(args: AddArgs) -> Result<()> {
    let config = load_default_config();
    let file = args
        .file
        .or_else(|| config.toolchains_file())
        .context("could not determine the toolchains file, pass --file")?;

    let opts = AddOptions {
        jdk_home: args.jdk_home,
        id: args.id,
        vendor: args.vendor,
    };
    let model = add_toolchain(&file, &opts)?;

    println!(
        "Added {} ({}) to {}",
        opts.id,
        model.version().unwrap_or("unknown version"),
        file.display()
    );
    Ok(())
}
