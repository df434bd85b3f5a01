//! `jdkscout generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use jdkscout::ops::{generate, write_definitions};
use jdkscout::util::config::load_default_config;

pub fn execute(args: GenerateArgs) -> Result<()> {
    let config = load_default_config();
    let comparator = super::comparator(&args.discovery, config.generate_comparator())?;
    let discoverer = super::discoverer(&args.discovery, &config);

    let definitions = generate(&discoverer, &comparator);
    if let Some(text) = write_definitions(&definitions, args.file.as_deref())? {
        print!("{}", text);
    }

    Ok(())
}
