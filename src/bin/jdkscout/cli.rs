//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use jdkscout::ops::JdkMode;

/// jdkscout - Discover, rank and select installed JDKs
#[derive(Parser)]
#[command(name = "jdkscout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the JDKs installed on this machine
    Discover(DiscoverArgs),

    /// Write a toolchain definitions file from discovered JDKs
    Generate(GenerateArgs),

    /// Select a JDK matching the given constraints
    Select(SelectArgs),

    /// Declare a JDK in the toolchain definitions file
    Add(AddArgs),

    /// Manage the discovery cache
    Cache(CacheArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Readable text
    #[default]
    Human,
    /// JSON
    Json,
}

/// Output format for a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Readable text
    #[default]
    Human,
    /// `JAVA_HOME=<path>`, for `eval` or `$GITHUB_ENV`
    Env,
    /// JSON
    Json,
}

#[derive(Args)]
pub struct DiscoveryArgs {
    /// Ranking criteria, comma separated (lts, current, env, version, vendor)
    #[arg(long, env = "JDKSCOUT_COMPARATOR")]
    pub comparator: Option<String>,

    /// Probe every JDK again instead of reading the cache
    #[arg(long, env = "JDKSCOUT_NO_CACHE")]
    pub no_cache: bool,
}

#[derive(Args)]
pub struct DiscoverArgs {
    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Human)]
    pub format: ListFormat,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// File to write (prints to stdout if omitted)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct SelectArgs {
    /// Version or version range (`17`, `[11,21)`)
    #[arg(long, env = "JDKSCOUT_VERSION")]
    pub version: Option<String>,

    /// Exact `java.runtime.name`
    #[arg(long)]
    pub runtime_name: Option<String>,

    /// Exact `java.runtime.version`
    #[arg(long)]
    pub runtime_version: Option<String>,

    /// Exact `java.vendor`
    #[arg(long, env = "JDKSCOUT_VENDOR")]
    pub vendor: Option<String>,

    /// Name of a JAVA*_HOME variable that must point at the JDK
    #[arg(long)]
    pub env: Option<String>,

    /// Use of the currently active JDK (Never, IfSame, IfMatch)
    #[arg(long, env = "JDKSCOUT_MODE")]
    pub mode: Option<JdkMode>,

    /// Only consider JDKs from the toolchain definitions file
    #[arg(long)]
    pub no_discovery: bool,

    /// Toolchain definitions file
    #[arg(long, env = "JDKSCOUT_TOOLCHAINS")]
    pub toolchains: Option<PathBuf>,

    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct AddArgs {
    /// Home directory of the JDK
    #[arg(long)]
    pub jdk_home: PathBuf,

    /// Identifier of the toolchain
    #[arg(long)]
    pub id: String,

    /// Vendor (defaults to the JDK's IMPLEMENTOR)
    #[arg(long)]
    pub vendor: Option<String>,

    /// Toolchain definitions file
    #[arg(long, env = "JDKSCOUT_TOOLCHAINS")]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommands,
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show the cache file location
    Path,

    /// Delete the cache file
    Clear,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
