use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{Commands, CreateArgs, FetchArgs, PublishArgs, RotateArgs};

/// Top-level CLI parser for the `gale` binary.
#[derive(Debug, Parser)]
#[command(
    name = "gale",
    version,
    about = "Gale - daily airfoil benchmark challenge rotation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Leaderboard service base URL
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Admin token for the publish endpoint
    #[arg(long, global = true)]
    pub admin_token: Option<String>,

    /// Repository root containing the simulation driver and data directory
    #[arg(long, global = true)]
    pub repo_root: Option<String>,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            api_base: self.api_base.clone(),
            admin_token: self.admin_token.clone(),
            repo_root: self.repo_root.clone(),
        }
    }
}
