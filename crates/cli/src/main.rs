mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "vaultpress",
    version,
    about = "Publish the reachable part of an Obsidian vault into a Hugo site"
)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/vaultpress/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Profile to use instead of the config's default
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Log at debug level on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved paths
    Doctor,

    /// List the notes and assets reachable from published notes
    Reach(ReachArgs),

    /// Rewrite reachable notes into the site and copy their assets
    Publish(PublishArgs),
}

#[derive(Debug, Args)]
pub struct ReachArgs {
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Compute everything but write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Doctor => {
            cmd::doctor::run(cli.config.as_deref(), cli.profile.as_deref());
            Ok(())
        }
        Commands::Reach(args) => {
            cmd::reach::run(cli.config.as_deref(), cli.profile.as_deref(), cli.verbose, &args)
        }
        Commands::Publish(args) => cmd::publish::run(
            cli.config.as_deref(),
            cli.profile.as_deref(),
            cli.verbose,
            &args,
        ),
    }
}
