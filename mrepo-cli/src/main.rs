//! MRepo CLI
//!
//! Command-line interface for MRepo - browse module repositories and
//! resolve module updates.

mod commands;
mod config;
mod display;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use mrepo_core::WorkingMode;
use tracing_subscriber::EnvFilter;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "mrepo")]
#[command(version, about = "Module repository manager")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory (default: ~/.mrepo)
    #[arg(long, global = true, env = "MREPO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Proxy for repository requests (http, https or socks5 URL)
    #[arg(long, global = true, env = "MREPO_PROXY")]
    proxy: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available versions of a module across repositories
    Updates {
        /// Module id
        module_id: String,

        /// Repository URL (repeatable)
        #[arg(long = "repo", required = true)]
        repos: Vec<String>,

        /// Print the merged list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a module's records and versions
    Info {
        /// Module id
        module_id: String,

        /// Repository URL (repeatable)
        #[arg(long = "repo", required = true)]
        repos: Vec<String>,
    },

    /// List installed modules
    Local {
        /// Modules directory (default: from settings)
        #[arg(long)]
        modules_dir: Option<PathBuf>,
    },

    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show current settings
    Show,

    /// Set the working mode (root, shizuku, non-root)
    Mode {
        /// Working mode
        mode: WorkingMode,
    },

    /// Set the download directory
    DownloadDir {
        /// Directory for downloaded module zips
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("mrepo_core=info".parse()?))
        .init();

    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => dirs::home_dir()
            .context("Could not determine home directory; use --data-dir")?
            .join(".mrepo"),
    };

    let config = CliConfig {
        data_dir,
        timeout: Duration::from_secs(cli.timeout),
        proxy: cli.proxy,
    };

    match cli.command {
        Commands::Updates {
            module_id,
            repos,
            json,
        } => commands::updates::run(&module_id, &repos, json, &config).await,
        Commands::Info { module_id, repos } => {
            commands::info::run(&module_id, &repos, &config).await
        }
        Commands::Local { modules_dir } => commands::local::run(modules_dir, &config),
        Commands::Settings(cmd) => match cmd {
            SettingsCommands::Show => commands::settings::show(&config),
            SettingsCommands::Mode { mode } => commands::settings::set_mode(mode, &config),
            SettingsCommands::DownloadDir { path } => {
                commands::settings::set_download_dir(path, &config)
            }
        },
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "mrepo", &mut io::stdout());
            Ok(())
        }
    }
}
