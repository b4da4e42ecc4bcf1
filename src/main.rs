//! HikeMeet CLI application entry point
//!
//! This is the main executable for hikemeet. It provides a command-line
//! interface for searching hikers, groups and trips on a HikeMeet backend
//! and narrowing the results with filter chips.
//!
//! # Usage
//!
//! ```bash
//! # Interactive search (default command)
//! hikemeet
//! hikemeet i --kind groups
//!
//! # One-shot search, two pages of group results
//! hikemeet search hermon -k groups -f groupDifficulty=advanced -p 2
//!
//! # Full trip list narrowed by tag
//! hikemeet trips -f tripTag=Snow
//!
//! # Quiet mode (only ids)
//! hikemeet -q groups -f groupStatus=planned
//! ```
//!
//! # Configuration
//!
//! On first run, hikemeet will prompt for initial setup. Configuration is stored in
//! the user's config directory (`~/.config/hikemeet/config.toml` on Linux).
//! Set `RUST_LOG=debug` to see request and filtering diagnostics on stderr.

use hikemeet::{
    HikeMeetError,
    api::ApiClient,
    cli::{Cli, Commands, ConfigCommands},
    commands,
    config::{HikeConfig, first_time_setup},
};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, HikeMeetError>;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_config_command(mut config: HikeConfig, path: &Path, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| HikeMeetError::InvalidInput(format!("Failed to render config: {e}")))?;
            if !quiet {
                println!("# {}", path.display());
            }
            print!("{rendered}");
        }
        ConfigCommands::Set { setting } => {
            let (key, value) = setting.split_once('=').ok_or_else(|| {
                HikeMeetError::InvalidInput("Invalid format. Use: hikemeet config set key=value".into())
            })?;
            let key = key.trim();

            config.set(key, value)?;
            config.save_to(path)?;
            if !quiet {
                println!("Set {key} = {}", config.get(key)?);
            }
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get(key)?);
        }
        ConfigCommands::Setup => {
            first_time_setup(path)?;
        }
    }
    Ok(())
}

/// Main entry point for the hikemeet application
///
/// Loads configuration, parses command-line arguments, and dispatches to the
/// appropriate command handler.
///
/// # Errors
///
/// Returns `HikeMeetError` if configuration loading fails, the backend client
/// cannot be built, or any command handler returns an error.
#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse_args();

    let (mut config, path) = match &cli.config {
        Some(path) => (HikeConfig::load_from(path)?, path.clone()),
        None => (HikeConfig::load_or_setup()?, HikeConfig::config_path()?),
    };

    let quiet = cli.quiet || config.quiet;

    match cli.get_command() {
        Commands::Config { command } => handle_config_command(config, &path, &command, quiet)?,
        Commands::Filter { tokens } => commands::filter(&tokens, quiet),
        command => {
            let client = ApiClient::new(&config)?;
            match command {
                Commands::Search {
                    query,
                    kind,
                    filter_args,
                } => {
                    commands::search(&client, &config, &query.join(" "), kind, &filter_args, quiet).await?;
                }
                Commands::Groups { filter_args } => {
                    commands::groups(&client, &config, &filter_args, quiet).await?;
                }
                Commands::Trips { filter_args } => {
                    commands::trips(&client, &config, &filter_args, quiet).await?;
                }
                Commands::Interactive { kind, ordering } => {
                    if let Some(ordering) = ordering {
                        config.search.ordering = ordering;
                    }
                    commands::interactive(Arc::new(client), &config, kind, quiet).await?;
                }
                Commands::Config { .. } | Commands::Filter { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}
