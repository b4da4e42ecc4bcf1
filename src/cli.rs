//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for hikemeet using the `clap` crate.
//!
//! # Commands
//!
//! - **interactive**: Debounced search loop reading queries from stdin (default)
//! - **search**: One-shot search across people, groups and trips
//! - **groups** / **trips**: Filter the full group or trip list
//! - **filter**: Normalise filter tokens and print their chips
//! - **config**: Show and change configuration
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use hikemeet::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["hikemeet", "groups", "-f", "groupDifficulty=advanced", "-p", "2"]);
//! match cli.get_command() {
//!     Commands::Groups { filter_args } => {
//!         assert_eq!(filter_args.filters.len(), 1);
//!         assert_eq!(filter_args.pages, 2);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use crate::filters::FilterToken;
use crate::search::{ResponseOrdering, ResultKind};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "hikemeet", version, about = "Search and filter HikeMeet groups, trips and people")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Use this config file instead of the default location
    #[arg(short = 'c', long = "config", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Shared arguments for commands that filter and page results
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Filter as CATEGORY=VALUE, e.g. groupDifficulty=advanced or tripTag=Hiking (repeatable)
    #[arg(short = 'f', long = "filter", value_name = "CATEGORY=VALUE")]
    pub filters: Vec<FilterToken>,

    /// Number of pages to show
    #[arg(short = 'p', long = "pages", value_name = "N", default_value_t = 1)]
    pub pages: usize,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Interactive search: type queries, `:help` for commands (default)
    #[command(visible_alias = "i")]
    Interactive {
        /// Resource kind to search
        #[arg(short = 'k', long = "kind", value_enum, default_value_t = ResultKind::All)]
        kind: ResultKind,

        /// Override which of two overlapping responses is kept
        #[arg(long = "ordering", value_enum, value_name = "POLICY")]
        ordering: Option<ResponseOrdering>,
    },

    /// Search people, groups and trips
    #[command(visible_alias = "s")]
    Search {
        /// Search text
        #[arg(value_name = "QUERY", required = true, num_args = 1..)]
        query: Vec<String>,

        /// Resource kind to search
        #[arg(short = 'k', long = "kind", value_enum, default_value_t = ResultKind::All)]
        kind: ResultKind,

        #[command(flatten)]
        filter_args: FilterArgs,
    },

    /// List groups, optionally filtered
    #[command(visible_alias = "g")]
    Groups {
        #[command(flatten)]
        filter_args: FilterArgs,
    },

    /// List trips, optionally filtered
    #[command(visible_alias = "t")]
    Trips {
        #[command(flatten)]
        filter_args: FilterArgs,
    },

    /// Parse filter tokens and show the chips they produce
    Filter {
        #[arg(value_name = "CATEGORY=VALUE", required = true)]
        tokens: Vec<FilterToken>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., search.page_size=20)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., api_base_url)
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Run the first-time setup wizard again
    Setup,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Interactive if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Interactive {
            kind: ResultKind::All,
            ordering: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_interactive() {
        let cli = Cli::parse_from(["hikemeet"]);
        assert!(matches!(
            cli.get_command(),
            Commands::Interactive {
                kind: ResultKind::All,
                ordering: None
            }
        ));
    }

    #[test]
    fn test_interactive_ordering_override() {
        let cli = Cli::parse_from(["hikemeet", "i", "--ordering", "last-request"]);
        assert!(matches!(
            cli.get_command(),
            Commands::Interactive {
                ordering: Some(ResponseOrdering::LastRequest),
                ..
            }
        ));
    }

    #[test]
    fn test_search_args() {
        let cli = Cli::parse_from([
            "hikemeet", "-q", "search", "mount", "hermon", "-k", "groups", "-f",
            "groupStatus=planned",
        ]);
        assert!(cli.quiet);
        let Commands::Search {
            query,
            kind,
            filter_args,
        } = cli.get_command()
        else {
            panic!("expected search");
        };
        assert_eq!(query.join(" "), "mount hermon");
        assert_eq!(kind, ResultKind::Groups);
        assert_eq!(filter_args.filters[0].id, "groupStatus=planned");
        assert_eq!(filter_args.pages, 1);
    }

    #[test]
    fn test_kind_aliases() {
        let cli = Cli::parse_from(["hikemeet", "s", "dana", "--kind", "hikes"]);
        assert!(matches!(
            cli.get_command(),
            Commands::Search {
                kind: ResultKind::People,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_filter_is_rejected() {
        let result = Cli::try_parse_from(["hikemeet", "groups", "-f", "groupColor=red"]);
        assert!(result.is_err());
        let result = Cli::try_parse_from(["hikemeet", "trips", "-f", "Hiking"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_commands() {
        let cli = Cli::parse_from(["hikemeet", "-c", "/tmp/hm.toml", "config", "set", "quiet=true"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/hm.toml")));
        assert!(matches!(
            cli.get_command(),
            Commands::Config {
                command: ConfigCommands::Set { .. }
            }
        ));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
