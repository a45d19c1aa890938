use clap::{ArgGroup, Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::error::{HolocronError, Result};

/// Look up Star Wars characters and their homeworlds, with a local cache
#[derive(Parser)]
#[command(name = "holocron")]
#[command(version, propagate_version = true)]
#[command(about = "Look up Star Wars characters and their homeworlds, with a local cache")]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Show debug logging on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// SWAPI base URL (overrides api.base_url from the config file)
    #[arg(long, env = "HOLOCRON_API_URL", global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Write shell completions to stdout
    pub fn print_completions(shell: Shell) {
        let mut cmd = Self::command();
        clap_complete::generate(shell, &mut cmd, "holocron", &mut std::io::stdout());
    }
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, human-readable output
    #[default]
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search for a character by name
    #[command(alias = "s")]
    Search(SearchArgs),

    /// Manage the local cache and search history
    Cache(CacheArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the search command
#[derive(Args)]
pub struct SearchArgs {
    /// Character name; multiple words are joined with spaces
    #[arg(required = true, num_args = 1.., value_name = "NAME")]
    pub name: Vec<String>,

    /// Also show the character's homeworld
    #[arg(short, long)]
    pub world: bool,
}

impl SearchArgs {
    /// The search term: words joined by single spaces, surrounding quotes removed
    pub fn term(&self) -> Result<String> {
        let term = self.name.join(" ");
        let term = term.trim_matches('\'');
        if term.trim().is_empty() {
            return Err(HolocronError::InvalidArgument(
                "character name cannot be empty".to_string(),
            ));
        }
        Ok(term.to_string())
    }
}

/// Arguments for the cache command
#[derive(Args)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .args(["clean", "history", "status"])
))]
pub struct CacheArgs {
    /// Delete the cache file, including the search history
    #[arg(long)]
    pub clean: bool,

    /// Show every past search with its result
    #[arg(long)]
    pub history: bool,

    /// Show cache location and size
    #[arg(long)]
    pub status: bool,
}

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., api.base_url)
        key: String,
        /// Value to set
        value: String,
    },
    /// Show configuration file path
    Path,
}

/// Arguments for the completions command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
