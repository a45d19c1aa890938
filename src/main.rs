use clap::Parser;
use colored::{control::set_override, Colorize};
use is_terminal::IsTerminal;

use holocron::cache::CacheStore;
use holocron::cli::args::{Cli, Commands, CompletionsArgs};
use holocron::cli::commands;
use holocron::config::{Config, Paths};
use holocron::error::HolocronError;
use holocron::logging;
use holocron::swapi::SwapiClient;

fn main() {
    // Respect NO_COLOR environment variable (https://no-color.org/)
    // Also disable colors when stdout is not a terminal (for piping)
    if std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal() {
        set_override(false);
    }

    if let Err(e) = run() {
        // A failed search has already printed its own report
        if !matches!(e, HolocronError::SearchFailed { .. }) {
            eprintln!("{}: {}", "error".red().bold(), e);
        }
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<(), HolocronError> {
    let cli = Cli::parse();
    let format = cli.output;

    logging::init(cli.verbose, cli.quiet);

    // Handle completions command early (no config or cache needed)
    if let Commands::Completions(CompletionsArgs { shell }) = &cli.command {
        Cli::print_completions(*shell);
        return Ok(());
    }

    let paths = Paths::new()?;
    let mut config = Config::load_from(&paths)?;
    let store = CacheStore::new(config.cache_file(&paths));

    let output = match &cli.command {
        Commands::Completions(_) => unreachable!(), // Handled above
        Commands::Config(args) => commands::config(&mut config, args, format)?,
        Commands::Cache(args) => commands::cache(&store, args, format)?,
        Commands::Search(args) => {
            // Validate before touching the network or the cache
            args.term()?;

            // Inline API URL (CLI/env) wins over the config file
            let client = match &cli.api_url {
                Some(url) => SwapiClient::with_base_url(url, config.timeout())?,
                None => SwapiClient::new(&config)?,
            };
            commands::search(&client, &store, &config, args, format)?
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
