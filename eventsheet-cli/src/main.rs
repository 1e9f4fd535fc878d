mod commands;
mod fetch;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use eventsheet_core::config::{SheetConfig, Source};
use tracing_subscriber::EnvFilter;

use crate::commands::events::{EventsArgs, Timeframe};

#[derive(Parser)]
#[command(name = "eventsheet")]
#[command(about = "List community events and partner venues from spreadsheet exports")]
struct Cli {
    /// Show debug logs and skipped rows
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of ~/.config/eventsheet/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Named source from the config file
    #[arg(short, long)]
    source: Option<String>,

    /// Read this path or http(s) URL instead of a named source
    #[arg(long, conflicts_with = "source")]
    from: Option<String>,

    /// Schema used with --from (defaults to the command's own schema)
    #[arg(long, requires = "from")]
    schema: Option<String>,

    /// Print JSON instead of colored text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List events
    Events {
        #[command(flatten)]
        source: SourceArgs,

        /// Only events starting in this month (1-12)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Only events starting in this year
        #[arg(short, long)]
        year: Option<i32>,

        /// Only events whose name or location contains this text
        #[arg(long)]
        search: Option<String>,

        /// Only events from today on, soonest first
        #[arg(long, conflicts_with = "past")]
        upcoming: bool,

        /// Only events before today, most recent first
        #[arg(long)]
        past: bool,

        /// Images assigned to events in rotation
        #[arg(long, value_delimiter = ',')]
        images: Vec<String>,
    },
    /// List partner venues
    Venues {
        #[command(flatten)]
        source: SourceArgs,

        /// Only venues of this type slug (e.g. "club-music"), or "all"
        #[arg(short = 't', long = "type", default_value = "all")]
        venue_type: String,
    },
    /// Show counts per month (events) or per type (venues)
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List configured sources
    Sources,
    /// Print the config file path, creating a default one if needed
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let verbose = cli.verbose;

    match cli.command {
        Commands::Events {
            source,
            month,
            year,
            search,
            upcoming,
            past,
            images,
        } => {
            let config = SheetConfig::load(cli.config.as_deref())?;
            let json = source.json;
            let source = resolve_source(&config, source, "events")?;
            let args = EventsArgs {
                month: month.map(|m| m - 1),
                year,
                search,
                timeframe: timeframe(upcoming, past),
                json,
                images,
                verbose,
            };
            commands::events::run(source, args).await
        }
        Commands::Venues { source, venue_type } => {
            let config = SheetConfig::load(cli.config.as_deref())?;
            let json = source.json;
            let source = resolve_source(&config, source, "venues")?;
            commands::venues::run(source, &venue_type, json, verbose).await
        }
        Commands::Stats { source } => {
            let config = SheetConfig::load(cli.config.as_deref())?;
            let json = source.json;
            let source = resolve_source(&config, source, "events")?;
            commands::stats::run(source, json, verbose).await
        }
        Commands::Sources => {
            let config = SheetConfig::load(cli.config.as_deref())?;
            commands::sources::run(&config)
        }
        Commands::Config => commands::config::run(),
    }
}

fn timeframe(upcoming: bool, past: bool) -> Timeframe {
    match (upcoming, past) {
        (true, _) => Timeframe::Upcoming,
        (_, true) => Timeframe::Past,
        _ => Timeframe::All,
    }
}

/// Logs go to stderr so `--json` output stays parseable.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_source(config: &SheetConfig, args: SourceArgs, default: &str) -> Result<Source> {
    if let Some(location) = args.from {
        let schema = args.schema.as_deref().unwrap_or(default);
        return Ok(config.adhoc_source(&location, schema)?);
    }

    let name = args.source.as_deref().unwrap_or(default);
    Ok(config.source(name)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn month_must_be_in_range() {
        assert!(Cli::try_parse_from(["eventsheet", "events", "--month", "13"]).is_err());
        assert!(Cli::try_parse_from(["eventsheet", "events", "--month", "3"]).is_ok());
    }

    #[test]
    fn from_and_source_conflict() {
        let parsed = Cli::try_parse_from([
            "eventsheet", "venues", "--source", "venues", "--from", "x.csv",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn from_overrides_named_source() {
        let config = SheetConfig::default();
        let args = SourceArgs {
            source: None,
            from: Some("https://example.org/v.csv".to_string()),
            schema: Some("venues".to_string()),
            json: false,
        };
        let source = resolve_source(&config, args, "events").unwrap();
        assert!(source.is_remote());
        assert_eq!(source.schema.name, "venues");
    }

    #[test]
    fn images_split_on_commas() {
        let cli = Cli::try_parse_from(["eventsheet", "events", "--images", "a.png,b.png"]).unwrap();
        match cli.command {
            Commands::Events { images, .. } => assert_eq!(images, vec!["a.png", "b.png"]),
            _ => panic!("expected events command"),
        }
    }

    #[test]
    fn upcoming_and_past_conflict() {
        assert!(Cli::try_parse_from(["eventsheet", "events", "--upcoming", "--past"]).is_err());

        let cli = Cli::try_parse_from(["eventsheet", "events", "--past", "--search", "cali"]).unwrap();
        match cli.command {
            Commands::Events {
                upcoming,
                past,
                search,
                ..
            } => {
                assert_eq!(timeframe(upcoming, past), Timeframe::Past);
                assert_eq!(search.as_deref(), Some("cali"));
            }
            _ => panic!("expected events command"),
        }
        assert_eq!(timeframe(false, false), Timeframe::All);
    }
}
