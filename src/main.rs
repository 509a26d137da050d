use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use standings_engine::calculate::{RankingOrder, StandingsEngine};
use standings_engine::config::AppConfig;
use standings_engine::parse_seasons;
use standings_engine::storage::{JsonlRepository, TournamentRepository};

#[derive(Parser)]
#[command(name = "standings")]
#[command(about = "Poker league standings, leadership periods and season titles")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Tournament export (JSONL), overrides the configured file
    #[arg(long)]
    data: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List seasons with stored tournaments
    Seasons,

    /// Standings for one season
    Standings {
        season: i32,

        /// Print a single ordering (e.g. "points", "heads-up") instead of all
        #[arg(long)]
        order: Option<RankingOrder>,
    },

    /// Standings combined over several seasons
    Total {
        /// Seasons, e.g. "2012,2013" or "2010-2014" (default: all)
        #[arg(long)]
        seasons: Option<String>,
    },

    /// Leadership periods and best/worst player per month
    Stats {
        #[arg(long)]
        seasons: Option<String>,
    },

    /// Season titles
    Titles {
        #[arg(long)]
        seasons: Option<String>,
    },

    /// Leadership periods only
    Yellow {
        #[arg(long)]
        seasons: Option<String>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn resolve_seasons<R: TournamentRepository>(
    engine: &StandingsEngine<R>,
    arg: Option<&str>,
) -> Result<Vec<i32>> {
    match arg {
        Some(s) => match parse_seasons(s) {
            Some(seasons) => Ok(seasons),
            None => bail!("Invalid --seasons value: {}", s),
        },
        None => Ok(engine.all_seasons()?),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        AppConfig::from_file(&cli.config)
            .with_context(|| format!("Failed to load config from {:?}", cli.config))?
    } else {
        AppConfig::default()
    };

    // Initialize tracing
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let json_layer = cli.json_logs.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!cli.json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    tracing::info!("Starting standings v{}", env!("CARGO_PKG_VERSION"));

    let data = cli.data.unwrap_or(config.tournaments_file);
    let repository = JsonlRepository::new(&data);
    tracing::debug!("Reading tournaments from {:?}", repository.path());
    let engine = StandingsEngine::new(repository, config.rules);

    match cli.command {
        Commands::Seasons => print_json(&engine.all_seasons()?)?,

        Commands::Standings { season, order } => match order {
            Some(order) => print_json(&engine.season_ranking(season, order)?)?,
            None => print_json(&engine.season_standings(season)?)?,
        },

        Commands::Total { seasons } => {
            let seasons = resolve_seasons(&engine, seasons.as_deref())?;
            print_json(&engine.total_standings(&seasons)?)?;
        }

        Commands::Stats { seasons } => {
            let seasons = resolve_seasons(&engine, seasons.as_deref())?;
            print_json(&engine.season_stats(&seasons)?)?;
        }

        Commands::Titles { seasons } => {
            let seasons = resolve_seasons(&engine, seasons.as_deref())?;
            print_json(&engine.titles(&seasons)?)?;
        }

        Commands::Yellow { seasons } => {
            let seasons = resolve_seasons(&engine, seasons.as_deref())?;
            let tournaments: Vec<_> = engine
                .repository()
                .all_tournaments()?
                .into_iter()
                .filter(|t| seasons.contains(&t.info.season))
                .collect();
            print_json(&engine.compute_yellow_periods(&tournaments))?;
        }
    }

    Ok(())
}
