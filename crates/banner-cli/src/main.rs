//! Banner CLI - deterministic grid-agent match runner.
//!
//! - `banner run` - play a match, headless, and print the report
//! - `banner scenario` - print a scenario's effective YAML

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use banner_sim::{Match, Scenario};

#[derive(Parser)]
#[command(name = "banner")]
#[command(about = "Deterministic grid-agent match runner", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a match
    Run {
        /// Scenario YAML file; the built-in scenario when omitted
        #[arg(long)]
        scenario: Option<PathBuf>,

        /// Override the scenario's round count
        #[arg(long)]
        rounds: Option<u32>,

        /// Override the scenario's match seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print a scenario's effective YAML
    Scenario {
        /// Scenario YAML file; the built-in scenario when omitted
        #[arg(long)]
        scenario: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Run {
            scenario,
            rounds,
            seed,
        } => {
            let mut scenario = load_scenario(scenario)?;
            if let Some(rounds) = rounds {
                scenario.rounds = rounds;
            }
            if let Some(seed) = seed {
                scenario.seed = seed;
            }

            info!(
                name = %scenario.name,
                seed = scenario.seed,
                rounds = scenario.rounds,
                "starting match"
            );
            let mut game = Match::new(&scenario);
            let report = game.play();

            println!(
                "{}: {} rounds, red {} - blue {} ({} faulted turns)",
                scenario.name,
                report.rounds_played,
                report.red_captures,
                report.blue_captures,
                report.faulted_turns
            );
        }

        Commands::Scenario { scenario } => {
            let scenario = load_scenario(scenario)?;
            print!("{}", scenario.to_yaml()?);
        }
    }

    Ok(())
}

fn load_scenario(path: Option<PathBuf>) -> Result<Scenario> {
    match path {
        Some(path) => Scenario::load(&path),
        None => Ok(Scenario::default()),
    }
}
