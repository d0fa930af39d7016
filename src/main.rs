use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use racket_score::output::{self, ScoreStyle};
use racket_score::results::{load_results, ResultsFile};
use racket_score::scoring::{self, Set, MAX_SETS};
use racket_score::session::{ScoreSession, SessionError};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;
const EXIT_STORAGE: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a score without recording it
    Score {
        /// Sets in entry order, e.g. 6-3 4-6 "6-6(10-8)"
        #[arg(required = true, num_args = 1..=3)]
        sets: Vec<String>,

        #[arg(long, default_value = "Side 1")]
        side1: String,

        #[arg(long, default_value = "Side 2")]
        side2: String,
    },
    /// Record a finished match in the results log
    Record {
        #[arg(long)]
        side1: String,

        #[arg(long)]
        side2: String,

        /// Sets in entry order, e.g. 6-3 4-6 "6-6(10-8)"
        #[arg(required = true, num_args = 1..=3)]
        sets: Vec<String>,
    },
    /// List recorded matches
    History {
        /// Only matches this participant played (exact name)
        #[arg(long)]
        player: Option<String>,
    },
    /// Show standings built from recorded matches
    Standings,
}

#[derive(Parser, Debug)]
#[command(name = "racket-score")]
#[command(about = "Best-of-three racket-sport scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/racket-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// How to write a deciding set after a 1-1 split (overrides config)
    #[arg(long, global = true, value_enum)]
    style: Option<ScoreStyle>,

    #[command(subcommand)]
    command: Commands,
}

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

fn parse_sets(args: &[String]) -> Result<Vec<Set>> {
    if args.len() > MAX_SETS {
        anyhow::bail!("At most {} sets, got {}", MAX_SETS, args.len());
    }
    args.iter()
        .enumerate()
        .map(|(i, arg)| {
            arg.parse::<Set>()
                .with_context(|| format!("Set {}", i + 1))
        })
        .collect()
}

/// Parse, report validation problems, and build a session.
/// Exits with EXIT_INPUT on unparseable or illegal sets.
fn session_from_args(args: &[String], config: &racket_score::config::Config) -> ScoreSession {
    let sets = match parse_sets(args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid score: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    let session = ScoreSession::from_sets(&sets, config.policy.clone());
    let errors = session.errors();
    if !errors.is_empty() {
        eprintln!("Invalid score:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_INPUT);
    }
    session
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match racket_score::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate policy at startup
    if let Err(errors) = scoring::validate_policy(&config.policy) {
        eprintln!("Policy config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let style = cli.style.unwrap_or(config.decider_style);
    let results_path = racket_score::config::results_path(&config);
    tracing::debug!(?style, results = %results_path.display(), "starting");

    let use_colors = output::should_use_colors();

    match cli.command {
        Commands::Score { sets, side1, side2 } => {
            let session = session_from_args(&sets, &config);
            let summary =
                output::format_match_summary(&session, style, &side1, &side2, use_colors);
            println!("{}", summary);
        }
        Commands::Record { side1, side2, sets } => {
            let mut session = session_from_args(&sets, &config);
            let mut sink = ResultsFile::new(results_path.clone());
            match session.submit(&mut sink, &side1, &side2, style) {
                Ok(record) => {
                    println!(
                        "Recorded: {} def. {}  {}",
                        record.winner_name(),
                        record.loser_name(),
                        record.score
                    );
                }
                Err(SessionError::Sink(e)) => {
                    eprintln!("Storage error: {:#}", e);
                    std::process::exit(EXIT_STORAGE);
                }
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_INPUT);
                }
            }
        }
        Commands::History { player } => {
            let log = match load_results(&results_path) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Storage error: {:#}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            };
            let records = match &player {
                Some(name) => log.matches_for(name).cloned().collect(),
                None => log.matches,
            };
            println!("{}", output::format_history(&records, use_colors));
        }
        Commands::Standings => {
            let log = match load_results(&results_path) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Storage error: {:#}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            };
            let standings = racket_score::standings::compute_standings(&log.matches, &config.policy);
            println!("{}", output::format_standings_table(&standings, use_colors));
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
