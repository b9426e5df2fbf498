use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use song_quiz_core::{Catalog, GameConfig, GameError, RevealMode, TriggerMode};
use tracing_subscriber::EnvFilter;

mod sim;

fn main() -> song_quiz_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            catalog,
            seed,
            trigger,
            reveal,
        } => run_play(&catalog, seed, trigger, reveal),
        Commands::Report { catalog } => run_report(&catalog),
        Commands::Check { catalog } => run_check(&catalog),
    }
}

fn run_play(
    path: &PathBuf,
    seed: Option<u64>,
    trigger: TriggerArg,
    reveal: RevealArg,
) -> song_quiz_core::Result<()> {
    let catalog = Catalog::load(path)?;
    if catalog.is_empty() {
        return Err(GameError::InvalidCatalog("catalog is empty".to_string()));
    }
    tracing::info!(songs = catalog.len(), "catalog loaded");

    let config = GameConfig {
        trigger: trigger.into(),
        reveal: reveal.into(),
        ..GameConfig::default()
    };

    sim::run(catalog, config, seed)
}

fn run_report(path: &PathBuf) -> song_quiz_core::Result<()> {
    let catalog = Catalog::load(path)?;
    let histogram = catalog.year_histogram();

    let (Some((&first, _)), Some((&last, _))) =
        (histogram.first_key_value(), histogram.last_key_value())
    else {
        println!("no songs with a parsable year");
        return Ok(());
    };

    println!("{:<6} | {}", "YEAR", "COUNT");
    println!("{}", "-".repeat(16));
    for year in first..=last {
        let count = histogram.get(&year).copied().unwrap_or(0);
        println!("{year:<6} | {count}");
    }
    println!("{}", "-".repeat(16));
    println!(
        "{} songs total, years {first} - {last}",
        catalog.len()
    );
    Ok(())
}

fn run_check(path: &PathBuf) -> song_quiz_core::Result<()> {
    let catalog = Catalog::load(path)?;
    let issues = catalog.validate();

    if issues.is_empty() {
        println!("catalog ok, {} songs", catalog.len());
        return Ok(());
    }

    for issue in &issues {
        println!("{issue}");
    }
    Err(GameError::InvalidCatalog(format!(
        "{} issue(s) found",
        issues.len()
    )))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "QR song-quiz party game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an interactive game round against a simulated scanner and player.
    Play {
        /// Path to the songs.json catalog file.
        catalog: PathBuf,
        /// Seed for the clip-offset draw, for reproducible rounds.
        #[arg(short, long)]
        seed: Option<u64>,
        /// How playback is triggered once a song is loaded.
        #[arg(long, value_enum, default_value_t = TriggerArg::Flip)]
        trigger: TriggerArg,
        /// Whether the answer appears automatically after the trigger.
        #[arg(long, value_enum, default_value_t = RevealArg::Auto)]
        reveal: RevealArg,
    },
    /// Print how many catalog songs were released in each year.
    Report {
        /// Path to the songs.json catalog file.
        catalog: PathBuf,
    },
    /// Validate the catalog: duplicate ids, bad dates, missing videos.
    Check {
        /// Path to the songs.json catalog file.
        catalog: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum TriggerArg {
    Flip,
    Button,
}

impl From<TriggerArg> for TriggerMode {
    fn from(value: TriggerArg) -> Self {
        match value {
            TriggerArg::Flip => TriggerMode::Flip,
            TriggerArg::Button => TriggerMode::Button,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum RevealArg {
    Auto,
    Manual,
}

impl From<RevealArg> for RevealMode {
    fn from(value: RevealArg) -> Self {
        match value {
            RevealArg::Auto => RevealMode::Auto,
            RevealArg::Manual => RevealMode::Manual,
        }
    }
}
